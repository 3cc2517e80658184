//! Blueprint Schemas
//!
//! Lets a service author each DTO schema once per validator family and pick
//! the right one at bootstrap, with an equivalence checker that keeps the two
//! definitions from drifting apart.
//!
//! ## Features
//!
//! - **Two families**: a Zod-like builder family and a TypeBox-like JSON Schema family
//! - **Resolution**: [`SchemaResolver`] selects a family's factory from a [`ValidatorContext`]
//! - **Aggregation**: [`aggregate`] resolves named factories into one [`SchemaGroup`]
//! - **Equivalence**: [`check_equivalence`] compares both families on a literal value
//!
//! ## Architecture
//!
//! ```text
//! catalog (zod_* / typebox_* factories)
//!     └── SchemaResolver ──┐
//!                          ├── aggregate ──> SchemaGroup<ServiceGroup>
//!     resolved values ─────┘
//!
//! ZodSchema + TypeBoxSchema + value ──> check_equivalence ──> bool
//! ```

pub mod aggregate;
pub mod catalog;
pub mod config;
pub mod context;
pub mod equivalence;
pub mod error;
pub mod family;
pub mod fixture;
pub mod formats;
pub mod options;
pub mod parse;
pub mod resolver;
pub mod shape;
pub mod typebox;
pub mod zod;

pub use aggregate::{aggregate, SchemaEntries, SchemaEntry, SchemaGroup};
pub use config::BlueprintConfig;
pub use context::ValidatorContext;
pub use equivalence::{canonical_string, canonicalize, check_equivalence, EquivalenceReport, Outcome};
pub use error::{Result, SchemaError};
pub use family::{FamilySchema, ParseSchema, ValidatorFamily};
pub use fixture::{load_fixtures, CaseVerdict, EquivalenceFixture};
pub use options::SchemaOptions;
pub use parse::{ParseFailure, ParseIssue, ParseResult, PathSegment};
pub use resolver::SchemaResolver;
pub use shape::{Field, FieldType, Shape};
pub use typebox::{TSchema, Type, TypeBoxSchema};
pub use zod::ZodSchema;
