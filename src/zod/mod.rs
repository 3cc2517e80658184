//! Zod-like validator family
//!
//! Schemas are descriptor trees assembled with the [`z`] builders and parsed
//! by walking the tree. Objects strip unknown keys and emit their keys in
//! declaration order.
//!
//! ```
//! use blueprint_schemas::zod::z;
//! use serde_json::json;
//!
//! let schema = z::object([
//!     ("pageSize", z::number()),
//!     ("cursor", z::string().optional()),
//! ]);
//! assert!(schema.parse(&json!({"pageSize": 10})).is_ok());
//! ```

mod parse;

use serde_json::Value;
use std::fmt;

use crate::family::ParseSchema;
use crate::parse::ParseResult;
use crate::shape::{FieldType, Shape};

/// A Zod-like schema
#[derive(Debug, Clone, PartialEq)]
pub struct ZodSchema(FieldType);

impl ZodSchema {
    pub fn new(descriptor: FieldType) -> Self {
        Self(descriptor)
    }

    pub fn descriptor(&self) -> &FieldType {
        &self.0
    }

    pub fn into_descriptor(self) -> FieldType {
        self.0
    }

    pub fn optional(self) -> Self {
        Self(FieldType::optional(self.0))
    }

    pub fn array(self) -> Self {
        Self(FieldType::array(self.0))
    }

    /// Parse a value, returning the normalized output or every issue found
    pub fn parse(&self, value: &Value) -> ParseResult {
        parse::parse(&self.0, value)
    }

    pub fn safe_parse(&self, value: &Value) -> bool {
        self.parse(value).is_ok()
    }
}

impl From<FieldType> for ZodSchema {
    fn from(descriptor: FieldType) -> Self {
        Self(descriptor)
    }
}

impl ParseSchema for ZodSchema {
    fn parse(&self, value: &Value) -> ParseResult {
        ZodSchema::parse(self, value)
    }
}

impl fmt::Display for ZodSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Builders mirroring the `z.*` surface
pub mod z {
    use serde_json::{Map, Value};

    use super::ZodSchema;
    use crate::shape::{FieldType, Shape};

    pub fn string() -> ZodSchema {
        ZodSchema(FieldType::String)
    }

    pub fn number() -> ZodSchema {
        ZodSchema(FieldType::Number)
    }

    pub fn boolean() -> ZodSchema {
        ZodSchema(FieldType::Boolean)
    }

    pub fn date() -> ZodSchema {
        ZodSchema(FieldType::Date)
    }

    pub fn uuid() -> ZodSchema {
        ZodSchema(FieldType::Uuid)
    }

    pub fn email() -> ZodSchema {
        ZodSchema(FieldType::Email)
    }

    pub fn uri() -> ZodSchema {
        ZodSchema(FieldType::Uri)
    }

    pub fn bigint() -> ZodSchema {
        ZodSchema(FieldType::BigInt)
    }

    pub fn symbol() -> ZodSchema {
        ZodSchema(FieldType::Symbol)
    }

    pub fn unknown() -> ZodSchema {
        ZodSchema(FieldType::Unknown)
    }

    pub fn any() -> ZodSchema {
        ZodSchema(FieldType::Any)
    }

    pub fn never() -> ZodSchema {
        ZodSchema(FieldType::Never)
    }

    pub fn nullish() -> ZodSchema {
        ZodSchema(FieldType::Nullish)
    }

    pub fn optional(schema: ZodSchema) -> ZodSchema {
        schema.optional()
    }

    pub fn array(schema: ZodSchema) -> ZodSchema {
        schema.array()
    }

    pub fn union(options: impl IntoIterator<Item = ZodSchema>) -> ZodSchema {
        ZodSchema(FieldType::union(options.into_iter().map(ZodSchema::into_descriptor)))
    }

    pub fn literal(value: impl Into<Value>) -> ZodSchema {
        ZodSchema(FieldType::literal(value))
    }

    /// `z.nativeEnum(map)`
    pub fn native_enum(values: Map<String, Value>) -> ZodSchema {
        ZodSchema(FieldType::enumeration(values))
    }

    /// `z.enum([...])` over string members
    pub fn enumeration<S: Into<String>>(members: impl IntoIterator<Item = S>) -> ZodSchema {
        let values = members
            .into_iter()
            .map(|m| {
                let m = m.into();
                (m.clone(), Value::String(m))
            })
            .collect();
        ZodSchema(FieldType::enumeration(values))
    }

    pub fn object<N: Into<String>>(fields: impl IntoIterator<Item = (N, ZodSchema)>) -> ZodSchema {
        let shape: Shape = fields
            .into_iter()
            .map(|(name, schema)| (name, schema.into_descriptor()))
            .collect();
        ZodSchema(FieldType::object(shape))
    }

    pub fn record(key: ZodSchema, value: ZodSchema) -> ZodSchema {
        ZodSchema(FieldType::record(key.into_descriptor(), value.into_descriptor()))
    }
}

impl ZodSchema {
    /// Object shape, if this schema is an object
    pub fn shape(&self) -> Option<&Shape> {
        match &self.0 {
            FieldType::Object { shape } => Some(shape),
            _ => None,
        }
    }

    /// `schema.partial()`: every object field becomes optional
    pub fn partial(&self) -> Self {
        match &self.0 {
            FieldType::Object { shape } => {
                let partial: Shape = shape
                    .fields()
                    .iter()
                    .map(|f| {
                        let schema = if f.schema.accepts_absent() {
                            f.schema.clone()
                        } else {
                            FieldType::optional(f.schema.clone())
                        };
                        (f.name.clone(), schema)
                    })
                    .collect();
                Self(FieldType::object(partial))
            }
            other => Self(other.clone()),
        }
    }

    /// `schema.extend({...})`: add or replace object fields
    pub fn extend<N: Into<String>>(&self, fields: impl IntoIterator<Item = (N, ZodSchema)>) -> Self {
        match &self.0 {
            FieldType::Object { shape } => {
                let mut shape = shape.clone();
                for (name, schema) in fields {
                    shape.insert(name, schema.into_descriptor());
                }
                Self(FieldType::object(shape))
            }
            other => Self(other.clone()),
        }
    }
}
