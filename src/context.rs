//! Validator context threaded through resolution
//!
//! Built once at bootstrap and passed down explicitly; nothing in the crate
//! keeps a process-wide validator instance.

use crate::error::Result;
use crate::family::ValidatorFamily;
use crate::options::SchemaOptions;

/// Options plus the validator family in use
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatorContext {
    pub family: ValidatorFamily,
    pub options: SchemaOptions,
}

impl ValidatorContext {
    pub fn new(family: ValidatorFamily, options: SchemaOptions) -> Self {
        Self { family, options }
    }

    /// Build from a textual tag; unknown tags are `InvalidValidator`
    pub fn from_tag(tag: &str, options: SchemaOptions) -> Result<Self> {
        Ok(Self::new(tag.parse()?, options))
    }

    pub fn zod(options: SchemaOptions) -> Self {
        Self::new(ValidatorFamily::Zod, options)
    }

    pub fn typebox(options: SchemaOptions) -> Self {
        Self::new(ValidatorFamily::TypeBox, options)
    }
}
