//! Validator families and family-tagged schemas

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::aggregate::SchemaGroup;
use crate::error::SchemaError;
use crate::parse::ParseResult;

/// Tag identifying which validator implementation is in use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidatorFamily {
    /// Zod-like builder schemas
    Zod,
    /// TypeBox-like JSON Schema documents
    TypeBox,
    /// Reserved for tests; never resolves
    Mock,
}

impl ValidatorFamily {
    pub const ALL: [ValidatorFamily; 3] =
        [ValidatorFamily::Zod, ValidatorFamily::TypeBox, ValidatorFamily::Mock];

    pub fn tag(&self) -> &'static str {
        match self {
            ValidatorFamily::Zod => "zod",
            ValidatorFamily::TypeBox => "typebox",
            ValidatorFamily::Mock => "mock",
        }
    }
}

impl fmt::Display for ValidatorFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for ValidatorFamily {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zod" => Ok(ValidatorFamily::Zod),
            "typebox" => Ok(ValidatorFamily::TypeBox),
            "mock" => Ok(ValidatorFamily::Mock),
            _ => Err(SchemaError::InvalidValidator(s.to_string())),
        }
    }
}

/// Anything that can parse a JSON value into a normalized value
pub trait ParseSchema {
    fn parse(&self, value: &Value) -> ParseResult;
}

impl<T: ParseSchema + ?Sized> ParseSchema for &T {
    fn parse(&self, value: &Value) -> ParseResult {
        (**self).parse(value)
    }
}

/// A value resolved for exactly one family
#[derive(Debug, Clone, PartialEq)]
pub enum FamilySchema<A, B> {
    Zod(A),
    TypeBox(B),
}

impl<A, B> FamilySchema<A, B> {
    pub fn family(&self) -> ValidatorFamily {
        match self {
            FamilySchema::Zod(_) => ValidatorFamily::Zod,
            FamilySchema::TypeBox(_) => ValidatorFamily::TypeBox,
        }
    }

    pub fn as_ref(&self) -> FamilySchema<&A, &B> {
        match self {
            FamilySchema::Zod(a) => FamilySchema::Zod(a),
            FamilySchema::TypeBox(b) => FamilySchema::TypeBox(b),
        }
    }

    pub fn zod(&self) -> Option<&A> {
        match self {
            FamilySchema::Zod(a) => Some(a),
            FamilySchema::TypeBox(_) => None,
        }
    }

    pub fn typebox(&self) -> Option<&B> {
        match self {
            FamilySchema::Zod(_) => None,
            FamilySchema::TypeBox(b) => Some(b),
        }
    }
}

impl<A, B> FamilySchema<SchemaGroup<A>, SchemaGroup<B>> {
    /// Look up one named schema inside a resolved group
    pub fn schema(&self, name: &str) -> Option<FamilySchema<&A, &B>> {
        match self {
            FamilySchema::Zod(group) => group.get(name).map(FamilySchema::Zod),
            FamilySchema::TypeBox(group) => group.get(name).map(FamilySchema::TypeBox),
        }
    }

    pub fn names(&self) -> Vec<&str> {
        match self {
            FamilySchema::Zod(group) => group.names(),
            FamilySchema::TypeBox(group) => group.names(),
        }
    }
}

impl<A: ParseSchema, B: ParseSchema> ParseSchema for FamilySchema<A, B> {
    fn parse(&self, value: &Value) -> ParseResult {
        match self {
            FamilySchema::Zod(a) => a.parse(value),
            FamilySchema::TypeBox(b) => b.parse(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typebox::{Type, TypeBoxSchema};
    use crate::zod::{z, ZodSchema};
    use serde_json::json;

    #[test]
    fn test_tag_round_trip() {
        for family in ValidatorFamily::ALL {
            assert_eq!(family.tag().parse::<ValidatorFamily>().unwrap(), family);
        }
        assert_eq!("TypeBox".parse::<ValidatorFamily>().unwrap(), ValidatorFamily::TypeBox);
    }

    #[test]
    fn test_unknown_tag_is_invalid() {
        let err = "yup".parse::<ValidatorFamily>().unwrap_err();
        assert!(matches!(err, SchemaError::InvalidValidator(ref tag) if tag == "yup"));
    }

    #[test]
    fn test_family_schema_dispatches_parse() {
        let zod: FamilySchema<ZodSchema, TypeBoxSchema> = FamilySchema::Zod(z::number());
        let typebox: FamilySchema<ZodSchema, TypeBoxSchema> =
            FamilySchema::TypeBox(Type::string().compile().unwrap());

        assert_eq!(zod.family(), ValidatorFamily::Zod);
        assert!(zod.parse(&json!(3)).is_ok());
        assert!(zod.parse(&json!("3")).is_err());
        assert!(typebox.parse(&json!("3")).is_ok());
        assert!(typebox.parse(&json!(3)).is_err());
    }
}
