//! TypeBox-like validator family
//!
//! Schemas are plain JSON Schema (Draft 7) documents built with [`Type`].
//! A [`TSchema`] is compiled once into a [`TypeBoxSchema`]; parsing then
//! cleans undeclared properties and validates with `jsonschema`. Cleaned
//! objects keep the key order of the input.

mod compile;

pub use compile::TypeBoxSchema;

use serde_json::{json, Map, Value};
use std::fmt;

use crate::error::Result;
use crate::formats::StringFormat;
use crate::shape::FieldType;

/// A JSON Schema document plus TypeBox's optional modifier
#[derive(Debug, Clone, PartialEq)]
pub struct TSchema {
    schema: Value,
    optional: bool,
}

impl TSchema {
    /// Wrap a raw JSON Schema document
    pub fn from_json(schema: Value) -> Self {
        Self { schema, optional: false }
    }

    pub fn json(&self) -> &Value {
        &self.schema
    }

    pub fn into_json(self) -> Value {
        self.schema
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Attach a JSON Schema annotation such as `title` or `description`
    pub fn with_annotation(mut self, keyword: &str, value: impl Into<Value>) -> Self {
        if let Value::Object(map) = &mut self.schema {
            map.insert(keyword.to_string(), value.into());
        }
        self
    }

    pub fn compile(&self) -> Result<TypeBoxSchema> {
        TypeBoxSchema::compile(&self.schema)
    }
}

impl fmt::Display for TSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.schema)
    }
}

// Checked by `formats::StringFormat` once compiled, not by jsonschema.
fn formatted(format: StringFormat) -> TSchema {
    TSchema::from_json(json!({
        "type": "string",
        "format": format.keyword(),
    }))
}

/// Builders mirroring the `Type.*` surface
pub struct Type;

impl Type {
    pub fn string() -> TSchema {
        TSchema::from_json(json!({"type": "string"}))
    }

    pub fn number() -> TSchema {
        TSchema::from_json(json!({"type": "number"}))
    }

    pub fn boolean() -> TSchema {
        TSchema::from_json(json!({"type": "boolean"}))
    }

    pub fn date() -> TSchema {
        formatted(StringFormat::DateTime)
    }

    pub fn uuid() -> TSchema {
        formatted(StringFormat::Uuid)
    }

    pub fn email() -> TSchema {
        formatted(StringFormat::Email)
    }

    pub fn uri() -> TSchema {
        formatted(StringFormat::Uri)
    }

    pub fn big_int() -> TSchema {
        TSchema::from_json(json!({"type": "integer"}))
    }

    /// Symbols have no JSON form, so nothing matches
    pub fn symbol() -> TSchema {
        TSchema::from_json(json!({"not": {}}))
    }

    pub fn unknown() -> TSchema {
        TSchema::from_json(json!({}))
    }

    pub fn any() -> TSchema {
        TSchema::from_json(json!({}))
    }

    pub fn never() -> TSchema {
        TSchema::from_json(json!({"not": {}}))
    }

    pub fn null() -> TSchema {
        TSchema::from_json(json!({"type": "null"}))
    }

    /// `null` or absent
    pub fn nullish() -> TSchema {
        Self::optional(Self::null())
    }

    pub fn optional(mut schema: TSchema) -> TSchema {
        schema.optional = true;
        schema
    }

    pub fn array(items: TSchema) -> TSchema {
        TSchema::from_json(json!({"type": "array", "items": items.into_json()}))
    }

    pub fn union(variants: impl IntoIterator<Item = TSchema>) -> TSchema {
        let any_of: Vec<Value> = variants.into_iter().map(TSchema::into_json).collect();
        TSchema::from_json(json!({"anyOf": any_of}))
    }

    pub fn literal(value: impl Into<Value>) -> TSchema {
        TSchema::from_json(json!({"const": value.into()}))
    }

    /// `Type.Enum(map)`: one `const` branch per member value
    pub fn enumeration(values: &Map<String, Value>) -> TSchema {
        Self::union(values.values().cloned().map(Self::literal))
    }

    /// String-member shorthand for [`Type::enumeration`]
    pub fn string_enum<S: Into<String>>(members: impl IntoIterator<Item = S>) -> TSchema {
        Self::union(members.into_iter().map(|m| Self::literal(m.into())))
    }

    pub fn object<N: Into<String>>(properties: impl IntoIterator<Item = (N, TSchema)>) -> TSchema {
        let mut props = Map::new();
        let mut required: Vec<String> = Vec::new();
        for (name, schema) in properties {
            let name = name.into();
            required.retain(|r| r != &name);
            if !schema.optional {
                required.push(name.clone());
            }
            props.insert(name, schema.into_json());
        }
        TSchema::from_json(json!({
            "type": "object",
            "properties": props,
            "required": required,
        }))
    }

    /// Every key must satisfy `key`, every value `value`
    pub fn record(key: TSchema, value: TSchema) -> TSchema {
        TSchema::from_json(json!({
            "type": "object",
            "propertyNames": key.into_json(),
            "additionalProperties": value.into_json(),
        }))
    }

    /// `Type.Partial(object)`: drop every required entry
    pub fn partial(object: &TSchema) -> TSchema {
        let mut schema = object.schema.clone();
        if let Some(map) = schema.as_object_mut() {
            if map.contains_key("required") {
                map.insert("required".to_string(), json!([]));
            }
        }
        TSchema::from_json(schema)
    }
}

/// Lower a family-independent descriptor into a TypeBox schema
pub fn lower(descriptor: &FieldType) -> TSchema {
    match descriptor {
        FieldType::String => Type::string(),
        FieldType::Number => Type::number(),
        FieldType::Boolean => Type::boolean(),
        FieldType::Date => Type::date(),
        FieldType::Uuid => Type::uuid(),
        FieldType::Email => Type::email(),
        FieldType::Uri => Type::uri(),
        FieldType::BigInt => Type::big_int(),
        FieldType::Symbol => Type::symbol(),
        FieldType::Unknown => Type::unknown(),
        FieldType::Any => Type::any(),
        FieldType::Never => Type::never(),
        FieldType::Nullish => Type::nullish(),
        FieldType::Optional { inner } => Type::optional(lower(inner)),
        FieldType::Array { items } => Type::array(lower(items)),
        FieldType::Union { variants } => Type::union(variants.iter().map(lower)),
        FieldType::Literal { value } => Type::literal(value.clone()),
        FieldType::Enum { values } => Type::enumeration(values),
        FieldType::Object { shape } => Type::object(
            shape
                .fields()
                .iter()
                .map(|f| (f.name.clone(), lower(&f.schema))),
        ),
        FieldType::Record { key, value } => Type::record(lower(key), lower(value)),
    }
}
