//! Family-independent shape descriptors
//!
//! A [`FieldType`] describes one value; a [`Shape`] describes an object as an
//! ordered list of named fields. Both validator families can be built from
//! these descriptors, and the serde form doubles as the fixture file format:
//!
//! ```json
//! {"type": "object", "fields": [
//!   {"name": "pageSize", "schema": {"type": "number"}},
//!   {"name": "cursor", "schema": {"type": "optional", "inner": {"type": "string"}}}
//! ]}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Descriptor of a single value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldType {
    String,
    Number,
    Boolean,
    /// RFC 3339 timestamp string
    Date,
    Uuid,
    Email,
    Uri,
    /// Integral number
    BigInt,
    /// Matches nothing representable in JSON
    Symbol,
    Unknown,
    Any,
    Never,
    /// `null`, or absent when used as an object field
    Nullish,
    Optional { inner: Box<FieldType> },
    Array { items: Box<FieldType> },
    Union { variants: Vec<FieldType> },
    Literal { value: Value },
    /// Native enum: member name -> member value
    Enum { values: Map<String, Value> },
    Object {
        #[serde(flatten)]
        shape: Shape,
    },
    Record { key: Box<FieldType>, value: Box<FieldType> },
}

impl FieldType {
    pub fn optional(inner: FieldType) -> Self {
        FieldType::Optional { inner: Box::new(inner) }
    }

    pub fn array(items: FieldType) -> Self {
        FieldType::Array { items: Box::new(items) }
    }

    pub fn union(variants: impl IntoIterator<Item = FieldType>) -> Self {
        FieldType::Union { variants: variants.into_iter().collect() }
    }

    pub fn literal(value: impl Into<Value>) -> Self {
        FieldType::Literal { value: value.into() }
    }

    pub fn enumeration(values: Map<String, Value>) -> Self {
        FieldType::Enum { values }
    }

    pub fn object(shape: Shape) -> Self {
        FieldType::Object { shape }
    }

    pub fn record(key: FieldType, value: FieldType) -> Self {
        FieldType::Record {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Whether an object field of this type may be absent
    pub fn accepts_absent(&self) -> bool {
        matches!(self, FieldType::Optional { .. } | FieldType::Nullish)
    }

    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            FieldType::String
                | FieldType::Number
                | FieldType::Boolean
                | FieldType::Date
                | FieldType::Uuid
                | FieldType::Email
                | FieldType::Uri
                | FieldType::BigInt
                | FieldType::Symbol
                | FieldType::Unknown
                | FieldType::Any
                | FieldType::Never
                | FieldType::Nullish
        )
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::String => write!(f, "string"),
            FieldType::Number => write!(f, "number"),
            FieldType::Boolean => write!(f, "boolean"),
            FieldType::Date => write!(f, "date"),
            FieldType::Uuid => write!(f, "uuid"),
            FieldType::Email => write!(f, "email"),
            FieldType::Uri => write!(f, "uri"),
            FieldType::BigInt => write!(f, "bigint"),
            FieldType::Symbol => write!(f, "symbol"),
            FieldType::Unknown => write!(f, "unknown"),
            FieldType::Any => write!(f, "any"),
            FieldType::Never => write!(f, "never"),
            FieldType::Nullish => write!(f, "nullish"),
            FieldType::Optional { inner } => write!(f, "optional({})", inner),
            FieldType::Array { items } => write!(f, "array({})", items),
            FieldType::Union { variants } => {
                let parts: Vec<String> = variants.iter().map(|v| v.to_string()).collect();
                write!(f, "union({})", parts.join(" | "))
            }
            FieldType::Literal { value } => write!(f, "literal({})", value),
            FieldType::Enum { values } => {
                let parts: Vec<String> = values.values().map(|v| v.to_string()).collect();
                write!(f, "enum({})", parts.join(", "))
            }
            FieldType::Object { shape } => write!(f, "{}", shape),
            FieldType::Record { key, value } => write!(f, "record({}, {})", key, value),
        }
    }
}

/// One named field of a [`Shape`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub schema: FieldType,
}

/// Object descriptor: field names are unique, order is kept for display
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Shape {
    fields: Vec<Field>,
}

impl Shape {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field; an existing field of the same name is replaced in place
    pub fn insert(&mut self, name: impl Into<String>, schema: FieldType) {
        let name = name.into();
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(existing) => existing.schema = schema,
            None => self.fields.push(Field { name, schema }),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, schema: FieldType) -> Self {
        self.insert(name, schema);
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldType> {
        self.fields.iter().find(|f| f.name == name).map(|f| &f.schema)
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<N: Into<String>> FromIterator<(N, FieldType)> for Shape {
    fn from_iter<I: IntoIterator<Item = (N, FieldType)>>(iter: I) -> Self {
        let mut shape = Shape::new();
        for (name, schema) in iter {
            shape.insert(name, schema);
        }
        shape
    }
}

// Field order does not take part in equality.
impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        self.fields.len() == other.fields.len()
            && self
                .fields
                .iter()
                .all(|f| other.get(&f.name) == Some(&f.schema))
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fields.is_empty() {
            return write!(f, "{{}}");
        }
        let parts: Vec<String> = self
            .fields
            .iter()
            .map(|field| format!("{}: {}", field.name, field.schema))
            .collect();
        write!(f, "{{ {} }}", parts.join(", "))
    }
}
