//! Options handed to every shape factory

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, SchemaError};

/// The shared Options record.
///
/// `uuid_id` selects uuid vs numeric primary keys; `extra` carries anything
/// else a factory needs, typically enum maps keyed by snake_case name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaOptions {
    #[serde(default)]
    pub uuid_id: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SchemaOptions {
    pub fn new(uuid_id: bool) -> Self {
        Self {
            uuid_id,
            extra: Map::new(),
        }
    }

    pub fn with_extra(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }

    /// Register an enum map (member name -> member value)
    pub fn with_enum<K, V>(self, name: impl Into<String>, members: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let map: Map<String, Value> = members
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.with_extra(name, Value::Object(map))
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }

    pub fn enum_map(&self, name: &str) -> Option<&Map<String, Value>> {
        self.extra.get(name).and_then(Value::as_object)
    }

    pub fn require_enum(&self, name: &str) -> Result<&Map<String, Value>> {
        self.enum_map(name).ok_or_else(|| SchemaError::MissingOption {
            name: name.to_string(),
        })
    }
}
