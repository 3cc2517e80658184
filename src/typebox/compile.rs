//! Compiled TypeBox-like schemas: clean, then validate

use jsonschema::{Draft, JSONSchema};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

use crate::error::{Result, SchemaError};
use crate::family::ParseSchema;
use crate::formats::StringFormat;
use crate::parse::{ParseFailure, ParseIssue, ParseResult, PathSegment};

// String formats are checked with the same functions the Zod-like walker uses,
// replacing jsonschema's own format checkers.
fn compile_validator(schema: &Value) -> Result<JSONSchema> {
    JSONSchema::options()
        .with_draft(Draft::Draft7)
        .with_format(StringFormat::Uuid.keyword(), |s| StringFormat::Uuid.matches(s))
        .with_format(StringFormat::Email.keyword(), |s| StringFormat::Email.matches(s))
        .with_format(StringFormat::Uri.keyword(), |s| StringFormat::Uri.matches(s))
        .with_format(StringFormat::DateTime.keyword(), |s| StringFormat::DateTime.matches(s))
        .compile(schema)
        .map_err(|e| SchemaError::InvalidSchema(e.to_string()))
}

/// How to strip undeclared properties from a value before validation
enum CleanPlan {
    Keep,
    Object(Vec<(String, CleanPlan)>),
    Array(Box<CleanPlan>),
    Record(Box<CleanPlan>),
    /// Branches are tried in order; the first one that accepts the value cleans it
    Union(Vec<(JSONSchema, CleanPlan)>),
}

impl CleanPlan {
    fn build(schema: &Value) -> Result<Self> {
        let Some(map) = schema.as_object() else {
            return Ok(CleanPlan::Keep);
        };

        if let Some(branches) = map.get("anyOf").and_then(Value::as_array) {
            let mut compiled = Vec::with_capacity(branches.len());
            for branch in branches {
                let plan = CleanPlan::build(branch)?;
                compiled.push((compile_validator(branch)?, plan));
            }
            // const-only unions (enums, literal sets) never need cleaning
            if compiled.iter().all(|(_, plan)| matches!(plan, CleanPlan::Keep)) {
                return Ok(CleanPlan::Keep);
            }
            return Ok(CleanPlan::Union(compiled));
        }

        if let Some(properties) = map.get("properties").and_then(Value::as_object) {
            let mut plans = Vec::with_capacity(properties.len());
            for (name, property) in properties {
                plans.push((name.clone(), CleanPlan::build(property)?));
            }
            return Ok(CleanPlan::Object(plans));
        }

        if let Some(value_schema) = map.get("additionalProperties").filter(|v| v.is_object()) {
            return Ok(CleanPlan::Record(Box::new(CleanPlan::build(value_schema)?)));
        }

        if let Some(patterns) = map.get("patternProperties").and_then(Value::as_object) {
            let plan = match patterns.values().next() {
                Some(value_schema) => CleanPlan::build(value_schema)?,
                None => CleanPlan::Keep,
            };
            return Ok(CleanPlan::Record(Box::new(plan)));
        }

        if let Some(items) = map.get("items").filter(|items| items.is_object()) {
            return Ok(CleanPlan::Array(Box::new(CleanPlan::build(items)?)));
        }

        Ok(CleanPlan::Keep)
    }

    fn clean(&self, value: &Value) -> Value {
        match (self, value) {
            (CleanPlan::Keep, _) => value.clone(),
            (CleanPlan::Object(plans), Value::Object(input)) => {
                let mut output = Map::new();
                for (key, entry) in input {
                    if let Some((_, plan)) = plans.iter().find(|(name, _)| name == key) {
                        output.insert(key.clone(), plan.clean(entry));
                    }
                }
                Value::Object(output)
            }
            (CleanPlan::Array(plan), Value::Array(elements)) => {
                Value::Array(elements.iter().map(|e| plan.clean(e)).collect())
            }
            (CleanPlan::Record(plan), Value::Object(input)) => Value::Object(
                input
                    .iter()
                    .map(|(key, entry)| (key.clone(), plan.clean(entry)))
                    .collect(),
            ),
            (CleanPlan::Union(branches), _) => branches
                .iter()
                .find(|(validator, _)| validator.is_valid(value))
                .map(|(_, plan)| plan.clean(value))
                .unwrap_or_else(|| value.clone()),
            // Wrong container type: leave it for validation to report
            _ => value.clone(),
        }
    }
}

/// A compiled TypeBox-like schema
#[derive(Clone)]
pub struct TypeBoxSchema {
    schema: Value,
    validator: Arc<JSONSchema>,
    plan: Arc<CleanPlan>,
}

impl TypeBoxSchema {
    /// Compile a JSON Schema document; a malformed document is an error
    pub fn compile(schema: &Value) -> Result<Self> {
        let validator = compile_validator(schema)?;
        let plan = CleanPlan::build(schema)?;
        Ok(Self {
            schema: schema.clone(),
            validator: Arc::new(validator),
            plan: Arc::new(plan),
        })
    }

    pub fn json(&self) -> &Value {
        &self.schema
    }

    /// `Value.Clean`: drop properties the schema does not declare
    pub fn clean(&self, value: &Value) -> Value {
        self.plan.clean(value)
    }

    /// `Value.Check` without cleaning
    pub fn check(&self, value: &Value) -> bool {
        self.validator.is_valid(value)
    }

    /// `Value.Parse`: clean, then validate the cleaned value
    pub fn parse(&self, value: &Value) -> ParseResult {
        let cleaned = self.clean(value);
        let issues: Vec<ParseIssue> = match self.validator.validate(&cleaned) {
            Ok(()) => Vec::new(),
            Err(errors) => errors
                .map(|error| {
                    let path = pointer_path(&cleaned, error.instance_path.clone().into_vec());
                    ParseIssue::new(&path, error.to_string())
                })
                .collect(),
        };
        if issues.is_empty() {
            Ok(cleaned)
        } else {
            Err(ParseFailure::new(issues))
        }
    }
}

/// Rebuild typed path segments from pointer chunks by walking the instance
fn pointer_path(instance: &Value, chunks: Vec<String>) -> Vec<PathSegment> {
    let mut current = Some(instance);
    let mut path = Vec::with_capacity(chunks.len());
    for chunk in chunks {
        let segment = match (current, chunk.parse::<usize>()) {
            (Some(Value::Array(_)), Ok(idx)) => PathSegment::Index(idx),
            _ => PathSegment::Key(chunk),
        };
        current = match (&segment, current) {
            (PathSegment::Index(idx), Some(Value::Array(items))) => items.get(*idx),
            (PathSegment::Key(key), Some(Value::Object(map))) => map.get(key),
            _ => None,
        };
        path.push(segment);
    }
    path
}

impl ParseSchema for TypeBoxSchema {
    fn parse(&self, value: &Value) -> ParseResult {
        TypeBoxSchema::parse(self, value)
    }
}

impl PartialEq for TypeBoxSchema {
    fn eq(&self, other: &Self) -> bool {
        self.schema == other.schema
    }
}

impl fmt::Debug for TypeBoxSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeBoxSchema")
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typebox::Type;
    use serde_json::json;

    fn worker_options() -> TypeBoxSchema {
        Type::object([
            ("backoffType", Type::string_enum(["fixed", "exponential"])),
            ("retries", Type::number()),
            ("interval", Type::number()),
            (
                "queueOptions",
                Type::optional(Type::object([(
                    "connection",
                    Type::object([("url", Type::uri())]),
                )])),
            ),
        ])
        .compile()
        .unwrap()
    }

    #[test]
    fn test_clean_keeps_input_order() {
        let output = worker_options()
            .parse(&json!({
                "interval": 1000,
                "extra": true,
                "retries": 1,
                "backoffType": "fixed"
            }))
            .unwrap();
        let keys: Vec<&str> = output.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["interval", "retries", "backoffType"]);
    }

    #[test]
    fn test_nested_clean() {
        let output = worker_options()
            .parse(&json!({
                "backoffType": "exponential",
                "retries": 3,
                "interval": 50,
                "queueOptions": {"connection": {"url": "redis://localhost:6379", "tls": false}, "prefix": "q"}
            }))
            .unwrap();
        assert_eq!(
            output["queueOptions"],
            json!({"connection": {"url": "redis://localhost:6379"}})
        );
    }

    #[test]
    fn test_issue_paths() {
        let failure = worker_options()
            .parse(&json!({"backoffType": "fixed", "retries": "1", "interval": 1}))
            .unwrap_err();
        assert_eq!(failure.issues.len(), 1);
        assert_eq!(failure.issues[0].path, vec![PathSegment::Key("retries".into())]);
    }

    #[test]
    fn test_array_index_path() {
        let schema = Type::array(Type::string()).compile().unwrap();
        let failure = schema.parse(&json!(["a", 2])).unwrap_err();
        assert_eq!(failure.issues[0].path, vec![PathSegment::Index(1)]);
    }

    #[test]
    fn test_union_cleans_with_matching_branch() {
        let schema = Type::union([
            Type::object([("kind", Type::literal("card")), ("last4", Type::string())]),
            Type::object([("kind", Type::literal("bank")), ("iban", Type::string())]),
        ])
        .compile()
        .unwrap();
        let output = schema
            .parse(&json!({"kind": "bank", "iban": "DE00", "last4": "1234"}))
            .unwrap();
        assert_eq!(output, json!({"kind": "bank", "iban": "DE00"}));
    }

    #[test]
    fn test_record_keeps_all_keys() {
        let schema = Type::record(Type::string(), Type::object([("n", Type::number())]))
            .compile()
            .unwrap();
        let output = schema.parse(&json!({"a": {"n": 1, "x": 0}, "b": {"n": 2}})).unwrap();
        assert_eq!(output, json!({"a": {"n": 1}, "b": {"n": 2}}));
    }

    #[test]
    fn test_parse_returns_cleaned_value() {
        let schema = Type::object([("a", Type::number())]).compile().unwrap();
        assert_eq!(schema.parse(&json!({"a": 1, "b": 2})).unwrap(), json!({"a": 1}));
        assert!(schema.parse(&json!({"b": 2})).is_err());
    }

    #[test]
    fn test_formats_use_shared_checks() {
        // jsonschema's own uri checker rejects these; the shared pattern accepts them
        let uri = Type::uri().compile().unwrap();
        for value in ["redis://localhost:99999", "http://[::1", "http://exa%mple.com"] {
            assert_eq!(uri.check(&json!(value)), StringFormat::Uri.matches(value), "{}", value);
        }
        assert!(!uri.check(&json!("localhost 6379")));

        let uuid = Type::uuid().compile().unwrap();
        assert!(uuid.check(&json!("5f0c6a0e-8d1b-4c4f-9b6a-1f2e3d4c5b6a")));
        assert!(!uuid.check(&json!("5f0c6a0e")));

        let email = Type::email().compile().unwrap();
        for value in ["a\u{FEFF}b@example.com", "a\u{2028}b@example.com", "ops@example.com"] {
            assert_eq!(email.check(&json!(value)), StringFormat::Email.matches(value), "{:?}", value);
        }
    }

    #[test]
    fn test_record_key_with_newline_is_checked() {
        let schema = Type::record(Type::string(), Type::number()).compile().unwrap();
        assert!(schema.parse(&json!({"line\nbreak": 1})).is_ok());
        assert!(schema.parse(&json!({"line\nbreak": "one"})).is_err());
    }

    #[test]
    fn test_malformed_schema_fails_to_compile() {
        let err = TypeBoxSchema::compile(&json!({"type": 12})).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidSchema(_)));
    }

    #[test]
    fn test_check_does_not_clean() {
        let schema = Type::object([("a", Type::number())]).compile().unwrap();
        assert!(schema.check(&json!({"a": 1, "b": 2})));
        assert_eq!(schema.clean(&json!({"a": 1, "b": 2})), json!({"a": 1}));
    }
}
