//! Descriptor-walking parser for the Zod-like family

use serde_json::{Map, Value};

use crate::formats::StringFormat;
use crate::parse::{json_equal, json_type_name, ParseFailure, ParseIssue, ParseResult, PathSegment};
use crate::shape::{FieldType, Shape};

pub(super) fn parse(schema: &FieldType, value: &Value) -> ParseResult {
    let mut issues = Vec::new();
    let mut path = Vec::new();
    match walk(schema, value, &mut path, &mut issues) {
        Some(output) if issues.is_empty() => Ok(output),
        _ => Err(ParseFailure::new(issues)),
    }
}

fn expected(path: &[PathSegment], issues: &mut Vec<ParseIssue>, what: &str, value: &Value) {
    issues.push(ParseIssue::new(
        path,
        format!("Expected {}, received {}", what, json_type_name(value)),
    ));
}

fn check_format(
    format: StringFormat,
    value: &Value,
    path: &[PathSegment],
    issues: &mut Vec<ParseIssue>,
) -> Option<Value> {
    match value.as_str() {
        Some(s) if format.matches(s) => Some(value.clone()),
        Some(_) => {
            issues.push(ParseIssue::new(path, format!("Invalid {}", format.keyword())));
            None
        }
        None => {
            expected(path, issues, "string", value);
            None
        }
    }
}

fn is_integral(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0),
        _ => false,
    }
}

/// Walk one node; issues are appended, `None` means this node failed.
fn walk(
    schema: &FieldType,
    value: &Value,
    path: &mut Vec<PathSegment>,
    issues: &mut Vec<ParseIssue>,
) -> Option<Value> {
    match schema {
        FieldType::String => {
            if value.is_string() {
                Some(value.clone())
            } else {
                expected(path, issues, "string", value);
                None
            }
        }
        FieldType::Number => {
            if value.is_number() {
                Some(value.clone())
            } else {
                expected(path, issues, "number", value);
                None
            }
        }
        FieldType::Boolean => {
            if value.is_boolean() {
                Some(value.clone())
            } else {
                expected(path, issues, "boolean", value);
                None
            }
        }
        FieldType::BigInt => {
            if is_integral(value) {
                Some(value.clone())
            } else {
                expected(path, issues, "bigint", value);
                None
            }
        }
        FieldType::Date => check_format(StringFormat::DateTime, value, path, issues),
        FieldType::Uuid => check_format(StringFormat::Uuid, value, path, issues),
        FieldType::Email => check_format(StringFormat::Email, value, path, issues),
        FieldType::Uri => check_format(StringFormat::Uri, value, path, issues),
        FieldType::Unknown | FieldType::Any => Some(value.clone()),
        FieldType::Symbol => {
            expected(path, issues, "symbol", value);
            None
        }
        FieldType::Never => {
            expected(path, issues, "never", value);
            None
        }
        FieldType::Nullish => {
            if value.is_null() {
                Some(Value::Null)
            } else {
                expected(path, issues, "null", value);
                None
            }
        }
        // A present value must satisfy the inner type; absence is handled by the
        // enclosing object.
        FieldType::Optional { inner } => walk(inner, value, path, issues),
        FieldType::Array { items } => {
            let Some(elements) = value.as_array() else {
                expected(path, issues, "array", value);
                return None;
            };
            let mut output = Vec::with_capacity(elements.len());
            let mut ok = true;
            for (idx, element) in elements.iter().enumerate() {
                path.push(PathSegment::Index(idx));
                match walk(items, element, path, issues) {
                    Some(v) => output.push(v),
                    None => ok = false,
                }
                path.pop();
            }
            ok.then_some(Value::Array(output))
        }
        FieldType::Union { variants } => {
            for variant in variants {
                let mut scratch = Vec::new();
                if let Some(v) = walk(variant, value, path, &mut scratch) {
                    if scratch.is_empty() {
                        return Some(v);
                    }
                }
            }
            issues.push(ParseIssue::new(path, "Invalid input"));
            None
        }
        FieldType::Literal { value: literal } => {
            if json_equal(value, literal) {
                Some(value.clone())
            } else {
                issues.push(ParseIssue::new(
                    path,
                    format!("Invalid literal value, expected {}", literal),
                ));
                None
            }
        }
        FieldType::Enum { values } => {
            if values.values().any(|member| json_equal(member, value)) {
                Some(value.clone())
            } else {
                let members: Vec<String> = values.values().map(|v| v.to_string()).collect();
                issues.push(ParseIssue::new(
                    path,
                    format!("Invalid enum value. Expected {}, received {}", members.join(" | "), value),
                ));
                None
            }
        }
        FieldType::Object { shape } => walk_object(shape, value, path, issues),
        FieldType::Record { key, value: item } => {
            let Some(entries) = value.as_object() else {
                expected(path, issues, "object", value);
                return None;
            };
            let mut output = Map::new();
            let mut ok = true;
            for (name, entry) in entries {
                path.push(PathSegment::Key(name.clone()));
                let key_ok = walk(key, &Value::String(name.clone()), path, issues).is_some();
                match walk(item, entry, path, issues) {
                    Some(v) if key_ok => {
                        output.insert(name.clone(), v);
                    }
                    _ => ok = false,
                }
                path.pop();
            }
            ok.then_some(Value::Object(output))
        }
    }
}

fn walk_object(
    shape: &Shape,
    value: &Value,
    path: &mut Vec<PathSegment>,
    issues: &mut Vec<ParseIssue>,
) -> Option<Value> {
    let Some(input) = value.as_object() else {
        expected(path, issues, "object", value);
        return None;
    };

    // Output follows declaration order; undeclared keys are dropped.
    let mut output = Map::new();
    let mut ok = true;
    for field in shape.fields() {
        path.push(PathSegment::Key(field.name.clone()));
        match input.get(&field.name) {
            Some(present) => match walk(&field.schema, present, path, issues) {
                Some(v) => {
                    output.insert(field.name.clone(), v);
                }
                None => ok = false,
            },
            None if field.schema.accepts_absent() => {}
            None => {
                issues.push(ParseIssue::new(path, "Required"));
                ok = false;
            }
        }
        path.pop();
    }
    ok.then_some(Value::Object(output))
}

#[cfg(test)]
mod tests {
    use crate::parse::PathSegment;
    use crate::zod::z;
    use serde_json::{json, Map, Value};

    fn worker_options() -> crate::zod::ZodSchema {
        z::object([
            ("backoffType", z::union([z::literal("fixed"), z::literal("exponential")])),
            ("retries", z::number()),
            ("interval", z::number()),
            (
                "queueOptions",
                z::object([("connection", z::object([("url", z::uri())]))]).optional(),
            ),
        ])
    }

    #[test]
    fn test_object_strips_and_orders_keys() {
        let output = worker_options()
            .parse(&json!({
                "interval": 1000,
                "extra": true,
                "retries": 1,
                "backoffType": "fixed"
            }))
            .unwrap();
        let keys: Vec<&str> = output.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["backoffType", "retries", "interval"]);
    }

    #[test]
    fn test_missing_required_field() {
        let failure = worker_options()
            .parse(&json!({"backoffType": "fixed", "retries": 1}))
            .unwrap_err();
        assert_eq!(failure.issues.len(), 1);
        assert_eq!(failure.issues[0].path, vec![PathSegment::Key("interval".into())]);
        assert_eq!(failure.issues[0].message, "Required");
    }

    #[test]
    fn test_nested_issue_path() {
        let failure = worker_options()
            .parse(&json!({
                "backoffType": "fixed",
                "retries": 1,
                "interval": 1000,
                "queueOptions": {"connection": {"url": 6379}}
            }))
            .unwrap_err();
        assert_eq!(failure.issues[0].path_string(), "queueOptions.connection.url");
    }

    #[test]
    fn test_union_reports_once() {
        let failure = worker_options()
            .parse(&json!({"backoffType": "linear", "retries": 1, "interval": 1}))
            .unwrap_err();
        assert_eq!(failure.issues.len(), 1);
        assert_eq!(failure.issues[0].message, "Invalid input");
    }

    #[test]
    fn test_array_collects_every_issue() {
        let failure = z::array(z::string()).parse(&json!(["a", 1, "b", false])).unwrap_err();
        let paths: Vec<String> = failure.issues.iter().map(|i| i.path_string()).collect();
        assert_eq!(paths, vec!["[1]", "[3]"]);
    }

    #[test]
    fn test_record_validates_keys_and_values() {
        let schema = z::record(z::enumeration(["en", "de"]), z::number());
        assert_eq!(
            schema.parse(&json!({"en": 1, "de": 2})).unwrap(),
            json!({"en": 1, "de": 2})
        );
        assert!(schema.parse(&json!({"fr": 1})).is_err());
        assert!(schema.parse(&json!({"en": "1"})).is_err());
    }

    #[test]
    fn test_nullish_field() {
        let schema = z::object([("deletedAt", z::nullish())]);
        assert_eq!(schema.parse(&json!({})).unwrap(), json!({}));
        assert_eq!(schema.parse(&json!({"deletedAt": null})).unwrap(), json!({"deletedAt": null}));
        assert!(schema.parse(&json!({"deletedAt": 0})).is_err());
    }

    #[test]
    fn test_primitives() {
        assert!(z::bigint().safe_parse(&json!(9007199254740993u64)));
        assert!(!z::bigint().safe_parse(&json!(1.5)));
        assert!(!z::symbol().safe_parse(&json!("sym")));
        assert!(!z::never().safe_parse(&Value::Null));
        assert!(z::any().safe_parse(&json!({"anything": [1, 2]})));
        assert!(z::date().safe_parse(&json!("2024-01-15T10:30:00Z")));
        assert!(!z::date().safe_parse(&json!("yesterday")));
    }

    #[test]
    fn test_native_enum_numbers() {
        let mut members = Map::new();
        members.insert("Low".into(), json!(1));
        members.insert("High".into(), json!(2));
        let schema = z::native_enum(members);
        assert!(schema.safe_parse(&json!(2)));
        assert!(schema.safe_parse(&json!(2.0)));
        assert!(!schema.safe_parse(&json!("High")));
    }

    #[test]
    fn test_literal_accepts_float_form() {
        assert!(z::literal(1).safe_parse(&json!(1.0)));
        assert!(!z::literal(1).safe_parse(&json!(1.5)));
        assert!(!z::literal(1).safe_parse(&json!("1")));
    }
}
