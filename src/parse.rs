//! Parse outcomes shared by every validator family

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Outcome of parsing a value against a family schema.
///
/// `Ok` carries the normalized value, `Err` the ordered issue list.
pub type ParseResult = std::result::Result<Value, ParseFailure>;

/// One step of a path into a JSON value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "{}", key),
            PathSegment::Index(idx) => write!(f, "[{}]", idx),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(idx: usize) -> Self {
        PathSegment::Index(idx)
    }
}

/// A single validation problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseIssue {
    pub path: Vec<PathSegment>,
    pub message: String,
}

impl ParseIssue {
    pub fn new(path: &[PathSegment], message: impl Into<String>) -> Self {
        Self {
            path: path.to_vec(),
            message: message.into(),
        }
    }

    /// Dotted rendering of the path (`queueOptions.connection.url`, `roles[1]`)
    pub fn path_string(&self) -> String {
        let mut out = String::new();
        for segment in &self.path {
            match segment {
                PathSegment::Key(key) => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(key);
                }
                PathSegment::Index(_) => out.push_str(&segment.to_string()),
            }
        }
        out
    }
}

impl fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path_string(), self.message)
        }
    }
}

/// Failure variant of a parse
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{} validation issue(s): {}", .issues.len(), render_issues(.issues))]
pub struct ParseFailure {
    pub issues: Vec<ParseIssue>,
}

impl ParseFailure {
    pub fn new(issues: Vec<ParseIssue>) -> Self {
        Self { issues }
    }
}

fn render_issues(issues: &[ParseIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// JSON equality as `const` and `enum` see it: numbers compare by value, so
/// `1` equals `1.0`
pub fn json_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| json_equal(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, x)| b.get(key).is_some_and(|y| json_equal(x, y)))
        }
        _ => left == right,
    }
}

/// Human-readable name of a JSON value's type, used in issue messages
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_string() {
        let issue = ParseIssue::new(
            &["roles".into(), 1.into(), "name".into()],
            "Expected string, received number",
        );
        assert_eq!(issue.path_string(), "roles[1].name");
        assert_eq!(issue.to_string(), "roles[1].name: Expected string, received number");
    }

    #[test]
    fn test_root_issue_display() {
        let issue = ParseIssue::new(&[], "Expected object, received null");
        assert_eq!(issue.to_string(), "Expected object, received null");
    }

    #[test]
    fn test_failure_display() {
        let failure = ParseFailure::new(vec![
            ParseIssue::new(&["a".into()], "Required"),
            ParseIssue::new(&["b".into()], "Required"),
        ]);
        assert_eq!(failure.to_string(), "2 validation issue(s): a: Required; b: Required");
    }

    #[test]
    fn test_json_equal_compares_numbers_by_value() {
        use serde_json::json;

        assert!(json_equal(&json!(1), &json!(1.0)));
        assert!(json_equal(&json!([1, {"n": 2}]), &json!([1.0, {"n": 2.0}])));
        assert!(!json_equal(&json!(1), &json!(1.5)));
        assert!(!json_equal(&json!(1), &json!("1")));
        assert!(!json_equal(&json!({"a": 1}), &json!({"a": 1, "b": 2})));
    }
}
