//! Cross-family equivalence checking
//!
//! Used by the test suite and `schema-check` to prove that a Zod-like schema
//! and a TypeBox-like schema authored for the same DTO accept, reject and
//! normalize a given value identically. Object key order is ignored; array
//! order is not.
//!
//! Two rejections count as agreement; issue lists are not compared.

use serde_json::{Map, Value};
use std::fmt;
use tracing::debug;

use crate::family::ParseSchema;
use crate::parse::ParseIssue;

/// Recursively sort object keys; arrays keep their element order
pub fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut sorted = Map::new();
            for key in keys {
                sorted.insert(key.clone(), canonicalize(&map[key]));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        other => other.clone(),
    }
}

/// Compact JSON of the canonical form
pub fn canonical_string(value: &Value) -> String {
    canonicalize(value).to_string()
}

/// One side's result, reduced to what is compared
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Accepted(String),
    Rejected(Vec<ParseIssue>),
}

impl Outcome {
    fn of(schema: &impl ParseSchema, value: &Value) -> Self {
        match schema.parse(value) {
            Ok(parsed) => Outcome::Accepted(canonical_string(&parsed)),
            Err(failure) => Outcome::Rejected(failure.issues),
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted(_))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Accepted(canonical) => write!(f, "accepted {}", canonical),
            Outcome::Rejected(issues) => {
                let rendered: Vec<String> = issues.iter().map(|i| i.to_string()).collect();
                write!(f, "rejected [{}]", rendered.join("; "))
            }
        }
    }
}

/// Both sides of one comparison
#[derive(Debug, Clone, PartialEq)]
pub struct EquivalenceReport {
    pub left: Outcome,
    pub right: Outcome,
}

impl EquivalenceReport {
    pub fn compare(left: &impl ParseSchema, right: &impl ParseSchema, value: &Value) -> Self {
        let report = Self {
            left: Outcome::of(left, value),
            right: Outcome::of(right, value),
        };
        if !report.is_equivalent() {
            debug!(left = %report.left, right = %report.right, "schemas disagree");
        }
        report
    }

    pub fn is_equivalent(&self) -> bool {
        match (&self.left, &self.right) {
            (Outcome::Accepted(a), Outcome::Accepted(b)) => a == b,
            (Outcome::Rejected(_), Outcome::Rejected(_)) => true,
            _ => false,
        }
    }
}

/// `true` when both schemas accept `value` with canonically equal output,
/// or both reject it
pub fn check_equivalence(left: &impl ParseSchema, right: &impl ParseSchema, value: &Value) -> bool {
    EquivalenceReport::compare(left, right, value).is_equivalent()
}
