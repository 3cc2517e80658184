//! String formats shared by both families
//!
//! [`StringFormat::matches`] is the only format check in the crate: the
//! Zod-like walker calls it directly and the TypeBox-like compiler registers
//! it with `jsonschema` for the matching `format` keyword.

use regex::Regex;
use std::sync::OnceLock;

pub const UUID_PATTERN: &str =
    r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$";

pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

pub const URI_PATTERN: &str = r"^[A-Za-z][A-Za-z0-9+.\-]*:[^\s]+$";

pub const DATE_TIME_PATTERN: &str =
    r"^[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}(\.[0-9]+)?(Z|[+\-][0-9]{2}:[0-9]{2})$";

/// A string format checked by pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringFormat {
    Uuid,
    Email,
    Uri,
    DateTime,
}

impl StringFormat {
    /// JSON Schema `format` keyword value
    pub fn keyword(&self) -> &'static str {
        match self {
            StringFormat::Uuid => "uuid",
            StringFormat::Email => "email",
            StringFormat::Uri => "uri",
            StringFormat::DateTime => "date-time",
        }
    }

    pub fn pattern(&self) -> &'static str {
        match self {
            StringFormat::Uuid => UUID_PATTERN,
            StringFormat::Email => EMAIL_PATTERN,
            StringFormat::Uri => URI_PATTERN,
            StringFormat::DateTime => DATE_TIME_PATTERN,
        }
    }

    fn regex(&self) -> &'static Regex {
        static UUID: OnceLock<Regex> = OnceLock::new();
        static EMAIL: OnceLock<Regex> = OnceLock::new();
        static URI: OnceLock<Regex> = OnceLock::new();
        static DATE_TIME: OnceLock<Regex> = OnceLock::new();

        let cell = match self {
            StringFormat::Uuid => &UUID,
            StringFormat::Email => &EMAIL,
            StringFormat::Uri => &URI,
            StringFormat::DateTime => &DATE_TIME,
        };
        cell.get_or_init(|| Regex::new(self.pattern()).expect("format patterns are valid regexes"))
    }

    /// Check a string against this format
    pub fn matches(&self, value: &str) -> bool {
        if !self.regex().is_match(value) {
            return false;
        }
        match self {
            // The pattern alone admits impossible calendar dates.
            StringFormat::DateTime => chrono::DateTime::parse_from_rfc3339(value).is_ok(),
            _ => true,
        }
    }
}
