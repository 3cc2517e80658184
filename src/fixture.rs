//! Equivalence fixtures
//!
//! A fixture is a JSON file pairing a Zod-like descriptor with a TypeBox-like
//! JSON Schema, plus literal values both are expected to treat alike:
//!
//! ```json
//! {
//!   "name": "paging",
//!   "zod": {"type": "object", "fields": [{"name": "pageSize", "schema": {"type": "number"}}]},
//!   "typebox": {"type": "object", "properties": {"pageSize": {"type": "number"}}, "required": ["pageSize"]},
//!   "cases": [{"description": "ten per page", "value": {"pageSize": 10}}]
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::equivalence::EquivalenceReport;
use crate::error::{Result, SchemaError};
use crate::shape::FieldType;
use crate::typebox::TypeBoxSchema;
use crate::zod::ZodSchema;

/// One literal value to compare
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureCase {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub value: Value,
}

/// A dual-authored schema pair with its cases
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquivalenceFixture {
    pub name: String,
    pub zod: FieldType,
    pub typebox: Value,
    #[serde(default)]
    pub cases: Vec<FixtureCase>,
    /// File the fixture was read from
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

/// Verdict for a single case
#[derive(Debug, Clone)]
pub struct CaseVerdict {
    pub fixture: String,
    pub case: String,
    pub report: EquivalenceReport,
}

impl CaseVerdict {
    pub fn is_equivalent(&self) -> bool {
        self.report.is_equivalent()
    }
}

impl EquivalenceFixture {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut fixture: Self = serde_json::from_str(&content).map_err(|e| SchemaError::InvalidFixture {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        fixture.source_path = Some(path.to_path_buf());
        Ok(fixture)
    }

    /// Compare both schemas on every case
    pub fn run(&self) -> Result<Vec<CaseVerdict>> {
        let zod = ZodSchema::new(self.zod.clone());
        let typebox = TypeBoxSchema::compile(&self.typebox).map_err(|e| SchemaError::InvalidFixture {
            path: self.location(),
            reason: e.to_string(),
        })?;

        let verdicts = self
            .cases
            .iter()
            .enumerate()
            .map(|(idx, case)| CaseVerdict {
                fixture: self.name.clone(),
                case: case
                    .description
                    .clone()
                    .unwrap_or_else(|| format!("case #{}", idx + 1)),
                report: EquivalenceReport::compare(&zod, &typebox, &case.value),
            })
            .collect::<Vec<_>>();

        debug!(
            fixture = %self.name,
            cases = verdicts.len(),
            mismatches = verdicts.iter().filter(|v| !v.is_equivalent()).count(),
            "ran equivalence fixture"
        );
        Ok(verdicts)
    }

    fn location(&self) -> String {
        self.source_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| self.name.clone())
    }
}

/// Load a fixture file, or every `*.json` fixture under a directory
pub fn load_fixtures(path: &Path) -> Result<Vec<EquivalenceFixture>> {
    if path.is_file() {
        return Ok(vec![EquivalenceFixture::from_file(path)?]);
    }
    if !path.is_dir() {
        return Err(SchemaError::InvalidFixture {
            path: path.display().to_string(),
            reason: "no such file or directory".to_string(),
        });
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().map(|x| x == "json").unwrap_or(false))
        .map(|e| e.into_path())
        .collect();
    files.sort();

    let mut fixtures = Vec::with_capacity(files.len());
    for file in files {
        let fixture = EquivalenceFixture::from_file(&file)?;
        if fixture.cases.is_empty() {
            warn!(path = %file.display(), "fixture has no cases");
        }
        fixtures.push(fixture);
    }
    Ok(fixtures)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn paging_fixture() -> Value {
        json!({
            "name": "paging",
            "zod": {"type": "object", "fields": [
                {"name": "pageSize", "schema": {"type": "number"}}
            ]},
            "typebox": {
                "type": "object",
                "properties": {"pageSize": {"type": "number"}},
                "required": ["pageSize"]
            },
            "cases": [
                {"description": "ten per page", "value": {"pageSize": 10}},
                {"value": {"pageSize": "ten"}}
            ]
        })
    }

    #[test]
    fn test_run_fixture() {
        let fixture: EquivalenceFixture = serde_json::from_value(paging_fixture()).unwrap();
        let verdicts = fixture.run().unwrap();
        assert_eq!(verdicts.len(), 2);
        assert_eq!(verdicts[0].case, "ten per page");
        assert_eq!(verdicts[1].case, "case #2");
        assert!(verdicts.iter().all(CaseVerdict::is_equivalent));
    }

    #[test]
    fn test_load_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.json"), paging_fixture().to_string()).unwrap();
        std::fs::write(dir.path().join("a.json"), paging_fixture().to_string()).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let fixtures = load_fixtures(dir.path()).unwrap();
        assert_eq!(fixtures.len(), 2);
        assert!(fixtures[0].source_path.as_ref().unwrap().ends_with("a.json"));
    }

    #[test]
    fn test_invalid_fixture_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, r#"{"name": "broken"}"#).unwrap();
        let err = load_fixtures(&path).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidFixture { ref path, .. } if path.ends_with("broken.json")));
    }

    #[test]
    fn test_malformed_typebox_schema() {
        let mut raw = paging_fixture();
        raw["typebox"] = json!({"type": 7});
        let fixture: EquivalenceFixture = serde_json::from_value(raw).unwrap();
        assert!(matches!(fixture.run(), Err(SchemaError::InvalidFixture { .. })));
    }
}
