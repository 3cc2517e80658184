//! Configuration management for schema resolution
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (blueprint.toml)
//! - Environment variables (BLUEPRINT__*)
//!
//! ## Example config file (blueprint.toml):
//! ```toml
//! [validator]
//! family = "zod"
//!
//! [schemas]
//! uuid_id = true
//!
//! [schemas.enums.billing_provider]
//! stripe = "stripe"
//! none = "none"
//!
//! [equivalence]
//! fixtures = "tests/fixtures"
//! fail_fast = false
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::context::ValidatorContext;
use crate::error::Result;
use crate::options::SchemaOptions;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlueprintConfig {
    /// Validator selection
    #[serde(default)]
    pub validator: ValidatorConfig,

    /// Options handed to every schema factory
    #[serde(default)]
    pub schemas: SchemasConfig,

    /// Equivalence fixture settings
    #[serde(default)]
    pub equivalence: EquivalenceConfig,
}

/// Validator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Family tag: "zod" or "typebox"
    #[serde(default = "default_family")]
    pub family: String,
}

/// Schema factory options
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemasConfig {
    /// Use uuid primary keys instead of numeric ones
    #[serde(default)]
    pub uuid_id: bool,

    /// Enum maps by name (member -> value)
    #[serde(default)]
    pub enums: BTreeMap<String, BTreeMap<String, String>>,
}

/// Equivalence checking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquivalenceConfig {
    /// Fixture file or directory
    #[serde(default = "default_fixtures")]
    pub fixtures: PathBuf,

    /// Stop at the first mismatching case
    #[serde(default)]
    pub fail_fast: bool,
}

fn default_family() -> String {
    "zod".to_string()
}

fn default_fixtures() -> PathBuf {
    PathBuf::from("tests/fixtures")
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            family: default_family(),
        }
    }
}

impl Default for EquivalenceConfig {
    fn default() -> Self {
        Self {
            fixtures: default_fixtures(),
            fail_fast: false,
        }
    }
}

impl SchemasConfig {
    /// Convert into the options record factories receive
    pub fn options(&self) -> SchemaOptions {
        let mut options = SchemaOptions::new(self.uuid_id);
        for (name, members) in &self.enums {
            let map = members
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect();
            options.extra.insert(name.clone(), Value::Object(map));
        }
        options
    }
}

impl BlueprintConfig {
    /// Load configuration from default locations
    pub fn load() -> std::result::Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from a specific file
    pub fn load_from(config_path: Option<&str>) -> std::result::Result<Self, ConfigError> {
        let mut builder = Config::builder();

        // Load from default locations
        let config_locations = ["blueprint.toml", ".blueprint.toml", "config/blueprint.toml"];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // Load from XDG config directory
        if let Some(config_dir) = directories::ProjectDirs::from("dev", "blueprint", "schemas") {
            let xdg_config = config_dir.config_dir().join("blueprint.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        // Load from specified path
        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // Load from environment variables (BLUEPRINT__*)
        builder = builder.add_source(
            Environment::with_prefix("BLUEPRINT")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }

    /// Build the validator context; an unknown family tag is `InvalidValidator`
    pub fn context(&self) -> Result<ValidatorContext> {
        ValidatorContext::from_tag(&self.validator.family, self.schemas.options())
    }
}
