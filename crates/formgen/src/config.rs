// File: src/config.rs
// Purpose: Validator configuration parsing from formgen.toml

use crate::evaluator::EvaluationPolicy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::info;

/// Validator configuration
///
/// ```toml
/// [policy]
/// unknown_rules = "ignore"   # or "fail"
/// message_order = "last"     # or "first"
///
/// [messages]
/// required = "Обов'язкове поле"
/// min = "Мінімальне можливе значення: $$min$$"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ValidatorConfig {
    #[serde(default)]
    pub policy: EvaluationPolicy,

    /// Message templates by rule name, replacing the built-in ones
    #[serde(default)]
    pub messages: BTreeMap<String, String>,
}

impl ValidatorConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        info!(
            "Loaded validator config from {:?} ({} message overrides)",
            path,
            config.messages.len()
        );

        Ok(config)
    }

    /// Load configuration from default path (./formgen.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("formgen.toml")
    }

    /// Parse configuration from TOML text; blank text gives the defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        Ok(toml::from_str(content)?)
    }
}
