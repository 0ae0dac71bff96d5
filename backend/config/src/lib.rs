//! `skycast-config` — SkyCast runtime configuration management.
//!
//! Provides:
//! - Typed config schema (agent endpoint, memory, weather tools, UI, logging)
//! - YAML read/write with atomic backup rotation
//! - `${ENV_VAR}` substitution
//! - Config redaction for safe logging/display
//! - Schema validation

pub mod env;
pub mod io;
pub mod redact;
pub mod schema;
pub mod validation;

pub use env::{resolve_env_vars, resolve_env_vars_with, MissingEnvVarError};
pub use io::{config_dir, config_file_path, default_log_dir, load_config, write_config};
pub use redact::redact;
pub use schema::SkycastConfig;
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

/// Load, apply env substitution, and validate a config file.
///
/// This is the main entry point for loading a config at runtime.
pub async fn load_and_prepare(path: &Path) -> Result<SkycastConfig> {
    let raw_config = load_config(path).await?;

    // Serialize to Value for the env substitution pipeline.
    let value: Value = serde_json::to_value(&raw_config)
        .context("failed to serialize config for processing")?;

    let value = resolve_env_vars(&value).context("failed to resolve env vars in config")?;

    let config: SkycastConfig =
        serde_json::from_value(value).context("failed to deserialize config after processing")?;

    let report = validate(&config);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "config warning");
    }
    for error in &report.errors {
        tracing::error!(path = %error.path, message = %error.message, "config error");
    }

    Ok(config)
}
