//! Config file read/write with atomic backup rotation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs;
use tracing::{debug, info, warn};

use crate::schema::SkycastConfig;

/// Default config file name within the config directory.
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Number of rolling backups to keep.
const MAX_BACKUPS: usize = 3;

/// Resolve the SkyCast config directory.
/// Priority: `SKYCAST_CONFIG_DIR` env > `~/.skycast/`
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("SKYCAST_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".skycast");
    }
    PathBuf::from(".skycast")
}

/// Resolve the full path to the main config file.
pub fn config_file_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILE_NAME)
}

/// Default log directory beneath the config directory.
pub fn default_log_dir(config_dir: &Path) -> PathBuf {
    config_dir.join("logs")
}

/// Load and parse the config from disk.
///
/// Returns `Ok(Default::default())` if the file doesn't exist (first run).
pub async fn load_config(path: &Path) -> Result<SkycastConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "config file does not exist; using defaults");
        return Ok(SkycastConfig::default());
    }

    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read config file: {}", path.display()))?;

    let config: SkycastConfig = serde_yaml::from_str(&raw)
        .with_context(|| format!("failed to parse config YAML at: {}", path.display()))?;

    info!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Write config to disk atomically (write to temp file, rename).
///
/// Rotates a rolling backup of the previous config before overwriting.
pub async fn write_config(config: &SkycastConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create config directory: {}", parent.display()))?;
    }

    if path.exists() {
        rotate_backups(path).await?;
    }

    let yaml = serde_yaml::to_string(config).context("failed to serialize config to YAML")?;

    let tmp_path = path.with_extension("yaml.tmp");
    fs::write(&tmp_path, yaml.as_bytes())
        .await
        .with_context(|| format!("failed to write temp config: {}", tmp_path.display()))?;

    fs::rename(&tmp_path, path)
        .await
        .with_context(|| format!("failed to rename temp config to: {}", path.display()))?;

    info!(path = %path.display(), "wrote config");
    Ok(())
}

/// Rotate backup files: config.yaml.bak.1 → .bak.2 → ... → .bak.N
async fn rotate_backups(path: &Path) -> Result<()> {
    for i in (1..MAX_BACKUPS).rev() {
        let old = path.with_extension(format!("yaml.bak.{}", i));
        let new = path.with_extension(format!("yaml.bak.{}", i + 1));
        if old.exists() {
            if let Err(e) = fs::rename(&old, &new).await {
                warn!("failed to rotate backup {}: {}", old.display(), e);
            }
        }
    }

    let bak = path.with_extension("yaml.bak.1");
    if let Err(e) = fs::copy(path, &bak).await {
        warn!("failed to create backup {}: {}", bak.display(), e);
    }

    Ok(())
}
