//! Skill configuration loader.
//!
//! Reads `vocalis.toml` and deserializes it into [`SkillConfig`]. Falls
//! back to defaults when the file is missing or malformed.

use std::path::{Path, PathBuf};

use vocalis_types::config::SkillConfig;

pub const CONFIG_FILE: &str = "vocalis.toml";

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "VOCALIS_CONFIG";

/// Environment variable overriding the configured listen port.
pub const PORT_ENV: &str = "PORT";

/// Load configuration from `path`.
///
/// - Missing file: debug log, defaults.
/// - Unreadable or unparsable file: warning, defaults.
pub async fn load_skill_config(path: &Path) -> SkillConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No {} found at {}, using defaults", CONFIG_FILE, path.display());
            return SkillConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return SkillConfig::default();
        }
    };

    match toml::from_str::<SkillConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            SkillConfig::default()
        }
    }
}

/// Resolve which config file to read.
///
/// Priority:
/// 1. An explicit path (CLI flag)
/// 2. `VOCALIS_CONFIG` environment variable
/// 3. `./vocalis.toml` if it exists
/// 4. `{config_dir}/vocalis/vocalis.toml`
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return PathBuf::from(path);
    }

    let local = PathBuf::from(CONFIG_FILE);
    if local.exists() {
        return local;
    }

    match dirs::config_dir() {
        Some(dir) => dir.join("vocalis").join(CONFIG_FILE),
        None => local,
    }
}

/// Resolve the listen port.
///
/// Priority: CLI flag, then a parsable `PORT` value, then the config file.
pub fn resolve_port(cli: Option<u16>, env: Option<&str>, config: &SkillConfig) -> u16 {
    if let Some(port) = cli {
        return port;
    }
    if let Some(raw) = env {
        match raw.trim().parse::<u16>() {
            Ok(port) => return port,
            Err(_) => tracing::warn!("Ignoring invalid {PORT_ENV} value '{raw}'"),
        }
    }
    config.server.port
}
