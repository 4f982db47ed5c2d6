//! Skill configuration types.
//!
//! `SkillConfig` represents the `vocalis.toml` consumed by the dispatcher
//! (application id allow-list, response version, default session end) and
//! by the HTTP binding (`[server]` section). All fields have defaults.

use serde::{Deserialize, Serialize};

/// How intents declared without a name are named.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingStrategy {
    /// Probe a counter through the base-52 alphabet: `a`, `b`, ... `Z`, `ba`.
    #[default]
    Sequential,
    /// Derive the name from a SHA-256 digest of the declaration's templates.
    ContentHash,
}

/// Top-level configuration of a skill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillConfig {
    /// Skill display name.
    #[serde(default)]
    pub name: Option<String>,

    /// Version string echoed in every response.
    #[serde(default = "default_version")]
    pub version: String,

    /// Application ids allowed to call this skill. Empty allows everyone.
    #[serde(default)]
    pub application_ids: Vec<String>,

    /// `shouldEndSession` when a handler reply does not say.
    #[serde(default = "default_true")]
    pub end_session_by_default: bool,

    #[serde(default)]
    pub naming: NamingStrategy,

    #[serde(default)]
    pub server: ServerConfig,
}

fn default_version() -> String {
    "0.0.1".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for SkillConfig {
    fn default() -> Self {
        Self {
            name: None,
            version: default_version(),
            application_ids: Vec::new(),
            end_session_by_default: true,
            naming: NamingStrategy::default(),
            server: ServerConfig::default(),
        }
    }
}

impl SkillConfig {
    /// Whether a request from `application_id` may be handled.
    pub fn is_application_allowed(&self, application_id: &str) -> bool {
        self.application_ids.is_empty() || self.application_ids.iter().any(|id| id == application_id)
    }
}

/// Webhook listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Route path the skill is mounted on.
    #[serde(default = "default_path")]
    pub path: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8888
}

fn default_path() -> String {
    "/".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            path: default_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_config_default_values() {
        let config = SkillConfig::default();
        assert_eq!(config.version, "0.0.1");
        assert!(config.application_ids.is_empty());
        assert!(config.end_session_by_default);
        assert_eq!(config.naming, NamingStrategy::Sequential);
        assert_eq!(config.server.port, 8888);
        assert_eq!(config.server.path, "/");
    }

    #[test]
    fn test_skill_config_deserialize_with_defaults() {
        let config: SkillConfig = toml::from_str("").unwrap();
        assert_eq!(config.version, "0.0.1");
        assert!(config.end_session_by_default);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_skill_config_deserialize_with_values() {
        let toml_str = r#"
name = "MyApp"
version = "1.2.3"
application_ids = ["appId1", "appId2"]
end_session_by_default = false
naming = "content_hash"

[server]
port = 9000
path = "/alexa"
"#;
        let config: SkillConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.name.as_deref(), Some("MyApp"));
        assert_eq!(config.version, "1.2.3");
        assert_eq!(config.application_ids.len(), 2);
        assert!(!config.end_session_by_default);
        assert_eq!(config.naming, NamingStrategy::ContentHash);
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.path, "/alexa");
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_application_allow_list() {
        let open = SkillConfig::default();
        assert!(open.is_application_allowed("anything"));

        let restricted = SkillConfig {
            application_ids: vec!["id1".to_string()],
            ..SkillConfig::default()
        };
        assert!(restricted.is_application_allowed("id1"));
        assert!(!restricted.is_application_allowed("id2"));
    }
}
