//! SkyCast configuration schema.
//!
//! Typed for serde YAML deserialization. Every section is optional; the
//! resolution helpers fold in defaults so a missing file still yields a
//! usable local setup.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use skycast_core::endpoint::DEFAULT_LOCAL_URL;
use skycast_core::{AgentEndpoint, SkycastError};

pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_ACTOR_ID: &str = "default";
pub const DEFAULT_MEMORY_SESSION: &str = "default";
pub const DEFAULT_LAST_K_TURNS: usize = 5;
pub const DEFAULT_REFRESH_DELAY_MS: u64 = 10;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Root configuration for SkyCast.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkycastConfig {
    /// Agent runtime endpoint selection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<AgentConfig>,

    /// Conversational memory service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<MemoryConfig>,

    /// OpenWeather credentials for the local tool implementations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<WeatherConfig>,

    /// Chat UI behavior
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui: Option<UiConfig>,

    /// Logging configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,
}

/// Which agent runtime prompts are streamed from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentConfig {
    /// "local" (default) or "cloud"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_url: Option<String>,

    /// Opaque resource id of the managed runtime (cloud mode)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Bearer token for cloud invocations, usually `${SKYCAST_BEARER_TOKEN}`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<String>,
}

impl AgentConfig {
    /// Resolve this section into an endpoint identity.
    pub fn endpoint(&self) -> Result<AgentEndpoint, SkycastError> {
        match self.mode.as_deref().unwrap_or("local") {
            "local" => Ok(AgentEndpoint::Local {
                url: self
                    .local_url
                    .clone()
                    .unwrap_or_else(|| DEFAULT_LOCAL_URL.to_string()),
            }),
            "cloud" => {
                let Some(runtime_id) = self.runtime_id.clone() else {
                    return Err(SkycastError::Config(
                        "agent.mode is 'cloud' but agent.runtimeId is not set".into(),
                    ));
                };
                Ok(AgentEndpoint::CloudRuntime {
                    runtime_id,
                    region: self
                        .region
                        .clone()
                        .unwrap_or_else(|| DEFAULT_REGION.to_string()),
                })
            }
            other => Err(SkycastError::Config(format!(
                "unknown agent.mode '{other}' (use 'local' or 'cloud')"
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Identity the turn history is keyed by
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor_id: Option<String>,

    /// Conversation thread to resume; stable across restarts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    /// How many turns to pull into the context preamble
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_k_turns: Option<usize>,
}

impl MemoryConfig {
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(false)
    }

    pub fn effective_actor_id(&self) -> String {
        self.actor_id
            .clone()
            .unwrap_or_else(|| DEFAULT_ACTOR_ID.to_string())
    }

    pub fn effective_session_id(&self) -> String {
        self.session_id
            .clone()
            .unwrap_or_else(|| DEFAULT_MEMORY_SESSION.to_string())
    }

    pub fn effective_last_k(&self) -> usize {
        self.last_k_turns.unwrap_or(DEFAULT_LAST_K_TURNS)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherConfig {
    /// OpenWeather API key, usually `${OPENWEATHER_API_KEY}`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiConfig {
    /// Show `<thinking>` segments in interim renders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_thinking: Option<bool>,

    /// Pacing delay between fragments, in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_delay_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    /// Log directory; defaults to `<config dir>/logs`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}

impl SkycastConfig {
    pub fn show_thinking(&self) -> bool {
        self.ui
            .as_ref()
            .and_then(|ui| ui.show_thinking)
            .unwrap_or(true)
    }

    pub fn refresh_delay(&self) -> Duration {
        let ms = self
            .ui
            .as_ref()
            .and_then(|ui| ui.refresh_delay_ms)
            .unwrap_or(DEFAULT_REFRESH_DELAY_MS);
        Duration::from_millis(ms)
    }

    pub fn log_level(&self) -> String {
        self.logging
            .as_ref()
            .and_then(|l| l.level.clone())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
    }

    /// The endpoint, falling back to the default local runtime when the
    /// agent section is absent.
    pub fn endpoint(&self) -> Result<AgentEndpoint, SkycastError> {
        match &self.agent {
            Some(agent) => agent.endpoint(),
            None => Ok(AgentEndpoint::local_default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_agent_section_defaults_to_local() {
        let config = SkycastConfig::default();
        assert_eq!(config.endpoint().unwrap(), AgentEndpoint::local_default());
    }

    #[test]
    fn test_cloud_mode_requires_runtime_id() {
        let agent = AgentConfig {
            mode: Some("cloud".into()),
            ..Default::default()
        };
        let err = agent.endpoint().unwrap_err();
        assert!(err.to_string().contains("runtimeId"));
    }

    #[test]
    fn test_cloud_mode_defaults_region() {
        let agent = AgentConfig {
            mode: Some("cloud".into()),
            runtime_id: Some("rt-42".into()),
            ..Default::default()
        };
        match agent.endpoint().unwrap() {
            AgentEndpoint::CloudRuntime { runtime_id, region } => {
                assert_eq!(runtime_id, "rt-42");
                assert_eq!(region, DEFAULT_REGION);
            }
            other => panic!("expected cloud endpoint, got {other}"),
        }
    }

    #[test]
    fn test_unknown_mode_is_error() {
        let agent = AgentConfig {
            mode: Some("hybrid".into()),
            ..Default::default()
        };
        assert!(agent.endpoint().is_err());
    }

    #[test]
    fn test_camel_case_yaml_roundtrip() {
        let yaml = "agent:\n  mode: cloud\n  runtimeId: rt-1\nui:\n  showThinking: false\n";
        let config: SkycastConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.agent.as_ref().unwrap().runtime_id.as_deref(), Some("rt-1"));
        assert!(!config.show_thinking());
    }

    #[test]
    fn test_ui_defaults() {
        let config = SkycastConfig::default();
        assert!(config.show_thinking());
        assert_eq!(config.refresh_delay(), Duration::from_millis(10));
        assert_eq!(config.log_level(), "info");
    }
}
