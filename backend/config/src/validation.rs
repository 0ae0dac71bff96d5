//! Config validation: sanity checks with user-friendly messages.

use thiserror::Error;

use crate::schema::SkycastConfig;

/// A config validation finding with field path and message.
#[derive(Debug, Error)]
#[error("config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// All findings from one validation pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &SkycastConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_agent(config, &mut report);
    validate_memory(config, &mut report);
    validate_weather(config, &mut report);
    validate_ui(config, &mut report);
    report
}

fn validate_agent(config: &SkycastConfig, report: &mut ValidationReport) {
    let Some(agent) = &config.agent else { return };

    match agent.mode.as_deref() {
        None | Some("local") | Some("cloud") => {}
        Some(other) => report.error(
            "agent.mode",
            format!("unknown mode '{other}'; use 'local' or 'cloud'"),
        ),
    }

    if agent.mode.as_deref() == Some("cloud") {
        if agent.runtime_id.as_deref().map(str::is_empty).unwrap_or(true) {
            report.error("agent.runtimeId", "cloud mode requires a runtime id");
        }
        if agent.bearer_token.is_none() {
            report.warn(
                "agent.bearerToken",
                "no bearer token set; cloud invocations will be unauthenticated",
            );
        }
    }

    if agent.mode.as_deref() != Some("cloud") && agent.runtime_id.is_some() {
        report.warn("agent.runtimeId", "runtime id is ignored in local mode");
    }
}

fn validate_memory(config: &SkycastConfig, report: &mut ValidationReport) {
    let Some(memory) = &config.memory else { return };

    if memory.is_enabled() && memory.base_url.as_deref().map(str::is_empty).unwrap_or(true) {
        report.error("memory.baseUrl", "memory is enabled but no base URL is set");
    }

    if memory.last_k_turns == Some(0) {
        report.warn(
            "memory.lastKTurns",
            "lastKTurns is 0; no history will reach the agent",
        );
    }
}

fn validate_weather(config: &SkycastConfig, report: &mut ValidationReport) {
    let Some(weather) = &config.weather else { return };

    if weather.api_key.as_deref().map(str::is_empty).unwrap_or(true) {
        report.warn("weather.apiKey", "no API key set; weather tools will fail");
    }
}

fn validate_ui(config: &SkycastConfig, report: &mut ValidationReport) {
    let Some(ui) = &config.ui else { return };

    if let Some(ms) = ui.refresh_delay_ms {
        if ms > 1000 {
            report.warn(
                "ui.refreshDelayMs",
                format!("{ms}ms between fragments will make streaming feel stalled"),
            );
        }
    }
}
