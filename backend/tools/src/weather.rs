//! Current-weather tool.

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use skycast_core::{SkycastError, Tool};

use crate::client::OpenWeather;

/// Location arguments shared by the weather tools.
#[derive(Debug, Deserialize)]
pub(crate) struct LocationArgs {
    pub city: String,
    pub country: String,
    #[serde(default)]
    pub state: Option<String>,
}

pub(crate) fn location_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "city": {"type": "string", "description": "City name of the location"},
            "country": {"type": "string", "description": "Country of the location"},
            "state": {"type": "string", "description": "State of the location, if in the US"}
        },
        "required": ["city", "country"]
    })
}

/// Looks up temperature, humidity, UV index, and active alerts.
pub struct CurrentWeatherTool {
    api: OpenWeather,
}

impl CurrentWeatherTool {
    pub fn new(api: OpenWeather) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Tool for CurrentWeatherTool {
    fn name(&self) -> &str {
        "get_current_weather"
    }

    fn description(&self) -> &str {
        "Get weather information (temperature, humidity, UV index, alerts) for a given location."
    }

    fn parameters(&self) -> serde_json::Value {
        location_schema()
    }

    async fn execute(&self, args: serde_json::Value) -> Result<String> {
        let args: LocationArgs = serde_json::from_value(args)
            .map_err(|e| SkycastError::Tool(format!("invalid get_current_weather arguments: {e}")))?;
        let report = self
            .api
            .current_weather(&args.city, &args.country, args.state.as_deref())
            .await?;
        Ok(serde_json::to_string(&report)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tool() -> CurrentWeatherTool {
        CurrentWeatherTool::new(OpenWeather::new("test-key"))
    }

    #[test]
    fn test_parameter_schema_requires_location() {
        let schema = tool().parameters();
        let required: Vec<_> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(required, vec!["city", "country"]);
        assert!(schema["properties"]["state"].is_object());
    }

    #[tokio::test]
    async fn test_execute_rejects_missing_args() {
        let err = tool().execute(json!({"city": "Doha"})).await.unwrap_err();
        assert!(err.to_string().contains("invalid get_current_weather arguments"));
    }

    #[test]
    fn test_name_matches_agent_registration() {
        assert_eq!(tool().name(), "get_current_weather");
    }
}
