//! Air-quality tool.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::json;

use skycast_core::{SkycastError, Tool};

use crate::client::OpenWeather;
use crate::weather::{location_schema, LocationArgs};

/// Looks up the air quality index band and PM2.5 concentration.
pub struct AirQualityTool {
    api: OpenWeather,
}

impl AirQualityTool {
    pub fn new(api: OpenWeather) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Tool for AirQualityTool {
    fn name(&self) -> &str {
        "get_aqi"
    }

    fn description(&self) -> &str {
        "Get the air quality index for a given location."
    }

    fn parameters(&self) -> serde_json::Value {
        location_schema()
    }

    async fn execute(&self, args: serde_json::Value) -> Result<String> {
        let args: LocationArgs = serde_json::from_value(args)
            .map_err(|e| SkycastError::Tool(format!("invalid get_aqi arguments: {e}")))?;
        let report = self
            .api
            .air_quality(&args.city, &args.country, args.state.as_deref())
            .await?;
        Ok(json!({"level": report.level.label(), "pm2_5": report.pm2_5}).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tool() -> AirQualityTool {
        AirQualityTool::new(OpenWeather::new("test-key"))
    }

    #[test]
    fn test_name_and_schema() {
        let t = tool();
        assert_eq!(t.name(), "get_aqi");
        assert_eq!(t.parameters()["required"][0], "city");
    }

    #[tokio::test]
    async fn test_execute_rejects_bad_args() {
        let err = tool().execute(json!("not an object")).await.unwrap_err();
        assert!(err.to_string().contains("invalid get_aqi arguments"));
    }
}
