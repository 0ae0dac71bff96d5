//! OpenWeather REST client.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default OpenWeather API host.
pub const DEFAULT_BASE_URL: &str = "http://api.openweathermap.org";

/// Air quality index bands reported by the air-pollution endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AqiLevel {
    Good,
    Fair,
    Moderate,
    Poor,
    VeryPoor,
}

impl AqiLevel {
    /// Map the API's 1–5 index to a band.
    pub fn from_index(index: u8) -> Result<Self> {
        match index {
            1 => Ok(AqiLevel::Good),
            2 => Ok(AqiLevel::Fair),
            3 => Ok(AqiLevel::Moderate),
            4 => Ok(AqiLevel::Poor),
            5 => Ok(AqiLevel::VeryPoor),
            other => Err(anyhow!("air quality index out of range: {other}")),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AqiLevel::Good => "Good",
            AqiLevel::Fair => "Fair",
            AqiLevel::Moderate => "Moderate",
            AqiLevel::Poor => "Poor",
            AqiLevel::VeryPoor => "Very Poor",
        }
    }
}

impl std::fmt::Display for AqiLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Current conditions for a location.
#[derive(Debug, Clone, Serialize)]
pub struct WeatherReport {
    pub temperature: f64,
    pub humidity: i64,
    pub uv_index: f64,
    pub alerts: Vec<String>,
}

/// Air quality for a location.
#[derive(Debug, Clone, Serialize)]
pub struct AirQualityReport {
    pub level: AqiLevel,
    pub pm2_5: f64,
}

// ---------------------------------------------------------------------------
// Wire shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct GeoHit {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OneCallResponse {
    current: CurrentConditions,
    #[serde(default)]
    alerts: Vec<WeatherAlert>,
}

#[derive(Debug, Deserialize)]
struct CurrentConditions {
    temp: f64,
    humidity: i64,
    uvi: f64,
}

#[derive(Debug, Deserialize)]
struct WeatherAlert {
    description: String,
}

#[derive(Debug, Deserialize)]
struct AirPollutionResponse {
    list: Vec<AirPollutionSample>,
}

#[derive(Debug, Deserialize)]
struct AirPollutionSample {
    main: AirPollutionIndex,
    components: AirPollutionComponents,
}

#[derive(Debug, Deserialize)]
struct AirPollutionIndex {
    aqi: u8,
}

#[derive(Debug, Deserialize)]
struct AirPollutionComponents {
    pm2_5: f64,
}

/// Build the geocoding query string: `city,[state,]country`.
fn geocode_query(city: &str, country: &str, state: Option<&str>) -> String {
    match state {
        Some(state) => format!("{city},{state},{country}"),
        None => format!("{city},{country}"),
    }
}

/// Shared client for the OpenWeather endpoints.
pub struct OpenWeather {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenWeather {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Resolve a location to `(lat, lon)`. The first geocoding hit wins.
    pub async fn geocode(
        &self,
        city: &str,
        country: &str,
        state: Option<&str>,
    ) -> Result<(f64, f64)> {
        let query = geocode_query(city, country, state);
        debug!(%query, "geocoding location");

        let hits: Vec<GeoHit> = self
            .http
            .get(format!("{}/geo/1.0/direct", self.base_url))
            .query(&[("q", query.as_str()), ("appid", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let hit = hits
            .first()
            .ok_or_else(|| anyhow!("no geocoding result for {query}"))?;
        Ok((hit.lat, hit.lon))
    }

    /// Current weather for a location.
    pub async fn current_weather(
        &self,
        city: &str,
        country: &str,
        state: Option<&str>,
    ) -> Result<WeatherReport> {
        let (lat, lon) = self.geocode(city, country, state).await?;

        let response: OneCallResponse = self
            .http
            .get(format!("{}/data/3.0/onecall", self.base_url))
            .query(&[
                ("lat", lat.to_string().as_str()),
                ("lon", lon.to_string().as_str()),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(WeatherReport {
            temperature: response.current.temp,
            humidity: response.current.humidity,
            uv_index: response.current.uvi,
            alerts: response.alerts.into_iter().map(|a| a.description).collect(),
        })
    }

    /// Air quality index and PM2.5 concentration for a location.
    pub async fn air_quality(
        &self,
        city: &str,
        country: &str,
        state: Option<&str>,
    ) -> Result<AirQualityReport> {
        let (lat, lon) = self.geocode(city, country, state).await?;

        let response: AirPollutionResponse = self
            .http
            .get(format!("{}/data/2.5/air_pollution", self.base_url))
            .query(&[
                ("lat", lat.to_string().as_str()),
                ("lon", lon.to_string().as_str()),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let sample = response
            .list
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("empty air pollution response"))?;

        Ok(AirQualityReport {
            level: AqiLevel::from_index(sample.main.aqi)?,
            pm2_5: sample.components.pm2_5,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geocode_query_with_state() {
        assert_eq!(geocode_query("Austin", "US", Some("TX")), "Austin,TX,US");
    }

    #[test]
    fn test_geocode_query_without_state() {
        assert_eq!(geocode_query("Doha", "QA", None), "Doha,QA");
    }

    #[test]
    fn test_aqi_index_mapping() {
        assert_eq!(AqiLevel::from_index(1).unwrap(), AqiLevel::Good);
        assert_eq!(AqiLevel::from_index(3).unwrap(), AqiLevel::Moderate);
        assert_eq!(AqiLevel::from_index(5).unwrap(), AqiLevel::VeryPoor);
        assert!(AqiLevel::from_index(0).is_err());
        assert!(AqiLevel::from_index(6).is_err());
    }

    #[test]
    fn test_aqi_labels() {
        assert_eq!(AqiLevel::Good.to_string(), "Good");
        assert_eq!(AqiLevel::VeryPoor.to_string(), "Very Poor");
    }

    #[test]
    fn test_onecall_deserialization_with_alerts() {
        let raw = r#"{
            "current": {"temp": 303.4, "humidity": 48, "uvi": 7.2, "clouds": 10},
            "alerts": [{"sender_name": "met", "description": "Dust storm expected"}]
        }"#;
        let parsed: OneCallResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.current.humidity, 48);
        assert_eq!(parsed.alerts.len(), 1);
        assert_eq!(parsed.alerts[0].description, "Dust storm expected");
    }

    #[test]
    fn test_onecall_deserialization_without_alerts() {
        let raw = r#"{"current": {"temp": 290.0, "humidity": 70, "uvi": 1.0}}"#;
        let parsed: OneCallResponse = serde_json::from_str(raw).unwrap();
        assert!(parsed.alerts.is_empty());
    }

    #[test]
    fn test_air_pollution_deserialization() {
        let raw = r#"{
            "coord": {"lon": 51.5, "lat": 25.3},
            "list": [{"main": {"aqi": 4}, "components": {"co": 300.0, "pm2_5": 42.5}}]
        }"#;
        let parsed: AirPollutionResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.list[0].main.aqi, 4);
        assert_eq!(parsed.list[0].components.pm2_5, 42.5);
    }

    #[test]
    fn test_geo_hit_deserialization() {
        let raw = r#"[{"name": "Doha", "lat": 25.2854, "lon": 51.531, "country": "QA"}]"#;
        let hits: Vec<GeoHit> = serde_json::from_str(raw).unwrap();
        assert_eq!(hits[0].lat, 25.2854);
    }
}
