//! Weather tools — OpenWeather-backed lookups for the SkyCast agent.
//!
//! One shared REST client handles geocoding plus the current-conditions and
//! air-pollution endpoints; thin `Tool` wrappers expose both lookups to the
//! agent runtime.

pub mod air_quality;
pub mod client;
pub mod weather;

pub use air_quality::AirQualityTool;
pub use client::{AirQualityReport, AqiLevel, OpenWeather, WeatherReport};
pub use weather::CurrentWeatherTool;
