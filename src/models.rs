use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ============================================================================
// WeatherAPI Models
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CurrentWeatherResponse {
    pub location: Option<Location>,
    pub current: Option<Current>,
}

#[derive(Debug, Deserialize)]
pub struct Location {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub country: String,
}

#[derive(Debug, Deserialize)]
pub struct Current {
    pub condition: Option<Condition>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub temp_c: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub humidity: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub wind_kph: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub uv: Option<f64>,
    pub air_quality: Option<AirQualityPayload>,
}

#[derive(Debug, Deserialize)]
pub struct Condition {
    #[serde(default, deserialize_with = "lenient_string")]
    pub text: String,
    pub icon: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AirQualityPayload {
    #[serde(rename = "us-epa-index", default, deserialize_with = "lenient_number")]
    pub us_epa_index: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub pm2_5: Option<f64>,
}

/// Accepts finite JSON numbers and numeric strings; anything else reads as absent.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let number = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(number.filter(|n| n.is_finite()))
}

/// Accepts JSON strings; null and any other type read as the empty string.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Ok(s),
        _ => Ok(String::new()),
    }
}

impl CurrentWeatherResponse {
    /// Maps the upstream payload onto the observation the advisory rules read.
    ///
    /// Returns `None` when the response carries no `current` block.
    pub fn observation(&self) -> Option<WeatherObservation> {
        self.current.as_ref().map(WeatherObservation::from)
    }
}

// ============================================================================
// Advisory Input
// ============================================================================

/// One reading of current conditions. Optional readings that are missing or
/// non-numeric are `None`; zero is a real reading.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherObservation {
    pub condition_text: String,
    pub temperature_c: Option<f64>,
    pub uv_index: Option<f64>,
    pub wind_kph: Option<f64>,
    pub air_quality: Option<AirQuality>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AirQuality {
    pub us_epa_index: Option<f64>,
    pub pm2_5: Option<f64>,
}

impl From<&Current> for WeatherObservation {
    fn from(current: &Current) -> Self {
        Self {
            condition_text: current
                .condition
                .as_ref()
                .map(|c| c.text.clone())
                .unwrap_or_default(),
            temperature_c: current.temp_c,
            uv_index: current.uv,
            wind_kph: current.wind_kph,
            air_quality: current.air_quality.as_ref().map(|aq| AirQuality {
                us_epa_index: aq.us_epa_index,
                pm2_5: aq.pm2_5,
            }),
        }
    }
}

// ============================================================================
// MCP Tool Request Models
// ============================================================================

/// Output shape for `get_weather_tips`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TipFormat {
    /// Numbered plain-text list
    #[default]
    Text,
    /// Rich tip rows with icons and severity pills, wrapped in the tips panel
    Html,
    /// Minimal `<ul>` list of tip bodies
    PlainHtml,
    /// The advisories as a JSON array
    Json,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetWeatherTipsRequest {
    pub city: String,
    #[serde(default)]
    pub format: Option<TipFormat>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetCurrentWeatherRequest {
    pub city: String,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct SnowfallPreviewRequest {
    pub width: f64,
    pub height: f64,
    pub device_pixel_ratio: Option<f64>,
    pub frames: Option<u32>,
    pub seed: Option<u64>,
}
