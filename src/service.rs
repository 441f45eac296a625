use anyhow::Result;
use reqwest::Client;
use rmcp::{
    handler::server::{wrapper::Parameters, ServerHandler, tool::ToolRouter},
    model::{
        CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    tool, tool_handler, tool_router,
    ErrorData as McpError,
};
use std::sync::Arc;

use crate::advisory::{evaluate_current, plain_tips, Advisory};
use crate::config::Config;
use crate::constants::{EMPTY_CITY_MESSAGE, FETCH_FAILED_MESSAGE};
use crate::error::{FetchError, PreviewError};
use crate::formatters::{
    format_current_weather, format_tips_text, render_plain_tips_html, PageLayout, TipsPanel,
};
use crate::models::{
    CurrentWeatherResponse, GetCurrentWeatherRequest, GetWeatherTipsRequest,
    SnowfallPreviewRequest, TipFormat,
};
use crate::particles::{base_particle_count, MotionPolicy, ParticleField, TextSurface, Viewport};

const DEFAULT_PREVIEW_FRAMES: u32 = 60;
const MAX_PREVIEW_FRAMES: u32 = 10_000;
const MAX_PREVIEW_EDGE_PX: f64 = 4096.0;

/// Weather tips service that handles MCP requests
#[derive(Clone)]
pub struct WeatherTips {
    client: Arc<Client>,
    config: Arc<Config>,
    tool_router: ToolRouter<Self>,
}

impl WeatherTips {
    /// Creates a new service instance
    pub fn new(config: Config) -> Result<Self> {
        let client = Client::builder().user_agent(&config.user_agent).build()?;

        Ok(Self {
            client: Arc::new(client),
            config: Arc::new(config),
            tool_router: Self::tool_router(),
        })
    }

    /// Fetches current conditions (with air quality) for a city
    pub async fn fetch_current(&self, city: &str) -> Result<CurrentWeatherResponse, FetchError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(FetchError::EmptyCity);
        }

        let response = self
            .client
            .get(&self.config.base_url)
            .query(&[("key", self.config.api_key.as_str()), ("q", city), ("aqi", "yes")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::from_status(response.status(), city));
        }

        Ok(response.json::<CurrentWeatherResponse>().await?)
    }

    /// Fetches a city's conditions and runs them through the advisory rules
    pub async fn tips_for_city(&self, city: &str) -> Result<Vec<Advisory>, FetchError> {
        let response = self.fetch_current(city).await?;
        advisories_for(&response)
    }
}

/// Advisories for a fetched response; a response without current conditions is an error
pub fn advisories_for(response: &CurrentWeatherResponse) -> Result<Vec<Advisory>, FetchError> {
    let advisories = evaluate_current(response.observation().as_ref());
    if advisories.is_empty() {
        return Err(FetchError::MissingCurrent);
    }
    Ok(advisories)
}

/// Converts a fetch failure into the user-facing tool error
fn fetch_error(city: &str, err: FetchError) -> McpError {
    match err {
        FetchError::EmptyCity => McpError::invalid_params(EMPTY_CITY_MESSAGE, None),
        other => {
            tracing::warn!("Weather fetch for {:?} failed: {}", city, other);
            McpError::internal_error(format!("{} ({})", FETCH_FAILED_MESSAGE, other), None)
        }
    }
}

/// Renders advisories in the requested output shape
pub fn render_tips(
    city: &str,
    advisories: &[Advisory],
    format: TipFormat,
) -> Result<String, serde_json::Error> {
    Ok(match format {
        TipFormat::Text => format_tips_text(city, advisories),
        TipFormat::Html => {
            let mut panel = TipsPanel::new();
            panel.render(PageLayout::default(), advisories);
            panel.outer_html().unwrap_or_default()
        }
        TipFormat::PlainHtml => render_plain_tips_html(&plain_tips(advisories)),
        TipFormat::Json => serde_json::to_string_pretty(advisories)?,
    })
}

/// Steps a seeded particle field and returns the last frame as text
pub fn render_snowfall_preview(request: &SnowfallPreviewRequest) -> Result<String, PreviewError> {
    let edge_ok = |v: f64| v.is_finite() && v > 0.0 && v <= MAX_PREVIEW_EDGE_PX;
    if !edge_ok(request.width) || !edge_ok(request.height) {
        return Err(PreviewError::InvalidViewport { max: MAX_PREVIEW_EDGE_PX });
    }

    let dpr = request
        .device_pixel_ratio
        .filter(|d| d.is_finite() && *d > 0.0)
        .unwrap_or(1.0);
    let frames = request
        .frames
        .unwrap_or(DEFAULT_PREVIEW_FRAMES)
        .clamp(1, MAX_PREVIEW_FRAMES);
    let viewport = Viewport::new(request.width, request.height, dpr);

    let policy = MotionPolicy::detect("", viewport.width_px, false);
    let count = policy.particle_count(base_particle_count(viewport.width_px));
    let mut field = match request.seed {
        Some(seed) => ParticleField::seeded(viewport, count, seed),
        None => ParticleField::from_entropy(viewport, count),
    };

    let mut surface = TextSurface::new();
    field.attach(&mut surface);
    for _ in 0..frames {
        field.step(&mut surface);
    }

    let (backing_width, backing_height) = surface.backing_size();
    Ok(format!(
        "Snowfall preview: {} particles, {} frames, backing store {}x{}\n\n{}",
        field.len(),
        frames,
        backing_width,
        backing_height,
        surface.render()
    ))
}

#[tool_handler]
impl ServerHandler for WeatherTips {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "mcp-weather-tips".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "Weather advice for any city, powered by WeatherAPI. \
                Turns current conditions into practical tips (umbrella, layers, hydration, \
                wind, UV and air quality)."
                    .to_string(),
            ),
        }
    }
}

#[tool_router]
impl WeatherTips {
    /// Gets advisory tips for a city's current weather
    #[tool(description = "Get practical weather tips for a city (e.g., 'London', 'Tokyo'). Optional format: 'text' (default), 'html' (rich tip rows with icons), 'plain_html' (simple list) or 'json'.")]
    async fn get_weather_tips(
        &self,
        Parameters(request): Parameters<GetWeatherTipsRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Getting weather tips for city: {}", request.city);

        let advisories = self
            .tips_for_city(&request.city)
            .await
            .map_err(|e| fetch_error(&request.city, e))?;

        let format = request.format.unwrap_or_default();
        let formatted = render_tips(request.city.trim(), &advisories, format).map_err(|e| {
            McpError::internal_error(format!("Failed to encode tips: {}", e), None)
        })?;

        Ok(CallToolResult::success(vec![Content::text(formatted)]))
    }

    /// Gets a summary of a city's current weather
    #[tool(description = "Get current weather for a city: conditions, temperature, humidity and wind speed.")]
    async fn get_current_weather(
        &self,
        Parameters(request): Parameters<GetCurrentWeatherRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Getting current weather for city: {}", request.city);

        let response = self
            .fetch_current(&request.city)
            .await
            .map_err(|e| fetch_error(&request.city, e))?;

        let formatted = format_current_weather(&response);

        Ok(CallToolResult::success(vec![Content::text(formatted)]))
    }

    /// Renders a text snapshot of the falling-particle background
    #[tool(description = "Render a text preview of the falling-particle background for a viewport. Provide width and height in CSS pixels; optional device_pixel_ratio, frames to simulate and a seed for a repeatable result.")]
    async fn snowfall_preview(
        &self,
        Parameters(request): Parameters<SnowfallPreviewRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(
            "Rendering snowfall preview for viewport: {}x{}",
            request.width,
            request.height
        );

        let preview = render_snowfall_preview(&request)
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

        Ok(CallToolResult::success(vec![Content::text(preview)]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WeatherObservation;
    use rmcp::model::ErrorCode;

    #[test]
    fn test_render_tips_json_shape() {
        let advisories = crate::advisory::evaluate(&WeatherObservation {
            condition_text: "Light drizzle".into(),
            temperature_c: Some(14.0),
            ..Default::default()
        });

        let json = render_tips("Bergen", &advisories, TipFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value[0]["severity"], "umbrella");
        assert_eq!(value[0]["style"], "tip-umbrella");
        assert_eq!(value[0]["icon"], "umbrella");
        assert_eq!(value.as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_plain_html_matches_rich_order() {
        let advisories = crate::advisory::evaluate(&WeatherObservation {
            condition_text: "Heavy snow".into(),
            temperature_c: Some(-3.0),
            wind_kph: Some(65.0),
            ..Default::default()
        });

        let html = render_tips("Oslo", &advisories, TipFormat::PlainHtml).unwrap();
        let snow = html.find("It&#039;s cold").unwrap();
        let wind = html.find("Strong winds").unwrap();
        assert!(snow < wind);
    }

    #[test]
    fn test_snowfall_preview_is_repeatable() {
        let request = SnowfallPreviewRequest {
            width: 320.0,
            height: 160.0,
            device_pixel_ratio: Some(2.0),
            frames: Some(5),
            seed: Some(42),
        };

        let first = render_snowfall_preview(&request).unwrap();
        assert_eq!(first, render_snowfall_preview(&request).unwrap());
        assert!(first.starts_with(
            "Snowfall preview: 28 particles, 5 frames, backing store 640x320\n\n"
        ));
    }

    #[test]
    fn test_snowfall_preview_rejects_bad_viewport() {
        let request = SnowfallPreviewRequest {
            width: 0.0,
            height: 160.0,
            device_pixel_ratio: None,
            frames: None,
            seed: None,
        };
        assert_eq!(
            render_snowfall_preview(&request),
            Err(PreviewError::InvalidViewport { max: MAX_PREVIEW_EDGE_PX })
        );
    }

    #[test]
    fn test_html_format_wraps_rows_in_tips_panel() {
        let advisories = crate::advisory::evaluate(&WeatherObservation {
            condition_text: "Clear".into(),
            temperature_c: Some(20.0),
            ..Default::default()
        });

        let html = render_tips("Lima", &advisories, TipFormat::Html).unwrap();
        assert!(html.starts_with(r#"<div id="weatherTipsPanel" class="tips-panel" role="list">"#));
        assert!(html.contains(r#"<div class="tip-row" role="listitem">"#));
        assert!(html.ends_with("</div>"));
    }

    #[test]
    fn test_blank_city_maps_to_invalid_params() {
        let err = fetch_error("  ", FetchError::EmptyCity);
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert_eq!(err.message, EMPTY_CITY_MESSAGE);
    }

    #[test]
    fn test_other_failures_map_to_internal_error() {
        for failure in [
            FetchError::NotFound("Atlantis".into()),
            FetchError::Status(reqwest::StatusCode::SERVICE_UNAVAILABLE),
            FetchError::MissingCurrent,
        ] {
            let err = fetch_error("Atlantis", failure);
            assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
            assert!(err.message.starts_with(FETCH_FAILED_MESSAGE), "{}", err.message);
        }
    }

    #[tokio::test]
    async fn test_blank_city_never_reaches_the_network() {
        let mut config = Config::new("test-key");
        // Unroutable; any request would fail with an HTTP error instead.
        config.base_url = "http://127.0.0.1:9/current.json".to_string();
        let service = WeatherTips::new(config).unwrap();

        assert!(matches!(service.fetch_current("   ").await, Err(FetchError::EmptyCity)));
        assert!(matches!(service.tips_for_city("").await, Err(FetchError::EmptyCity)));
    }

    #[test]
    fn test_response_without_current_block_is_missing_current() {
        let response: CurrentWeatherResponse = serde_json::from_value(serde_json::json!({
            "location": { "name": "Nowhere", "country": "Nowhere" }
        }))
        .unwrap();

        assert!(matches!(advisories_for(&response), Err(FetchError::MissingCurrent)));
    }

    #[test]
    fn test_response_with_current_block_yields_advisories() {
        let response: CurrentWeatherResponse = serde_json::from_value(serde_json::json!({
            "current": { "temp_c": 2.0, "condition": { "text": "Overcast" } }
        }))
        .unwrap();

        let advisories = advisories_for(&response).unwrap();
        assert_eq!(advisories[0].title, "Dress warmly");
    }
}
