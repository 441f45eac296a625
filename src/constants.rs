/// User agent string for HTTP requests
pub const USER_AGENT: &str = concat!("mcp-weather-tips/", env!("CARGO_PKG_VERSION"));

/// WeatherAPI current-conditions endpoint
pub const WEATHER_API_CURRENT_URL: &str = "https://api.weatherapi.com/v1/current.json";

/// Shown when a tool is called with a blank city
pub const EMPTY_CITY_MESSAGE: &str = "Please enter a city name.";

/// Shown for any fetch failure (network, unknown city, bad payload)
pub const FETCH_FAILED_MESSAGE: &str = "Couldn't fetch weather. Try again.";

/// Condition keywords that call for an umbrella
pub const PRECIPITATION_KEYWORDS: [&str; 4] = ["rain", "drizzle", "shower", "thunder"];

pub const COLD_MAX_C: f64 = 5.0;
pub const HOT_MIN_C: f64 = 30.0;
pub const HEAT_ALERT_MIN_C: f64 = 38.0;
pub const HIGH_WIND_MIN_KPH: f64 = 50.0;
pub const PM25_HIGH_ABOVE: f64 = 75.0;

/// Approximately one display refresh at 60 Hz
pub const FRAME_INTERVAL_MICROS: u64 = 16_667;
