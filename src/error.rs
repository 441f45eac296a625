use reqwest::StatusCode;
use thiserror::Error;

/// Failures on the way from a city name to a weather observation
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("city name is empty")]
    EmptyCity,

    #[error("city not found: {0}")]
    NotFound(String),

    #[error("request failed with status: {0}")]
    Status(StatusCode),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("response has no current conditions")]
    MissingCurrent,
}

impl FetchError {
    /// Maps a non-success upstream status. WeatherAPI answers an unknown
    /// `q` with 400, so both 400 and 404 read as "not found".
    pub fn from_status(status: StatusCode, city: &str) -> Self {
        match status {
            StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND => {
                FetchError::NotFound(city.to_string())
            }
            other => FetchError::Status(other),
        }
    }
}

/// Rejected `snowfall_preview` input
#[derive(Error, Debug, PartialEq)]
pub enum PreviewError {
    #[error("width and height must be greater than 0 and at most {max} pixels")]
    InvalidViewport { max: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_city_statuses() {
        assert!(matches!(
            FetchError::from_status(StatusCode::BAD_REQUEST, "Atlantis"),
            FetchError::NotFound(city) if city == "Atlantis"
        ));
        assert!(matches!(
            FetchError::from_status(StatusCode::FORBIDDEN, "Paris"),
            FetchError::Status(StatusCode::FORBIDDEN)
        ));
    }
}
