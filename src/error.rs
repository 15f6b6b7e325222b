use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use std::fmt;

/// Failures surfaced by the upstream weather provider.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProviderError {
    #[error("WEATHER_API_KEY is not configured")]
    MissingApiKey,
    #[error("Invalid API key, check WEATHER_API_KEY")]
    Unauthorized,
    #[error("Location not found, check the city name")]
    NotFound,
    #[error("Weather API rate limit exceeded, try again later")]
    RateLimited,
    #[error("Weather API error ({status}): {message}")]
    Upstream { status: u16, message: String },
    #[error("Could not reach the weather API: {0}")]
    Network(String),
    #[error("Failed to parse weather API response: {0}")]
    Decode(String),
}

impl ProviderError {
    /// Translate a non-2xx provider status into its error kind.
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        match status {
            401 => ProviderError::Unauthorized,
            404 => ProviderError::NotFound,
            429 => ProviderError::RateLimited,
            _ => ProviderError::Upstream {
                status,
                message: message.unwrap_or_else(|| "Unknown error".to_string()),
            },
        }
    }
}

#[derive(Debug)]
pub enum AppError {
    Provider(ProviderError),
    Config(String),
    InvalidCoordinates(String),
    EmptyForecast(String),
    Validation(String),
    Io(std::io::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Provider(e) => write!(f, "{}", e),
            AppError::Config(e) => write!(f, "Configuration error: {}", e),
            AppError::InvalidCoordinates(msg) => write!(f, "Invalid coordinates: {}", msg),
            AppError::EmptyForecast(msg) => write!(f, "No forecast available: {}", msg),
            AppError::Validation(msg) => write!(f, "Validation error: {}", msg),
            AppError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "success": false,
            "error": self.to_string()
        }))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidCoordinates(_) => StatusCode::BAD_REQUEST,
            AppError::Provider(ProviderError::NotFound) => StatusCode::NOT_FOUND,
            AppError::Provider(ProviderError::RateLimited) => StatusCode::TOO_MANY_REQUESTS,
            AppError::Provider(ProviderError::MissingApiKey) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Provider(_) | AppError::EmptyForecast(_) => StatusCode::BAD_GATEWAY,
            AppError::Config(_) | AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        AppError::Provider(err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err)
    }
}
