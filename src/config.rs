use crate::error::AppError;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_ONECALL_URL: &str = "https://api.openweathermap.org/data/3.0/onecall";

#[derive(Debug, Clone)]
pub struct Config {
    /// Checked lazily: a missing key only fails once a provider call is made.
    pub weather_api_key: Option<String>,
    pub weather_base_url: String,
    pub weather_onecall_url: String,
    pub weather_lang: String,
    pub http_timeout_secs: u64,
    pub port: u16,
    pub image_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            weather_api_key: None,
            weather_base_url: DEFAULT_BASE_URL.to_string(),
            weather_onecall_url: DEFAULT_ONECALL_URL.to_string(),
            weather_lang: "kr".to_string(),
            http_timeout_secs: 10,
            port: 5000,
            image_dir: PathBuf::from("./img"),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();

        Ok(Self {
            weather_api_key: env::var("WEATHER_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            weather_base_url: env::var("WEATHER_API_BASE_URL")
                .unwrap_or(defaults.weather_base_url),
            weather_onecall_url: env::var("WEATHER_ONECALL_URL")
                .unwrap_or(defaults.weather_onecall_url),
            weather_lang: env::var("WEATHER_LANG").unwrap_or(defaults.weather_lang),
            http_timeout_secs: parse_var("HTTP_TIMEOUT_SECS", defaults.http_timeout_secs)?,
            port: parse_var("PORT", defaults.port)?,
            image_dir: env::var("IMAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.image_dir),
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{} must be a number, got '{}'", name, raw))),
        Err(_) => Ok(default),
    }
}
