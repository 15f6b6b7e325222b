use crate::config::Config;
use crate::error::ProviderError;
use crate::models::{OwCurrentResponse, OwErrorBody, OwForecastResponse, OwOneCallResponse};
use async_trait::async_trait;
use log::info;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Raw access to the upstream provider. Implementations return payloads
/// untouched; shaping happens in `normalize`.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current_by_city(&self, city: &str) -> Result<OwCurrentResponse, ProviderError>;

    async fn current_by_coords(&self, lat: f64, lon: f64)
        -> Result<OwCurrentResponse, ProviderError>;

    async fn forecast_by_city(&self, city: &str) -> Result<OwForecastResponse, ProviderError>;

    async fn forecast_by_coords(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<OwForecastResponse, ProviderError>;

    async fn daily_by_coords(&self, lat: f64, lon: f64)
        -> Result<OwOneCallResponse, ProviderError>;
}

/// OpenWeather over HTTPS. No retries; timeouts come from the reqwest client.
#[derive(Clone)]
pub struct WeatherClient {
    api_key: Option<String>,
    base_url: String,
    onecall_url: String,
    lang: String,
    client: reqwest::Client,
}

impl WeatherClient {
    pub fn new(config: &Config) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .map_err(|e| ProviderError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api_key: config.weather_api_key.clone(),
            base_url: config.weather_base_url.trim_end_matches('/').to_string(),
            onecall_url: config.weather_onecall_url.clone(),
            lang: config.weather_lang.clone(),
            client,
        })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<T, ProviderError> {
        let api_key = self.api_key.as_deref().ok_or(ProviderError::MissingApiKey)?;

        let mut query: Vec<(&str, String)> = params.to_vec();
        query.push(("appid", api_key.to_string()));
        query.push(("units", "metric".to_string()));
        query.push(("lang", self.lang.clone()));

        let response = self
            .client
            .get(url)
            .query(&query)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<OwErrorBody>(&body)
                .ok()
                .and_then(|b| b.message);
            return Err(ProviderError::from_status(status.as_u16(), message));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

fn coords_params(lat: f64, lon: f64) -> Vec<(&'static str, String)> {
    vec![("lat", lat.to_string()), ("lon", lon.to_string())]
}

#[async_trait]
impl WeatherProvider for WeatherClient {
    async fn current_by_city(&self, city: &str) -> Result<OwCurrentResponse, ProviderError> {
        info!("🌐 Fetching current weather for {}", city);
        self.get(&self.endpoint("weather"), &[("q", city.to_string())])
            .await
    }

    async fn current_by_coords(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<OwCurrentResponse, ProviderError> {
        info!("🌐 Fetching current weather for ({}, {})", lat, lon);
        self.get(&self.endpoint("weather"), &coords_params(lat, lon))
            .await
    }

    async fn forecast_by_city(&self, city: &str) -> Result<OwForecastResponse, ProviderError> {
        info!("🌐 Fetching 3-hour forecast for {}", city);
        self.get(&self.endpoint("forecast"), &[("q", city.to_string())])
            .await
    }

    async fn forecast_by_coords(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<OwForecastResponse, ProviderError> {
        info!("🌐 Fetching 3-hour forecast for ({}, {})", lat, lon);
        self.get(&self.endpoint("forecast"), &coords_params(lat, lon))
            .await
    }

    async fn daily_by_coords(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<OwOneCallResponse, ProviderError> {
        info!("🌐 Fetching daily forecast for ({}, {})", lat, lon);
        let mut params = coords_params(lat, lon);
        params.push(("exclude", "current,minutely,hourly,alerts".to_string()));
        self.get(&self.onecall_url, &params).await
    }
}
