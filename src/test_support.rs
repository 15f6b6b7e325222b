//! Fixtures shared by the unit tests.

use crate::error::ProviderError;
use crate::models::{
    Condition, ForecastDetails, ForecastEntry, OwCurrentResponse, OwForecastResponse,
    OwOneCallResponse, Temperature,
};
use crate::weather::WeatherProvider;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;

/// 2023-11-15T00:00:00Z
const FIRST_SLOT: i64 = 1_700_006_400;
/// 2023-11-15T12:00:00Z
const FIRST_NOON: i64 = 1_700_049_600;

pub fn current_json(name: &str, temp: f64) -> Value {
    json!({
        "coord": {"lat": 37.5665, "lon": 126.978},
        "weather": [{"id": 800, "main": "Clear", "description": "맑음", "icon": "01d"}],
        "main": {
            "temp": temp,
            "feels_like": temp - 0.6,
            "temp_min": temp - 1.5,
            "temp_max": temp + 2.4,
            "pressure": 1016,
            "humidity": 55
        },
        "visibility": 10000,
        "wind": {"speed": 3.1, "deg": 180},
        "clouds": {"all": 0},
        "dt": 1_700_000_000,
        "sys": {"country": "KR", "sunrise": 1_699_999_000, "sunset": 1_700_037_000},
        "timezone": 32400,
        "name": name
    })
}

/// `slots` are `(unix time, temperature, probability of precipitation)`.
pub fn forecast_json(name: &str, slots: &[(i64, f64, f64)]) -> Value {
    let list: Vec<Value> = slots
        .iter()
        .map(|(dt, temp, pop)| {
            json!({
                "dt": dt,
                "main": {
                    "temp": temp,
                    "feels_like": temp - 1.0,
                    "temp_min": temp - 0.5,
                    "temp_max": temp + 0.5,
                    "pressure": 1012,
                    "humidity": 70
                },
                "weather": [{"id": 500, "main": "Rain", "description": "약한 비", "icon": "10d"}],
                "clouds": {"all": 75},
                "wind": {"speed": 4.2, "deg": 90},
                "pop": pop
            })
        })
        .collect();

    json!({
        "cod": "200",
        "list": list,
        "city": {
            "name": name,
            "coord": {"lat": 35.1796, "lon": 129.0756},
            "country": "KR",
            "timezone": 32400
        }
    })
}

/// One daily entry per `(min, max)`, starting on 2023-11-15.
pub fn onecall_json(days: &[(f64, f64)]) -> Value {
    let daily: Vec<Value> = days
        .iter()
        .enumerate()
        .map(|(i, (min, max))| {
            json!({
                "dt": FIRST_NOON + i as i64 * 86_400,
                "temp": {"day": (min + max) / 2.0, "min": min, "max": max, "night": min + 1.0},
                "humidity": 60,
                "wind_speed": 3.2,
                "weather": [{"id": 803, "main": "Clouds", "description": "구름많음", "icon": "04d"}],
                "clouds": 40,
                "pop": 0.2
            })
        })
        .collect();

    json!({
        "lat": 37.5665,
        "lon": 126.978,
        "timezone": "Asia/Seoul",
        "daily": daily
    })
}

pub fn entry(datetime: &str, temp: i32, description: &str) -> ForecastEntry {
    let datetime: DateTime<Utc> = datetime.parse().unwrap();
    ForecastEntry {
        datetime,
        temperature: Temperature {
            current: temp,
            feels_like: temp,
            min: temp,
            max: temp,
        },
        weather: Condition {
            main: "Clouds".to_string(),
            description: description.to_string(),
            icon: "03d".to_string(),
            icon_url: String::new(),
        },
        details: ForecastDetails {
            humidity: 50,
            wind_speed: 1.0,
            clouds: 20,
            pop: 0,
        },
    }
}

fn parse<T: DeserializeOwned>(value: Value) -> Result<T, ProviderError> {
    serde_json::from_value(value).map_err(|e| ProviderError::Decode(e.to_string()))
}

/// Canned provider; set an `*_error` field to make that call fail.
pub struct StubProvider {
    pub daily_days: usize,
    pub daily_error: Option<ProviderError>,
    pub forecast_error: Option<ProviderError>,
    pub current_error: Option<ProviderError>,
    /// `current_by_coords` fails for this latitude only.
    pub failing_lat: Option<f64>,
    pub call_log: Mutex<HashMap<&'static str, usize>>,
}

impl Default for StubProvider {
    fn default() -> Self {
        Self {
            daily_days: 7,
            daily_error: None,
            forecast_error: None,
            current_error: None,
            failing_lat: None,
            call_log: Mutex::new(HashMap::new()),
        }
    }
}

impl StubProvider {
    pub fn calls(&self, name: &str) -> usize {
        self.call_log.lock().unwrap().get(name).copied().unwrap_or(0)
    }

    fn record(&self, name: &'static str) {
        *self.call_log.lock().unwrap().entry(name).or_insert(0) += 1;
    }

    fn forecast(&self) -> Result<OwForecastResponse, ProviderError> {
        if let Some(err) = &self.forecast_error {
            return Err(err.clone());
        }
        // Five days of 3-hour slots
        let slots: Vec<(i64, f64, f64)> = (0..40)
            .map(|i| (FIRST_SLOT + i * 10_800, 8.0 + (i % 8) as f64, 0.3))
            .collect();
        parse(forecast_json("Busan", &slots))
    }
}

#[async_trait]
impl WeatherProvider for StubProvider {
    async fn current_by_city(&self, city: &str) -> Result<OwCurrentResponse, ProviderError> {
        self.record("current_by_city");
        match &self.current_error {
            Some(err) => Err(err.clone()),
            None => parse(current_json(city, 18.0)),
        }
    }

    async fn current_by_coords(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<OwCurrentResponse, ProviderError> {
        self.record("current_by_coords");
        if let Some(err) = &self.current_error {
            return Err(err.clone());
        }
        if self.failing_lat == Some(lat) {
            return Err(ProviderError::Network("connection reset".to_string()));
        }
        let mut json = current_json("Haeundae", 16.0);
        json["coord"] = json!({"lat": lat, "lon": lon});
        parse(json)
    }

    async fn forecast_by_city(&self, _city: &str) -> Result<OwForecastResponse, ProviderError> {
        self.record("forecast_by_city");
        self.forecast()
    }

    async fn forecast_by_coords(
        &self,
        _lat: f64,
        _lon: f64,
    ) -> Result<OwForecastResponse, ProviderError> {
        self.record("forecast_by_coords");
        self.forecast()
    }

    async fn daily_by_coords(
        &self,
        _lat: f64,
        _lon: f64,
    ) -> Result<OwOneCallResponse, ProviderError> {
        self.record("daily_by_coords");
        if let Some(err) = &self.daily_error {
            return Err(err.clone());
        }
        let days: Vec<(f64, f64)> = (0..self.daily_days)
            .map(|i| (5.0 + i as f64, 12.0 + i as f64))
            .collect();
        parse(onecall_json(&days))
    }
}
