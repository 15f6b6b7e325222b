use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ==================== Upstream payloads (OpenWeather) ====================

#[derive(Debug, Clone, Deserialize)]
pub struct OwCoord {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwCondition {
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwMain {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    #[serde(default)]
    pub pressure: u32,
    pub humidity: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwWind {
    pub speed: f64,
    #[serde(default)]
    pub deg: Option<u16>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OwClouds {
    #[serde(default)]
    pub all: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwSys {
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub sunrise: i64,
    #[serde(default)]
    pub sunset: i64,
}

/// `GET /weather`
#[derive(Debug, Clone, Deserialize)]
pub struct OwCurrentResponse {
    pub coord: OwCoord,
    pub weather: Vec<OwCondition>,
    pub main: OwMain,
    #[serde(default)]
    pub visibility: Option<u32>,
    pub wind: OwWind,
    #[serde(default)]
    pub clouds: OwClouds,
    pub dt: i64,
    pub sys: OwSys,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwForecastItem {
    pub dt: i64,
    pub main: OwMain,
    pub weather: Vec<OwCondition>,
    #[serde(default)]
    pub clouds: OwClouds,
    pub wind: OwWind,
    #[serde(default)]
    pub pop: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwCity {
    pub name: String,
    pub coord: OwCoord,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub timezone: i32,
}

/// `GET /forecast` (5 day / 3 hour)
#[derive(Debug, Clone, Deserialize)]
pub struct OwForecastResponse {
    pub list: Vec<OwForecastItem>,
    pub city: OwCity,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwDailyTemp {
    pub day: f64,
    pub min: f64,
    pub max: f64,
    pub night: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwDailyItem {
    pub dt: i64,
    pub temp: OwDailyTemp,
    pub humidity: u8,
    pub wind_speed: f64,
    pub weather: Vec<OwCondition>,
    #[serde(default)]
    pub clouds: u8,
    #[serde(default)]
    pub pop: f64,
}

/// `GET /onecall` restricted to the daily block.
#[derive(Debug, Clone, Deserialize)]
pub struct OwOneCallResponse {
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub daily: Vec<OwDailyItem>,
}

#[derive(Debug, Deserialize)]
pub struct OwErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

// ==================== Normalized entities ====================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub country: String,
    pub coordinates: Coordinates,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub main: String,
    pub description: String,
    pub icon: String,
    pub icon_url: String,
}

/// All values are whole degrees Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Temperature {
    pub current: i32,
    pub feels_like: i32,
    pub min: i32,
    pub max: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentDetails {
    pub humidity: u8,
    pub pressure: u32,
    pub wind_speed: f64,
    pub wind_direction: Option<u16>,
    pub clouds: u8,
    pub visibility: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sun {
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub location: Location,
    pub weather: Condition,
    pub temperature: Temperature,
    pub details: CurrentDetails,
    pub sun: Sun,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastDetails {
    pub humidity: u8,
    pub wind_speed: f64,
    pub clouds: u8,
    /// Precipitation probability in percent.
    pub pop: u8,
}

/// One 3-hour forecast slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub datetime: DateTime<Utc>,
    pub temperature: Temperature,
    pub weather: Condition,
    pub details: ForecastDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub location: Location,
    pub forecasts: Vec<ForecastEntry>,
    /// Offset from UTC in seconds, as reported for the forecast city.
    #[serde(skip)]
    pub utc_offset_secs: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTemperature {
    pub min: i32,
    pub max: i32,
    pub day: i32,
    pub night: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyDetails {
    pub humidity: u8,
    pub wind_speed: f64,
    /// Unknown when the day was summarised from 3-hour slots.
    pub clouds: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub temperature: DailyTemperature,
    pub weather: Condition,
    pub details: DailyDetails,
    pub pop: u8,
}

// ==================== Clothing ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClothingImage {
    pub filename: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClothingRecommendation {
    pub category: String,
    #[serde(rename = "recommendation")]
    pub items: Vec<String>,
    pub advice: String,
    pub images: Vec<ClothingImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<RiskLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessories: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_tips: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedConditions {
    pub temperature: f64,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub wind_speed: f64,
    #[serde(default)]
    pub humidity: f64,
    #[serde(default)]
    pub is_night: bool,
}

// ==================== Responses ====================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentWithRecommendation {
    #[serde(flatten)]
    pub current: CurrentWeather,
    pub clothing_recommendation: ClothingRecommendation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityWeather {
    pub city_name: String,
    pub display_name: String,
    #[serde(flatten)]
    pub current: CurrentWeather,
    pub clothing_recommendation: ClothingRecommendation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanSource {
    /// Daily one-call endpoint.
    OneCall,
    /// Summarised from the 3-hour forecast.
    Forecast,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDay {
    #[serde(flatten)]
    pub forecast: DailyForecast,
    pub average_temperature: i32,
    pub clothing_recommendation: ClothingRecommendation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutfitPlan {
    pub city_name: String,
    pub display_name: String,
    pub coordinates: Coordinates,
    pub timezone: Option<String>,
    pub source: PlanSource,
    pub days: Vec<PlanDay>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.to_string()),
        }
    }
}
