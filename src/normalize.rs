//! Shape upstream payloads into the service's own entities.
//!
//! Every function here is total over a well-formed payload. Temperatures are
//! rounded half away from zero to whole degrees.

use crate::models::{
    Condition, Coordinates, CurrentDetails, CurrentWeather, DailyDetails, DailyForecast,
    DailyTemperature, Forecast, ForecastDetails, ForecastEntry, Location, OwCondition,
    OwCurrentResponse, OwForecastResponse, OwOneCallResponse, Sun, Temperature,
};
use chrono::{DateTime, TimeZone, Utc};

pub fn round_temp(value: f64) -> i32 {
    value.round() as i32
}

/// Probability in `0..=1` as a whole percentage.
pub fn pop_percent(pop: f64) -> u8 {
    (pop * 100.0).round().clamp(0.0, 100.0) as u8
}

pub fn icon_url(icon: &str) -> String {
    format!("https://openweathermap.org/img/wn/{}@2x.png", icon)
}

fn unix_to_utc(ts: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(ts, 0).single().unwrap_or_default()
}

fn condition(weather: &[OwCondition]) -> Condition {
    match weather.first() {
        Some(w) => Condition {
            main: w.main.clone(),
            description: w.description.clone(),
            icon: w.icon.clone(),
            icon_url: icon_url(&w.icon),
        },
        None => Condition {
            main: "Unknown".to_string(),
            description: "Unknown".to_string(),
            icon: String::new(),
            icon_url: String::new(),
        },
    }
}

pub fn current(raw: &OwCurrentResponse) -> CurrentWeather {
    CurrentWeather {
        location: Location {
            name: raw.name.clone(),
            country: raw.sys.country.clone(),
            coordinates: Coordinates {
                lat: raw.coord.lat,
                lon: raw.coord.lon,
            },
        },
        weather: condition(&raw.weather),
        temperature: Temperature {
            current: round_temp(raw.main.temp),
            feels_like: round_temp(raw.main.feels_like),
            min: round_temp(raw.main.temp_min),
            max: round_temp(raw.main.temp_max),
        },
        details: CurrentDetails {
            humidity: raw.main.humidity,
            pressure: raw.main.pressure,
            wind_speed: raw.wind.speed,
            wind_direction: raw.wind.deg,
            clouds: raw.clouds.all,
            visibility: raw.visibility,
        },
        sun: Sun {
            sunrise: unix_to_utc(raw.sys.sunrise),
            sunset: unix_to_utc(raw.sys.sunset),
        },
        timestamp: unix_to_utc(raw.dt),
    }
}

pub fn forecast(raw: &OwForecastResponse) -> Forecast {
    let forecasts = raw
        .list
        .iter()
        .map(|item| ForecastEntry {
            datetime: unix_to_utc(item.dt),
            temperature: Temperature {
                current: round_temp(item.main.temp),
                feels_like: round_temp(item.main.feels_like),
                min: round_temp(item.main.temp_min),
                max: round_temp(item.main.temp_max),
            },
            weather: condition(&item.weather),
            details: ForecastDetails {
                humidity: item.main.humidity,
                wind_speed: item.wind.speed,
                clouds: item.clouds.all,
                pop: pop_percent(item.pop),
            },
        })
        .collect();

    Forecast {
        location: Location {
            name: raw.city.name.clone(),
            country: raw.city.country.clone(),
            coordinates: Coordinates {
                lat: raw.city.coord.lat,
                lon: raw.city.coord.lon,
            },
        },
        forecasts,
        utc_offset_secs: raw.city.timezone,
    }
}

/// Daily entries dated by their UTC calendar day.
pub fn daily(raw: &OwOneCallResponse) -> Vec<DailyForecast> {
    raw.daily
        .iter()
        .map(|item| DailyForecast {
            date: unix_to_utc(item.dt).date_naive(),
            temperature: DailyTemperature {
                min: round_temp(item.temp.min),
                max: round_temp(item.temp.max),
                day: round_temp(item.temp.day),
                night: round_temp(item.temp.night),
            },
            weather: condition(&item.weather),
            details: DailyDetails {
                humidity: item.humidity,
                wind_speed: item.wind_speed,
                clouds: Some(item.clouds),
            },
            pop: pop_percent(item.pop),
        })
        .collect()
}

/// `UTC+09:00` style label for an offset in seconds.
pub fn utc_offset_label(offset_secs: i32) -> String {
    let sign = if offset_secs < 0 { '-' } else { '+' };
    let abs = offset_secs.unsigned_abs();
    format!("UTC{}{:02}:{:02}", sign, abs / 3600, (abs % 3600) / 60)
}
