use crate::error::AppError;
use crate::models::{AdvancedConditions, ApiResponse};
use crate::AppState;
use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("", web::get().to(welcome))
            .route("/health", web::get().to(health_check))
            .service(
                web::scope("/weather")
                    .route("/korea", web::get().to(all_korean_cities))
                    .route("/city/{city}", web::get().to(current_by_city))
                    .route("/coords", web::get().to(current_by_coords))
                    // `coords` must be registered before the `{city}` catch-all
                    .route("/forecast/coords", web::get().to(forecast_by_coords))
                    .route("/forecast/{city}", web::get().to(forecast_by_city))
                    .route("/weekly/coords", web::get().to(weekly_by_coords))
                    .route("/weekly/{city}", web::get().to(weekly_by_city))
                    .route(
                        "/recommendation/advanced",
                        web::get().to(advanced_recommendation),
                    )
                    .route("/recommendation", web::get().to(recommendation)),
            ),
    );
}

pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::<()>::error("Route not found"))
}

async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "message": "WeatherWear API is running",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn welcome() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Welcome to WeatherWear API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "/api/health",
            "/api/weather/city/:city",
            "/api/weather/coords",
            "/api/weather/forecast/:city",
            "/api/weather/forecast/coords",
            "/api/weather/korea",
            "/api/weather/weekly/coords",
            "/api/weather/weekly/:city",
            "/api/weather/recommendation",
            "/api/weather/recommendation/advanced"
        ]
    }))
}

// Query parameters arrive as text so that bad numbers map to our own errors.
#[derive(Deserialize)]
struct CoordsQuery {
    lat: Option<String>,
    lon: Option<String>,
}

impl CoordsQuery {
    fn parsed(&self) -> (Option<f64>, Option<f64>) {
        (parse_number(&self.lat), parse_number(&self.lon))
    }
}

#[derive(Deserialize)]
struct RecommendationQuery {
    temperature: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AdvancedQuery {
    temperature: Option<String>,
    condition: Option<String>,
    wind_speed: Option<String>,
    humidity: Option<String>,
    is_night: Option<String>,
}

fn parse_number(raw: &Option<String>) -> Option<f64> {
    raw.as_deref()
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

fn required_temperature(raw: &Option<String>) -> Result<f64, AppError> {
    parse_number(raw)
        .ok_or_else(|| AppError::Validation("temperature must be provided as a number".to_string()))
}

fn optional_number(raw: &Option<String>, name: &str) -> Result<f64, AppError> {
    match raw.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(0.0),
        Some(_) => parse_number(raw)
            .ok_or_else(|| AppError::Validation(format!("{} must be a number", name))),
    }
}

async fn current_by_city(
    state: web::Data<AppState>,
    city: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let weather = state.service.current_by_city(&city).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(weather)))
}

async fn current_by_coords(
    state: web::Data<AppState>,
    query: web::Query<CoordsQuery>,
) -> Result<HttpResponse, AppError> {
    let (lat, lon) = query.parsed();
    let weather = state.service.current_by_coords(lat, lon).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(weather)))
}

async fn forecast_by_city(
    state: web::Data<AppState>,
    city: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let forecast = state.service.forecast_by_city(&city).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(forecast)))
}

async fn forecast_by_coords(
    state: web::Data<AppState>,
    query: web::Query<CoordsQuery>,
) -> Result<HttpResponse, AppError> {
    let (lat, lon) = query.parsed();
    let forecast = state.service.forecast_by_coords(lat, lon).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(forecast)))
}

async fn weekly_by_city(
    state: web::Data<AppState>,
    city: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let plan = state.service.weekly_plan_by_city(&city).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(plan)))
}

async fn weekly_by_coords(
    state: web::Data<AppState>,
    query: web::Query<CoordsQuery>,
) -> Result<HttpResponse, AppError> {
    let (lat, lon) = query.parsed();
    let plan = state.service.weekly_plan_by_coords(lat, lon).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(plan)))
}

async fn recommendation(
    state: web::Data<AppState>,
    query: web::Query<RecommendationQuery>,
) -> Result<HttpResponse, AppError> {
    let temperature = required_temperature(&query.temperature)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        state.service.recommendation(temperature),
    )))
}

async fn advanced_recommendation(
    state: web::Data<AppState>,
    query: web::Query<AdvancedQuery>,
) -> Result<HttpResponse, AppError> {
    let input = AdvancedConditions {
        temperature: required_temperature(&query.temperature)?,
        condition: query
            .condition
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string),
        wind_speed: optional_number(&query.wind_speed, "windSpeed")?,
        humidity: optional_number(&query.humidity, "humidity")?,
        is_night: matches!(query.is_night.as_deref(), Some("true") | Some("1")),
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        state.service.recommendation_advanced(&input),
    )))
}

async fn all_korean_cities(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let cities = state.service.all_korean_cities().await;
    Ok(HttpResponse::Ok().json(ApiResponse::success(cities)))
}
