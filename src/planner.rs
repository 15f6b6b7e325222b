use crate::cities::find_city;
use crate::clothing::ClothingRecommender;
use crate::error::AppError;
use crate::models::{Coordinates, DailyForecast, OutfitPlan, PlanDay, PlanSource};
use crate::normalize::{self, round_temp, utc_offset_label};
use crate::summary::build_daily_summaries;
use crate::weather::WeatherProvider;
use log::{info, warn};
use std::sync::Arc;

pub const PLAN_DAYS: usize = 7;

/// Both coordinates must be present and finite.
pub fn validate_coords(lat: Option<f64>, lon: Option<f64>) -> Result<Coordinates, AppError> {
    match (lat, lon) {
        (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => {
            Ok(Coordinates { lat, lon })
        }
        _ => Err(AppError::InvalidCoordinates(
            "both lat and lon must be provided as numbers".to_string(),
        )),
    }
}

/// Where the 3-hour forecast is fetched from if the daily endpoint fails.
enum ForecastFallback<'a> {
    City(&'a str),
    Coords(Coordinates),
}

struct DailySeries {
    days: Vec<DailyForecast>,
    timezone: Option<String>,
    source: PlanSource,
}

#[derive(Clone)]
pub struct OutfitPlanner {
    provider: Arc<dyn WeatherProvider>,
    recommender: ClothingRecommender,
}

impl OutfitPlanner {
    pub fn new(provider: Arc<dyn WeatherProvider>, recommender: ClothingRecommender) -> Self {
        Self {
            provider,
            recommender,
        }
    }

    pub async fn plan_by_city(&self, city: &str) -> Result<OutfitPlan, AppError> {
        let (city_name, display_name, coordinates) = match find_city(city) {
            Some(known) => (
                known.name.to_string(),
                known.display_name.to_string(),
                known.coordinates(),
            ),
            None => {
                info!("📍 {} is not in the registry, asking the provider", city);
                let current = normalize::current(&self.provider.current_by_city(city).await?);
                (
                    city.trim().to_string(),
                    current.location.name,
                    current.location.coordinates,
                )
            }
        };

        let series = self
            .daily_series(coordinates, ForecastFallback::City(&city_name))
            .await?;
        self.assemble(city_name, display_name, coordinates, series)
    }

    pub async fn plan_by_coords(
        &self,
        lat: Option<f64>,
        lon: Option<f64>,
    ) -> Result<OutfitPlan, AppError> {
        let coordinates = validate_coords(lat, lon)?;
        let current = normalize::current(
            &self
                .provider
                .current_by_coords(coordinates.lat, coordinates.lon)
                .await?,
        );
        let name = current.location.name;

        let series = self
            .daily_series(coordinates, ForecastFallback::Coords(coordinates))
            .await?;
        self.assemble(name.clone(), name, coordinates, series)
    }

    /// Daily endpoint first; any failure there degrades to summarising the
    /// 3-hour forecast. A failing fallback is returned as is.
    async fn daily_series(
        &self,
        coordinates: Coordinates,
        fallback: ForecastFallback<'_>,
    ) -> Result<DailySeries, AppError> {
        match self
            .provider
            .daily_by_coords(coordinates.lat, coordinates.lon)
            .await
        {
            Ok(raw) => Ok(DailySeries {
                days: normalize::daily(&raw),
                timezone: raw.timezone,
                source: PlanSource::OneCall,
            }),
            Err(e) => {
                warn!("⚠️  Daily forecast unavailable ({}), summarising 3-hour forecast", e);
                let raw = match fallback {
                    ForecastFallback::City(city) => self.provider.forecast_by_city(city).await?,
                    ForecastFallback::Coords(c) => {
                        self.provider.forecast_by_coords(c.lat, c.lon).await?
                    }
                };
                let forecast = normalize::forecast(&raw);
                Ok(DailySeries {
                    days: build_daily_summaries(&forecast.forecasts),
                    timezone: Some(utc_offset_label(forecast.utc_offset_secs)),
                    source: PlanSource::Forecast,
                })
            }
        }
    }

    fn assemble(
        &self,
        city_name: String,
        display_name: String,
        coordinates: Coordinates,
        series: DailySeries,
    ) -> Result<OutfitPlan, AppError> {
        let days: Vec<PlanDay> = series
            .days
            .into_iter()
            .take(PLAN_DAYS)
            .map(|forecast| {
                let average = round_temp(
                    f64::from(forecast.temperature.min + forecast.temperature.max) / 2.0,
                );
                PlanDay {
                    clothing_recommendation: self.recommender.recommend(f64::from(average)),
                    average_temperature: average,
                    forecast,
                }
            })
            .collect();

        if days.is_empty() {
            return Err(AppError::EmptyForecast(format!(
                "no daily data for {}",
                display_name
            )));
        }

        info!(
            "👕 Built {}-day outfit plan for {} from {:?}",
            days.len(),
            display_name,
            series.source
        );

        Ok(OutfitPlan {
            city_name,
            display_name,
            coordinates,
            timezone: series.timezone,
            source: series.source,
            days,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use crate::test_support::StubProvider;

    fn planner(stub: StubProvider) -> (OutfitPlanner, Arc<StubProvider>) {
        let stub = Arc::new(stub);
        (
            OutfitPlanner::new(stub.clone(), ClothingRecommender::default()),
            stub,
        )
    }

    #[tokio::test]
    async fn registry_city_uses_daily_endpoint() {
        let (planner, stub) = planner(StubProvider::default());
        let plan = planner.plan_by_city("seoul").await.unwrap();

        assert_eq!(plan.source, PlanSource::OneCall);
        assert_eq!(plan.city_name, "Seoul");
        assert_eq!(plan.display_name, "서울");
        assert_eq!(plan.timezone.as_deref(), Some("Asia/Seoul"));
        assert_eq!(plan.days.len(), PLAN_DAYS);
        assert_eq!(stub.calls("current_by_city"), 0);
        assert_eq!(stub.calls("forecast_by_city"), 0);
    }

    #[tokio::test]
    async fn days_are_capped_at_seven() {
        let (planner, _) = planner(StubProvider {
            daily_days: 8,
            ..StubProvider::default()
        });
        let plan = planner.plan_by_city("Busan").await.unwrap();
        assert_eq!(plan.days.len(), 7);
    }

    #[tokio::test]
    async fn short_series_is_passed_through() {
        let (planner, _) = planner(StubProvider {
            daily_days: 3,
            ..StubProvider::default()
        });
        let plan = planner.plan_by_city("Busan").await.unwrap();
        assert_eq!(plan.days.len(), 3);
    }

    #[tokio::test]
    async fn average_and_recommendation_follow_min_max() {
        let (planner, _) = planner(StubProvider::default());
        let plan = planner.plan_by_city("Seoul").await.unwrap();

        for day in &plan.days {
            let expected = round_temp(
                f64::from(day.forecast.temperature.min + day.forecast.temperature.max) / 2.0,
            );
            assert_eq!(day.average_temperature, expected);
            assert_eq!(
                day.clothing_recommendation,
                ClothingRecommender::default().recommend(f64::from(expected))
            );
        }
    }

    #[tokio::test]
    async fn failed_daily_endpoint_falls_back_to_forecast() {
        let (planner, stub) = planner(StubProvider {
            daily_error: Some(ProviderError::Unauthorized),
            ..StubProvider::default()
        });
        let plan = planner.plan_by_city("Seoul").await.unwrap();

        assert_eq!(plan.source, PlanSource::Forecast);
        assert!(!plan.days.is_empty());
        assert!(plan.days.len() <= PLAN_DAYS);
        assert_eq!(plan.timezone.as_deref(), Some("UTC+09:00"));
        assert_eq!(stub.calls("forecast_by_city"), 1);
        for day in &plan.days {
            assert_eq!(day.forecast.temperature.day, day.forecast.temperature.night);
            assert!(day.forecast.details.clouds.is_none());
        }
    }

    #[tokio::test]
    async fn failing_fallback_propagates_its_error() {
        let (planner, _) = planner(StubProvider {
            daily_error: Some(ProviderError::Network("down".to_string())),
            forecast_error: Some(ProviderError::RateLimited),
            ..StubProvider::default()
        });
        let err = planner.plan_by_city("Seoul").await.unwrap_err();
        assert!(matches!(err, AppError::Provider(ProviderError::RateLimited)));
    }

    #[tokio::test]
    async fn unknown_city_is_resolved_through_provider() {
        let (planner, stub) = planner(StubProvider::default());
        let plan = planner.plan_by_city("Tokyo").await.unwrap();

        assert_eq!(stub.calls("current_by_city"), 1);
        assert_eq!(plan.city_name, "Tokyo");
        assert_eq!(plan.display_name, "Tokyo");
        assert_eq!(plan.source, PlanSource::OneCall);
    }

    #[tokio::test]
    async fn unknown_city_missing_upstream_is_not_found() {
        let (planner, _) = planner(StubProvider {
            current_error: Some(ProviderError::NotFound),
            ..StubProvider::default()
        });
        let err = planner.plan_by_city("Atlantis").await.unwrap_err();
        assert!(matches!(err, AppError::Provider(ProviderError::NotFound)));
    }

    #[tokio::test]
    async fn empty_series_is_an_error() {
        let (planner, _) = planner(StubProvider {
            daily_days: 0,
            ..StubProvider::default()
        });
        let err = planner.plan_by_city("Seoul").await.unwrap_err();
        assert!(matches!(err, AppError::EmptyForecast(_)));
    }

    #[tokio::test]
    async fn coords_plan_uses_coordinate_fallback() {
        let (planner, stub) = planner(StubProvider {
            daily_error: Some(ProviderError::NotFound),
            ..StubProvider::default()
        });
        let plan = planner
            .plan_by_coords(Some(35.1796), Some(129.0756))
            .await
            .unwrap();

        assert_eq!(plan.source, PlanSource::Forecast);
        assert_eq!(plan.coordinates.lat, 35.1796);
        assert_eq!(stub.calls("forecast_by_coords"), 1);
        assert_eq!(stub.calls("forecast_by_city"), 0);
    }

    #[tokio::test]
    async fn coords_must_be_present_and_finite() {
        let (planner, stub) = planner(StubProvider::default());
        for (lat, lon) in [
            (None, Some(127.0)),
            (Some(37.0), None),
            (Some(f64::NAN), Some(127.0)),
            (Some(37.0), Some(f64::INFINITY)),
        ] {
            let err = planner.plan_by_coords(lat, lon).await.unwrap_err();
            assert!(matches!(err, AppError::InvalidCoordinates(_)));
        }
        assert_eq!(stub.calls("current_by_coords"), 0);
    }
}
