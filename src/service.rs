use crate::cities::{City, KOREAN_CITIES};
use crate::clothing::ClothingRecommender;
use crate::error::{AppError, ProviderError};
use crate::models::{
    AdvancedConditions, CityWeather, ClothingRecommendation, CurrentWeather,
    CurrentWithRecommendation, Forecast, OutfitPlan,
};
use crate::normalize;
use crate::planner::{validate_coords, OutfitPlanner};
use crate::weather::WeatherProvider;
use futures::future::join_all;
use log::{info, warn};
use std::sync::Arc;

/// Operations exposed to the HTTP layer and the CLI.
#[derive(Clone)]
pub struct WeatherService {
    provider: Arc<dyn WeatherProvider>,
    recommender: ClothingRecommender,
    planner: OutfitPlanner,
}

impl WeatherService {
    pub fn new(provider: Arc<dyn WeatherProvider>, recommender: ClothingRecommender) -> Self {
        let planner = OutfitPlanner::new(provider.clone(), recommender.clone());
        Self {
            provider,
            recommender,
            planner,
        }
    }

    fn with_recommendation(&self, current: CurrentWeather) -> CurrentWithRecommendation {
        let clothing_recommendation = self
            .recommender
            .recommend(f64::from(current.temperature.current));
        CurrentWithRecommendation {
            current,
            clothing_recommendation,
        }
    }

    pub async fn current_by_city(&self, city: &str) -> Result<CurrentWithRecommendation, AppError> {
        let raw = self.provider.current_by_city(city).await?;
        Ok(self.with_recommendation(normalize::current(&raw)))
    }

    pub async fn current_by_coords(
        &self,
        lat: Option<f64>,
        lon: Option<f64>,
    ) -> Result<CurrentWithRecommendation, AppError> {
        let coords = validate_coords(lat, lon)?;
        let raw = self.provider.current_by_coords(coords.lat, coords.lon).await?;
        Ok(self.with_recommendation(normalize::current(&raw)))
    }

    pub async fn forecast_by_city(&self, city: &str) -> Result<Forecast, AppError> {
        let raw = self.provider.forecast_by_city(city).await?;
        Ok(normalize::forecast(&raw))
    }

    pub async fn forecast_by_coords(
        &self,
        lat: Option<f64>,
        lon: Option<f64>,
    ) -> Result<Forecast, AppError> {
        let coords = validate_coords(lat, lon)?;
        let raw = self.provider.forecast_by_coords(coords.lat, coords.lon).await?;
        Ok(normalize::forecast(&raw))
    }

    pub async fn weekly_plan_by_city(&self, city: &str) -> Result<OutfitPlan, AppError> {
        self.planner.plan_by_city(city).await
    }

    pub async fn weekly_plan_by_coords(
        &self,
        lat: Option<f64>,
        lon: Option<f64>,
    ) -> Result<OutfitPlan, AppError> {
        self.planner.plan_by_coords(lat, lon).await
    }

    pub fn recommendation(&self, temp_c: f64) -> ClothingRecommendation {
        self.recommender.recommend(temp_c)
    }

    pub fn recommendation_advanced(&self, input: &AdvancedConditions) -> ClothingRecommendation {
        self.recommender.recommend_advanced(input)
    }

    /// Current weather for every registry city, fetched concurrently.
    /// Cities whose lookup fails are logged and left out.
    pub async fn all_korean_cities(&self) -> Vec<CityWeather> {
        let outcomes = join_all(KOREAN_CITIES.iter().map(|city| self.city_weather(city))).await;

        let total = outcomes.len();
        let cities: Vec<CityWeather> = outcomes
            .into_iter()
            .filter_map(|outcome| match outcome {
                Ok(weather) => Some(weather),
                Err((city, e)) => {
                    warn!("❌ Failed to fetch weather for {}: {}", city, e);
                    None
                }
            })
            .collect();

        info!("🗺️  Fetched weather for {}/{} cities", cities.len(), total);
        cities
    }

    async fn city_weather(&self, city: &City) -> Result<CityWeather, (&'static str, ProviderError)> {
        let raw = self
            .provider
            .current_by_coords(city.lat, city.lon)
            .await
            .map_err(|e| (city.name, e))?;
        let current = normalize::current(&raw);
        let clothing_recommendation = self
            .recommender
            .recommend(f64::from(current.temperature.current));

        Ok(CityWeather {
            city_name: city.name.to_string(),
            display_name: city.display_name.to_string(),
            current,
            clothing_recommendation,
        })
    }
}
