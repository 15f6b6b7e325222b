use actix_files as fs;
use actix_web::{middleware, web, App, HttpServer};
use clap::{Parser, Subcommand};
use log::info;
use serde::Serialize;
use std::sync::Arc;

mod cities;
mod clothing;
mod config;
mod error;
mod handlers;
mod images;
mod models;
mod normalize;
mod planner;
mod service;
mod summary;
mod weather;

#[cfg(test)]
mod test_support;

use crate::clothing::ClothingRecommender;
use crate::config::Config;
use crate::error::AppError;
use crate::images::ImageCatalog;
use crate::models::AdvancedConditions;
use crate::service::WeatherService;

#[derive(Parser, Debug)]
#[command(author, version, about = "WeatherWear - weather and outfit recommendation API")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the web server
    Serve {
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Print current weather and outfit for a city
    Current { city: String },
    /// Print the 7-day outfit plan for a city or a coordinate pair
    Weekly {
        city: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        lon: Option<f64>,
    },
    /// Print the outfit recommendation for a temperature
    Recommend {
        #[arg(allow_hyphen_values = true)]
        temperature: f64,
        /// Weather condition, e.g. Rain, Drizzle, Snow
        #[arg(long)]
        condition: Option<String>,
        /// Wind speed in m/s
        #[arg(long)]
        wind: Option<f64>,
        /// Relative humidity in percent
        #[arg(long)]
        humidity: Option<f64>,
        #[arg(long)]
        night: bool,
    },
    /// Print current weather for every registry city
    Korea,
    /// List the built-in cities
    Cities,
}

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub service: WeatherService,
}

#[actix_web::main]
async fn main() -> Result<(), AppError> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    let weather_client = weather::WeatherClient::new(&config)?;
    let images = Arc::new(ImageCatalog::load(&config.image_dir));
    let service = WeatherService::new(Arc::new(weather_client), ClothingRecommender::new(images));
    let state = AppState { config, service };

    match cli.command {
        Some(Commands::Serve { port }) => {
            let port = port.unwrap_or(state.config.port);
            start_server(port, state).await?;
        }
        Some(Commands::Current { city }) => {
            print_json(&state.service.current_by_city(&city).await?)?;
        }
        Some(Commands::Weekly { city, lat, lon }) => {
            let plan = match city {
                Some(city) => state.service.weekly_plan_by_city(&city).await?,
                None => state.service.weekly_plan_by_coords(lat, lon).await?,
            };
            print_json(&plan)?;
        }
        Some(Commands::Recommend {
            temperature,
            condition,
            wind,
            humidity,
            night,
        }) => {
            let advanced = condition.is_some() || wind.is_some() || humidity.is_some() || night;
            if advanced {
                print_json(&state.service.recommendation_advanced(&AdvancedConditions {
                    temperature,
                    condition,
                    wind_speed: wind.unwrap_or(0.0),
                    humidity: humidity.unwrap_or(0.0),
                    is_night: night,
                }))?;
            } else {
                print_json(&state.service.recommendation(temperature))?;
            }
        }
        Some(Commands::Korea) => {
            print_json(&state.service.all_korean_cities().await)?;
        }
        Some(Commands::Cities) => {
            list_cities();
        }
        None => {
            let port = state.config.port;
            start_server(port, state).await?;
        }
    }

    Ok(())
}

async fn start_server(port: u16, state: AppState) -> Result<(), AppError> {
    info!("🌐 Starting server on http://0.0.0.0:{}", port);
    if state.config.weather_api_key.is_none() {
        log::warn!("⚠️  WEATHER_API_KEY is not set, weather lookups will fail");
    }

    let image_dir = state.config.image_dir.clone();

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .service(fs::Files::new("/api/images", image_dir.clone()))
            .configure(handlers::configure_routes)
            .default_service(web::to(handlers::not_found))
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await?;

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(value).map_err(std::io::Error::from)?;
    println!("{}", json);
    Ok(())
}

fn list_cities() {
    println!("📍 Built-in cities:");
    for city in cities::KOREAN_CITIES.iter() {
        println!(
            "  {:<10} {:<4} ({:.4}, {:.4})",
            city.name, city.display_name, city.lat, city.lon
        );
    }
}
