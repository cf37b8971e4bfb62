//! Fetches the forecast for Copenhagen (or LAT/LON from the environment) and prints it.
//!
//! ```sh
//! EDR_API_KEY=... cargo run --example fetch_forecast
//! ```

use edr_forecast::{ClientConfig, EdrForecast, EdrForecastError, LatLon};
use std::env;

#[tokio::main]
async fn main() -> Result<(), EdrForecastError> {
    let env = env_logger::Env::default().default_filter_or("info");
    env_logger::init_from_env(env);

    let api_key = env::var("EDR_API_KEY").unwrap_or_default();
    let lat = env::var("LAT").ok().and_then(|v| v.parse().ok()).unwrap_or(55.6761);
    let lon = env::var("LON").ok().and_then(|v| v.parse().ok()).unwrap_or(12.5683);
    let config = match env::var("EDR_CONFIG") {
        Ok(path) => ClientConfig::from_json_file(path)?,
        Err(_) => ClientConfig::default(),
    };

    let client = EdrForecast::builder()
        .location(LatLon(lat, lon))
        .api_key(api_key)
        .config(config)
        .build()?;

    let snapshot = client.update().await?;

    if let Some(current) = &snapshot.current {
        println!(
            "Now ({}): {:?} °C, wind {:?} m/s, {}",
            current.time, current.temperature, current.wind_speed, current.weather_code
        );
    }

    println!("\n--- Next 12 hours ---");
    for hour in snapshot.hourly.iter().take(12) {
        println!(
            "{}  {:>6.1?} °C  {:>5.1?} mm  {:>5.0?} %  {}",
            hour.time.format("%a %H:%M"),
            hour.temperature,
            hour.precipitation,
            hour.cloud_cover,
            hour.weather_code
        );
    }

    println!("\n--- Daily ---");
    for day in &snapshot.daily {
        println!(
            "{}  min {:?}  max {:?}  rain {:.1} mm  {} ({} samples)",
            day.date,
            day.temperature_min,
            day.temperature_max,
            day.precipitation_sum,
            day.weather_code_last,
            day.samples
        );
    }

    Ok(())
}
