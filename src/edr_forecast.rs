//! The main entry point: a point-forecast client that keeps the latest successful
//! update as an immutable [`Snapshot`].

use crate::aggregate::daily::daily_forecast;
use crate::aggregate::hourly::hourly_forecast;
use crate::collections::resolver::{select_collection, CollectionResolver};
use crate::config::ClientConfig;
use crate::coverage::coverage_json::RawCoverage;
use crate::coverage::decoder::decode_coverage;
use crate::error::EdrForecastError;
use crate::fetch::clock::{Clock, TokioClock};
use crate::fetch::fetcher::RetryingFetcher;
use crate::fetch::rate_limiter::RateLimiter;
use crate::fetch::retry::RetryPolicy;
use crate::fetch::transport::{HttpTransport, ReqwestTransport};
use crate::query::endpoint::EdrEndpoint;
use crate::query::position::PositionQuery;
use crate::types::daily::DailyRecord;
use crate::types::snapshot::Snapshot;
use crate::types::timestep::TimestepRecord;
use bon::bon;
use log::{debug, info};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
///
/// # Examples
///
/// ```
/// use edr_forecast::LatLon;
///
/// let copenhagen = LatLon(55.6761, 12.5683);
/// assert_eq!(copenhagen.0, 55.6761); // Latitude
/// assert_eq!(copenhagen.1, 12.5683); // Longitude
/// assert!(copenhagen.validate().is_ok());
/// assert!(LatLon(91.0, 0.0).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

impl LatLon {
    /// Checks latitude is within [-90, 90] and longitude within [-180, 180].
    pub fn validate(&self) -> Result<(), EdrForecastError> {
        let LatLon(lat, lon) = *self;
        if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon) {
            Ok(())
        } else {
            Err(EdrForecastError::InvalidCoordinates { lat, lon })
        }
    }
}

/// Fetches point forecasts from an EDR API and holds the latest result.
///
/// Each call to [`EdrForecast::update`] resolves the collection, queries the position
/// endpoint, decodes and aggregates the response, and then swaps in a new
/// [`Snapshot`]. A failed or cancelled update leaves the previous snapshot in place.
///
/// `update` must not be called concurrently on the same client; schedule it from a
/// single task.
///
/// # Examples
///
/// ```no_run
/// use edr_forecast::{EdrForecast, EdrForecastError, LatLon};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), EdrForecastError> {
/// let client = EdrForecast::builder()
///     .location(LatLon(55.6761, 12.5683))
///     .api_key("my-api-key")
///     .build()?;
///
/// client.update().await?;
/// if let Some(current) = client.current().await {
///     println!("{}: {:?} °C, {}", current.time, current.temperature, current.weather_code);
/// }
/// for day in client.daily().await {
///     println!("{}: {:?} / {:?}", day.date, day.temperature_min, day.temperature_max);
/// }
/// # Ok(())
/// # }
/// ```
pub struct EdrForecast {
    config: ClientConfig,
    location: LatLon,
    endpoint: EdrEndpoint,
    fetcher: RetryingFetcher,
    clock: Arc<dyn Clock>,
    retry: RetryPolicy,
    snapshot: RwLock<Arc<Snapshot>>,
}

#[bon]
impl EdrForecast {
    /// Creates a client. No request is made until [`EdrForecast::update`].
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.location(LatLon)`: **Required.** The point to forecast for.
    /// * `.api_key(impl Into<String>)`: **Required.** Sent in the configured auth header.
    /// * `.config(ClientConfig)`: Optional. Defaults to [`ClientConfig::default`].
    /// * `.transport(Arc<dyn HttpTransport>)`: Optional. Defaults to a [`ReqwestTransport`]
    ///   with the configured timeouts.
    /// * `.clock(Arc<dyn Clock>)`: Optional. Defaults to [`TokioClock`].
    ///
    /// # Errors
    ///
    /// Returns [`EdrForecastError::InvalidCoordinates`] or [`EdrForecastError::InvalidConfig`]
    /// for bad input, and [`EdrForecastError::Fetch`] if the HTTP client cannot be built.
    #[builder]
    pub fn new(
        location: LatLon,
        #[builder(into)] api_key: String,
        config: Option<ClientConfig>,
        transport: Option<Arc<dyn HttpTransport>>,
        clock: Option<Arc<dyn Clock>>,
    ) -> Result<Self, EdrForecastError> {
        location.validate()?;
        let config = config.unwrap_or_default();
        config.validate()?;

        let transport: Arc<dyn HttpTransport> = match transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(config.timeouts())?),
        };
        let clock: Arc<dyn Clock> = clock.unwrap_or_else(|| Arc::new(TokioClock));

        let rate_limiter = RateLimiter::new(config.min_request_interval, clock.clone());
        let fetcher = RetryingFetcher::new(
            transport,
            rate_limiter,
            clock.clone(),
            config.rate_limit_cooldown,
        );
        let endpoint = EdrEndpoint::new(&config.base_url, &config.auth_header, api_key);

        Ok(Self {
            retry: config.retry_policy(),
            config,
            location,
            endpoint,
            fetcher,
            clock,
            snapshot: RwLock::new(Arc::new(Snapshot::default())),
        })
    }

    /// Runs a full update, retrying with backoff, and publishes the new snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`EdrForecastError::RetriesExhausted`] carrying the last attempt's error
    /// once all attempts failed, or a fatal error straight away. The previous
    /// snapshot is kept in both cases.
    pub async fn update(&self) -> Result<Arc<Snapshot>, EdrForecastError> {
        let snapshot = self
            .retry
            .run(self.clock.as_ref(), |attempt| async move {
                debug!(
                    "Forecast update attempt {}/{}",
                    attempt + 1,
                    self.retry.max_attempts()
                );
                self.update_once().await
            })
            .await?;

        let snapshot = Arc::new(snapshot);
        *self.snapshot.write().await = snapshot.clone();
        info!(
            "Forecast updated from {}: {} hourly, {} daily records",
            snapshot.collection_id.as_deref().unwrap_or("unknown collection"),
            snapshot.hourly.len(),
            snapshot.daily.len()
        );
        Ok(snapshot)
    }

    async fn update_once(&self) -> Result<Snapshot, EdrForecastError> {
        let index = CollectionResolver::new(&self.fetcher, &self.endpoint)
            .resolve()
            .await?;
        let collection = select_collection(&index, &self.config.preferred_collection)?;

        let query = PositionQuery::builder()
            .location(self.location)
            .parameters(self.config.parameters.clone())
            .now(self.clock.utc_now())
            .horizon(self.config.horizon())
            .build();
        debug!(
            "Querying {} at {} for {}",
            collection.id,
            query.coords(),
            query.datetime()
        );

        let request = self.endpoint.position_request(&collection.id, &query);
        let coverage: RawCoverage = self.fetcher.fetch_json(&request).await?;
        let records = decode_coverage(&coverage, &self.config.parameters)?;

        Ok(Snapshot {
            current: records.first().cloned(),
            hourly: hourly_forecast(&records, self.config.hourly_limit),
            daily: daily_forecast(&records),
            collection_id: Some(collection.id.clone()),
            updated_at: Some(self.clock.utc_now()),
        })
    }

    /// The latest published snapshot; empty before the first successful update.
    pub async fn snapshot(&self) -> Arc<Snapshot> {
        self.snapshot.read().await.clone()
    }

    pub async fn current(&self) -> Option<TimestepRecord> {
        self.snapshot().await.current.clone()
    }

    pub async fn hourly(&self) -> Vec<TimestepRecord> {
        self.snapshot().await.hourly.clone()
    }

    pub async fn daily(&self) -> Vec<DailyRecord> {
        self.snapshot().await.daily.clone()
    }

    pub fn location(&self) -> LatLon {
        self.location
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}
