mod aggregate;
mod collections;
mod config;
mod coverage;
mod edr_forecast;
mod error;
mod fetch;
mod query;
mod types;

#[cfg(test)]
mod testing;

pub use edr_forecast::*;
pub use error::{EdrForecastError, ErrorKind};

pub use config::{ClientConfig, DEFAULT_AUTH_HEADER, DEFAULT_BASE_URL, MAX_HORIZON_HOURS};

pub use fetch::clock::{Clock, TokioClock};
pub use fetch::error::FetchError;
pub use fetch::fetcher::RetryingFetcher;
pub use fetch::rate_limiter::RateLimiter;
pub use fetch::retry::RetryPolicy;
pub use fetch::transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, Timeouts};

pub use collections::error::CollectionError;
pub use collections::resolver::{select_collection, CollectionResolver, DEFAULT_COLLECTION};
pub use query::endpoint::EdrEndpoint;
pub use query::position::{PositionQuery, DEFAULT_HORIZON_HOURS};

pub use coverage::coverage_json::{Axis, Domain, RawCoverage};
pub use coverage::decoder::decode_coverage;
pub use coverage::error::DecodeError;
pub use coverage::normalize::normalize;

pub use aggregate::daily::daily_forecast;
pub use aggregate::hourly::hourly_forecast;

pub use types::collection::{Collection, CollectionIndex};
pub use types::daily::DailyRecord;
pub use types::parameter::{Parameter, ParameterSet};
pub use types::snapshot::Snapshot;
pub use types::timestep::TimestepRecord;
pub use types::weather_condition::WeatherCondition;
