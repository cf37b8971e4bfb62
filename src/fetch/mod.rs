pub mod clock;
pub mod error;
pub mod fetcher;
pub mod rate_limiter;
pub mod retry;
pub mod transport;
