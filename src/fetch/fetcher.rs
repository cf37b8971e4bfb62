use crate::fetch::clock::Clock;
use crate::fetch::error::FetchError;
use crate::fetch::rate_limiter::RateLimiter;
use crate::fetch::transport::{HttpRequest, HttpResponse, HttpTransport};
use log::{info, warn};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

/// Issues rate-limited requests and classifies the outcome.
///
/// A single call never retries: failures are returned as a [`FetchError`] whose
/// [`kind`](FetchError::kind) tells the update loop what to do. The one exception to
/// "return immediately" is HTTP 429, after which the fetcher sits out the configured
/// cooldown before reporting the error.
pub struct RetryingFetcher {
    transport: Arc<dyn HttpTransport>,
    rate_limiter: RateLimiter,
    clock: Arc<dyn Clock>,
    rate_limit_cooldown: Duration,
}

impl RetryingFetcher {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        rate_limiter: RateLimiter,
        clock: Arc<dyn Clock>,
        rate_limit_cooldown: Duration,
    ) -> Self {
        Self {
            transport,
            rate_limiter,
            clock,
            rate_limit_cooldown,
        }
    }

    /// Fetches `request` and parses a 200 body as JSON.
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: &HttpRequest,
    ) -> Result<T, FetchError> {
        let body = self.fetch(request).await?;
        serde_json::from_str(&body).map_err(|e| FetchError::JsonParse {
            url: request.url.clone(),
            source: e,
        })
    }

    /// Fetches `request` and returns the body text of a 200 response.
    pub async fn fetch(&self, request: &HttpRequest) -> Result<String, FetchError> {
        self.rate_limiter.await_slot().await;
        info!("Requesting {}", request.url);

        let response = self.transport.get(request).await?;
        self.classify(&request.url, response).await
    }

    async fn classify(&self, url: &str, response: HttpResponse) -> Result<String, FetchError> {
        match response.status {
            StatusCode::OK => {
                info!("Received {} bytes from {}", response.body.len(), url);
                Ok(response.body)
            }
            StatusCode::TOO_MANY_REQUESTS => {
                warn!(
                    "Rate limit exceeded for {}, cooling down for {:.1}s",
                    url,
                    self.rate_limit_cooldown.as_secs_f64()
                );
                self.clock.sleep(self.rate_limit_cooldown).await;
                Err(FetchError::RateLimitExceeded {
                    url: url.to_string(),
                })
            }
            StatusCode::NOT_FOUND => {
                warn!("{} returned 404: {}", url, response.body);
                Err(FetchError::NoDataForWindow {
                    url: url.to_string(),
                    body: response.body,
                })
            }
            status => {
                warn!("{} failed with status {}: {}", url, status, response.body);
                Err(FetchError::UnexpectedStatus {
                    url: url.to_string(),
                    status,
                    body: response.body,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::testing::{ManualClock, ScriptedTransport};
    use serde_json::Value;

    fn fetcher(transport: Arc<ScriptedTransport>, clock: Arc<ManualClock>) -> RetryingFetcher {
        RetryingFetcher::new(
            transport,
            RateLimiter::new(Duration::from_secs(2), clock.clone()),
            clock,
            Duration::from_secs(10),
        )
    }

    #[tokio::test]
    async fn ok_body_is_parsed() {
        let clock = Arc::new(ManualClock::new());
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_json(StatusCode::OK, r#"{"collections": []}"#);

        let value: Value = fetcher(transport.clone(), clock)
            .fetch_json(&HttpRequest::get("https://edr.test/collections"))
            .await
            .unwrap();
        assert_eq!(value["collections"], Value::Array(vec![]));
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn too_many_requests_waits_out_the_cooldown() {
        let clock = Arc::new(ManualClock::new());
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_json(StatusCode::TOO_MANY_REQUESTS, "slow down");

        let err = fetcher(transport, clock.clone())
            .fetch(&HttpRequest::get("https://edr.test/collections"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::RateLimitExceeded { .. }));
        assert_eq!(err.kind(), ErrorKind::RateLimited);
        assert_eq!(clock.sleeps(), [Duration::from_secs(10)]);
    }

    #[tokio::test]
    async fn not_found_means_no_data_for_window() {
        let clock = Arc::new(ManualClock::new());
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_json(StatusCode::NOT_FOUND, "no model run covers this window");

        let err = fetcher(transport, clock)
            .fetch(&HttpRequest::get("https://edr.test/collections/x/position"))
            .await
            .unwrap_err();
        match err {
            FetchError::NoDataForWindow { ref body, .. } => {
                assert_eq!(body, "no model run covers this window")
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.kind(), ErrorKind::Retryable);
    }

    #[tokio::test]
    async fn other_status_keeps_body_text() {
        let clock = Arc::new(ManualClock::new());
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_json(StatusCode::BAD_GATEWAY, "upstream down");

        let err = fetcher(transport, clock)
            .fetch(&HttpRequest::get("https://edr.test/collections"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::BAD_GATEWAY));
        assert!(err.to_string().contains("upstream down"));
    }

    #[tokio::test]
    async fn transport_errors_pass_through() {
        let clock = Arc::new(ManualClock::new());
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_timeout();

        let err = fetcher(transport, clock)
            .fetch(&HttpRequest::get("https://edr.test/collections"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::RequestTimeout { .. }));
        assert_eq!(err.kind(), ErrorKind::Retryable);
    }

    #[tokio::test]
    async fn bad_json_is_reported_with_url() {
        let clock = Arc::new(ManualClock::new());
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_json(StatusCode::OK, "{not json");

        let err = fetcher(transport, clock)
            .fetch_json::<Value>(&HttpRequest::get("https://edr.test/collections"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::JsonParse { ref url, .. } if url == "https://edr.test/collections"));
    }

    #[tokio::test]
    async fn every_request_goes_through_the_rate_limiter() {
        let clock = Arc::new(ManualClock::new());
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_json(StatusCode::OK, "{}");
        transport.push_json(StatusCode::OK, "{}");
        let fetcher = fetcher(transport, clock.clone());

        fetcher.fetch(&HttpRequest::get("https://edr.test/a")).await.unwrap();
        fetcher.fetch(&HttpRequest::get("https://edr.test/b")).await.unwrap();
        assert_eq!(clock.sleeps(), [Duration::from_secs(2)]);
    }
}
