use crate::fetch::error::FetchError;
use async_trait::async_trait;
use log::warn;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// A fully specified GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            query: Vec::new(),
            headers: Vec::new(),
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn query(mut self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Status and body text of a response, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Performs a single HTTP GET. Implementations must not retry or rate limit;
/// that is done by [`crate::RetryingFetcher`].
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Returns the response for any status; only failures to get a response at
    /// all (timeouts, connection errors) are errors.
    async fn get(&self, request: &HttpRequest) -> Result<HttpResponse, FetchError>;
}

/// Connect, read and overall deadlines for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub connect: Duration,
    pub read: Duration,
    pub total: Duration,
}

/// [`HttpTransport`] over a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeouts: Timeouts) -> Result<Self, FetchError> {
        let client = Client::builder()
            .connect_timeout(timeouts.connect)
            .read_timeout(timeouts.read)
            .timeout(timeouts.total)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FetchError::HttpClientBuild)?;
        Ok(Self { client })
    }

    fn transport_error(url: &str, e: reqwest::Error) -> FetchError {
        warn!("Request to {} failed: {}", url, e);
        if e.is_timeout() {
            FetchError::RequestTimeout {
                url: url.to_string(),
                source: Box::new(e),
            }
        } else {
            FetchError::NetworkRequest {
                url: url.to_string(),
                source: Box::new(e),
            }
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, request: &HttpRequest) -> Result<HttpResponse, FetchError> {
        let mut builder = self.client.get(&request.url).query(&request.query);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Self::transport_error(&request.url, e))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Self::transport_error(&request.url, e))?;

        Ok(HttpResponse { status, body })
    }
}
