use crate::fetch::transport::HttpRequest;
use crate::query::position::PositionQuery;
use std::fmt;

/// Base URL plus credentials; builds the two requests the client makes.
#[derive(Clone)]
pub struct EdrEndpoint {
    base_url: String,
    auth_header: String,
    api_key: String,
}

impl EdrEndpoint {
    pub fn new(
        base_url: impl Into<String>,
        auth_header: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_header: auth_header.into(),
            api_key: api_key.into(),
        }
    }

    pub fn collections_url(&self) -> String {
        format!("{}/collections", self.base_url)
    }

    pub fn position_url(&self, collection_id: &str) -> String {
        format!("{}/collections/{}/position", self.base_url, collection_id)
    }

    pub fn collections_request(&self) -> HttpRequest {
        self.authorized(self.collections_url())
    }

    pub fn position_request(&self, collection_id: &str, query: &PositionQuery) -> HttpRequest {
        self.authorized(self.position_url(collection_id))
            .query(query.query_pairs())
    }

    fn authorized(&self, url: String) -> HttpRequest {
        HttpRequest::get(url).header(&self.auth_header, &self.api_key)
    }
}

// Keeps the key out of logs and panic messages.
impl fmt::Debug for EdrEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EdrEndpoint")
            .field("base_url", &self.base_url)
            .field("auth_header", &self.auth_header)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edr_forecast::LatLon;
    use crate::types::parameter::ParameterSet;
    use chrono::{TimeZone, Utc};

    fn endpoint() -> EdrEndpoint {
        EdrEndpoint::new("https://edr.test/v1/forecastedr/", "X-Api-Key", "secret")
    }

    #[test]
    fn trailing_slash_is_dropped() {
        assert_eq!(
            endpoint().collections_url(),
            "https://edr.test/v1/forecastedr/collections"
        );
    }

    #[test]
    fn position_request_is_authorized_and_parameterized() {
        let query = PositionQuery::builder()
            .location(LatLon(55.0, 12.0))
            .parameters(ParameterSet::essential())
            .now(Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap())
            .build();
        let request = endpoint().position_request("model_a", &query);

        assert_eq!(
            request.url,
            "https://edr.test/v1/forecastedr/collections/model_a/position"
        );
        assert_eq!(
            request.headers,
            [("X-Api-Key".to_string(), "secret".to_string())]
        );
        assert_eq!(request.query_param("coords"), Some("POINT(12 55)"));
        assert_eq!(request.query_param("f"), Some("CoverageJSON"));
    }

    #[test]
    fn debug_output_hides_the_key() {
        let rendered = format!("{:?}", endpoint());
        assert!(!rendered.contains("secret"));
    }
}
