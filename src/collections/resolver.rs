//! Discovers the collections offered by the EDR server and picks the one to query.

use crate::collections::error::CollectionError;
use crate::fetch::fetcher::RetryingFetcher;
use crate::query::endpoint::EdrEndpoint;
use crate::types::collection::{Collection, CollectionIndex};
use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;

/// Collection preferred when the server offers it.
pub const DEFAULT_COLLECTION: &str = "harmonie_dini_eps_means";

#[derive(Debug, Deserialize)]
struct CollectionsResponse {
    #[serde(default)]
    collections: Vec<Value>,
}

/// Lists collections through a [`RetryingFetcher`].
pub struct CollectionResolver<'a> {
    fetcher: &'a RetryingFetcher,
    endpoint: &'a EdrEndpoint,
}

impl<'a> CollectionResolver<'a> {
    pub fn new(fetcher: &'a RetryingFetcher, endpoint: &'a EdrEndpoint) -> Self {
        Self { fetcher, endpoint }
    }

    /// Fetches `/collections` and indexes the entries in server order.
    ///
    /// Entries without a string `id` are skipped. An empty result is
    /// [`CollectionError::Empty`]; it is not retried here.
    pub async fn resolve(&self) -> Result<CollectionIndex, CollectionError> {
        let request = self.endpoint.collections_request();
        let response: CollectionsResponse = self.fetcher.fetch_json(&request).await?;

        let index = index_collections(response.collections);
        if index.is_empty() {
            return Err(CollectionError::Empty(request.url));
        }
        debug!(
            "Server offers {} collections: {}",
            index.len(),
            index.ids().collect::<Vec<_>>().join(", ")
        );
        Ok(index)
    }

    /// Resolves and selects in one step.
    pub async fn resolve_preferred(&self, preferred: &str) -> Result<Collection, CollectionError> {
        let index = self.resolve().await?;
        select_collection(&index, preferred).cloned()
    }
}

fn index_collections(entries: Vec<Value>) -> CollectionIndex {
    let mut index = CollectionIndex::new();
    for entry in entries {
        match Collection::from_value(entry) {
            Some(collection) => index.insert(collection),
            None => warn!("Skipping collection entry without an id"),
        }
    }
    index
}

/// Picks `preferred` if present, otherwise the first collection the server listed.
pub fn select_collection<'i>(
    index: &'i CollectionIndex,
    preferred: &str,
) -> Result<&'i Collection, CollectionError> {
    if let Some(collection) = index.get(preferred) {
        debug!("Using preferred collection {}", collection.id);
        return Ok(collection);
    }
    let fallback = index
        .first()
        .ok_or_else(|| CollectionError::Empty("collection index".to_string()))?;
    warn!(
        "Preferred collection {} not offered, falling back to {}",
        preferred, fallback.id
    );
    Ok(fallback)
}
