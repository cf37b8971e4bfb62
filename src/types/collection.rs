//! Defines the EDR collection metadata returned by the `/collections` endpoint and an
//! index over it that keeps the server's ordering.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A dataset exposed by the EDR API, such as one forecast model.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Collection {
    /// The collection identifier used in query paths (e.g., "harmonie_dini_eps_means").
    pub id: String,
    /// The full collection object as sent by the server, including `id`.
    pub metadata: Value,
}

impl Collection {
    /// Builds a collection from one entry of the `collections` array.
    ///
    /// Returns `None` if the entry has no string `id`.
    pub fn from_value(value: Value) -> Option<Self> {
        let id = value.get("id")?.as_str()?.to_string();
        Some(Self {
            id,
            metadata: value,
        })
    }

    /// The human-readable title, if the server sent one.
    pub fn title(&self) -> Option<&str> {
        self.metadata.get("title").and_then(Value::as_str)
    }
}

/// Collections keyed by id, iterated in the order the server listed them.
///
/// Server order is significant (it is used as the fallback preference), so entries
/// are never sorted. A repeated id replaces the earlier entry's metadata but keeps its
/// position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionIndex {
    entries: Vec<Collection>,
}

impl CollectionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, collection: Collection) {
        match self.entries.iter_mut().find(|c| c.id == collection.id) {
            Some(existing) => existing.metadata = collection.metadata,
            None => self.entries.push(collection),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Collection> {
        self.entries.iter().find(|c| c.id == id)
    }

    /// The first collection in server order.
    pub fn first(&self) -> Option<&Collection> {
        self.entries.first()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|c| c.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<Collection> for CollectionIndex {
    fn from_iter<I: IntoIterator<Item = Collection>>(iter: I) -> Self {
        let mut index = Self::new();
        for collection in iter {
            index.insert(collection);
        }
        index
    }
}
