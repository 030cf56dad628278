use async_trait::async_trait;
use parking_lot::RwLock;
use shorty_core::repository::{ReadRepository, Repository, Result, UrlMapping};
use shorty_core::ShortCode;
use std::collections::HashMap;
use tracing::warn;

/// Insertion-ordered mappings with a code index into them.
#[derive(Debug, Default)]
struct Entries {
    index: HashMap<String, usize>,
    mappings: Vec<UrlMapping>,
}

/// In-memory implementation of the Repository trait.
///
/// A single `RwLock` guards the whole store so that listings observe a
/// consistent snapshot. Mappings are listed in insertion order.
///
/// Inserting a code that already exists replaces the stored URL in place and
/// keeps the original position; it never fails with a conflict. This differs
/// from [`SqliteRepository`](crate::SqliteRepository), which rejects the insert.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    storage: RwLock<Entries>,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new in-memory repository with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: RwLock::new(Entries {
                index: HashMap::with_capacity(capacity),
                mappings: Vec::with_capacity(capacity),
            }),
        }
    }

    /// Number of stored mappings.
    pub fn len(&self) -> usize {
        self.storage.read().mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ReadRepository for InMemoryRepository {
    async fn get(&self, code: &ShortCode) -> Result<Option<String>> {
        let storage = self.storage.read();

        Ok(storage
            .index
            .get(code.as_str())
            .map(|&position| storage.mappings[position].original_url.clone()))
    }

    async fn list_all(&self) -> Result<Vec<UrlMapping>> {
        Ok(self.storage.read().mappings.clone())
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn insert(&self, code: &ShortCode, original_url: String) -> Result<()> {
        let mut storage = self.storage.write();

        let existing = storage.index.get(code.as_str()).copied();
        if let Some(position) = existing {
            let previous =
                std::mem::replace(&mut storage.mappings[position].original_url, original_url);
            warn!(code = %code, previous_url = %previous, "short code collision, overwrote existing mapping");
            return Ok(());
        }

        let position = storage.mappings.len();
        storage.index.insert(code.as_str().to_owned(), position);
        storage
            .mappings
            .push(UrlMapping::new(code.clone(), original_url));
        Ok(())
    }
}
