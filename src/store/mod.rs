//! Process-lifetime document store.
//!
//! Handlers only see the [`DocumentStore`] trait, so the in-memory map can be
//! swapped for a persistent key-value backend without touching them.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

/// One uploaded document and the text extracted from it.
#[derive(Debug, Clone)]
pub struct StoreEntry {
    pub store_id: String,
    /// Client supplied name. Untrusted, never used to build paths.
    pub filename: String,
    pub file_path: PathBuf,
    pub content: String,
    pub uploaded_at: DateTime<Utc>,
}

pub trait DocumentStore: Send + Sync {
    fn get(&self, store_id: &str) -> Option<StoreEntry>;

    fn put(&self, entry: StoreEntry);

    /// Removes the entry and hands it back so the caller can clean up its file.
    fn delete(&self, store_id: &str) -> Option<StoreEntry>;

    fn list(&self) -> Vec<StoreEntry>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Entries are tagged with an insertion sequence so listings come back in
/// upload order.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: RwLock<HashMap<String, (u64, StoreEntry)>>,
    sequence: AtomicU64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for InMemoryStore {
    fn get(&self, store_id: &str) -> Option<StoreEntry> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(store_id).map(|(_, entry)| entry.clone())
    }

    fn put(&self, entry: StoreEntry) {
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        tracing::debug!(store_id = %entry.store_id, seq = seq, "Storing document entry");
        entries.insert(entry.store_id.clone(), (seq, entry));
    }

    fn delete(&self, store_id: &str) -> Option<StoreEntry> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.remove(store_id).map(|(_, entry)| entry)
    }

    fn list(&self) -> Vec<StoreEntry> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let mut listed: Vec<&(u64, StoreEntry)> = entries.values().collect();
        listed.sort_by_key(|(seq, _)| *seq);
        listed.into_iter().map(|(_, entry)| entry.clone()).collect()
    }

    fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}
