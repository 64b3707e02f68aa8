use std::sync::Arc;

use tokio::sync::RwLock;

/// The guest book entries, shared by every connection.
///
/// Cloning the store clones the handle, all clones see the same entries.
#[derive(Debug, Clone, Default)]
pub struct EntryStore {
    entries: Arc<RwLock<Vec<String>>>,
}

impl EntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with `entries`, kept in the given order.
    pub fn with_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries = entries.into_iter().map(Into::into).collect::<Vec<_>>();
        Self { entries: Arc::new(RwLock::new(entries)) }
    }

    pub async fn add(&self, entry: impl Into<String>) {
        self.entries.write().await.push(entry.into());
    }

    /// A snapshot of the entries in insertion order.
    pub async fn list(&self) -> Vec<String> {
        self.entries.read().await.clone()
    }
}
