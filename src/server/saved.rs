use tokio::sync::Mutex;

/// Process-lifetime list of values submitted through `/books`.
///
/// Append-only: insertion order is kept, duplicates are kept, nothing is
/// ever evicted.
#[derive(Debug, Default)]
pub struct SavedBox {
    entries: Mutex<Vec<String>>,
}

impl SavedBox {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn append(&self, value: impl Into<String>) {
        let value = value.into();
        tracing::info!(value = %value, "Data saved");
        self.entries.lock().await.push(value);
    }

    /// A copy of every entry so far, oldest first.
    pub async fn snapshot(&self) -> Vec<String> {
        self.entries.lock().await.clone()
    }
}
