//! Canonical dataset store.

use std::path::Path;
use std::sync::Arc;

use tokio::sync::watch;

use crate::dataset;
use crate::error::Result;
use crate::hexagon::HexagonFeature;

/// Shared, immutable view of the full hexagon collection.
pub type HexagonSnapshot = Arc<Vec<HexagonFeature>>;

/// Owns the canonical feature collection and broadcasts replacements.
///
/// Snapshots are replace-only; nothing ever mutates a published collection.
/// The channel keeps the current snapshot, so a subscriber arriving after a
/// load still observes the loaded data without waiting for another event.
#[derive(Debug)]
pub struct HexagonStore {
    tx: watch::Sender<HexagonSnapshot>,
}

impl HexagonStore {
    /// Creates a store holding an empty collection.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(Arc::new(Vec::new()));
        Self { tx }
    }

    /// Replaces the canonical snapshot.
    pub fn publish(&self, features: Vec<HexagonFeature>) {
        self.tx.send_replace(Arc::new(features));
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> HexagonSnapshot {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<HexagonSnapshot> {
        self.tx.subscribe()
    }

    /// Loads the dataset document at `path` and publishes it.
    ///
    /// Returns the number of features published. On failure the error goes
    /// back to the caller and the current snapshot stays in place.
    pub fn load_from_path<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        let features = dataset::load_collection(path)?;
        let count = features.len();
        self.tx.send_replace(features);
        Ok(count)
    }
}

impl Default for HexagonStore {
    fn default() -> Self {
        Self::new()
    }
}
