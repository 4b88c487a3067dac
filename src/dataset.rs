//! Dataset document parsing and cached loading.
//!
//! The hexagon dataset ships as a static GeoJSON FeatureCollection asset.
//! Documents are parsed once per path and served from a process-wide cache
//! on repeat loads.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{OverlayError, Result};
use crate::hexagon::HexagonFeature;

/// Parsed documents by path, to avoid repeated disk reads
static DOCUMENT_CACHE: Lazy<Mutex<HashMap<PathBuf, Arc<Vec<HexagonFeature>>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Top-level shape of the dataset document.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HexagonCollection {
    pub features: Vec<HexagonFeature>,
}

/// Parses a feature-collection document into hexagon features.
///
/// Individual features with unexpected geometry deserialize to the
/// unsupported variant and survive parsing; only a malformed document
/// fails.
pub fn parse_collection(document: &str) -> Result<Vec<HexagonFeature>> {
    let collection: HexagonCollection = serde_json::from_str(document)?;
    Ok(collection.features)
}

/// Loads the document at `path`, serving repeat loads from cache.
pub fn load_collection<P: AsRef<Path>>(path: P) -> Result<Arc<Vec<HexagonFeature>>> {
    let path_buf = path.as_ref().to_path_buf();

    {
        let cache = DOCUMENT_CACHE.lock().unwrap();
        if let Some(features) = cache.get(&path_buf) {
            return Ok(Arc::clone(features));
        }
    }

    let document = fs::read_to_string(&path_buf).map_err(|source| OverlayError::DatasetRead {
        path: path_buf.clone(),
        source,
    })?;
    let features = Arc::new(parse_collection(&document)?);

    info!(
        path = %path_buf.display(),
        features = features.len(),
        "hexagon dataset loaded"
    );

    {
        let mut cache = DOCUMENT_CACHE.lock().unwrap();
        cache.insert(path_buf, Arc::clone(&features));
    }

    Ok(features)
}

/// Drops every cached document.
pub fn clear_cache() {
    DOCUMENT_CACHE.lock().unwrap().clear();
}

/// Number of cached documents.
pub fn cache_size() -> usize {
    DOCUMENT_CACHE.lock().unwrap().len()
}
