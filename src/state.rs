use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::data::cache::DatasetCache;
use crate::data::filter::search;
use crate::data::grouping::group_all;
use crate::data::model::{Dataset, Trainee};
use crate::data::stats::DatasetStats;
use crate::error::DataError;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Session state shared by every front-end command, independent of rendering.
pub struct AppState {
    cache: DatasetCache,

    /// Source file of the trainee table.
    data_path: PathBuf,

    /// Loaded dataset (None until `load` succeeds).
    dataset: Option<Arc<Dataset>>,

    /// Error message to show when the data could not be loaded.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            cache: DatasetCache::new(),
            data_path: data_path.into(),
            dataset: None,
            status_message: None,
        }
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// Load (or fetch from the cache) the dataset. On failure the session
    /// keeps no dataset and records the message for display.
    pub fn load(&mut self) -> Result<Arc<Dataset>, DataError> {
        match self.cache.get_or_load(&self.data_path) {
            Ok(dataset) => {
                self.dataset = Some(Arc::clone(&dataset));
                self.status_message = None;
                Ok(dataset)
            }
            Err(e) => {
                self.dataset = None;
                self.status_message = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// The loaded dataset, or `Unavailable` when nothing is loaded.
    pub fn dataset(&self) -> Result<&Dataset, DataError> {
        self.dataset.as_deref().ok_or_else(|| {
            let reason = self
                .status_message
                .clone()
                .unwrap_or_else(|| "not loaded".to_string());
            DataError::unavailable(&self.data_path, reason)
        })
    }

    /// Search and group in one step. An empty query is not searched and
    /// yields no trainees.
    pub fn lookup(&self, query: &str) -> Result<Vec<Trainee>, DataError> {
        let dataset = self.dataset()?;
        if query.is_empty() {
            return Ok(Vec::new());
        }
        let result = search(dataset, query);
        log::debug!("Query {query:?} matched {} trainees", result.len());
        group_all(dataset, &result)
    }

    pub fn stats(&self) -> Result<DatasetStats, DataError> {
        Ok(DatasetStats::compute(self.dataset()?))
    }
}
