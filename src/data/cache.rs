//! Process-lifetime memo of loaded datasets.
//!
//! Strategy: keep one `Arc<Dataset>` per path, validated by the file's
//! modification time. A hit with a matching mtime skips the file entirely;
//! a changed mtime triggers a reload.
//!
//! The map lock is held across a load, so callers racing on first access
//! load the file once and then share the same `Arc`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::SystemTime;

use super::loader::load_file;
use super::model::Dataset;
use crate::error::DataError;

#[derive(Debug)]
struct CacheEntry {
    /// `None` when the platform does not report modification times.
    mtime: Option<SystemTime>,
    dataset: Arc<Dataset>,
}

impl CacheEntry {
    fn is_valid(&self, mtime: Option<SystemTime>) -> bool {
        self.mtime == mtime
    }
}

#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: Mutex<HashMap<PathBuf, CacheEntry>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the dataset for `path`, loading it on first access or when the
    /// file changed since the cached load.
    ///
    /// Failures are not cached; the next call tries the file again.
    pub fn get_or_load(&self, path: &Path) -> Result<Arc<Dataset>, DataError> {
        let mtime = modified_time(path);
        let mut entries = self.lock();

        if let Some(entry) = entries.get(path) {
            if entry.is_valid(mtime) {
                log::debug!("Dataset cache hit for {}", path.display());
                return Ok(Arc::clone(&entry.dataset));
            }
            log::debug!("Dataset at {} changed on disk, reloading", path.display());
        }

        let dataset = match load_file(path) {
            Ok(dataset) => Arc::new(dataset),
            Err(e) => {
                entries.remove(path);
                return Err(e);
            }
        };
        entries.insert(
            path.to_path_buf(),
            CacheEntry {
                mtime,
                dataset: Arc::clone(&dataset),
            },
        );
        Ok(dataset)
    }

    /// Drop every cached dataset.
    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Entries are immutable once inserted, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, HashMap<PathBuf, CacheEntry>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn modified_time(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}
