// Filesystem cache backend.
// One JSON file per key, written atomically, so entries survive process restarts.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tempfile::NamedTempFile;
use tracing::trace;

use crate::error::{GhReposError, Result};
use crate::github::FetchResult;

use super::clock::{Clock, SystemClock};
use super::paths;
use super::store::{CacheEntry, CacheStore};

/// Cache store persisted under a directory.
pub struct FileCache {
    dir: PathBuf,
    clock: Arc<dyn Clock>,
}

impl FileCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_clock(dir, Arc::new(SystemClock))
    }

    pub fn with_clock(dir: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Self {
        Self {
            dir: dir.into(),
            clock,
        }
    }

    /// Open the cache in the platform cache directory.
    pub fn in_default_dir() -> Result<Self> {
        paths::cache_dir()
            .map(Self::new)
            .ok_or(GhReposError::NoCacheDir)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read_entry(&self, path: &Path) -> Result<Option<CacheEntry<FetchResult>>> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&contents)?))
    }
}

impl CacheStore for FileCache {
    fn get(&self, key: &str) -> Result<Option<FetchResult>> {
        let path = paths::entry_path(&self.dir, key);
        match self.read_entry(&path)? {
            Some(entry) if !entry.is_expired_at(self.clock.now()) => Ok(Some(entry.value)),
            Some(_) => {
                trace!(key, "cache file expired");
                Ok(None)
            }
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &FetchResult, ttl: Duration) -> Result<()> {
        let path = paths::entry_path(&self.dir, key);

        // Ensure parent directory exists
        let parent = path.parent().unwrap_or(&self.dir);
        fs::create_dir_all(parent)?;

        let entry = CacheEntry::new(value, self.clock.now(), ttl);
        let json = serde_json::to_string_pretty(&entry)?;

        // Each writer gets its own temp file; the rename is last-writer-wins.
        let mut file = NamedTempFile::new_in(parent)?;
        file.write_all(json.as_bytes())?;
        file.as_file().sync_all()?;
        file.persist(&path).map_err(|e| e.error)?;

        Ok(())
    }

    fn invalidate(&self, key: &str) -> Result<()> {
        match fs::remove_file(paths::entry_path(&self.dir, key)) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}
