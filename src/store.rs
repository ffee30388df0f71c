//! Flat-file cache for the most recent rate snapshot.

use crate::rates::RateTable;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// On-disk cache holding exactly one serialized `RateTable`, overwritten
/// wholesale on each refresh. No locking; concurrent invocations of the
/// program may race on this file.
pub struct RateStore {
    path: PathBuf,
}

impl RateStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        RateStore {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the cached table. `None` when no cache file exists yet;
    /// an unreadable or malformed file is an error.
    pub fn load(&self) -> Result<Option<RateTable>> {
        if !self.path.exists() {
            debug!("No rate cache at {}", self.path.display());
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read rate cache: {}", self.path.display()))?;
        let table: RateTable = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse rate cache: {}", self.path.display()))?;

        debug!("Loaded {} rates from cache", table.len());
        Ok(Some(table))
    }

    pub fn save(&self, table: &RateTable) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let contents = serde_json::to_string(table)?;
        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write rate cache: {}", self.path.display()))?;

        info!("Exchange rates saved to {}", self.path.display());
        Ok(())
    }
}
