//! JSON file store for profile data.
//!
//! One file per concern (stats, patterns, settings) under a data directory.
//! Failures surface as [`StoreError`]; callers log and continue with
//! in-memory state - a broken disk never crashes a session.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

use crate::protocol::{RecordedPattern, Settings, StatsProfile};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("profile store io error: {0}")]
    Io(#[from] io::Error),
    #[error("profile store serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

const STATS_FILE: &str = "stats.json";
const PATTERNS_FILE: &str = "patterns.json";
const SETTINGS_FILE: &str = "settings.json";

/// File-backed profile store
#[derive(Debug, Clone)]
pub struct ProfileStore {
    dir: PathBuf,
}

impl ProfileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load stats; `None` when never saved
    pub fn load_stats(&self) -> Result<Option<StatsProfile>, StoreError> {
        self.load_json(STATS_FILE)
    }

    pub fn save_stats(&self, stats: &StatsProfile) -> Result<(), StoreError> {
        self.save_json(STATS_FILE, stats)
    }

    /// Load recorded patterns in insertion order; empty when never saved
    pub fn load_patterns(&self) -> Result<Vec<RecordedPattern>, StoreError> {
        Ok(self.load_json(PATTERNS_FILE)?.unwrap_or_default())
    }

    pub fn save_patterns(&self, patterns: &[RecordedPattern]) -> Result<(), StoreError> {
        self.save_json(PATTERNS_FILE, &patterns)
    }

    pub fn load_settings(&self) -> Result<Option<Settings>, StoreError> {
        self.load_json(SETTINGS_FILE)
    }

    pub fn save_settings(&self, settings: &Settings) -> Result<(), StoreError> {
        self.save_json(SETTINGS_FILE, settings)
    }

    fn load_json<T: serde::de::DeserializeOwned>(
        &self,
        file: &str,
    ) -> Result<Option<T>, StoreError> {
        let path = self.dir.join(file);
        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(serde_json::from_str(&data)?))
    }

    fn save_json<T: serde::Serialize>(&self, file: &str, value: &T) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file);
        let data = serde_json::to_string_pretty(value)?;
        fs::write(&path, data)?;
        Ok(())
    }
}

/// Save stats, logging instead of propagating failures
///
/// Persistence is best-effort at game-over time; the session carries on with
/// in-memory state when the disk misbehaves.
pub fn save_stats_best_effort(store: &ProfileStore, stats: &StatsProfile) {
    if let Err(err) = store.save_stats(stats) {
        warn!(error = %err, "failed to persist stats");
    }
}
