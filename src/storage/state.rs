//! Notification state persistence.
//!
//! The state file is the only durable artifact: a small JSON document
//! recording which notice ids were already delivered on a given day.
//! It is read whole at the start of a run and rewritten whole after a
//! confirmed delivery. A stored date other than today invalidates the
//! document, so stale ids never suppress a new-day notification.

use std::collections::HashSet;
use std::path::PathBuf;

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};

/// On-disk layout of the state document.
#[derive(Debug, Serialize, Deserialize)]
struct StateFile {
    /// Calendar day the ids belong to
    date: NaiveDate,

    /// Fingerprints already notified on that day
    notified_ids: Vec<String>,

    /// Write timestamp, informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Local>>,
}

/// File-backed store for the set of notified notice ids.
#[derive(Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    /// Create a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the set of ids already notified on `today`.
    ///
    /// An absent, unreadable or structurally invalid file, or one whose
    /// stored date is not `today`, yields an empty set.
    pub async fn load(&self, today: NaiveDate) -> HashSet<String> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No state file at {}", self.path.display());
                return HashSet::new();
            }
            Err(e) => {
                log::warn!("Failed to read state file {}: {}", self.path.display(), e);
                return HashSet::new();
            }
        };

        let state: StateFile = match serde_json::from_slice(&bytes) {
            Ok(state) => state,
            Err(e) => {
                log::warn!("Ignoring corrupt state file {}: {}", self.path.display(), e);
                return HashSet::new();
            }
        };

        if state.date != today {
            log::info!("State file is from {}, starting a fresh day", state.date);
            return HashSet::new();
        }

        state.notified_ids.into_iter().collect()
    }

    /// Persist the notified id set for `today`, replacing prior content.
    ///
    /// Writes atomically (temp file + rename) so a crash mid-write never
    /// leaves a truncated document behind.
    pub async fn save(&self, today: NaiveDate, ids: &HashSet<String>) -> Result<()> {
        let mut notified_ids: Vec<String> = ids.iter().cloned().collect();
        notified_ids.sort();

        let state = StateFile {
            date: today,
            notified_ids,
            updated_at: Some(Local::now()),
        };
        let bytes = serde_json::to_vec_pretty(&state)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let tmp = self.path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(&bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path).await.map_err(AppError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ids(values: &[&str]) -> HashSet<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn save_then_load_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let store = StateStore::new(tmp.path().join("seen.json"));
        let today = day(2024, 3, 5);

        store.save(today, &ids(&["a1b2c3d4e5f6"])).await.unwrap();
        let loaded = store.load(today).await;

        assert_eq!(loaded, ids(&["a1b2c3d4e5f6"]));
    }

    #[tokio::test]
    async fn absent_file_loads_empty() {
        let tmp = TempDir::new().unwrap();
        let store = StateStore::new(tmp.path().join("missing.json"));

        assert!(store.load(day(2024, 3, 5)).await.is_empty());
    }

    #[tokio::test]
    async fn corrupt_file_loads_empty() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("seen.json");
        tokio::fs::write(&path, b"{not json").await.unwrap();

        let store = StateStore::new(path);
        assert!(store.load(day(2024, 3, 5)).await.is_empty());
    }

    #[tokio::test]
    async fn stale_day_resets_to_empty() {
        let tmp = TempDir::new().unwrap();
        let store = StateStore::new(tmp.path().join("seen.json"));

        store
            .save(day(2024, 3, 4), &ids(&["a1b2c3d4e5f6", "0123456789ab"]))
            .await
            .unwrap();

        // Yesterday's ids must never suppress today's notifications.
        assert!(store.load(day(2024, 3, 5)).await.is_empty());
    }

    #[tokio::test]
    async fn save_overwrites_prior_content() {
        let tmp = TempDir::new().unwrap();
        let store = StateStore::new(tmp.path().join("seen.json"));
        let today = day(2024, 3, 5);

        store.save(today, &ids(&["aaaaaaaaaaaa"])).await.unwrap();
        store.save(today, &ids(&["bbbbbbbbbbbb"])).await.unwrap();

        assert_eq!(store.load(today).await, ids(&["bbbbbbbbbbbb"]));
    }
}
