//! Locally cached watch progress, one record per catalog item.
//!
//! Records live in the shared key-value store under `progress_{id}` (movies)
//! and `series_progress_{id}` (series). Nothing is sent to the backend and
//! records never expire.

use serde::{Deserialize, Serialize};

use crate::item_id::{deserialize_null_default, ItemId};
use crate::storage::{SharedStore, StoreError};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct MovieProgress {
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub time: f64,
    /// Players write null here when the duration is unknown
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub duration: f64,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub completed: bool,
}

impl MovieProgress {
    /// Percentage watched in `0..=100`. Completed movies are always 100; a
    /// missing time or duration counts as nothing watched.
    pub fn percent(&self) -> f64 {
        if self.completed {
            return 100.0;
        }
        if self.time > 0.0 && self.duration > 0.0 {
            return (self.time / self.duration * 100.0).min(100.0);
        }
        0.0
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct SeriesProgress {
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub percentage: f64,
}

pub fn movie_key(id: &ItemId) -> String {
    format!("progress_{}", id)
}

pub fn series_key(id: &ItemId) -> String {
    format!("series_progress_{}", id)
}

#[derive(Clone)]
pub struct ProgressStore {
    store: SharedStore,
}

impl ProgressStore {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub fn movie(&self, id: &ItemId) -> Option<MovieProgress> {
        self.read(&movie_key(id))
    }

    pub fn series(&self, id: &ItemId) -> Option<SeriesProgress> {
        self.read(&series_key(id))
    }

    /// 0 when no record exists or the record is unreadable.
    pub fn movie_percent(&self, id: &ItemId) -> f64 {
        self.movie(id).map(|p| p.percent()).unwrap_or(0.0)
    }

    pub fn series_percent(&self, id: &ItemId) -> f64 {
        self.series(id).map(|p| p.percentage).unwrap_or(0.0)
    }

    pub fn save_movie_progress(&self, id: &ItemId, progress: &MovieProgress) -> Result<(), StoreError> {
        self.store.set_item(&movie_key(id), &serde_json::to_string(progress)?)
    }

    pub fn save_series_progress(&self, id: &ItemId, progress: &SeriesProgress) -> Result<(), StoreError> {
        self.store.set_item(&series_key(id), &serde_json::to_string(progress)?)
    }

    fn read<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Option<T> {
        let raw = self.store.get_item(key)?;
        match serde_json::from_str(&raw) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(key, error = %e, "Ignoring malformed progress record");
                None
            }
        }
    }
}

impl std::fmt::Debug for ProgressStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_movie_percent_rules() {
        let half = MovieProgress { time: 30.0, duration: 60.0, completed: false };
        assert_eq!(half.percent(), 50.0);

        let done = MovieProgress { time: 1.0, duration: 9999.0, completed: true };
        assert_eq!(done.percent(), 100.0);

        let overrun = MovieProgress { time: 90.0, duration: 60.0, completed: false };
        assert_eq!(overrun.percent(), 100.0);

        let no_duration = MovieProgress { time: 30.0, duration: 0.0, completed: false };
        assert_eq!(no_duration.percent(), 0.0);
    }

    #[test]
    fn test_completed_only_record_reads_as_full() {
        let store = MemoryStore::shared();
        store.set_item("progress_4", r#"{"completed":true}"#).unwrap();
        store
            .set_item("progress_1", r#"{"time":10,"duration":null,"completed":true}"#)
            .unwrap();
        store
            .set_item("progress_2", r#"{"time":10,"duration":null,"completed":false}"#)
            .unwrap();
        let progress = ProgressStore::new(store);
        assert_eq!(progress.movie_percent(&ItemId::Number(4)), 100.0);
        assert_eq!(progress.movie_percent(&ItemId::Number(1)), 100.0);
        assert_eq!(progress.movie_percent(&ItemId::Number(2)), 0.0);
    }

    #[test]
    fn test_absent_and_malformed_records_are_zero() {
        let store = MemoryStore::shared();
        store.set_item("series_progress_2", "{oops").unwrap();
        let progress = ProgressStore::new(store);
        assert_eq!(progress.movie_percent(&ItemId::Number(1)), 0.0);
        assert_eq!(progress.series_percent(&ItemId::Number(2)), 0.0);
    }

    #[test]
    fn test_saved_records_use_shared_keys() {
        let store = MemoryStore::shared();
        let progress = ProgressStore::new(store.clone());
        let id = ItemId::Number(6);

        progress
            .save_series_progress(&id, &SeriesProgress { percentage: 42.0 })
            .unwrap();
        progress
            .save_movie_progress(&id, &MovieProgress { time: 10.0, duration: 40.0, completed: false })
            .unwrap();

        assert!(store.get_item("series_progress_6").is_some());
        assert!(store.get_item("progress_6").is_some());
        assert_eq!(progress.series_percent(&id), 42.0);
        assert_eq!(progress.movie_percent(&id), 25.0);
    }
}
