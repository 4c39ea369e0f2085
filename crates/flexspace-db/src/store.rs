//! Flat-file JSON document store
//!
//! Each collection is a JSON array in `{data_dir}/{name}.json`. A missing
//! file is an empty collection. Items are cached in memory; readers take a
//! snapshot under a read lock, writers are serialized and persist the whole
//! array before the change becomes final.

use flexspace_core::{
    models::{Booking, RateRecord, RoomType, Unit},
    AppError, AppResult,
};
use parking_lot::RwLock;
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, error, info};

/// Collection file names
pub const UNITS: &str = "units";
pub const ROOM_TYPES: &str = "room_types";
pub const RATES: &str = "rates";
pub const BOOKINGS: &str = "bookings";

/// A single JSON array collection
pub struct Collection<T> {
    name: &'static str,
    path: Option<PathBuf>,
    items: RwLock<Vec<T>>,
    writer: Mutex<()>,
}

impl<T> Collection<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync,
{
    /// Create an empty collection that is never written to disk
    pub fn in_memory(name: &'static str) -> Self {
        Self {
            name,
            path: None,
            items: RwLock::new(Vec::new()),
            writer: Mutex::new(()),
        }
    }

    /// Load a collection from `{dir}/{name}.json`
    pub async fn load(name: &'static str, dir: &Path) -> AppResult<Self> {
        let path = dir.join(format!("{}.json", name));

        let items = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice::<Vec<T>>(&bytes).map_err(|e| {
                error!("Corrupt collection file {}: {}", path.display(), e);
                AppError::Serialization(format!("Failed to parse {}: {}", path.display(), e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Collection file {} missing, starting empty", path.display());
                Vec::new()
            }
            Err(e) => {
                error!("Failed to read {}: {}", path.display(), e);
                return Err(AppError::Storage(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        debug!("Loaded {} items into collection {}", items.len(), name);

        Ok(Self {
            name,
            path: Some(path),
            items: RwLock::new(items),
            writer: Mutex::new(()),
        })
    }

    /// Collection name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Backing file, `None` for in-memory collections
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Copy of every item
    pub fn snapshot(&self) -> Vec<T> {
        self.items.read().clone()
    }

    /// Run `f` against the current items
    pub fn read<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        f(&self.items.read())
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Apply `f` to the items and persist the result.
    ///
    /// If `f` fails or the file cannot be written, the in-memory items are
    /// restored and the error is returned.
    pub async fn mutate<R, F>(&self, f: F) -> AppResult<R>
    where
        F: FnOnce(&mut Vec<T>) -> AppResult<R> + Send,
        R: Send,
    {
        let _writer = self.writer.lock().await;

        let (result, previous, current) = {
            let mut items = self.items.write();
            let previous = items.clone();
            match f(&mut items) {
                Ok(result) => (result, previous, items.clone()),
                Err(e) => {
                    *items = previous;
                    return Err(e);
                }
            }
        };

        if let Err(e) = self.persist(&current).await {
            *self.items.write() = previous;
            return Err(e);
        }

        Ok(result)
    }

    async fn persist(&self, items: &[T]) -> AppResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let json = serde_json::to_vec_pretty(items)?;
        let tmp = path.with_extension("json.tmp");

        tokio::fs::write(&tmp, json).await.map_err(|e| {
            error!("Failed to write {}: {}", tmp.display(), e);
            AppError::Storage(format!("Failed to write {}: {}", tmp.display(), e))
        })?;
        tokio::fs::rename(&tmp, path).await.map_err(|e| {
            error!("Failed to replace {}: {}", path.display(), e);
            AppError::Storage(format!("Failed to replace {}: {}", path.display(), e))
        })?;

        debug!("Persisted {} items to {}", items.len(), path.display());
        Ok(())
    }
}

/// The collections the pricing core reads, plus stored bookings
pub struct JsonStore {
    pub units: Collection<Unit>,
    pub room_types: Collection<RoomType>,
    pub rates: Collection<RateRecord>,
    pub bookings: Collection<Booking>,
}

impl JsonStore {
    /// Store that lives only in memory
    pub fn in_memory() -> Self {
        info!("Using in-memory store");
        Self {
            units: Collection::in_memory(UNITS),
            room_types: Collection::in_memory(ROOM_TYPES),
            rates: Collection::in_memory(RATES),
            bookings: Collection::in_memory(BOOKINGS),
        }
    }

    /// Open (creating if needed) a store rooted at `data_dir`
    pub async fn open(data_dir: impl AsRef<Path>) -> AppResult<Self> {
        let dir = data_dir.as_ref();
        info!("Opening JSON store at {}", dir.display());

        tokio::fs::create_dir_all(dir).await.map_err(|e| {
            error!("Failed to create data directory {}: {}", dir.display(), e);
            AppError::Storage(format!(
                "Failed to create data directory {}: {}",
                dir.display(),
                e
            ))
        })?;

        let store = Self {
            units: Collection::load(UNITS, dir).await?,
            room_types: Collection::load(ROOM_TYPES, dir).await?,
            rates: Collection::load(RATES, dir).await?,
            bookings: Collection::load(BOOKINGS, dir).await?,
        };

        info!(
            units = store.units.len(),
            room_types = store.room_types.len(),
            rates = store.rates.len(),
            bookings = store.bookings.len(),
            "JSON store opened"
        );

        Ok(store)
    }

    /// Check whether writes reach the disk
    pub fn is_persistent(&self) -> bool {
        self.rates.path().is_some()
    }
}
