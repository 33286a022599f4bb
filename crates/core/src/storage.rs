//! Key-value persistence for history and favorites.
//!
//! Both collections are stored as JSON arrays under fixed keys. Loading is
//! forgiving: a missing key, a failed read or a value that is not a JSON
//! array all load as an empty collection, and an array item that does not
//! decode is skipped. Problems are logged, never propagated.

use crate::color::Color;
use crate::error::PaletteError;
use crate::store::HistoryEntry;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

/// Key holding the JSON array of [`HistoryEntry`].
pub const HISTORY_KEY: &str = "color-generator-history";

/// Key holding the JSON array of favorite [`Color`]s.
pub const FAVORITES_KEY: &str = "color-generator-favorites";

/// String-to-string persistence backend.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, PaletteError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), PaletteError>;
}

/// In-memory store, for tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PaletteError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PaletteError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory.
///
/// The directory is created on first write.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, PaletteError> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(PaletteError::Storage(format!("invalid key: {key:?}")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PaletteError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PaletteError::Storage(format!("{}: {e}", path.display()))),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PaletteError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| PaletteError::Storage(format!("{}: {e}", self.dir.display())))?;
        std::fs::write(&path, value)
            .map_err(|e| PaletteError::Storage(format!("{}: {e}", path.display())))
    }
}

fn load_collection<T: DeserializeOwned, S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Vec<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            log::debug!("no stored value for {key}");
            return Vec::new();
        }
        Err(e) => {
            log::warn!("failed to read {key}, starting empty: {e}");
            return Vec::new();
        }
    };
    let values: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
        Ok(values) => values,
        Err(e) => {
            log::warn!("corrupt data under {key}, starting empty: {e}");
            return Vec::new();
        }
    };
    let total = values.len();
    let items: Vec<T> = values
        .into_iter()
        .enumerate()
        .filter_map(|(i, value)| match serde_json::from_value(value) {
            Ok(item) => Some(item),
            Err(e) => {
                log::warn!("skipping entry {i} under {key}: {e}");
                None
            }
        })
        .collect();
    if items.len() < total {
        log::warn!("loaded {} of {total} entries from {key}", items.len());
    }
    items
}

fn save_collection<T: Serialize, S: KeyValueStore + ?Sized>(
    store: &mut S,
    key: &str,
    items: &[T],
) -> Result<(), PaletteError> {
    let json = serde_json::to_string(items)?;
    store.set(key, &json)?;
    log::info!("saved {} entries to {key}", items.len());
    Ok(())
}

pub fn load_history<S: KeyValueStore + ?Sized>(store: &S) -> Vec<HistoryEntry> {
    load_collection(store, HISTORY_KEY)
}

pub fn save_history<S: KeyValueStore + ?Sized>(
    store: &mut S,
    history: &[HistoryEntry],
) -> Result<(), PaletteError> {
    save_collection(store, HISTORY_KEY, history)
}

pub fn load_favorites<S: KeyValueStore + ?Sized>(store: &S) -> Vec<Color> {
    load_collection(store, FAVORITES_KEY)
}

pub fn save_favorites<S: KeyValueStore + ?Sized>(
    store: &mut S,
    favorites: &[Color],
) -> Result<(), PaletteError> {
    save_collection(store, FAVORITES_KEY, favorites)
}
