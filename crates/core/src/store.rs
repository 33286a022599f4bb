//! In-memory palette state: current palette, locks, favorites and history.
//!
//! The store is plain data plus the mutations the UI layer invokes. It never
//! touches persistence or clocks itself; [`Session`](crate::session::Session)
//! feeds it timestamps and writes its collections out.

use crate::color::Color;
use crate::generator::GenerationMode;
use crate::palette::{LockSet, Palette};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of history entries kept, newest first.
pub const HISTORY_CAPACITY: usize = 20;

/// A saved snapshot of a palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub colors: Palette,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub mode: GenerationMode,
}

/// Session state mutated by generation and by direct UI actions.
#[derive(Debug, Clone, Default)]
pub struct PaletteStore {
    palette: Palette,
    locks: LockSet,
    favorites: Vec<Color>,
    history: Vec<HistoryEntry>,
    mode: GenerationMode,
}

impl PaletteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store seeded with previously persisted collections. History past
    /// capacity is dropped.
    pub fn with_collections(mut history: Vec<HistoryEntry>, favorites: Vec<Color>) -> Self {
        history.truncate(HISTORY_CAPACITY);
        Self {
            history,
            favorites,
            ..Self::default()
        }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn locks(&self) -> &LockSet {
        &self.locks
    }

    pub fn favorites(&self) -> &[Color] {
        &self.favorites
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn mode(&self) -> GenerationMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: GenerationMode) {
        self.mode = mode;
    }

    /// Replaces the palette wholesale. Locks are left alone, so they may
    /// point past the new end.
    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    /// Flips the lock on `index`. Returns `true` if it is now locked.
    pub fn toggle_lock(&mut self, index: usize) -> bool {
        let locked = self.locks.toggle(index);
        log::debug!("position {index} {}", if locked { "locked" } else { "unlocked" });
        locked
    }

    pub fn is_locked(&self, index: usize) -> bool {
        self.locks.contains(index)
    }

    /// Removes the favorite sharing `color`'s hex code, or appends `color`
    /// if there is none. Returns `true` if `color` is now a favorite.
    pub fn toggle_favorite(&mut self, color: &Color) -> bool {
        match self.favorites.iter().position(|f| f.hex() == color.hex()) {
            Some(i) => {
                self.favorites.remove(i);
                false
            }
            None => {
                self.favorites.push(color.clone());
                true
            }
        }
    }

    pub fn is_favorite(&self, color: &Color) -> bool {
        self.favorites.iter().any(|f| f.hex() == color.hex())
    }

    /// Removes the favorite at `index`; out of range is a no-op.
    pub fn remove_favorite(&mut self, index: usize) -> Option<Color> {
        (index < self.favorites.len()).then(|| self.favorites.remove(index))
    }

    /// Prepends a snapshot of `colors` and evicts entries past
    /// [`HISTORY_CAPACITY`].
    pub fn push_history(&mut self, colors: &Palette, mode: GenerationMode, timestamp: DateTime<Utc>) {
        self.history.insert(
            0,
            HistoryEntry {
                colors: colors.clone(),
                timestamp,
                mode,
            },
        );
        self.history.truncate(HISTORY_CAPACITY);
    }

    /// Restores an entry's palette and mode. Locks are kept as they are.
    pub fn load_from_history(&mut self, entry: &HistoryEntry) {
        self.palette = entry.colors.clone();
        self.mode = entry.mode;
    }

    /// Makes `color` the primary (position 0) color.
    pub fn select_color(&mut self, color: Color) {
        self.palette.set_first(color);
    }

    /// Prepends externally picked colors, keeping at most `count` entries.
    pub fn add_colors(&mut self, colors: Vec<Color>, count: usize) {
        self.palette.prepend(colors, count);
    }

    /// Clears palette, locks and history and returns to random mode.
    /// Favorites survive a reset.
    pub fn reset(&mut self) {
        self.palette = Palette::default();
        self.locks.clear();
        self.history.clear();
        self.mode = GenerationMode::Random;
    }
}
