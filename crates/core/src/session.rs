//! An explicit palette session owned by the caller.
//!
//! A [`Session`] bundles the [`PaletteStore`] with its collaborators: the
//! generation settings, a key-value store for persistence, a random source
//! and a clock. UI layers drive it either through its methods or by
//! dispatching [`Command`]s.
//!
//! Persistence writes are fire-and-forget: a failed write is logged and the
//! in-memory mutation still stands.

use crate::clock::Clock;
use crate::color::Color;
use crate::error::PaletteError;
use crate::export::{self, ExportFormat};
use crate::generator::{self, GenerationMode, HslRanges};
use crate::palette::{LockSet, Palette};
use crate::random::RandomSource;
use crate::settings::GeneratorSettings;
use crate::storage::{self, KeyValueStore};
use crate::store::{HistoryEntry, PaletteStore};

/// A UI action, mapped one-to-one onto a session method.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Generate,
    SaveCurrent,
    SetMode(GenerationMode),
    SetCount(usize),
    SetRanges(HslRanges),
    ToggleLock(usize),
    /// Toggles the palette color at this position as a favorite.
    ToggleFavorite(usize),
    RemoveFavorite(usize),
    /// Makes the favorite at this position the primary color.
    SelectFavorite(usize),
    LoadHistory(usize),
    AddColors(Vec<Color>),
    Export(ExportFormat),
    Reset,
}

/// What a dispatched [`Command`] produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The palette after the command.
    Palette(Palette),
    /// New state of a lock or favorite toggle.
    Toggled(bool),
    Exported(String),
    /// Nothing to report (including no-ops on out-of-range positions).
    Done,
}

pub struct Session<S, R, C> {
    store: PaletteStore,
    settings: GeneratorSettings,
    storage: S,
    rng: R,
    clock: C,
}

impl<S: KeyValueStore, R: RandomSource, C: Clock> Session<S, R, C> {
    /// Opens a session, loading history and favorites from `storage`.
    ///
    /// Unreadable or corrupt stored collections load as empty. Fails only if
    /// `settings` does not validate.
    pub fn open(
        storage: S,
        rng: R,
        clock: C,
        settings: GeneratorSettings,
    ) -> Result<Self, PaletteError> {
        settings.validate()?;
        let history = storage::load_history(&storage);
        let favorites = storage::load_favorites(&storage);
        log::info!(
            "opened session: {} history entries, {} favorites",
            history.len(),
            favorites.len()
        );
        let mut store = PaletteStore::with_collections(history, favorites);
        store.set_mode(settings.mode);
        Ok(Self {
            store,
            settings,
            storage,
            rng,
            clock,
        })
    }

    pub fn store(&self) -> &PaletteStore {
        &self.store
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn palette(&self) -> &Palette {
        self.store.palette()
    }

    pub fn locks(&self) -> &LockSet {
        self.store.locks()
    }

    pub fn favorites(&self) -> &[Color] {
        self.store.favorites()
    }

    pub fn history(&self) -> &[HistoryEntry] {
        self.store.history()
    }

    pub fn mode(&self) -> GenerationMode {
        self.store.mode()
    }

    /// Generates a new palette from the current settings, keeping locked
    /// colors, then records it in history.
    pub fn generate(&mut self) -> Result<&Palette, PaletteError> {
        let current = self.store.palette();
        let previous = (!current.is_empty()).then_some(current);
        let palette = generator::generate(
            self.settings.count,
            self.store.mode(),
            &self.settings.ranges,
            previous,
            self.store.locks(),
            &mut self.rng,
        )?;
        self.store.set_palette(palette);
        self.record_history();
        Ok(self.store.palette())
    }

    /// Snapshots the current palette into history. An empty palette is not
    /// recorded; returns whether an entry was added.
    pub fn save_current(&mut self) -> bool {
        if self.store.palette().is_empty() {
            log::debug!("nothing to save: palette is empty");
            return false;
        }
        self.record_history();
        true
    }

    pub fn set_mode(&mut self, mode: GenerationMode) {
        self.store.set_mode(mode);
        self.settings.mode = mode;
        log::debug!("mode set to {mode}");
    }

    pub fn set_count(&mut self, count: usize) -> Result<(), PaletteError> {
        if count == 0 {
            return Err(PaletteError::InvalidCount(count));
        }
        self.settings.count = count;
        Ok(())
    }

    /// Applies new ranges after raising any inverted max to its min.
    /// Returns the ranges actually applied.
    pub fn set_ranges(&mut self, ranges: HslRanges) -> Result<HslRanges, PaletteError> {
        let ranges = ranges.normalized();
        ranges.validate()?;
        self.settings.ranges = ranges;
        Ok(ranges)
    }

    pub fn toggle_lock(&mut self, index: usize) -> bool {
        self.store.toggle_lock(index)
    }

    /// Toggles `color` in favorites and persists the list. Returns `true`
    /// if it is now a favorite.
    pub fn toggle_favorite(&mut self, color: &Color) -> bool {
        let added = self.store.toggle_favorite(color);
        self.persist_favorites();
        added
    }

    /// Toggles the palette color at `index`; `None` if there is no such
    /// position.
    pub fn toggle_favorite_at(&mut self, index: usize) -> Option<bool> {
        let color = self.store.palette().get(index)?.clone();
        Some(self.toggle_favorite(&color))
    }

    pub fn remove_favorite(&mut self, index: usize) -> Option<Color> {
        let removed = self.store.remove_favorite(index)?;
        self.persist_favorites();
        Some(removed)
    }

    pub fn select_color(&mut self, color: Color) {
        self.store.select_color(color);
    }

    /// Makes the favorite at `index` the primary color. Returns `false` if
    /// there is no such favorite.
    pub fn select_favorite(&mut self, index: usize) -> bool {
        match self.store.favorites().get(index).cloned() {
            Some(color) => {
                self.store.select_color(color);
                true
            }
            None => false,
        }
    }

    /// Prepends picked colors, keeping the palette at the configured count.
    pub fn add_colors(&mut self, colors: Vec<Color>) {
        self.store.add_colors(colors, self.settings.count);
    }

    /// Restores the palette and mode of history entry `index` (0 = newest).
    pub fn load_history(&mut self, index: usize) -> Result<(), PaletteError> {
        let entry = self
            .store
            .history()
            .get(index)
            .cloned()
            .ok_or(PaletteError::HistoryIndex {
                index,
                len: self.store.history().len(),
            })?;
        self.store.load_from_history(&entry);
        self.settings.mode = entry.mode;
        Ok(())
    }

    /// Restores the newest history entry, if any.
    pub fn resume_latest(&mut self) -> bool {
        self.load_history(0).is_ok()
    }

    /// Clears palette, locks and history and restores default settings.
    /// Favorites are kept. Both collections are written back.
    pub fn reset(&mut self) {
        self.store.reset();
        self.settings = GeneratorSettings::default();
        self.persist_history();
        self.persist_favorites();
        log::info!("session reset");
    }

    pub fn export(&self, format: ExportFormat) -> Result<String, PaletteError> {
        export::export(
            self.store.palette(),
            format,
            self.store.mode(),
            self.clock.now(),
        )
    }

    /// Runs one UI command.
    pub fn dispatch(&mut self, command: Command) -> Result<Outcome, PaletteError> {
        let outcome = match command {
            Command::Generate => Outcome::Palette(self.generate()?.clone()),
            Command::SaveCurrent => {
                self.save_current();
                Outcome::Done
            }
            Command::SetMode(mode) => {
                self.set_mode(mode);
                Outcome::Done
            }
            Command::SetCount(count) => {
                self.set_count(count)?;
                Outcome::Done
            }
            Command::SetRanges(ranges) => {
                self.set_ranges(ranges)?;
                Outcome::Done
            }
            Command::ToggleLock(index) => Outcome::Toggled(self.toggle_lock(index)),
            Command::ToggleFavorite(index) => self
                .toggle_favorite_at(index)
                .map_or(Outcome::Done, Outcome::Toggled),
            Command::RemoveFavorite(index) => {
                self.remove_favorite(index);
                Outcome::Done
            }
            Command::SelectFavorite(index) => {
                self.select_favorite(index);
                Outcome::Palette(self.store.palette().clone())
            }
            Command::LoadHistory(index) => {
                self.load_history(index)?;
                Outcome::Palette(self.store.palette().clone())
            }
            Command::AddColors(colors) => {
                self.add_colors(colors);
                Outcome::Palette(self.store.palette().clone())
            }
            Command::Export(format) => Outcome::Exported(self.export(format)?),
            Command::Reset => {
                self.reset();
                Outcome::Done
            }
        };
        Ok(outcome)
    }

    fn record_history(&mut self) {
        let timestamp = self.clock.now();
        let mode = self.store.mode();
        let palette = self.store.palette().clone();
        self.store.push_history(&palette, mode, timestamp);
        self.persist_history();
    }

    fn persist_history(&mut self) {
        if let Err(e) = storage::save_history(&mut self.storage, self.store.history()) {
            log::warn!("failed to persist history: {e}");
        }
    }

    fn persist_favorites(&mut self) {
        if let Err(e) = storage::save_favorites(&mut self.storage, self.store.favorites()) {
            log::warn!("failed to persist favorites: {e}");
        }
    }
}
