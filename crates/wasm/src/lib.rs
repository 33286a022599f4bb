//! WASM bindings for palette-forge.
//!
//! Exposes a [`PaletteApp`] session backed by browser `localStorage`. Every
//! getter returns JSON so the JS side never depends on Rust struct layout.

use chrono::{DateTime, Utc};
use palette_forge_core::{
    color, Clock, Color, ExportFormat, GenerationMode, GeneratorSettings, HslRanges,
    KeyValueStore, PaletteError, Session, Xorshift64,
};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    install_logger();
}

/// Routes `log` records to the browser console. Returns `false` if a logger
/// was already installed.
fn install_logger() -> bool {
    console_log::init_with_level(log::Level::Info).is_ok()
}

/// `window.localStorage`, when the page has one.
pub struct LocalStorage {
    storage: Option<web_sys::Storage>,
}

impl LocalStorage {
    pub fn open() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            log::warn!("localStorage not available; history and favorites will not persist");
        }
        Self { storage }
    }

    fn storage(&self) -> Result<&web_sys::Storage, PaletteError> {
        self.storage
            .as_ref()
            .ok_or_else(|| PaletteError::Storage("localStorage not available".into()))
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, PaletteError> {
        self.storage()?
            .get_item(key)
            .map_err(|e| PaletteError::Storage(format!("failed to read {key}: {e:?}")))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PaletteError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| PaletteError::Storage(format!("failed to write {key}: {e:?}")))
    }
}

/// `Date.now()` as a UTC timestamp.
pub struct JsClock;

impl Clock for JsClock {
    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
    }
}

fn browser_seed() -> u64 {
    let millis = js_sys::Date::now() as u64;
    let noise = (js_sys::Math::random() * f64::from(u32::MAX)) as u64;
    millis ^ (noise << 32)
}

#[wasm_bindgen]
pub struct PaletteApp {
    session: Session<LocalStorage, Xorshift64, JsClock>,
}

#[wasm_bindgen]
impl PaletteApp {
    /// Opens the session and restores the newest saved palette. Pass a seed
    /// for reproducible palettes.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<u64>) -> Result<PaletteApp, JsError> {
        console_error_panic_hook::set_once();
        install_logger();
        let rng = Xorshift64::new(seed.unwrap_or_else(browser_seed));
        let mut session = Session::open(
            LocalStorage::open(),
            rng,
            JsClock,
            GeneratorSettings::default(),
        )?;
        session.resume_latest();
        Ok(PaletteApp { session })
    }

    /// Generates a new palette and returns it as JSON.
    pub fn generate(&mut self) -> Result<String, JsError> {
        let palette = self.session.generate()?;
        Ok(serde_json::to_string(palette)?)
    }

    #[wasm_bindgen(js_name = saveCurrent)]
    pub fn save_current(&mut self) -> bool {
        self.session.save_current()
    }

    #[wasm_bindgen(js_name = setMode)]
    pub fn set_mode(&mut self, name: &str) -> Result<(), JsError> {
        self.session.set_mode(GenerationMode::from_name(name)?);
        Ok(())
    }

    #[wasm_bindgen(js_name = setCount)]
    pub fn set_count(&mut self, count: usize) -> Result<(), JsError> {
        self.session.set_count(count)?;
        Ok(())
    }

    /// Applies new HSL ranges, raising inverted maxima. Returns the applied
    /// ranges as JSON so the UI can reflect any correction.
    #[wasm_bindgen(js_name = setRanges)]
    pub fn set_ranges(
        &mut self,
        hue_min: u16,
        hue_max: u16,
        sat_min: u8,
        sat_max: u8,
        light_min: u8,
        light_max: u8,
    ) -> Result<String, JsError> {
        let applied = self.session.set_ranges(HslRanges {
            hue_min,
            hue_max,
            sat_min,
            sat_max,
            light_min,
            light_max,
        })?;
        Ok(serde_json::to_string(&applied)?)
    }

    #[wasm_bindgen(js_name = toggleLock)]
    pub fn toggle_lock(&mut self, index: usize) -> bool {
        self.session.toggle_lock(index)
    }

    /// Toggles the palette color at `index`; `undefined` if out of range.
    #[wasm_bindgen(js_name = toggleFavorite)]
    pub fn toggle_favorite(&mut self, index: usize) -> Option<bool> {
        self.session.toggle_favorite_at(index)
    }

    #[wasm_bindgen(js_name = removeFavorite)]
    pub fn remove_favorite(&mut self, index: usize) -> bool {
        self.session.remove_favorite(index).is_some()
    }

    #[wasm_bindgen(js_name = selectFavorite)]
    pub fn select_favorite(&mut self, index: usize) -> bool {
        self.session.select_favorite(index)
    }

    /// Restores history entry `index` and returns its palette as JSON.
    #[wasm_bindgen(js_name = loadHistory)]
    pub fn load_history(&mut self, index: usize) -> Result<String, JsError> {
        self.session.load_history(index)?;
        self.palette_json()
    }

    /// Clears everything but favorites, then starts over with a fresh palette.
    pub fn reset(&mut self) -> Result<String, JsError> {
        self.session.reset();
        self.generate()
    }

    pub fn export(&self, format: &str) -> Result<String, JsError> {
        Ok(self.session.export(format.parse::<ExportFormat>()?)?)
    }

    pub fn mode(&self) -> String {
        self.session.mode().name().to_string()
    }

    pub fn count(&self) -> usize {
        self.session.settings().count
    }

    #[wasm_bindgen(js_name = paletteJson)]
    pub fn palette_json(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(self.session.palette())?)
    }

    #[wasm_bindgen(js_name = historyJson)]
    pub fn history_json(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(self.session.history())?)
    }

    #[wasm_bindgen(js_name = favoritesJson)]
    pub fn favorites_json(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(self.session.favorites())?)
    }

    /// Locked positions, ascending.
    pub fn locked(&self) -> Vec<u32> {
        self.session.locks().iter().map(|i| i as u32).collect()
    }
}

/// Parses `#hex`, `hex` or `rgb(R, G, B)` and returns the color as JSON.
#[wasm_bindgen(js_name = describeColor)]
pub fn describe_color(text: &str) -> Result<String, JsError> {
    let color = Color::parse(text)?;
    Ok(serde_json::to_string(&color)?)
}

/// `#rrggbb` for an HSL triple.
#[wasm_bindgen(js_name = hslToHex)]
pub fn hsl_to_hex(h: u16, s: u8, l: u8) -> String {
    color::hsl_to_hex(h, s, l).to_string()
}
