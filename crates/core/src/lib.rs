#![deny(unsafe_code)]
//! Core of palette-forge: HSL/RGB/hex color conversion, descriptive color
//! names, palette generation in four modes, and the session state behind the
//! CLI and the browser front end.
//!
//! Provides `Color`, `Palette`, `LockSet`, the `generate` function with its
//! `GenerationMode` and `HslRanges`, the `PaletteStore` state container, the
//! `Session` driver, and the `RandomSource` / `Clock` / `KeyValueStore` seams
//! that keep generation and persistence testable.

pub mod clock;
pub mod color;
pub mod error;
pub mod export;
pub mod generator;
pub mod naming;
pub mod palette;
pub mod random;
pub mod session;
pub mod settings;
pub mod storage;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use color::{Color, Hex, Hsl, Rgb};
pub use error::PaletteError;
pub use export::ExportFormat;
pub use generator::{generate, GenerationMode, HslRanges};
pub use palette::{LockSet, Palette};
pub use random::{RandomSource, Xorshift64};
pub use session::{Command, Outcome, Session};
pub use settings::GeneratorSettings;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use store::{HistoryEntry, PaletteStore};
