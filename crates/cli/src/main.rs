#![deny(unsafe_code)]
//! CLI binary for palette-forge.
//!
//! Subcommands:
//! - `generate`: resume the latest palette, apply locks, generate a new one
//! - `save`: snapshot the latest palette into history again
//! - `history`: list history entries or print one
//! - `favorites`: list, toggle or remove favorite colors
//! - `describe <COLOR>`: convert and name a single color
//! - `export`: print the latest palette as CSS, SCSS or JSON
//! - `modes`: list generation modes and export formats
//! - `reset`: clear history (favorites are kept)

mod error;

use clap::{Args, Parser, Subcommand};
use error::CliError;
use palette_forge_core::{
    Color, ExportFormat, FileStore, GenerationMode, GeneratorSettings, Palette, Session,
    SystemClock, Xorshift64,
};
use std::path::{Path, PathBuf};
use std::process;

type CliSession = Session<FileStore, Xorshift64, SystemClock>;

#[derive(Parser)]
#[command(name = "palette-forge", about = "Color palette generator CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Directory holding history and favorites.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a new palette from the latest one, keeping locked positions.
    Generate(GenerateArgs),
    /// Record the latest palette in history again.
    Save,
    /// List history entries, newest first.
    History {
        /// Print the palette of entry I instead of the list.
        #[arg(long, value_name = "I")]
        load: Option<usize>,
    },
    /// Manage favorite colors.
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },
    /// Show hex, rgb, hsl and name of a color (`#hex`, `hex` or `rgb(R, G, B)`).
    Describe { color: String },
    /// Export the latest palette.
    Export {
        /// Output format (css, scss, json).
        #[arg(short, long, default_value = "css")]
        format: ExportFormat,
    },
    /// List generation modes and export formats.
    Modes,
    /// Clear history. Favorites are kept.
    Reset,
}

#[derive(Subcommand)]
enum FavoritesAction {
    List,
    /// Add the color to favorites, or remove it if already there.
    Toggle { color: String },
    /// Remove the favorite at position I.
    Remove { index: usize },
}

#[derive(Args, Default)]
struct GenerateArgs {
    /// Settings file (JSON); flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of colors.
    #[arg(short, long)]
    count: Option<usize>,

    /// Generation mode (random, harmonious, analogous, gradient).
    #[arg(short, long)]
    mode: Option<String>,

    #[arg(long)]
    hue_min: Option<u16>,
    #[arg(long)]
    hue_max: Option<u16>,
    #[arg(long)]
    sat_min: Option<u8>,
    #[arg(long)]
    sat_max: Option<u8>,
    #[arg(long)]
    light_min: Option<u8>,
    #[arg(long)]
    light_max: Option<u8>,

    /// PRNG seed for deterministic output.
    #[arg(long)]
    seed: Option<u64>,

    /// Keep the color at this position of the latest palette (repeatable).
    #[arg(long = "lock", value_name = "I")]
    locks: Vec<usize>,
}

impl GenerateArgs {
    /// Reads the config file, if any, then applies flag overrides. Inverted
    /// ranges are normalized.
    fn settings(&self) -> Result<GeneratorSettings, CliError> {
        let mut settings = match &self.config {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?;
                GeneratorSettings::from_json(&json)?
            }
            None => GeneratorSettings::default(),
        };
        if let Some(count) = self.count {
            settings.count = count;
        }
        if let Some(mode) = &self.mode {
            settings.mode = GenerationMode::from_name(mode)?;
        }
        let r = &mut settings.ranges;
        r.hue_min = self.hue_min.unwrap_or(r.hue_min);
        r.hue_max = self.hue_max.unwrap_or(r.hue_max);
        r.sat_min = self.sat_min.unwrap_or(r.sat_min);
        r.sat_max = self.sat_max.unwrap_or(r.sat_max);
        r.light_min = self.light_min.unwrap_or(r.light_min);
        r.light_max = self.light_max.unwrap_or(r.light_max);
        settings.ranges = settings.ranges.normalized();
        Ok(settings)
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("palette-forge"))
        .unwrap_or_else(|| PathBuf::from(".palette-forge"))
}

fn time_seed() -> u64 {
    chrono::Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_default()
        .unsigned_abs()
}

fn open_session(
    data_dir: &Path,
    settings: GeneratorSettings,
    seed: Option<u64>,
) -> Result<CliSession, CliError> {
    let seed = seed.unwrap_or_else(time_seed);
    log::debug!("data dir {}, seed {seed}", data_dir.display());
    let session = Session::open(
        FileStore::new(data_dir),
        Xorshift64::new(seed),
        SystemClock,
        settings,
    )?;
    Ok(session)
}

/// Opens a session and restores the newest history entry, failing if there
/// is none.
fn open_latest(data_dir: &Path) -> Result<CliSession, CliError> {
    let mut session = open_session(data_dir, GeneratorSettings::default(), None)?;
    if !session.resume_latest() {
        return Err(CliError::Input(
            "no palette yet; run `palette-forge generate` first".into(),
        ));
    }
    Ok(session)
}

fn print_palette(
    palette: &Palette,
    locked: &dyn Fn(usize) -> bool,
    json: bool,
) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(palette)?);
    } else {
        for (i, color) in palette.iter().enumerate() {
            let marker = if locked(i) { "*" } else { " " };
            println!(
                "{i}{marker} {}  {:<20} {}",
                color.hex(),
                color.hsl().to_string(),
                color.name()
            );
        }
    }
    Ok(())
}

fn print_colors(colors: &[Color], json: bool) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(colors)?);
    } else if colors.is_empty() {
        println!("(none)");
    } else {
        for (i, color) in colors.iter().enumerate() {
            println!("{i}  {}  {}", color.hex(), color.name());
        }
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    let data_dir = cli.data_dir.clone().unwrap_or_else(default_data_dir);

    match cli.command {
        Command::Generate(args) => {
            let settings = args.settings()?;
            let mode = settings.mode;
            let mut session = open_session(&data_dir, settings, args.seed)?;
            session.resume_latest();
            // Resuming restores the entry's mode; the requested one wins.
            session.set_mode(mode);
            for &i in &args.locks {
                if !session.locks().contains(i) {
                    session.toggle_lock(i);
                }
            }
            session.generate()?;
            let locks = session.locks().clone();
            print_palette(session.palette(), &|i| locks.contains(i), cli.json)?;
        }
        Command::Save => {
            let mut session = open_latest(&data_dir)?;
            session.save_current();
            if cli.json {
                let info = serde_json::json!({ "saved": true, "history": session.history().len() });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!("saved ({} entries in history)", session.history().len());
            }
        }
        Command::History { load: Some(index) } => {
            let mut session = open_session(&data_dir, GeneratorSettings::default(), None)?;
            session.load_history(index)?;
            print_palette(session.palette(), &|_| false, cli.json)?;
        }
        Command::History { load: None } => {
            let session = open_session(&data_dir, GeneratorSettings::default(), None)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(session.history())?);
            } else if session.history().is_empty() {
                println!("(empty)");
            } else {
                for (i, entry) in session.history().iter().enumerate() {
                    let hexes: Vec<String> =
                        entry.colors.iter().map(|c| c.hex().to_string()).collect();
                    println!(
                        "{i:>2}  {}  {:<10} {}",
                        entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
                        entry.mode.name(),
                        hexes.join(" ")
                    );
                }
            }
        }
        Command::Favorites { action } => {
            let mut session = open_session(&data_dir, GeneratorSettings::default(), None)?;
            match action {
                FavoritesAction::List => print_colors(session.favorites(), cli.json)?,
                FavoritesAction::Toggle { color } => {
                    let color = Color::parse(&color)?;
                    let added = session.toggle_favorite(&color);
                    if cli.json {
                        let info = serde_json::json!({ "color": color, "favorite": added });
                        println!("{}", serde_json::to_string_pretty(&info)?);
                    } else {
                        let verb = if added { "added" } else { "removed" };
                        eprintln!("{verb} {}", color.hex());
                    }
                }
                FavoritesAction::Remove { index } => {
                    let removed = session.remove_favorite(index).ok_or_else(|| {
                        CliError::Input(format!(
                            "no favorite at {index} ({} favorites)",
                            session.favorites().len()
                        ))
                    })?;
                    if cli.json {
                        println!("{}", serde_json::to_string_pretty(&removed)?);
                    } else {
                        eprintln!("removed {}", removed.hex());
                    }
                }
            }
        }
        Command::Describe { color } => {
            let color = Color::parse(&color)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&color)?);
            } else {
                println!("hex   {}", color.hex());
                println!("rgb   {}", color.rgb());
                println!("hsl   {}", color.hsl());
                println!("name  {}", color.name());
            }
        }
        Command::Export { format } => {
            let session = open_latest(&data_dir)?;
            print!("{}", session.export(format)?);
        }
        Command::Modes => {
            let modes = GenerationMode::list_names();
            let formats = ExportFormat::list_names();
            if cli.json {
                let info = serde_json::json!({
                    "modes": modes,
                    "formats": formats,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Modes:");
                for name in modes {
                    println!("  {name}");
                }
                println!("Export formats:");
                println!("  {}", formats.join(", "));
            }
        }
        Command::Reset => {
            let mut session = open_session(&data_dir, GeneratorSettings::default(), None)?;
            session.reset();
            if !cli.json {
                eprintln!("history cleared ({} favorites kept)", session.favorites().len());
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
