//! CLI subcommand implementations for the `btr` binary.
//!
//! The `btr` binary provides seven subcommands for forensically reading
//! legacy Btrieve v5 database files whose original application and schema
//! are long gone. CLI argument parsing uses clap derive macros, with the
//! top-level [`app::Cli`] struct and [`app::Commands`] enum defined in
//! [`app`] and shared between `main.rs` and `build.rs` (for man page
//! generation) via `include!()`.
//!
//! Each subcommand module follows the same pattern: an `Options` struct
//! holding the parsed arguments and a `pub fn execute(opts, writer) ->
//! Result<(), BtrError>` entry point. The `writer: &mut dyn Write`
//! parameter allows output to be captured in tests or redirected to a
//! file via the global `--output` flag.
//!
//! # Subcommands
//!
//! | Command | Module | Purpose |
//! |---------|--------|---------|
//! | `btr check` | [`check`] | Structural integrity predicates, independent of content |
//! | `btr analyze` | [`analyze`] | Content classification and record-size detection |
//! | `btr schema` | [`schema`] | Infer field boundaries from per-offset byte statistics |
//! | `btr extract` | [`extract`] | Dump decoded records |
//! | `btr export` | [`export`] | Export records to csv, jsonl, sqlite, xml, or xlsx |
//! | `btr scan` | [`scan`] | Recursively scan a directory and summarize each candidate file |
//! | `btr search` | [`search`] | Search decoded records for a substring or regex pattern |
//!
//! # Common patterns
//!
//! - **`--json`** — Most subcommands support structured JSON output via
//!   `#[derive(Serialize)]` structs and `serde_json`.
//! - **`--record-size`** — Override auto-detection where a subcommand
//!   needs a fixed record size.
//! - **`--color`** (global) — Control colored terminal output (`auto`,
//!   `always`, `never`).
//! - **`--output` / `-o`** (global) — Redirect output to a file instead
//!   of stdout.
//! - **`--threads`** (global) — Size of the rayon thread pool used by
//!   `scan`.
//!
//! A progress bar (via [`indicatif`]) is displayed while `scan` walks a
//! directory. The `wprintln!` and `wprint!` macros wrap
//! `writeln!`/`write!` to convert `io::Error` into `BtrError`.

pub mod analyze;
pub mod app;
pub mod check;
pub mod export;
pub mod extract;
pub mod schema;
pub mod scan;
pub mod search;

use indicatif::{ProgressBar, ProgressStyle};

use crate::btrieve::reader::FileHandle;
use crate::btrieve::size_detector::detect_record_size;
use crate::error::BtrError;

/// Write a line to the given writer, converting io::Error to BtrError.
macro_rules! wprintln {
    ($w:expr) => {
        writeln!($w).map_err(|e| $crate::error::BtrError::File(e.to_string()))
    };
    ($w:expr, $($arg:tt)*) => {
        writeln!($w, $($arg)*).map_err(|e| $crate::error::BtrError::File(e.to_string()))
    };
}

/// Write (without newline) to the given writer, converting io::Error to BtrError.
macro_rules! wprint {
    ($w:expr, $($arg:tt)*) => {
        write!($w, $($arg)*).map_err(|e| $crate::error::BtrError::File(e.to_string()))
    };
}

pub(crate) use wprint;
pub(crate) use wprintln;

/// Create a styled progress bar for iterating over files.
pub(crate) fn create_progress_bar(count: u64, unit: &str) -> ProgressBar {
    let pb = ProgressBar::new(count);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(&format!(
                "{{spinner:.green}} [{{bar:40.cyan/blue}}] {{pos}}/{{len}} {} ({{eta}})",
                unit
            ))
            .unwrap()
            .progress_chars("#>-"),
    );
    pb
}

/// Resolve the record size to use: the caller's override if given,
/// otherwise the size detector's winning candidate.
pub(crate) fn resolve_record_size(
    handle: &FileHandle,
    override_size: Option<u32>,
) -> Result<u32, BtrError> {
    match override_size {
        Some(size) => Ok(size),
        None => detect_record_size(handle).map(|r| r.record_size),
    }
}

/// Initialize the `tracing` subscriber, honoring `BTRTOOLS_LOG_LEVEL`
/// (defaults to `warn`) so the CLI stays quiet unless asked.
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("BTRTOOLS_LOG_LEVEL")
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
