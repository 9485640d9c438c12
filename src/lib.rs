//! Forensic reader for legacy Btrieve v5 database files.
//!
//! The `btrieve-forensics` crate (library name `btrf`) provides Rust
//! types and functions for inferring structure and recovering records
//! from Btrieve v5 data files whose original application, index
//! definitions, and field schema are no longer available.
//!
//! # CLI Reference
//!
//! Install the `btr` binary and use its subcommands to inspect Btrieve
//! files from the command line.
//!
//! ## Installation
//!
//! ```text
//! cargo install btrieve-forensics       # crates.io
//! ```
//!
//! ## Subcommands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | [`btr check`](cli::app::Commands::Check) | Structural integrity predicates |
//! | [`btr analyze`](cli::app::Commands::Analyze) | Content classification and record-size detection |
//! | [`btr schema`](cli::app::Commands::Schema) | Infer field boundaries from byte statistics |
//! | [`btr extract`](cli::app::Commands::Extract) | Dump decoded records |
//! | [`btr export`](cli::app::Commands::Export) | Export records to csv, jsonl, sqlite, xml, or xlsx |
//! | [`btr scan`](cli::app::Commands::Scan) | Recursively scan a directory and summarize each candidate file |
//! | [`btr search`](cli::app::Commands::Search) | Search decoded records for a substring or regex pattern |
//!
//! ## Global options
//!
//! All subcommands accept `--color <auto|always|never>` and `--output <file>`.
//! Most subcommands also accept `--json` for machine-readable output.
//!
//! See the [`cli`] module for full details.
//!
//! # Library API
//!
//! Add `btrf` as a dependency to use the parsing library directly:
//!
//! ```toml
//! [dependencies]
//! btrf = { package = "btrieve-forensics", version = "1" }
//! ```
//!
//! ## Quick example
//!
//! ```no_run
//! use btrf::btrieve::reader::FileHandle;
//! use btrf::btrieve::classifier::classify;
//! use btrf::btrieve::size_detector::detect_record_size;
//!
//! let handle = FileHandle::open("customers.btr").unwrap();
//! let summary = classify(&handle).into_summary();
//! println!("Content type: {:?}", summary.content_type);
//!
//! let detection = detect_record_size(&handle).unwrap();
//! println!("Record size: {}", detection.record_size);
//! ```
//!
//! ## Key entry points
//!
//! | Type / Function | Purpose |
//! |-----------------|---------|
//! | [`FileHandle`](btrieve::reader::FileHandle) | Open a file, expose the data region, check integrity |
//! | [`classify`](btrieve::classifier::classify) | Byte-histogram + pattern content classification |
//! | [`detect_record_size`](btrieve::size_detector::detect_record_size) | Pick the winning candidate record size |
//! | [`extract_records`](btrieve::record::extract_records) | Slice the data region into fixed-size records |
//! | [`ExtractedFields`](btrieve::fields::ExtractedFields) | Closed-vocabulary regex field extraction |
//! | [`detect_fields`](btrieve::boundary::detect_fields) | Infer a record's internal field layout |
//!
//! ## Module overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`btrieve::constants`] | Btrieve v5 file-layout constants |
//! | [`btrieve::reader`] | File I/O, data-region access, integrity predicates |
//! | [`btrieve::record`] | Fixed-size record extraction and Latin-1 decoding |
//! | [`btrieve::fields`] | Closed-vocabulary regex field extraction |
//! | [`btrieve::classifier`] | Content classification |
//! | [`btrieve::quality`] | Record-batch quality scoring |
//! | [`btrieve::size_detector`] | Candidate record-size detection |
//! | [`btrieve::boundary`] | Field boundary detection |

pub mod btrieve;
pub mod cli;
pub mod error;
pub mod util;

pub use error::BtrError;
