use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "btr")]
#[command(about = "Forensic reader for legacy Btrieve v5 database files")]
#[command(version)]
pub struct Cli {
    /// Control colored output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Write output to a file instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<String>,

    /// Number of threads for parallel directory scanning (0 = auto-detect)
    #[arg(long, default_value = "0", global = true)]
    pub threads: usize,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check structural integrity of a Btrieve file
    Check {
        /// Path to the Btrieve data file
        #[arg(short, long)]
        file: String,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Classify content and detect the record size
    Analyze {
        /// Path to the Btrieve data file
        #[arg(short, long)]
        file: String,

        /// Cap on records sampled while scoring candidate record sizes
        #[arg(long = "max-records")]
        max_records: Option<usize>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Infer field boundaries from per-offset byte statistics
    Schema {
        /// Path to the Btrieve data file
        #[arg(short, long)]
        file: String,

        /// Record size to use (auto-detected if omitted)
        #[arg(short, long = "record-size")]
        record_size: Option<u32>,

        /// Number of records to sample for boundary detection
        #[arg(long, default_value = "100")]
        sample: usize,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Dump decoded records
    Extract {
        /// Path to the Btrieve data file
        #[arg(short, long)]
        file: String,

        /// Record size to use (auto-detected if omitted)
        #[arg(short, long = "record-size")]
        record_size: Option<u32>,

        /// Maximum number of records to print
        #[arg(short, long)]
        limit: Option<usize>,

        /// Show the raw hex encoding alongside decoded text
        #[arg(long)]
        hex: bool,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Export records to csv, jsonl, sqlite, xml, or xlsx
    Export {
        /// Path to the Btrieve data file
        #[arg(short, long)]
        file: String,

        /// Record size to use (auto-detected if omitted)
        #[arg(short, long = "record-size")]
        record_size: Option<u32>,

        /// Export format: csv, jsonl, sqlite, xml, or xlsx
        #[arg(long, default_value = "csv")]
        format: String,

        /// Destination file path
        #[arg(short = 'O', long)]
        out: String,

        /// Maximum number of records to export
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Recursively scan a directory for Btrieve files and summarize each
    Scan {
        /// Directory to scan
        #[arg(short, long)]
        dir: String,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Search decoded records for a substring or regex pattern
    Search {
        /// Path to the Btrieve data file
        #[arg(short, long)]
        file: String,

        /// Pattern to search for
        #[arg(short, long)]
        pattern: String,

        /// Record size to use (auto-detected if omitted)
        #[arg(short, long = "record-size")]
        record_size: Option<u32>,

        /// Treat the pattern as a regular expression
        #[arg(long)]
        regex: bool,

        /// Maximum number of matches to return
        #[arg(short, long)]
        limit: Option<usize>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}
