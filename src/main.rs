#[cfg(not(feature = "cli"))]
compile_error!("The `btr` binary requires the `cli` feature. Build with `--features cli`.");

use clap::Parser;
use std::fs::File;
use std::io::Write;
use std::process;

use btrf::cli;
use btrf::cli::app::{Cli, ColorMode, Commands};

fn main() {
    cli::init_logging();
    let cli = Cli::parse();

    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .ok(); // Ignore if already initialized
    }

    match cli.color {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => {} // colored auto-detects tty
    }

    let writer_result: Result<Box<dyn Write>, String> = match &cli.output {
        Some(path) => File::create(path)
            .map(|f| Box::new(f) as Box<dyn Write>)
            .map_err(|e| format!("Cannot create {}: {}", path, e)),
        None => Ok(Box::new(std::io::stdout()) as Box<dyn Write>),
    };

    let mut writer = match writer_result {
        Ok(w) => w,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(4);
        }
    };

    let result = match cli.command {
        Commands::Check { file, json } => {
            cli::check::execute(&cli::check::CheckOptions { file, json }, &mut writer)
        }

        Commands::Analyze {
            file,
            max_records,
            json,
        } => cli::analyze::execute(
            &cli::analyze::AnalyzeOptions {
                file,
                max_records,
                json,
            },
            &mut writer,
        ),

        Commands::Schema {
            file,
            record_size,
            sample,
            json,
        } => cli::schema::execute(
            &cli::schema::SchemaOptions {
                file,
                record_size,
                sample,
                json,
            },
            &mut writer,
        ),

        Commands::Extract {
            file,
            record_size,
            limit,
            hex,
            json,
        } => cli::extract::execute(
            &cli::extract::ExtractOptions {
                file,
                record_size,
                limit,
                hex,
                json,
            },
            &mut writer,
        ),

        Commands::Export {
            file,
            record_size,
            format,
            out,
            limit,
        } => cli::export::execute(
            &cli::export::ExportOptions {
                file,
                record_size,
                format,
                out,
                limit,
            },
            &mut writer,
        ),

        Commands::Scan { dir, json } => {
            cli::scan::execute(&cli::scan::ScanOptions { dir, json }, &mut writer)
        }

        Commands::Search {
            file,
            pattern,
            record_size,
            regex,
            limit,
            json,
        } => cli::search::execute(
            &cli::search::SearchOptions {
                file,
                pattern,
                record_size,
                regex,
                limit,
                json,
            },
            &mut writer,
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(e.exit_code());
    }
}
