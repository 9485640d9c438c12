//! CLI implementation for the `btr schema` subcommand.

use std::io::Write;

use crate::btrieve::boundary::{collect_position_stats, detect_fields};
use crate::btrieve::reader::FileHandle;
use crate::btrieve::record::extract_records;
use crate::cli::{resolve_record_size, wprintln};
use crate::error::BtrError;

/// Options for the `btr schema` subcommand.
pub struct SchemaOptions {
    pub file: String,
    pub record_size: Option<u32>,
    pub sample: usize,
    pub json: bool,
}

/// Infer field boundaries for `opts.file` and print the resulting table.
pub fn execute(opts: &SchemaOptions, writer: &mut dyn Write) -> Result<(), BtrError> {
    let handle = FileHandle::open(&opts.file)?;
    let record_size = resolve_record_size(&handle, opts.record_size)?;

    let records = extract_records(&handle, record_size, Some(opts.sample))?;
    let stats = collect_position_stats(&records, record_size as usize);
    let fields = detect_fields(&stats);

    if opts.json {
        let json = serde_json::to_string_pretty(&fields)
            .map_err(|e| BtrError::Data(format!("Failed to serialize fields: {}", e)))?;
        wprintln!(writer, "{}", json)?;
        return Ok(());
    }

    wprintln!(writer, "Record size: {} bytes ({} sampled)", record_size, records.len())?;
    wprintln!(writer, "{:<20} {:>8} {:>7}  {}", "name", "position", "length", "type")?;
    for field in &fields {
        wprintln!(
            writer,
            "{:<20} {:>8} {:>7}  {}",
            field.name,
            field.position,
            field.length,
            field.type_tag
        )?;
    }

    Ok(())
}
