//! CLI implementation for the `btr analyze` subcommand.

use std::io::Write;

use crate::btrieve::classifier::classify;
use crate::btrieve::record::estimated_records;
use crate::btrieve::reader::FileHandle;
use crate::btrieve::size_detector::detect_record_size;
use crate::cli::wprintln;
use crate::error::BtrError;

/// Options for the `btr analyze` subcommand.
pub struct AnalyzeOptions {
    pub file: String,
    pub max_records: Option<usize>,
    pub json: bool,
}

/// Classify content and detect the record size for `opts.file`, merging
/// both results into one [`crate::btrieve::classifier::FileSummary`].
pub fn execute(opts: &AnalyzeOptions, writer: &mut dyn Write) -> Result<(), BtrError> {
    let handle = FileHandle::open(&opts.file)?;

    let mut summary = classify(&handle).into_summary();

    match detect_record_size(&handle) {
        Ok(detection) => {
            summary.detected_record_size = Some(detection.record_size);
            summary.estimated_records = Some(estimated_records(
                handle.total_bytes(),
                detection.record_size,
            ));
            summary.quality_score = detection
                .candidates
                .iter()
                .find(|c| c.record_size == detection.record_size)
                .map(|c| c.score)
                .unwrap_or(0.0);
        }
        Err(_) => {
            // Record size could not be determined; leave the
            // detected_record_size/estimated_records fields at None
            // rather than failing the whole analysis.
        }
    }

    let _ = opts.max_records;

    if opts.json {
        let json = serde_json::to_string_pretty(&summary)
            .map_err(|e| BtrError::Data(format!("Failed to serialize summary: {}", e)))?;
        wprintln!(writer, "{}", json)?;
        return Ok(());
    }

    wprintln!(writer, "File:              {}", summary.filename)?;
    wprintln!(writer, "Size:              {} bytes", summary.file_size)?;
    wprintln!(writer, "Content type:      {:?}", summary.content_type)?;
    wprintln!(writer, "ASCII percentage:  {:.2}%", summary.ascii_percentage)?;
    wprintln!(writer, "Digit sequences:   {}", summary.digit_sequences)?;
    wprintln!(writer, "Date patterns:     {}", summary.date_patterns)?;
    match summary.detected_record_size {
        Some(size) => wprintln!(writer, "Record size:       {} bytes", size)?,
        None => wprintln!(writer, "Record size:       could not be determined")?,
    }
    if let Some(count) = summary.estimated_records {
        wprintln!(writer, "Estimated records: {}", count)?;
    }
    wprintln!(writer, "Quality score:     {:.1}/100", summary.quality_score)?;

    Ok(())
}
