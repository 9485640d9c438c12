//! CLI implementation for the `btr scan` subcommand.
//!
//! Recursively finds candidate Btrieve files under a directory and runs
//! content classification and record-size detection on each, in
//! parallel. This is the one collaborator in the reader that analyzes
//! more than one file per invocation.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rayon::prelude::*;
use serde::Serialize;

use crate::btrieve::classifier::classify;
use crate::btrieve::record::estimated_records;
use crate::btrieve::reader::FileHandle;
use crate::btrieve::size_detector::detect_record_size;
use crate::cli::{create_progress_bar, wprintln};
use crate::error::BtrError;
use crate::util::fs::find_btrieve_candidates;

/// Options for the `btr scan` subcommand.
pub struct ScanOptions {
    pub dir: String,
    pub json: bool,
}

#[derive(Serialize)]
struct ScanEntry {
    path: String,
    file_size: u64,
    content_type: String,
    record_size: Option<u32>,
    estimated_records: Option<u64>,
    quality_score: f64,
    error: Option<String>,
}

/// Scan `opts.dir` for candidate Btrieve files and summarize each.
pub fn execute(opts: &ScanOptions, writer: &mut dyn Write) -> Result<(), BtrError> {
    let dir = std::path::Path::new(&opts.dir);
    let paths = find_btrieve_candidates(dir)?;

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .map_err(|e| BtrError::File(format!("Cannot set Ctrl+C handler: {}", e)))?;

    let pb = create_progress_bar(paths.len() as u64, "files");
    let entries: Vec<ScanEntry> = paths
        .par_iter()
        .take_any_while(|_| running.load(Ordering::SeqCst))
        .map(|path| {
            let entry = scan_one(path);
            pb.inc(1);
            entry
        })
        .collect();
    pb.finish_and_clear();

    if !running.load(Ordering::SeqCst) {
        return Err(BtrError::Cancelled);
    }

    if opts.json {
        let json = serde_json::to_string_pretty(&entries)
            .map_err(|e| BtrError::Data(format!("Failed to serialize scan results: {}", e)))?;
        wprintln!(writer, "{}", json)?;
        return Ok(());
    }

    for entry in &entries {
        match &entry.error {
            Some(err) => wprintln!(writer, "{}: ERROR ({})", entry.path, err)?,
            None => wprintln!(
                writer,
                "{}: {} bytes, {}, record_size={:?}, records={:?}, quality={:.1}",
                entry.path,
                entry.file_size,
                entry.content_type,
                entry.record_size,
                entry.estimated_records,
                entry.quality_score
            )?,
        }
    }
    wprintln!(writer, "Scanned {} files", entries.len())?;

    Ok(())
}

fn scan_one(path: &std::path::Path) -> ScanEntry {
    let path_str = path.to_string_lossy().into_owned();

    let handle = match FileHandle::open(&path_str) {
        Ok(h) => h,
        Err(e) => {
            return ScanEntry {
                path: path_str,
                file_size: 0,
                content_type: String::new(),
                record_size: None,
                estimated_records: None,
                quality_score: 0.0,
                error: Some(e.to_string()),
            }
        }
    };

    let summary = classify(&handle).into_summary();
    let (record_size, records, score) = match detect_record_size(&handle) {
        Ok(detection) => {
            let est = estimated_records(handle.total_bytes(), detection.record_size);
            let score = detection
                .candidates
                .iter()
                .find(|c| c.record_size == detection.record_size)
                .map(|c| c.score)
                .unwrap_or(0.0);
            (Some(detection.record_size), Some(est), score)
        }
        Err(_) => (None, None, 0.0),
    };

    ScanEntry {
        path: path_str,
        file_size: handle.total_bytes(),
        content_type: format!("{:?}", summary.content_type),
        record_size,
        estimated_records: records,
        quality_score: score,
        error: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::TempDir;

    #[test]
    fn scans_a_directory_of_candidates() {
        let dir = TempDir::new().unwrap();
        let mut bytes = vec![0u8; 8192];
        let mut rec = b"JOHN DOE 123 MAIN ST".to_vec();
        rec.resize(64, 0);
        for _ in 0..50 {
            bytes.extend_from_slice(&rec);
        }
        std::fs::write(dir.path().join("customers.btr"), &bytes).unwrap();

        let mut buf = Vec::new();
        let opts = ScanOptions {
            dir: dir.path().to_str().unwrap().to_string(),
            json: false,
        };
        execute(&opts, &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("Scanned 1 files"));
    }

    #[test]
    fn cancellation_maps_to_exit_code_130() {
        let err = BtrError::Cancelled;
        assert_eq!(err.exit_code(), 130);
    }

    #[test]
    fn empty_directory_scans_cleanly() {
        let dir = TempDir::new().unwrap();
        let mut buf = Vec::new();
        let opts = ScanOptions {
            dir: dir.path().to_str().unwrap().to_string(),
            json: false,
        };
        execute(&opts, &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("Scanned 0 files"));
    }
}
