//! File Reader and integrity predicates.
//!
//! Opens a path into a memory-resident byte buffer and answers the basic
//! integrity questions (exists, readable, large enough to hold at least
//! one data page) independently of content classification.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use crate::btrieve::constants::{DATA_REGION_OFFSET, FCR_PAGES, HEADER_SIZE, PAGE_SIZE};
use crate::error::BtrError;

/// A file opened for analysis: path, size, and the whole-file byte buffer.
///
/// Created on open and read-only thereafter. Its lifetime is bounded by a
/// single command invocation — there is no caching across runs.
#[derive(Clone)]
pub struct FileHandle {
    path: String,
    filename: String,
    buffer: Arc<Vec<u8>>,
}

impl FileHandle {
    /// Open `path`, reading the whole file into memory.
    pub fn open(path: &str) -> Result<Self, BtrError> {
        let p = Path::new(path);
        if !p.exists() {
            return Err(BtrError::File(format!("File not found: {}", path)));
        }

        let buffer = std::fs::read(p)
            .map_err(|e| BtrError::File(format!("Failed to read file: {}", e)))?;

        let filename = p
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string());

        Ok(Self {
            path: path.to_string(),
            filename,
            buffer: Arc::new(buffer),
        })
    }

    /// Path this handle was opened from.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Base filename (no directory components).
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Total file size in bytes.
    pub fn total_bytes(&self) -> u64 {
        self.buffer.len() as u64
    }

    /// Full file contents.
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// The data region: everything after the two FCR pages. Empty if the
    /// file is shorter than `DATA_REGION_OFFSET`.
    pub fn data_region(&self) -> &[u8] {
        let offset = DATA_REGION_OFFSET as usize;
        if offset >= self.buffer.len() {
            &[]
        } else {
            &self.buffer[offset..]
        }
    }

    /// Run the integrity predicates without touching content at all.
    pub fn check_integrity(&self) -> IntegrityReport {
        let file_size = self.total_bytes();
        let mut details = Vec::new();

        let min_size = (FCR_PAGES + 1) * PAGE_SIZE;
        let valid_size = file_size >= min_size;
        if !valid_size {
            details.push(format!("File too small: {} < {}", file_size, min_size));
        }

        let has_fcr_pages = file_size >= FCR_PAGES * PAGE_SIZE;
        let data_pages = if has_fcr_pages {
            (file_size - FCR_PAGES * PAGE_SIZE) / (PAGE_SIZE - HEADER_SIZE)
        } else {
            0
        };

        let corruption_detected = !valid_size;

        IntegrityReport {
            file_exists: true,
            readable: true,
            valid_size,
            has_fcr_pages,
            data_pages,
            corruption_detected,
            corruption_details: details,
        }
    }

    /// Integrity report for a path that could not be opened at all
    /// (missing or unreadable). `check_integrity` above assumes the file
    /// already opened successfully; this variant is used by callers that
    /// want an `IntegrityReport` even when `FileHandle::open` failed.
    pub fn integrity_for_missing(path: &str) -> IntegrityReport {
        let exists = Path::new(path).exists();
        let detail = if exists {
            "Permission denied or unreadable".to_string()
        } else {
            "File does not exist".to_string()
        };
        IntegrityReport {
            file_exists: exists,
            readable: false,
            valid_size: false,
            has_fcr_pages: false,
            data_pages: 0,
            corruption_detected: true,
            corruption_details: vec![detail],
        }
    }
}

/// Independent integrity report: exists, readable, large enough, FCR
/// pages present, estimated data-page count, and the first failing
/// predicate (if any).
#[derive(Debug, Clone, Serialize)]
pub struct IntegrityReport {
    pub file_exists: bool,
    pub readable: bool,
    pub valid_size: bool,
    pub has_fcr_pages: bool,
    pub data_pages: u64,
    pub corruption_detected: bool,
    pub corruption_details: Vec<String>,
}
