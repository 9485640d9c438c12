//! Btrieve v5 file structure constants.
//!
//! These values describe the fixed layout assumed by the forensic reader:
//! two 4 KiB File Control Record (FCR) pages followed by fixed-length
//! records. No B-tree index is parsed; the constants here exist only to
//! locate the data region and walk it in fixed-size slices.

/// Size of one page in a Btrieve v5 file, in bytes.
pub const PAGE_SIZE: u64 = 4096;

/// Per-page header size subtracted when estimating data-page capacity.
pub const HEADER_SIZE: u64 = 16;

/// Number of File Control Record pages at the start of every file.
pub const FCR_PAGES: u64 = 2;

/// Byte offset where the data region begins (`FCR_PAGES * PAGE_SIZE`).
pub const DATA_REGION_OFFSET: u64 = FCR_PAGES * PAGE_SIZE;

/// Minimum file size accepted for analysis by the scanning collaborator.
pub const MIN_ANALYZABLE_SIZE: u64 = 8192;

/// Candidate record sizes tried by the size detector, in the fixed order
/// that is part of the detector's tie-break contract.
pub const CANDIDATE_RECORD_SIZES: [u32; 6] = [32, 64, 128, 256, 512, 1024];

/// Default cap on the number of records read while scoring a candidate
/// record size.
pub const DEFAULT_MAX_RECORDS: usize = 100;
