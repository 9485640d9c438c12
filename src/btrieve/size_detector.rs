//! Record Size Detector.
//!
//! Tries each candidate record size in a fixed order, scores a sample of
//! records extracted at that size, and picks the first candidate that
//! strictly improves on the best score seen so far. Ties resolve to the
//! earliest (smallest) candidate, matching the fixed iteration order.

use serde::Serialize;

use crate::btrieve::constants::{CANDIDATE_RECORD_SIZES, DEFAULT_MAX_RECORDS};
use crate::btrieve::quality::score_records;
use crate::btrieve::reader::FileHandle;
use crate::btrieve::record::extract_records;
use crate::error::BtrError;

/// One candidate's score, kept around for diagnostics even though only
/// the winner is used downstream.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateScore {
    pub record_size: u32,
    pub score: f64,
}

/// Result of running the detector: the winning size plus every
/// candidate's score, in trial order.
#[derive(Debug, Clone, Serialize)]
pub struct DetectionResult {
    pub record_size: u32,
    pub candidates: Vec<CandidateScore>,
}

/// Detect the most likely fixed record size for `handle`'s data region.
/// Fails with [`BtrError::Data`] if every candidate scores 0 (no
/// candidate size produced any recognizable structure).
pub fn detect_record_size(handle: &FileHandle) -> Result<DetectionResult, BtrError> {
    let mut best_size = 0u32;
    let mut best_score = -1.0f64;
    let mut candidates = Vec::with_capacity(CANDIDATE_RECORD_SIZES.len());

    for &size in CANDIDATE_RECORD_SIZES.iter() {
        let records = extract_records(handle, size, Some(DEFAULT_MAX_RECORDS))?;
        let score = score_records(&records);
        candidates.push(CandidateScore {
            record_size: size,
            score,
        });

        if score > best_score {
            best_score = score;
            best_size = size;
        }
    }

    if best_score <= 0.0 {
        return Err(BtrError::Data(
            "Could not determine record size: all candidates scored 0".to_string(),
        ));
    }

    Ok(DetectionResult {
        record_size: best_size,
        candidates,
    })
}
