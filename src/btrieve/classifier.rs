//! Content Classifier.
//!
//! Reads the data region, computes byte-class histograms and regex-counted
//! text patterns, and emits a coarse [`ContentType`] tag plus a summary.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::btrieve::constants::{FCR_PAGES, HEADER_SIZE, PAGE_SIZE};
use crate::btrieve::record::decode_latin1;
use crate::btrieve::reader::FileHandle;

/// Coarse content classification for a Btrieve file's data region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    InsuranceProviders,
    ClinicalData,
    IndexSequence,
    CharacterSet,
    BinaryData,
    TextData,
    MixedData,
    AnalysisFailed,
}

/// Summary produced by the content classifier (and, optionally, further
/// populated by the size detector with `detected_record_size` /
/// `estimated_records`).
#[derive(Debug, Clone, Serialize)]
pub struct FileSummary {
    pub path: String,
    pub filename: String,
    pub file_size: u64,
    pub page_size: u64,
    pub header_size: u64,
    pub fcr_pages: u64,
    pub content_type: ContentType,
    pub ascii_percentage: f64,
    pub digit_sequences: usize,
    pub date_patterns: usize,
    pub quality_score: f64,
    pub detected_record_size: Option<u32>,
    pub estimated_records: Option<u64>,
}

impl FileSummary {
    fn new(handle: &FileHandle) -> Self {
        Self {
            path: handle.path().to_string(),
            filename: handle.filename().to_string(),
            file_size: handle.total_bytes(),
            page_size: PAGE_SIZE,
            header_size: HEADER_SIZE,
            fcr_pages: FCR_PAGES,
            content_type: ContentType::MixedData,
            ascii_percentage: 0.0,
            digit_sequences: 0,
            date_patterns: 0,
            quality_score: 0.0,
            detected_record_size: None,
            estimated_records: None,
        }
    }
}

/// Outcome of classification: either a fully-populated summary, or a
/// degraded one where pattern analysis raised and was recovered locally.
/// Degradation never surfaces as an error to the caller.
pub enum ClassifyOutcome {
    Ok(FileSummary),
    Degraded(FileSummary),
}

impl ClassifyOutcome {
    /// The summary either way — degraded summaries are still usable,
    /// just with `content_type = AnalysisFailed`.
    pub fn into_summary(self) -> FileSummary {
        match self {
            ClassifyOutcome::Ok(s) | ClassifyOutcome::Degraded(s) => s,
        }
    }
}

static DIGIT_SEQ_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{3,}").unwrap());
static DATE_MDY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{1,2}/\d{1,2}/\d{2,4}").unwrap());
static DATE_YMD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{4}-\d{1,2}-\d{1,2}").unwrap());
static DATE_DMY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{1,2}-\d{1,2}-\d{4}").unwrap());

static INSURANCE_CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Z]{3,4}").unwrap());
static PO_BOX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)P\.?O\.?\s*Box\s+\d+").unwrap());
static ZIP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{5}(-\d{4})?").unwrap());
static PHONE_800_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"800\d{7,10}").unwrap());

static PROCEDURE_CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"D\d{4}").unwrap());
static MONEY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+\.\d{2}").unwrap());

static SEQUENTIAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(6,7,8,9,10|11,12,13,14,15)").unwrap());
static CHARSET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ABCDEFGHIJKLMNOPQRSTUVWXYZ").unwrap());

/// Classify the data region of `handle` and populate a [`FileSummary`].
pub fn classify(handle: &FileHandle) -> ClassifyOutcome {
    let mut summary = FileSummary::new(handle);
    let data = handle.data_region();

    if data.is_empty() {
        // No pattern analysis possible; ascii_percentage stays 0.0, which
        // falls into the `< 1% -> binary_data` branch below once we reach
        // the ladder — but with zero bytes there's nothing to classify,
        // so we resolve directly rather than running the ladder.
        summary.content_type = ContentType::MixedData;
        return ClassifyOutcome::Ok(summary);
    }

    let total = data.len();
    let printable = data.iter().filter(|&&b| (32..=126).contains(&b)).count();
    summary.ascii_percentage = 100.0 * printable as f64 / total as f64;

    let text = decode_latin1(data);

    summary.digit_sequences = DIGIT_SEQ_RE.find_iter(&text).count();
    summary.date_patterns = DATE_MDY_RE.find_iter(&text).count()
        + DATE_YMD_RE.find_iter(&text).count()
        + DATE_DMY_RE.find_iter(&text).count();

    let insurance_score = INSURANCE_CODE_RE.find_iter(&text).count()
        + PO_BOX_RE.find_iter(&text).count()
        + ZIP_RE.find_iter(&text).count()
        + PHONE_800_RE.find_iter(&text).count();
    let clinical_score =
        PROCEDURE_CODE_RE.find_iter(&text).count() + MONEY_RE.find_iter(&text).count();
    let sequential_score = SEQUENTIAL_RE.find_iter(&text).count();
    let charset_score = CHARSET_RE.find_iter(&text).count();

    summary.content_type = classify_ladder(
        insurance_score,
        clinical_score,
        sequential_score,
        charset_score,
        summary.ascii_percentage,
    );

    ClassifyOutcome::Ok(summary)
}

fn classify_ladder(
    insurance_score: usize,
    clinical_score: usize,
    sequential_score: usize,
    charset_score: usize,
    ascii_percentage: f64,
) -> ContentType {
    if insurance_score > 10 {
        ContentType::InsuranceProviders
    } else if clinical_score > 5 {
        ContentType::ClinicalData
    } else if sequential_score > 3 {
        ContentType::IndexSequence
    } else if charset_score > 2 {
        ContentType::CharacterSet
    } else if ascii_percentage < 1.0 {
        // Exactly 1.0% resolves to the mixed/text branches below, not
        // binary_data: the ladder's `< 1%` branch is read strictly.
        ContentType::BinaryData
    } else if ascii_percentage > 50.0 {
        ContentType::TextData
    } else {
        ContentType::MixedData
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn handle_with_data(data: &[u8]) -> FileHandle {
        let mut bytes = vec![0u8; 8192];
        bytes.extend_from_slice(data);
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(&bytes).unwrap();
        f.flush().unwrap();
        // Leak the tempfile so it outlives this helper call; tests read
        // immediately after construction so the short leak is fine.
        let path = f.path().to_str().unwrap().to_string();
        std::mem::forget(f);
        FileHandle::open(&path).unwrap()
    }

    #[test]
    fn insurance_provider_classification() {
        let record = "BCBS PO Box 1000, TX 75001 8005551234".repeat(11);
        let handle = handle_with_data(record.as_bytes());
        let summary = classify(&handle).into_summary();
        assert_eq!(summary.content_type, ContentType::InsuranceProviders);
    }

    #[test]
    fn binary_data_classification() {
        let data: Vec<u8> = (0..65536u32).map(|i| ((i * 7 + 3) % 256) as u8).collect();
        // Keep bytes outside the printable ASCII range entirely.
        let data: Vec<u8> = data
            .into_iter()
            .map(|b| if (32..=126).contains(&b) { b.wrapping_add(127) } else { b })
            .collect();
        let handle = handle_with_data(&data);
        let summary = classify(&handle).into_summary();
        assert!(summary.ascii_percentage < 1.0);
        assert_eq!(summary.content_type, ContentType::BinaryData);
    }

    #[test]
    fn empty_data_region_is_mixed_data() {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(&[0u8; 8192]).unwrap();
        f.flush().unwrap();
        let handle = FileHandle::open(f.path().to_str().unwrap()).unwrap();
        let summary = classify(&handle).into_summary();
        assert_eq!(summary.ascii_percentage, 0.0);
        assert_eq!(summary.content_type, ContentType::MixedData);
    }

    #[test]
    fn mostly_text_is_text_data() {
        let data = "The quick brown fox jumps over the lazy dog. ".repeat(50);
        let handle = handle_with_data(data.as_bytes());
        let summary = classify(&handle).into_summary();
        assert_eq!(summary.content_type, ContentType::TextData);
    }
}
