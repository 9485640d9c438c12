//! Quality Scorer.
//!
//! Scores a batch of decoded records on a 0-100 scale, rewarding text and
//! alphanumeric density over raw binary noise. Used by the size detector
//! to pick a winning candidate record size, and reported standalone as
//! `quality_score` in analysis output.

use crate::btrieve::record::{is_printable, Record};

const TEXT_WEIGHT: f64 = 30.0;
const DIGIT_WEIGHT: f64 = 20.0;
const ALPHA_WEIGHT: f64 = 20.0;
const PRINTABLE_WEIGHT: f64 = 30.0;
const PRINTABLE_NORMALIZER: f64 = 50.0;

/// Score `records` on a 0-100 scale. An empty slice scores 0.
pub fn score_records(records: &[Record]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }

    let n = records.len() as f64;
    let text_frac = records.iter().filter(|r| r.has_alpha || r.has_digits).count() as f64 / n;
    let digit_frac = records.iter().filter(|r| r.has_digits).count() as f64 / n;
    let alpha_frac = records.iter().filter(|r| r.has_alpha).count() as f64 / n;

    let avg_printable = records
        .iter()
        .map(|r| r.decoded_text.chars().filter(|&c| is_printable(c)).count() as f64)
        .sum::<f64>()
        / n;

    TEXT_WEIGHT * text_frac
        + DIGIT_WEIGHT * digit_frac
        + ALPHA_WEIGHT * alpha_frac
        + PRINTABLE_WEIGHT * (avg_printable / PRINTABLE_NORMALIZER).min(1.0)
}
