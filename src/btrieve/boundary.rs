//! Field Boundary Detector.
//!
//! Infers a record's internal field layout purely from byte statistics
//! gathered across a sample of records: for each offset within the
//! record, classify what kind of character tends to live there, then
//! collapse consecutive offsets of the same kind into named, typed field
//! runs. Null-padding offsets are gaps, not fields: a run never starts or
//! extends across them.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::btrieve::record::{is_printable, Record};

/// Bucket a single decoded character falls into, in priority order. A
/// character can only belong to one bucket, and the buckets are checked
/// in this order so that, e.g., a digit is never also counted as
/// printable-but-unclassified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharBucket {
    Null,
    Digit,
    Alpha,
    Space,
    Printable,
    Other,
}

fn bucket_of(c: char) -> CharBucket {
    if c == '\0' {
        CharBucket::Null
    } else if c.is_ascii_digit() {
        CharBucket::Digit
    } else if c.is_alphabetic() {
        CharBucket::Alpha
    } else if c.is_whitespace() {
        CharBucket::Space
    } else if is_printable(c) {
        CharBucket::Printable
    } else {
        CharBucket::Other
    }
}

/// Per-offset byte-class tally across the sampled records. `total_records`
/// is fixed at construction and identical at every offset, since every
/// record contributes exactly one character to every offset (the decoded,
/// NUL-trimmed text is right-padded with spaces to the record size before
/// sampling).
#[derive(Debug, Clone)]
pub struct PositionStats {
    pub offset: usize,
    pub total_records: usize,
    pub null_count: usize,
    pub digit_count: usize,
    pub alpha_count: usize,
    pub space_count: usize,
    pub ascii_count: usize,
    pub printable_count: usize,
    pub unique_chars: BTreeSet<char>,
}

impl PositionStats {
    fn new(offset: usize, total_records: usize) -> Self {
        Self {
            offset,
            total_records,
            null_count: 0,
            digit_count: 0,
            alpha_count: 0,
            space_count: 0,
            ascii_count: 0,
            printable_count: 0,
            unique_chars: BTreeSet::new(),
        }
    }

    fn observe(&mut self, c: char) {
        self.unique_chars.insert(c);
        match bucket_of(c) {
            CharBucket::Null => self.null_count += 1,
            CharBucket::Digit => self.digit_count += 1,
            CharBucket::Alpha => self.alpha_count += 1,
            CharBucket::Space => self.space_count += 1,
            // The source tallies the non-alphanumeric-printable bucket into
            // both an "ascii" and a "printable" counter; kept distinct here
            // because the position-typing ladder reads `ascii_percent`.
            CharBucket::Printable => {
                self.ascii_count += 1;
                self.printable_count += 1;
            }
            CharBucket::Other => {}
        }
    }

    fn percent(&self, count: usize) -> f64 {
        if self.total_records == 0 {
            0.0
        } else {
            count as f64 / self.total_records as f64 * 100.0
        }
    }

    /// Position type per the class-specific dominance thresholds:
    /// `null_percent > 80`, else `digit_percent > 70`, else
    /// `alpha_percent > 50`, else `ascii_percent > 50` (the `text`
    /// bucket), else `mixed`.
    fn pos_type(&self) -> PosType {
        if self.percent(self.null_count) > 80.0 {
            PosType::NullPadding
        } else if self.percent(self.digit_count) > 70.0 {
            PosType::Digits
        } else if self.percent(self.alpha_count) > 50.0 {
            PosType::Alpha
        } else if self.percent(self.ascii_count) > 50.0 {
            PosType::Text
        } else {
            PosType::Mixed
        }
    }
}

/// Dominant character-class classification for one record offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PosType {
    NullPadding,
    Digits,
    Alpha,
    Text,
    Mixed,
}

/// Deterministic type tag assigned to a field by the naming/typing table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldTypeTag {
    ZipCode,
    Phone,
    ProcedureCode,
    Digits,
    #[serde(rename = "STATE")]
    StateCode,
    ProviderCode,
    Alpha,
    Text,
    Address,
    Mixed,
}

impl FieldTypeTag {
    fn as_str(&self) -> &'static str {
        match self {
            FieldTypeTag::ZipCode => "ZIP_CODE",
            FieldTypeTag::Phone => "PHONE",
            FieldTypeTag::ProcedureCode => "PROCEDURE_CODE",
            FieldTypeTag::Digits => "DIGITS",
            FieldTypeTag::StateCode => "STATE",
            FieldTypeTag::ProviderCode => "PROVIDER_CODE",
            FieldTypeTag::Alpha => "ALPHA",
            FieldTypeTag::Text => "TEXT",
            FieldTypeTag::Address => "ADDRESS",
            FieldTypeTag::Mixed => "MIXED",
        }
    }
}

impl fmt::Display for FieldTypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A contiguous run of offsets sharing a [`PosType`], presented as an
/// inferred field.
#[derive(Debug, Clone, Serialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub type_tag: FieldTypeTag,
    pub position: usize,
    pub length: usize,
    pub ascii_percent: f64,
    pub digit_percent: f64,
    pub alpha_percent: f64,
}

/// Gather per-offset statistics over `records`, assumed all of
/// `record_size` bytes. Each record's NUL-trimmed decoded text is
/// right-padded with spaces to `record_size` codepoints before sampling,
/// so trailing NUL-padding bytes are observed as spaces, not as nulls.
pub fn collect_position_stats(records: &[Record], record_size: usize) -> Vec<PositionStats> {
    let total_records = records.len();
    let mut stats: Vec<PositionStats> = (0..record_size)
        .map(|offset| PositionStats::new(offset, total_records))
        .collect();

    for record in records {
        let mut chars: Vec<char> = record.decoded_text.chars().collect();
        chars.resize(record_size, ' ');
        for (slot, &c) in stats.iter_mut().zip(chars.iter()) {
            slot.observe(c);
        }
    }

    stats
}

/// Walk the per-offset stats and collapse consecutive non-padding offsets
/// sharing a [`PosType`] into named, typed fields. `null_padding` offsets
/// are gaps: they never start or extend a run and never appear in the
/// output.
pub fn detect_fields(stats: &[PositionStats]) -> Vec<FieldDescriptor> {
    let mut fields = Vec::new();
    let mut run: Option<(usize, PosType)> = None;

    for (pos, slot) in stats.iter().enumerate() {
        let pos_type = slot.pos_type();
        match run {
            None => {
                if pos_type != PosType::NullPadding {
                    run = Some((pos, pos_type));
                }
            }
            Some((start, current_type)) => {
                if pos_type == PosType::NullPadding || pos_type != current_type {
                    if let Some(field) = make_field(start, pos, current_type, stats) {
                        fields.push(field);
                    }
                    run = if pos_type != PosType::NullPadding {
                        Some((pos, pos_type))
                    } else {
                        None
                    };
                }
            }
        }
    }

    if let Some((start, current_type)) = run {
        if let Some(field) = make_field(start, stats.len(), current_type, stats) {
            fields.push(field);
        }
    }

    fields
}

/// Re-sum stats across `[start, end)` and invoke the naming/typing table.
/// Returns `None` if the span is empty or has no observed records, per the
/// source's own guard.
fn make_field(
    start: usize,
    end: usize,
    field_type: PosType,
    stats: &[PositionStats],
) -> Option<FieldDescriptor> {
    let length = end.saturating_sub(start);
    if length < 1 {
        return None;
    }
    let span = &stats[start..end];

    let total_records = span.first().map(|s| s.total_records).unwrap_or(0);
    if total_records == 0 {
        return None;
    }

    let total_ascii: usize = span.iter().map(|s| s.ascii_count).sum();
    let total_digits: usize = span.iter().map(|s| s.digit_count).sum();
    let total_alpha: usize = span.iter().map(|s| s.alpha_count).sum();
    let mut unique_chars = BTreeSet::new();
    for s in span {
        unique_chars.extend(s.unique_chars.iter().copied());
    }

    let avg_digits = total_digits as f64 / total_records as f64;
    let (name, type_tag) = name_and_type(field_type, length, &unique_chars, avg_digits);

    let denom = (total_records * length) as f64;
    let ascii_percent = total_ascii as f64 / denom * 100.0;
    let digit_percent = total_digits as f64 / denom * 100.0;
    let alpha_percent = total_alpha as f64 / denom * 100.0;

    Some(FieldDescriptor {
        name,
        type_tag,
        position: start,
        length,
        ascii_percent,
        digit_percent,
        alpha_percent,
    })
}

/// `(field_type, length, unique_chars, avg_digit_fraction) -> (name,
/// type_tag)`, per the deterministic naming/typing table.
fn name_and_type(
    field_type: PosType,
    length: usize,
    unique_chars: &BTreeSet<char>,
    avg_digits: f64,
) -> (String, FieldTypeTag) {
    match field_type {
        PosType::Digits => {
            if length == 5 && avg_digits > 0.8 {
                ("zip_code".to_string(), FieldTypeTag::ZipCode)
            } else if length >= 10 && avg_digits > 0.9 {
                ("phone_number".to_string(), FieldTypeTag::Phone)
            } else if length == 4 && unique_chars.iter().all(|&c| c.is_ascii_digit() || c == 'D') {
                ("procedure_code".to_string(), FieldTypeTag::ProcedureCode)
            } else {
                (format!("digit_field_{}", length), FieldTypeTag::Digits)
            }
        }
        PosType::Alpha => {
            if length == 2 && unique_chars.iter().all(|&c| c.is_alphabetic()) {
                ("state_code".to_string(), FieldTypeTag::StateCode)
            } else if length <= 4 && unique_chars.iter().all(|&c| c.is_uppercase()) {
                ("provider_code".to_string(), FieldTypeTag::ProviderCode)
            } else {
                (format!("alpha_field_{}", length), FieldTypeTag::Alpha)
            }
        }
        PosType::Text => {
            if length > 50 {
                ("description".to_string(), FieldTypeTag::Text)
            } else if length > 20 {
                ("address".to_string(), FieldTypeTag::Address)
            } else {
                (format!("text_field_{}", length), FieldTypeTag::Text)
            }
        }
        // `Mixed` runs, and the unreachable `NullPadding` case (the
        // segmentation walk never starts or extends a run on a
        // null-padding offset), share the fallback tag.
        PosType::Mixed | PosType::NullPadding => (format!("field_{}", length), FieldTypeTag::Mixed),
    }
}
