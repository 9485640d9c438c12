//! Record Extractor.
//!
//! Slices the data region into fixed-size records and annotates each with
//! decoded text and trivial character-class flags.

use serde::Serialize;

use crate::btrieve::constants::DATA_REGION_OFFSET;
use crate::btrieve::fields::ExtractedFields;
use crate::btrieve::reader::FileHandle;
use crate::error::BtrError;

/// Decode a byte slice with a lossless 8-bit codec: one codepoint per
/// byte. `u8 as char` is exactly the Latin-1 (ISO-8859-1) mapping, so this
/// never fails and never loses information, satisfying the
/// byte-preserving decode requirement without pulling in an encoding
/// crate that would remap any byte value.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// A single fixed-length record sliced out of the data region.
#[derive(Debug, Clone, Serialize)]
pub struct Record {
    pub index: usize,
    pub length: usize,
    #[serde(skip_serializing)]
    pub raw: Vec<u8>,
    pub decoded_text: String,
    pub printable_chars: usize,
    pub has_digits: bool,
    pub has_alpha: bool,
    pub extracted_fields: ExtractedFields,
}

impl Record {
    /// Lowercase hex encoding of `raw`, used by the JSONL exporter.
    pub fn raw_hex(&self) -> String {
        self.raw.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

/// Extract up to `cap` fixed-size records from the data region of
/// `handle`, starting at the FCR boundary. `record_size` must be
/// positive. A data region smaller than `record_size` yields zero
/// records; the final partial slice (if any) is silently dropped.
pub fn extract_records(
    handle: &FileHandle,
    record_size: u32,
    cap: Option<usize>,
) -> Result<Vec<Record>, BtrError> {
    if record_size == 0 {
        return Err(BtrError::Validation(format!(
            "Invalid record size: {}",
            record_size
        )));
    }

    let data = handle.data_region();
    let record_size = record_size as usize;
    let max_possible = data.len() / record_size;
    let n = cap.map(|c| c.min(max_possible)).unwrap_or(max_possible);

    let mut records = Vec::with_capacity(n);
    for i in 0..n {
        let start = i * record_size;
        let raw = data[start..start + record_size].to_vec();
        records.push(build_record(i + 1, raw));
    }

    Ok(records)
}

fn build_record(index: usize, raw: Vec<u8>) -> Record {
    let length = raw.len();
    let decoded_text = decode_latin1(&raw).trim_end_matches('\0').to_string();

    let printable_chars = decoded_text.chars().filter(|c| is_printable(*c)).count();
    let has_digits = decoded_text.chars().any(|c| c.is_ascii_digit());
    let has_alpha = decoded_text.chars().any(|c| c.is_alphabetic());
    let extracted_fields = ExtractedFields::extract(&decoded_text);

    Record {
        index,
        length,
        raw,
        decoded_text,
        printable_chars,
        has_digits,
        has_alpha,
        extracted_fields,
    }
}

/// A character counts as printable if it is not a control character. This
/// matches Python's `str.isprintable()` closely enough for the Latin-1
/// byte range this reader operates on.
pub(crate) fn is_printable(c: char) -> bool {
    !c.is_control()
}

/// Number of full records that fit in a data region of `data_len` bytes
/// starting at `DATA_REGION_OFFSET`. Exposed for callers that need the
/// `estimated_records` invariant without materializing records.
pub fn estimated_records(file_size: u64, record_size: u32) -> u64 {
    if record_size == 0 || file_size <= DATA_REGION_OFFSET {
        return 0;
    }
    (file_size - DATA_REGION_OFFSET) / record_size as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn file_with_records(record: &[u8], count: usize) -> NamedTempFile {
        let mut bytes = vec![0u8; 8192];
        for _ in 0..count {
            bytes.extend_from_slice(record);
        }
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(&bytes).unwrap();
        f.flush().unwrap();
        f
    }

    fn sample_record(size: usize) -> Vec<u8> {
        let text = b"JOHN DOE    PO Box 123, CA 90210      800555012345       ";
        let mut record = vec![0u8; size];
        let n = text.len().min(size);
        record[..n].copy_from_slice(&text[..n]);
        record
    }

    #[test]
    fn extracts_uniform_records_in_file_order() {
        let record = sample_record(64);
        let f = file_with_records(&record, 1024);
        let handle = FileHandle::open(f.path().to_str().unwrap()).unwrap();

        let records = extract_records(&handle, 64, None).unwrap();
        assert_eq!(records.len(), 1024);
        assert_eq!(records[0].index, 1);
        assert_eq!(records[1].index, 2);
        assert_eq!(records[0].length, 64);
        assert_eq!(
            records[0].extracted_fields.state.as_deref(),
            Some("CA")
        );
        assert_eq!(records[0].extracted_fields.zip_code.as_deref(), Some("90210"));
    }

    #[test]
    fn cap_limits_record_count() {
        let record = sample_record(64);
        let f = file_with_records(&record, 1024);
        let handle = FileHandle::open(f.path().to_str().unwrap()).unwrap();

        let records = extract_records(&handle, 64, Some(10)).unwrap();
        assert_eq!(records.len(), 10);
    }

    #[test]
    fn zero_record_size_is_validation_error() {
        let f = file_with_records(&sample_record(64), 1);
        let handle = FileHandle::open(f.path().to_str().unwrap()).unwrap();
        let err = extract_records(&handle, 0, None).unwrap_err();
        assert!(matches!(err, BtrError::Validation(_)));
    }

    #[test]
    fn data_region_smaller_than_record_size_yields_zero_records() {
        let mut bytes = vec![0u8; 8192 + 10];
        bytes.truncate(8192 + 10);
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(&bytes).unwrap();
        f.flush().unwrap();
        let handle = FileHandle::open(f.path().to_str().unwrap()).unwrap();

        let records = extract_records(&handle, 64, None).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn trailing_partial_record_is_dropped() {
        let mut bytes = vec![0u8; 8192];
        bytes.extend_from_slice(&sample_record(64));
        bytes.extend_from_slice(&[1u8; 30]); // partial trailing slice
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(&bytes).unwrap();
        f.flush().unwrap();
        let handle = FileHandle::open(f.path().to_str().unwrap()).unwrap();

        let records = extract_records(&handle, 64, None).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn nuls_trimmed_from_decoded_text() {
        let mut record = b"HELLO".to_vec();
        record.resize(64, 0);
        let f = file_with_records(&record, 1);
        let handle = FileHandle::open(f.path().to_str().unwrap()).unwrap();
        let records = extract_records(&handle, 64, None).unwrap();
        assert_eq!(records[0].decoded_text, "HELLO");
    }

    #[test]
    fn raw_hex_round_trips() {
        let record = sample_record(64);
        let f = file_with_records(&record, 1);
        let handle = FileHandle::open(f.path().to_str().unwrap()).unwrap();
        let records = extract_records(&handle, 64, None).unwrap();
        let hex = records[0].raw_hex();
        let decoded: Vec<u8> = (0..hex.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).unwrap())
            .collect();
        assert_eq!(decoded, records[0].raw);
    }
}
