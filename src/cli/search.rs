//! CLI implementation for the `btr search` subcommand.

use std::io::Write;

use regex::Regex;
use serde::Serialize;

use crate::btrieve::reader::FileHandle;
use crate::btrieve::record::{extract_records, Record};
use crate::cli::{resolve_record_size, wprintln};
use crate::error::BtrError;

/// Options for the `btr search` subcommand.
pub struct SearchOptions {
    pub file: String,
    pub pattern: String,
    pub record_size: Option<u32>,
    pub regex: bool,
    pub limit: Option<usize>,
    pub json: bool,
}

#[derive(Serialize)]
struct SearchHit {
    index: usize,
    decoded_text: String,
}

/// Search decoded records in `opts.file` for `opts.pattern`.
pub fn execute(opts: &SearchOptions, writer: &mut dyn Write) -> Result<(), BtrError> {
    let handle = FileHandle::open(&opts.file)?;
    let record_size = resolve_record_size(&handle, opts.record_size)?;
    let records = extract_records(&handle, record_size, None)?;

    let matches: Box<dyn Fn(&Record) -> bool> = if opts.regex {
        let re = Regex::new(&opts.pattern)
            .map_err(|e| BtrError::Argument(format!("Invalid regex '{}': {}", opts.pattern, e)))?;
        Box::new(move |r: &Record| re.is_match(&r.decoded_text))
    } else {
        let needle = opts.pattern.clone();
        Box::new(move |r: &Record| r.decoded_text.contains(&needle))
    };

    let mut hits: Vec<SearchHit> = records
        .iter()
        .filter(|r| matches(r))
        .map(|r| SearchHit {
            index: r.index,
            decoded_text: r.decoded_text.clone(),
        })
        .collect();

    if let Some(limit) = opts.limit {
        hits.truncate(limit);
    }

    if opts.json {
        let json = serde_json::to_string_pretty(&hits)
            .map_err(|e| BtrError::Data(format!("Failed to serialize hits: {}", e)))?;
        wprintln!(writer, "{}", json)?;
        return Ok(());
    }

    for hit in &hits {
        wprintln!(writer, "[{}] {}", hit.index, hit.decoded_text)?;
    }
    wprintln!(writer, "{} matches", hits.len())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    fn file_with(records: &[&str], size: usize) -> NamedTempFile {
        let mut bytes = vec![0u8; 8192];
        for text in records {
            let mut rec = text.as_bytes().to_vec();
            rec.resize(size, 0);
            bytes.extend_from_slice(&rec);
        }
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(&bytes).unwrap();
        f.flush().unwrap();
        f
    }

    #[test]
    fn substring_search_finds_matches() {
        let f = file_with(&["JOHN DOE", "JANE SMITH", "JOHN SMITH"], 32);
        let mut buf = Vec::new();
        let opts = SearchOptions {
            file: f.path().to_str().unwrap().to_string(),
            pattern: "JOHN".to_string(),
            record_size: Some(32),
            regex: false,
            limit: None,
            json: false,
        };
        execute(&opts, &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("2 matches"));
    }

    #[test]
    fn regex_search_finds_matches() {
        let f = file_with(&["ZIP 90210", "no zip here", "ZIP 10001"], 32);
        let mut buf = Vec::new();
        let opts = SearchOptions {
            file: f.path().to_str().unwrap().to_string(),
            pattern: r"\d{5}".to_string(),
            record_size: Some(32),
            regex: true,
            limit: None,
            json: false,
        };
        execute(&opts, &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("2 matches"));
    }

    #[test]
    fn invalid_regex_is_argument_error() {
        let f = file_with(&["x"], 32);
        let mut buf = Vec::new();
        let opts = SearchOptions {
            file: f.path().to_str().unwrap().to_string(),
            pattern: "(".to_string(),
            record_size: Some(32),
            regex: true,
            limit: None,
            json: false,
        };
        let err = execute(&opts, &mut buf).unwrap_err();
        assert!(matches!(err, BtrError::Argument(_)));
    }
}
