#![cfg(feature = "cli")]
//! Integration tests for `btr check`.

use std::io::Write;
use tempfile::NamedTempFile;

use btrf::cli::check::{execute, CheckOptions};

#[test]
fn missing_file_reports_corruption_without_erroring() {
    let mut buf = Vec::new();
    let opts = CheckOptions {
        file: "/nonexistent/data/customers.btr".to_string(),
        json: true,
    };
    execute(&opts, &mut buf).unwrap();
    let out = String::from_utf8(buf).unwrap();
    assert!(out.contains("\"file_exists\": false"));
    assert!(out.contains("\"corruption_detected\": true"));
}

#[test]
fn file_smaller_than_three_pages_fails_valid_size() {
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(&[0u8; 4096]).unwrap();
    f.flush().unwrap();

    let mut buf = Vec::new();
    let opts = CheckOptions {
        file: f.path().to_str().unwrap().to_string(),
        json: true,
    };
    execute(&opts, &mut buf).unwrap();
    let out = String::from_utf8(buf).unwrap();
    assert!(out.contains("\"valid_size\": false"));
    assert!(out.contains("File too small: 4096 < 12288"));
}

#[test]
fn well_formed_file_reports_clean() {
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(&[0u8; 4 * 4096]).unwrap();
    f.flush().unwrap();

    let mut buf = Vec::new();
    let opts = CheckOptions {
        file: f.path().to_str().unwrap().to_string(),
        json: true,
    };
    execute(&opts, &mut buf).unwrap();
    let out = String::from_utf8(buf).unwrap();
    assert!(out.contains("\"corruption_detected\": false"));
}
