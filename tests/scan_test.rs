#![cfg(feature = "cli")]
//! Integration tests for `btr scan`.

use tempfile::TempDir;

use btrf::cli::scan::{execute, ScanOptions};

#[test]
fn scans_a_directory_of_mixed_candidates() {
    let dir = TempDir::new().unwrap();

    let mut bytes = vec![0u8; 8192];
    let mut rec = b"JOHN DOE 123 MAIN ST ANYTOWN CA 90210".to_vec();
    rec.resize(64, 0);
    for _ in 0..40 {
        bytes.extend_from_slice(&rec);
    }
    std::fs::write(dir.path().join("customers.btr"), &bytes).unwrap();
    std::fs::write(dir.path().join("readme.txt"), b"not a candidate").unwrap();

    let mut buf = Vec::new();
    let opts = ScanOptions {
        dir: dir.path().to_str().unwrap().to_string(),
        json: true,
    };
    execute(&opts, &mut buf).unwrap();
    let out = String::from_utf8(buf).unwrap();

    let entries: Vec<serde_json::Value> = serde_json::from_str(&out).unwrap();
    assert_eq!(entries.len(), 1);
    assert!(entries[0]["path"].as_str().unwrap().ends_with("customers.btr"));
}

#[test]
fn nonexistent_directory_is_a_file_error() {
    let mut buf = Vec::new();
    let opts = ScanOptions {
        dir: "/nonexistent/directory".to_string(),
        json: true,
    };
    let err = execute(&opts, &mut buf).unwrap_err();
    assert!(matches!(err, btrf::BtrError::File(_)));
}
