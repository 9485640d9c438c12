#![cfg(feature = "cli")]
//! Integration tests for `btr schema` field boundary detection.

use std::io::Write;
use tempfile::NamedTempFile;

use btrf::cli::schema::{execute, SchemaOptions};

fn sample_file() -> NamedTempFile {
    let mut bytes = vec![0u8; 8192];
    let text = "JOHN DOE    PO Box 123, CA 90210      8005550123       ";
    let mut rec = text.as_bytes().to_vec();
    rec.resize(64, 0);
    for _ in 0..200 {
        bytes.extend_from_slice(&rec);
    }
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(&bytes).unwrap();
    f.flush().unwrap();
    f
}

#[test]
fn detects_state_zip_and_phone_fields() {
    let f = sample_file();

    let mut buf = Vec::new();
    let opts = SchemaOptions {
        file: f.path().to_str().unwrap().to_string(),
        record_size: Some(64),
        sample: 200,
        json: false,
    };
    execute(&opts, &mut buf).unwrap();
    let out = String::from_utf8(buf).unwrap();
    assert!(out.contains("state_code"));
    assert!(out.contains("zip_code"));
    assert!(out.contains("phone_number"));
}

#[test]
fn fields_are_disjoint_and_in_range_json() {
    let f = sample_file();

    let mut buf = Vec::new();
    let opts = SchemaOptions {
        file: f.path().to_str().unwrap().to_string(),
        record_size: Some(64),
        sample: 200,
        json: true,
    };
    execute(&opts, &mut buf).unwrap();
    let out = String::from_utf8(buf).unwrap();
    let fields: Vec<serde_json::Value> = serde_json::from_str(&out).unwrap();

    assert!(!fields.is_empty());
    for field in &fields {
        let position = field["position"].as_u64().unwrap();
        let length = field["length"].as_u64().unwrap();
        assert!(position + length <= 64);
    }
    for pair in fields.windows(2) {
        let end0 = pair[0]["position"].as_u64().unwrap() + pair[0]["length"].as_u64().unwrap();
        let start1 = pair[1]["position"].as_u64().unwrap();
        assert!(end0 <= start1);
    }

    let zip = fields.iter().find(|f| f["name"] == "zip_code").unwrap();
    assert_eq!(zip["type_tag"], "ZIP_CODE");
    assert_eq!(zip["length"], 5);

    let phone = fields.iter().find(|f| f["name"] == "phone_number").unwrap();
    assert_eq!(phone["type_tag"], "PHONE");
    assert!(phone["length"].as_u64().unwrap() >= 10);
}
