//! CLI implementation for the `btr extract` subcommand.

use std::io::Write;

use crate::btrieve::reader::FileHandle;
use crate::btrieve::record::extract_records;
use crate::cli::{resolve_record_size, wprintln};
use crate::error::BtrError;
use crate::util::hex::hex_dump;

/// Options for the `btr extract` subcommand.
pub struct ExtractOptions {
    pub file: String,
    pub record_size: Option<u32>,
    pub limit: Option<usize>,
    pub hex: bool,
    pub json: bool,
}

/// Dump decoded records from `opts.file`.
pub fn execute(opts: &ExtractOptions, writer: &mut dyn Write) -> Result<(), BtrError> {
    let handle = FileHandle::open(&opts.file)?;
    let record_size = resolve_record_size(&handle, opts.record_size)?;
    let records = extract_records(&handle, record_size, opts.limit)?;

    if opts.json {
        let json = serde_json::to_string_pretty(&records)
            .map_err(|e| BtrError::Data(format!("Failed to serialize records: {}", e)))?;
        wprintln!(writer, "{}", json)?;
        return Ok(());
    }

    for record in &records {
        wprintln!(writer, "[{}] {}", record.index, record.decoded_text)?;
        if opts.hex {
            let offset = (record.index.saturating_sub(1)) as u64 * record.length as u64;
            wprintln!(writer, "{}", hex_dump(&record.raw, offset))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    #[test]
    fn extracts_and_prints_records() {
        let mut bytes = vec![0u8; 8192];
        let mut rec = b"HELLO".to_vec();
        rec.resize(32, 0);
        for _ in 0..5 {
            bytes.extend_from_slice(&rec);
        }
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(&bytes).unwrap();
        f.flush().unwrap();

        let mut buf = Vec::new();
        let opts = ExtractOptions {
            file: f.path().to_str().unwrap().to_string(),
            record_size: Some(32),
            limit: Some(3),
            hex: false,
            json: false,
        };
        execute(&opts, &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert_eq!(out.lines().count(), 3);
        assert!(out.contains("[1] HELLO"));
    }
}
