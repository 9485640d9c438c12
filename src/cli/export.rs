//! CLI implementation for the `btr export` subcommand.
//!
//! Exports decoded records and their extracted fields to csv, jsonl,
//! sqlite, xml, or xlsx. All formats emit the same logical row: record
//! index, length, decoded text, and the seven-column extracted-field
//! vocabulary, in that fixed order.

use std::fs::File;
use std::io::{BufWriter, Write};

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer as XmlWriter;

use crate::btrieve::fields::BtrieveFieldName;
use crate::btrieve::reader::FileHandle;
use crate::btrieve::record::{extract_records, Record};
use crate::cli::{resolve_record_size, wprintln};
use crate::error::BtrError;

/// Options for the `btr export` subcommand.
pub struct ExportOptions {
    pub file: String,
    pub record_size: Option<u32>,
    pub format: String,
    pub out: String,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExportFormat {
    Csv,
    Jsonl,
    Sqlite,
    Xml,
    Xlsx,
}

impl ExportFormat {
    fn from_str(s: &str) -> Result<Self, BtrError> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "jsonl" => Ok(ExportFormat::Jsonl),
            "sqlite" => Ok(ExportFormat::Sqlite),
            "xml" => Ok(ExportFormat::Xml),
            "xlsx" => Ok(ExportFormat::Xlsx),
            _ => Err(BtrError::Argument(format!(
                "Unknown format '{}'. Use csv, jsonl, sqlite, xml, or xlsx.",
                s
            ))),
        }
    }
}

/// Export records from `opts.file` to `opts.out` in `opts.format`.
pub fn execute(opts: &ExportOptions, writer: &mut dyn Write) -> Result<(), BtrError> {
    let format = ExportFormat::from_str(&opts.format)?;

    let handle = FileHandle::open(&opts.file)?;
    let record_size = resolve_record_size(&handle, opts.record_size)?;
    let records = extract_records(&handle, record_size, opts.limit)?;

    match format {
        ExportFormat::Csv => write_csv(&records, &opts.out)?,
        ExportFormat::Jsonl => write_jsonl(&records, &opts.out)?,
        ExportFormat::Sqlite => write_sqlite(&records, &opts.out)?,
        ExportFormat::Xml => write_xml(&records, &opts.out)?,
        ExportFormat::Xlsx => write_xlsx(&records, &opts.out)?,
    }

    wprintln!(writer, "Exported {} records to {}", records.len(), opts.out)?;
    Ok(())
}

fn header_row() -> Vec<&'static str> {
    let mut row = vec!["record_index", "record_length", "decoded_text"];
    row.extend(BtrieveFieldName::ALL.iter().map(|f| f.as_str()));
    row
}

fn data_row(record: &Record) -> Vec<String> {
    let mut row = vec![
        record.index.to_string(),
        record.length.to_string(),
        record.decoded_text.clone(),
    ];
    for (_, value) in record.extracted_fields.as_map() {
        row.push(value);
    }
    row
}

fn write_csv(records: &[Record], path: &str) -> Result<(), BtrError> {
    let mut wtr = csv::Writer::from_path(path)
        .map_err(|e| BtrError::File(format!("Cannot create {}: {}", path, e)))?;

    wtr.write_record(header_row())
        .map_err(|e| BtrError::Data(format!("CSV write failed: {}", e)))?;
    for record in records {
        wtr.write_record(data_row(record))
            .map_err(|e| BtrError::Data(format!("CSV write failed: {}", e)))?;
    }
    wtr.flush()
        .map_err(|e| BtrError::File(format!("Cannot flush {}: {}", path, e)))?;
    Ok(())
}

fn write_jsonl(records: &[Record], path: &str) -> Result<(), BtrError> {
    let file = File::create(path).map_err(|e| BtrError::File(format!("Cannot create {}: {}", path, e)))?;
    let mut out = BufWriter::new(file);
    for record in records {
        serde_json::to_writer(&mut out, record)
            .map_err(|e| BtrError::Data(format!("JSON serialization failed: {}", e)))?;
        out.write_all(b"\n")
            .map_err(|e| BtrError::File(format!("Write failed: {}", e)))?;
    }
    out.flush()
        .map_err(|e| BtrError::File(format!("Cannot flush {}: {}", path, e)))?;
    Ok(())
}

fn write_sqlite(records: &[Record], path: &str) -> Result<(), BtrError> {
    let conn = rusqlite::Connection::open(path)
        .map_err(|e| BtrError::File(format!("Cannot open {}: {}", path, e)))?;

    let columns = header_row();
    let create_cols = columns
        .iter()
        .map(|c| match *c {
            "record_index" | "record_length" => format!("{} INTEGER", c),
            _ => format!("{} TEXT", c),
        })
        .collect::<Vec<_>>()
        .join(", ");
    conn.execute(
        &format!("CREATE TABLE IF NOT EXISTS records ({})", create_cols),
        [],
    )
    .map_err(|e| BtrError::Data(format!("Failed to create table: {}", e)))?;

    let placeholders = columns.iter().map(|_| "?").collect::<Vec<_>>().join(", ");
    let insert_sql = format!(
        "INSERT INTO records ({}) VALUES ({})",
        columns.join(", "),
        placeholders
    );
    let mut stmt = conn
        .prepare(&insert_sql)
        .map_err(|e| BtrError::Data(format!("Failed to prepare insert: {}", e)))?;

    for record in records {
        let row = data_row(record);
        let params: Vec<&dyn rusqlite::ToSql> =
            row.iter().map(|v| v as &dyn rusqlite::ToSql).collect();
        stmt.execute(params.as_slice())
            .map_err(|e| BtrError::Data(format!("Failed to insert row: {}", e)))?;
    }

    Ok(())
}

fn write_xml(records: &[Record], path: &str) -> Result<(), BtrError> {
    let file = File::create(path).map_err(|e| BtrError::File(format!("Cannot create {}: {}", path, e)))?;
    let mut writer = XmlWriter::new_with_indent(BufWriter::new(file), b' ', 2);

    writer
        .write_event(Event::Start(BytesStart::new("records")))
        .map_err(|e| BtrError::Data(format!("XML write failed: {}", e)))?;

    let columns = header_row();
    for record in records {
        writer
            .write_event(Event::Start(BytesStart::new("record")))
            .map_err(|e| BtrError::Data(format!("XML write failed: {}", e)))?;
        for (name, value) in columns.iter().zip(data_row(record)) {
            writer
                .write_event(Event::Start(BytesStart::new(*name)))
                .map_err(|e| BtrError::Data(format!("XML write failed: {}", e)))?;
            writer
                .write_event(Event::Text(BytesText::new(&value)))
                .map_err(|e| BtrError::Data(format!("XML write failed: {}", e)))?;
            writer
                .write_event(Event::End(BytesEnd::new(*name)))
                .map_err(|e| BtrError::Data(format!("XML write failed: {}", e)))?;
        }
        writer
            .write_event(Event::End(BytesEnd::new("record")))
            .map_err(|e| BtrError::Data(format!("XML write failed: {}", e)))?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("records")))
        .map_err(|e| BtrError::Data(format!("XML write failed: {}", e)))?;

    Ok(())
}

fn write_xlsx(records: &[Record], path: &str) -> Result<(), BtrError> {
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let sheet = workbook.add_worksheet();

    let columns = header_row();
    for (col, name) in columns.iter().enumerate() {
        sheet
            .write_string(0, col as u16, *name)
            .map_err(|e| BtrError::Data(format!("xlsx write failed: {}", e)))?;
    }

    for (row_idx, record) in records.iter().enumerate() {
        let row = (row_idx + 1) as u32;
        for (col, value) in data_row(record).into_iter().enumerate() {
            sheet
                .write_string(row, col as u16, value)
                .map_err(|e| BtrError::Data(format!("xlsx write failed: {}", e)))?;
        }
    }

    workbook
        .save(path)
        .map_err(|e| BtrError::File(format!("Cannot save {}: {}", path, e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::{NamedTempFile, TempDir};

    fn sample_file() -> NamedTempFile {
        let mut bytes = vec![0u8; 8192];
        let mut rec = b"JOHN   PO Box 1 CA 90210 8005550123".to_vec();
        rec.resize(64, 0);
        for _ in 0..10 {
            bytes.extend_from_slice(&rec);
        }
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(&bytes).unwrap();
        f.flush().unwrap();
        f
    }

    #[test]
    fn exports_csv() {
        let f = sample_file();
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out.csv");
        let mut buf = Vec::new();
        let opts = ExportOptions {
            file: f.path().to_str().unwrap().to_string(),
            record_size: Some(64),
            format: "csv".to_string(),
            out: out.to_str().unwrap().to_string(),
            limit: None,
        };
        execute(&opts, &mut buf).unwrap();
        let contents = std::fs::read_to_string(&out).unwrap();
        assert!(contents.contains("record_index"));
        assert!(contents.lines().count() > 1);
    }

    #[test]
    fn exports_jsonl() {
        let f = sample_file();
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out.jsonl");
        let mut buf = Vec::new();
        let opts = ExportOptions {
            file: f.path().to_str().unwrap().to_string(),
            record_size: Some(64),
            format: "jsonl".to_string(),
            out: out.to_str().unwrap().to_string(),
            limit: None,
        };
        execute(&opts, &mut buf).unwrap();
        let contents = std::fs::read_to_string(&out).unwrap();
        assert_eq!(contents.lines().count(), 10);
    }

    #[test]
    fn rejects_unknown_format() {
        let f = sample_file();
        let dir = TempDir::new().unwrap();
        let mut buf = Vec::new();
        let opts = ExportOptions {
            file: f.path().to_str().unwrap().to_string(),
            record_size: Some(64),
            format: "yaml".to_string(),
            out: dir.path().join("out.yaml").to_str().unwrap().to_string(),
            limit: None,
        };
        let err = execute(&opts, &mut buf).unwrap_err();
        assert!(matches!(err, BtrError::Argument(_)));
    }
}
