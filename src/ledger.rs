//! Append-only CSV audit log of content added to the node.
//!
//! The log is shared across invocations through the filesystem. There is no
//! locking; each append is a single buffered write so concurrent writers
//! interleave at whole-call granularity at worst on POSIX appends.

use std::borrow::Cow;
use std::fs::OpenOptions;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use crate::api::v0::add::AddedEntry;

pub const DEFAULT_LEDGER_FILE: &str = "database.csv";

/// One successfully added object, as reported by the node. The hash is
/// always node-assigned, never computed locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRecord {
    pub name: String,
    pub hash: String,
    pub size: u64,
}

impl From<AddedEntry> for ContentRecord {
    fn from(entry: AddedEntry) -> Self {
        Self {
            name: entry.name,
            hash: entry.hash,
            size: entry.size,
        }
    }
}

/// Column names for the ledger header row. Passed explicitly to the writer
/// rather than living in a module-level constant so callers can rename
/// columns without touching this module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerSchema {
    pub name: String,
    pub hash: String,
    pub size: String,
}

impl Default for LedgerSchema {
    fn default() -> Self {
        Self {
            name: "Name".into(),
            hash: "Hash".into(),
            size: "Size".into(),
        }
    }
}

impl LedgerSchema {
    fn header_row(&self) -> String {
        format!(
            "{},{},{}\n",
            escape_field(&self.name),
            escape_field(&self.hash),
            escape_field(&self.size)
        )
    }
}

#[derive(Debug, Clone)]
pub struct Ledger {
    path: PathBuf,
    schema: LedgerSchema,
}

impl Ledger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_schema(path, LedgerSchema::default())
    }

    pub fn with_schema(path: impl Into<PathBuf>, schema: LedgerSchema) -> Self {
        Self {
            path: path.into(),
            schema,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one row per record, writing the header first iff the file is
    /// empty (or absent) at open time. The whole batch goes out in a single
    /// write; the file handle is released on every exit path.
    pub fn append(&self, records: &[ContentRecord]) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut buf = String::new();
        if file.metadata()?.len() == 0 {
            buf.push_str(&self.schema.header_row());
        }
        for record in records {
            buf.push_str(&format!(
                "{},{},{}\n",
                escape_field(&record.name),
                escape_field(&record.hash),
                record.size
            ));
        }
        file.write_all(buf.as_bytes())?;
        Ok(())
    }

    /// Read back every data row, skipping the header. Rows that do not have
    /// exactly three fields are rejected.
    pub fn read_records(&self) -> io::Result<Vec<ContentRecord>> {
        let mut contents = String::new();
        std::fs::File::open(&self.path)?.read_to_string(&mut contents)?;

        let mut records = Vec::new();
        for line in contents.lines().skip(1).filter(|l| !l.is_empty()) {
            let fields = split_row(line);
            if fields.len() != 3 {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("malformed ledger row: {line}"),
                ));
            }
            let size = fields[2].parse().map_err(|_| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("malformed size in ledger row: {line}"),
                )
            })?;
            records.push(ContentRecord {
                name: fields[0].clone(),
                hash: fields[1].clone(),
                size,
            });
        }
        Ok(records)
    }
}

fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

fn split_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(c);
            }
        } else {
            match c {
                '"' => in_quotes = true,
                ',' => fields.push(std::mem::take(&mut current)),
                _ => current.push(c),
            }
        }
    }
    fields.push(current);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, hash: &str, size: u64) -> ContentRecord {
        ContentRecord {
            name: name.into(),
            hash: hash.into(),
            size,
        }
    }

    #[test]
    fn test_header_written_once_for_fresh_file() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = Ledger::new(dir.path().join("log.csv"));

        ledger.append(&[record("a.txt", "Qm1", 44)]).unwrap();
        let contents = std::fs::read_to_string(ledger.path()).unwrap();
        assert_eq!(contents, "Name,Hash,Size\na.txt,Qm1,44\n");
    }

    #[test]
    fn test_second_append_does_not_rewrite_header() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = Ledger::new(dir.path().join("log.csv"));

        ledger.append(&[record("a.txt", "Qm1", 44)]).unwrap();
        ledger.append(&[record("b.txt", "Qm2", 7)]).unwrap();

        let contents = std::fs::read_to_string(ledger.path()).unwrap();
        assert_eq!(
            contents,
            "Name,Hash,Size\na.txt,Qm1,44\nb.txt,Qm2,7\n"
        );
    }

    #[test]
    fn test_round_trip_across_openings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.csv");
        let expected = vec![
            record("a.txt", "Qm1", 44),
            record("b.txt", "Qm2", 7),
            record("c.txt", "Qm3", 0),
        ];

        // Separate Ledger values model separate process invocations.
        for r in &expected {
            Ledger::new(&path).append(std::slice::from_ref(r)).unwrap();
        }

        let rows = Ledger::new(&path).read_records().unwrap();
        assert_eq!(rows, expected);
        let header_count = std::fs::read_to_string(&path)
            .unwrap()
            .lines()
            .filter(|l| *l == "Name,Hash,Size")
            .count();
        assert_eq!(header_count, 1);
    }

    #[test]
    fn test_fields_with_commas_and_quotes_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = Ledger::new(dir.path().join("log.csv"));
        let tricky = record("a,\"b\".txt", "Qm1", 3);

        ledger.append(std::slice::from_ref(&tricky)).unwrap();
        assert_eq!(ledger.read_records().unwrap(), vec![tricky]);
    }

    #[test]
    fn test_custom_schema_header() {
        let dir = tempfile::tempdir().unwrap();
        let schema = LedgerSchema {
            name: "File".into(),
            hash: "Cid".into(),
            size: "Bytes".into(),
        };
        let ledger = Ledger::with_schema(dir.path().join("log.csv"), schema);

        ledger.append(&[record("a.txt", "Qm1", 1)]).unwrap();
        let contents = std::fs::read_to_string(ledger.path()).unwrap();
        assert!(contents.starts_with("File,Cid,Bytes\n"));
    }

    #[test]
    fn test_empty_batch_still_writes_header() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = Ledger::new(dir.path().join("log.csv"));

        ledger.append(&[]).unwrap();
        let contents = std::fs::read_to_string(ledger.path()).unwrap();
        assert_eq!(contents, "Name,Hash,Size\n");
        assert!(ledger.read_records().unwrap().is_empty());
    }
}
