//! Header-addressed CSV table reader

use std::io::Cursor;
use std::path::{Path, PathBuf};

use contracts::{InputSource, ReportError};
use csv::StringRecord;
use tracing::debug;

use crate::decode::decode;

/// Decoded CSV input with a resolved header row
pub(crate) struct CsvTable {
    path: PathBuf,
    headers: StringRecord,
    reader: csv::Reader<Cursor<Vec<u8>>>,
}

impl CsvTable {
    /// Open and decode an input source
    ///
    /// # Errors
    /// - `MissingFile` if the path does not exist
    /// - `Encoding` if the bytes are invalid for the declared encoding
    /// - `Csv` if the header row cannot be read
    pub(crate) fn open(source: &InputSource) -> Result<Self, ReportError> {
        let path = source.path.as_path();
        if !path.exists() {
            return Err(ReportError::missing_file(path));
        }

        let bytes = std::fs::read(path)?;
        debug!(
            path = %path.display(),
            bytes = bytes.len(),
            encoding = ?source.encoding,
            "Input read"
        );
        let text = decode(bytes, source.encoding, path)?;

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(Cursor::new(text.into_bytes()));
        let headers = reader
            .headers()
            .map_err(|e| ReportError::csv(path, e))?
            .clone();

        Ok(Self {
            path: path.to_path_buf(),
            headers,
            reader,
        })
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Index of a required column
    ///
    /// # Errors
    /// `Schema` naming the file and the missing column
    pub(crate) fn column(&self, name: &str) -> Result<usize, ReportError> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| ReportError::schema(&self.path, name))
    }

    /// Iterate data rows as (1-based line number, record)
    pub(crate) fn rows(
        &mut self,
    ) -> impl Iterator<Item = Result<(u64, StringRecord), ReportError>> + '_ {
        let path = self.path.clone();
        self.reader.records().map(move |result| {
            let record = result.map_err(|e| ReportError::csv(&path, e))?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            Ok((line, record))
        })
    }
}

/// Field accessor tolerant of short rows
pub(crate) fn field(record: &StringRecord, idx: usize) -> &str {
    record.get(idx).unwrap_or("")
}
