use std::io::Read;
use std::path::Path;

use crate::input::InputError;
use crate::input::reader::{logical_name, open_maybe_gz};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Tab,
    Comma,
}

impl Delimiter {
    pub fn as_byte(self) -> u8 {
        match self {
            Delimiter::Tab => b'\t',
            Delimiter::Comma => b',',
        }
    }

    /// `.csv` and `.csv.gz` are comma separated; everything else is read as TSV.
    pub fn from_path(path: &Path) -> Self {
        let name = logical_name(path).to_ascii_lowercase();
        if name.ends_with(".csv") {
            Delimiter::Comma
        } else {
            Delimiter::Tab
        }
    }
}

#[derive(Debug, Clone)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Result<usize, InputError> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| {
                InputError::MissingInput(format!(
                    "column '{}' not found (available: {})",
                    name,
                    self.columns.join(", ")
                ))
            })
    }
}

pub fn read_table(path: &Path, delimiter: Delimiter) -> Result<Table, InputError> {
    let reader = open_maybe_gz(path)?;
    parse_table(reader, delimiter)
}

pub fn parse_table<R: Read>(reader: R, delimiter: Delimiter) -> Result<Table, InputError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter.as_byte())
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns: Vec<String> = csv_reader
        .headers()
        .map_err(|e| InputError::Parse(e.to_string()))?
        .iter()
        .map(|s| s.to_string())
        .collect();
    if columns.is_empty() || columns.iter().all(|c| c.is_empty()) {
        return Err(InputError::Parse("table header is empty".to_string()));
    }

    let mut rows = Vec::new();
    let mut short_rows = 0usize;
    for (idx, record) in csv_reader.records().enumerate() {
        let record = record.map_err(|e| InputError::Parse(e.to_string()))?;
        // header is line 1
        let line_no = idx + 2;
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }
        if record.len() > columns.len() {
            return Err(InputError::Parse(format!(
                "line {} has {} fields but the header has {}",
                line_no,
                record.len(),
                columns.len()
            )));
        }
        let mut row: Vec<String> = record.iter().map(|s| s.to_string()).collect();
        if row.len() < columns.len() {
            short_rows += 1;
            row.resize(columns.len(), String::new());
        }
        rows.push(row);
    }

    if short_rows > 0 {
        tracing::warn!(
            short_rows,
            "rows shorter than the header were padded with empty fields"
        );
    }

    Ok(Table { columns, rows })
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/table.rs"]
mod tests;
