use std::path::Path;

use thiserror::Error;

pub mod reader;
pub mod table;

use table::{Delimiter, Table, read_table};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("parse error: {0}")]
    Parse(String),
}

/// Reads a delimited table, detecting the delimiter from the file name when
/// none is given.
pub fn load_table(path: &Path, delimiter: Option<Delimiter>) -> Result<Table, InputError> {
    let delimiter = delimiter.unwrap_or_else(|| Delimiter::from_path(path));
    tracing::info!(
        path = %path.display(),
        delimiter = ?delimiter,
        gz = reader::is_gz(path),
        "reading input table"
    );
    let table = read_table(path, delimiter)?;
    if table.rows.is_empty() {
        tracing::warn!(path = %path.display(), "input table has no data rows");
    }
    tracing::debug!(
        columns = table.columns.len(),
        rows = table.n_rows(),
        "input table loaded"
    );
    Ok(table)
}
