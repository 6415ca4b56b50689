mod cell;
mod columns;
mod csv_source;
mod errors;
mod xlsx_source;

use std::path::Path;

use tracing::{debug, info};

use crate::config::InputConfig;
use crate::models::RawRecord;
use crate::pipeline::PipelineError;

pub use cell::Cell;
use columns::ColumnMap;
pub use errors::RowError;

const SPREADSHEET_EXTENSIONS: [&str; 4] = ["xlsx", "xlsm", "xls", "ods"];

/// Raw records read from the input, plus the number of rows that could not be parsed.
#[derive(Debug, Clone, Default)]
pub struct LoadedTable {
    pub records: Vec<RawRecord>,
    pub malformed: usize
}

impl LoadedTable {
    pub fn rows_read(&self) -> usize {
        self.records.len() + self.malformed
    }
}

/// Header cells and data rows of the first (or configured) table in a source.
pub struct Sheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
    /// Rows the reader could not decode at all.
    pub unreadable: usize
}

/// Reads the input file into raw records.
///
/// Spreadsheets are recognised by extension; anything else is read as CSV.
/// Missing columns are fatal, unparseable rows are only counted.
pub fn load(path: &Path, options: &InputConfig) -> Result<LoadedTable, PipelineError> {
    info!("Loading transactions from [{}]", path.display());

    let sheet = if is_spreadsheet(path) {
        xlsx_source::read_sheet(path, options.sheet.as_deref())?
    } else {
        csv_source::read_sheet(path)?
    };

    if sheet.headers.iter().all(|header| header.trim().is_empty()) {
        return Err(PipelineError::empty_input(path));
    }

    let columns = ColumnMap::resolve(&sheet.headers, path)?;
    let mut table = LoadedTable { malformed: sheet.unreadable, ..LoadedTable::default() };

    for (index, row) in sheet.rows.iter().enumerate() {
        if row.iter().all(Cell::is_empty) {
            continue;
        }

        match columns.parse_row(row) {
            Ok(record) => table.records.push(record),
            Err(error) => {
                //NOTE: Header is line 1, so the first data row is line 2.
                debug!("Skipping line {}: {error}", index + 2);
                table.malformed += 1;
            }
        }
    }

    info!("Loaded {} rows ({} malformed)", table.rows_read(), table.malformed);

    Ok(table)
}

fn is_spreadsheet(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .map(|extension| SPREADSHEET_EXTENSIONS.contains(&extension.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}
