use std::fs::File;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::loader::{Cell, Sheet};
use crate::pipeline::PipelineError;

pub fn read_sheet(path: &Path, sheet: Option<&str>) -> Result<Sheet, PipelineError> {
    // calamine folds I/O failures into its own error type; surface them as I/O errors first.
    File::open(path).map_err(|error| PipelineError::io(path, error))?;

    let mut workbook = open_workbook_auto(path).map_err(|error| PipelineError::spreadsheet(path, error))?;

    let range = match sheet {
        Some(name) => workbook.worksheet_range(name)
            .map_err(|error| PipelineError::spreadsheet(path, format!("sheet [{name}]: {error}")))?,
        None => workbook.worksheet_range_at(0)
            .ok_or_else(|| PipelineError::spreadsheet(path, "workbook has no sheets"))?
            .map_err(|error| PipelineError::spreadsheet(path, error))?
    };

    let mut rows = range.rows();

    let Some(header_row) = rows.next() else {
        return Err(PipelineError::empty_input(path));
    };

    let headers = header_row.iter()
        .map(|data| Cell::from(data).as_text().unwrap_or_default())
        .collect();

    let rows = rows.map(|row| row.iter().map(Cell::from).collect()).collect();

    Ok(Sheet { headers, rows, unreadable: 0 })
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty => Cell::Empty,
            Data::String(value) => Cell::text(value),
            Data::Int(value) => Cell::Int(*value),
            Data::Float(value) => Cell::Float(*value),
            Data::Bool(value) => Cell::Text(value.to_string()),
            Data::DateTime(value) => value.as_datetime().map(Cell::DateTime).unwrap_or(Cell::Empty),
            Data::DateTimeIso(value) => Cell::text(value),
            _ => Cell::Empty
        }
    }
}
