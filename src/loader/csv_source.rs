use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::warn;

use crate::loader::{Cell, Sheet};
use crate::pipeline::PipelineError;

pub fn read_sheet(path: &Path) -> Result<Sheet, PipelineError> {
    let file = File::open(path).map_err(|error| PipelineError::io(path, error))?;

    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let headers = reader.headers()
        .map_err(|error| PipelineError::csv(path, error))?
        .iter()
        .map(|header| header.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut rows = Vec::new();
    let mut unreadable = 0;

    for result in reader.records() {
        match result {
            Ok(record) => rows.push(record.iter().map(Cell::text).collect()),
            Err(error) if error.is_io_error() => return Err(PipelineError::csv(path, error)),
            Err(error) => {
                warn!("CSV read error: {error}");
                unreadable += 1;
            }
        }
    }

    Ok(Sheet { headers, rows, unreadable })
}
