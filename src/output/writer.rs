use std::io::Write;
use std::path::Path;

use csv::{Terminator, WriterBuilder};
use tempfile::NamedTempFile;
use tracing::info;

use crate::models::{SkuSummary, OUTPUT_HEADER};
use crate::pipeline::PipelineError;

/// Writes the summaries as CSV, replacing `path` only once every row is on disk.
///
/// Rows go to a temporary file in the destination directory which is then
/// persisted over the target, so a failure never leaves a truncated output.
pub fn write_summaries(path: &Path, summaries: &[SkuSummary]) -> Result<(), PipelineError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new(".")
    };

    let mut temp_file = NamedTempFile::new_in(parent).map_err(|error| PipelineError::io(path, error))?;

    {
        let mut writer = WriterBuilder::new()
            .terminator(Terminator::Any(b'\n'))
            .from_writer(temp_file.as_file_mut());

        writer.write_record(OUTPUT_HEADER).map_err(|error| PipelineError::csv(path, error))?;

        for summary in summaries {
            writer.write_record(summary.to_record()).map_err(|error| PipelineError::csv(path, error))?;
        }

        writer.flush().map_err(|error| PipelineError::io(path, error))?;
    }

    temp_file.as_file_mut().flush().map_err(|error| PipelineError::io(path, error))?;
    temp_file.persist(path).map_err(|error| PipelineError::io(path, error.error))?;

    info!("Wrote {} SKU summaries to [{}]", summaries.len(), path.display());

    Ok(())
}
