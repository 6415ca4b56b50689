use std::fmt;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::aggregate::aggregate;
use crate::cleaning::{Cleaner, RejectionTally};
use crate::config::RunConfig;
use crate::cost_model;
use crate::loader::{load, LoadedTable};
use crate::models::SkuSummary;
use crate::output::write_summaries;
use crate::pipeline::PipelineError;

/// Result of cleaning, aggregating and costing one loaded table.
#[derive(Debug, Clone)]
pub struct Processed {
    pub summaries: Vec<SkuSummary>,
    pub rows_kept: usize,
    pub tally: RejectionTally
}

/// Informational outcome of a successful run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub rows_read: usize,
    pub rows_kept: usize,
    pub tally: RejectionTally,
    pub skus: usize,
    pub output: PathBuf
}

impl Display for RunReport {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        writeln!(formatter, "Rows read:            {}", self.rows_read)?;
        writeln!(formatter, "Rows kept:            {}", self.rows_kept)?;
        writeln!(formatter, "Rows rejected:        {}", self.tally.total())?;
        writeln!(formatter, "  malformed:          {}", self.tally.malformed)?;
        writeln!(formatter, "  missing identifier: {}", self.tally.missing_identifier)?;
        writeln!(formatter, "  cancellation:       {}", self.tally.cancellation)?;
        writeln!(formatter, "  quantity <= 0:      {}", self.tally.non_positive_quantity)?;
        writeln!(formatter, "  unit price <= 0:    {}", self.tally.non_positive_price)?;
        writeln!(formatter, "  missing customer:   {}", self.tally.missing_customer)?;
        writeln!(formatter, "  duplicate:          {}", self.tally.duplicate)?;
        writeln!(formatter, "Descriptions imputed: {}", self.tally.imputed_descriptions)?;
        writeln!(formatter, "SKUs written:         {}", self.skus)?;
        write!(formatter, "Output:               {}", self.output.display())
    }
}

/// Load, clean, aggregate, cost and emit, in that order, with nothing shared between runs.
pub struct Pipeline {
    config: RunConfig
}

impl Pipeline {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    /// Runs every stage and writes the output file.
    ///
    /// Fatal errors abort before the output path is touched.
    pub fn run(&self, input: &Path, output: &Path) -> Result<RunReport, PipelineError> {
        let table = load(input, &self.config.input)?;
        let rows_read = table.rows_read();
        let processed = self.process(table)?;

        write_summaries(output, &processed.summaries)?;

        let report = RunReport {
            rows_read,
            rows_kept: processed.rows_kept,
            tally: processed.tally,
            skus: processed.summaries.len(),
            output: output.to_path_buf()
        };

        info!(
            "Run complete: {} rows read, {} kept, {} rejected, {} SKUs",
            report.rows_read, report.rows_kept, report.tally.total(), report.skus
        );

        Ok(report)
    }

    /// Everything between loading and emitting.
    pub fn process(&self, table: LoadedTable) -> Result<Processed, PipelineError> {
        let mut model = self.config.cost_model.build()?;

        let outcome = Cleaner::new(self.config.cleaning.clone()).clean(table.records);
        let mut tally = outcome.tally;
        tally.malformed += table.malformed;

        let aggregates = aggregate(&outcome.records, self.config.averaging)?;
        let summaries = cost_model::apply(model.as_mut(), &aggregates)?;

        Ok(Processed {
            summaries,
            rows_kept: outcome.records.len(),
            tally
        })
    }
}
