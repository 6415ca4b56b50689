use std::fmt;
use std::fmt::{Display, Formatter};
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::pipeline::PipelineError;
use crate::types::{Money, Quantity};

/// The columns of an emitted summary file needed to compute margin recovery.
#[derive(Debug, Clone, Deserialize)]
pub struct SummaryRow {
    pub total_quantity: Quantity,
    pub avg_quote: Money,
    pub should_cost: Money
}

/// Portfolio-wide comparison of modeled costs against quoted costs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarginRecovery {
    pub total_should_cost: Money,
    pub total_quoted_cost: Money,
    /// `total_should_cost - total_quoted_cost`
    pub total_savings: Money,
    /// `total_savings / total_should_cost * 100`, zero when there is no should-cost.
    pub recovery_pct: Money
}

impl MarginRecovery {
    pub fn compute(rows: &[SummaryRow]) -> Self {
        let mut total_should_cost = Money::zero();
        let mut total_quoted_cost = Money::zero();

        for row in rows {
            let quantity = Decimal::from(row.total_quantity);
            total_should_cost += Money::new(row.should_cost.value() * quantity);
            total_quoted_cost += Money::new(row.avg_quote.value() * quantity);
        }

        let savings = total_should_cost.value() - total_quoted_cost.value();
        let recovery_pct = savings.checked_div(total_should_cost.value())
            .map(|ratio| ratio * Decimal::ONE_HUNDRED)
            .unwrap_or_default();

        Self {
            total_should_cost,
            total_quoted_cost,
            total_savings: Money::new(savings),
            recovery_pct: Money::new(recovery_pct)
        }
    }
}

impl Display for MarginRecovery {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        writeln!(formatter, "Total should-cost:    ${}", self.total_should_cost)?;
        writeln!(formatter, "Total quoted cost:    ${}", self.total_quoted_cost)?;
        writeln!(formatter, "Potential savings:    ${}", self.total_savings)?;
        write!(formatter, "Margin recovery:      {}%", self.recovery_pct)
    }
}

/// Reads a summary CSV previously written by `write_summaries`.
pub fn read_summaries(path: &Path) -> Result<Vec<SummaryRow>, PipelineError> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .from_path(path)
        .map_err(|error| PipelineError::csv(path, error))?;

    reader.deserialize::<SummaryRow>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|error| PipelineError::csv(path, error))
}
