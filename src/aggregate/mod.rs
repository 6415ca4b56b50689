mod aggregator;
#[cfg(test)]
mod tests;

use clap::ValueEnum;
use serde::Deserialize;

pub use aggregator::{aggregate, SkuAggregate};

/// How the average quoted price of a SKU is derived from its transactions.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AveragingRule {
    /// Total sales divided by total quantity.
    #[default]
    Weighted,
    /// Arithmetic mean of the unit prices, one vote per transaction.
    Simple
}
