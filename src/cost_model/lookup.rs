use std::collections::BTreeMap;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{info, warn};

use crate::aggregate::SkuAggregate;
use crate::cost_model::ShouldCostModel;
use crate::pipeline::PipelineError;
use crate::types::{Money, Sku};

#[derive(Debug, Deserialize)]
struct CostRow {
    sku: Sku,
    should_cost: Money
}

/// Should-costs supplied per SKU, with a fallback for SKUs not in the table.
#[derive(Debug, Clone)]
pub struct LookupModel {
    table: BTreeMap<Sku, Decimal>,
    default: Decimal
}

impl LookupModel {
    pub fn new(table: BTreeMap<Sku, Decimal>, default: Decimal) -> Self {
        Self { table, default }
    }

    /// Reads a `sku,should_cost` CSV file into a lookup table.
    pub fn read_table(path: &Path) -> Result<BTreeMap<Sku, Decimal>, PipelineError> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .from_path(path)
            .map_err(|error| PipelineError::csv(path, error))?;

        let mut table = BTreeMap::new();

        for (index, result) in reader.deserialize::<CostRow>().enumerate() {
            let row = result.map_err(|error| {
                PipelineError::config(path, format!("cost table row {} is invalid: {error}", index + 1))
            })?;

            table.insert(row.sku, row.should_cost.value());
        }

        info!("Read {} should-costs from [{}]", table.len(), path.display());

        Ok(table)
    }
}

impl ShouldCostModel for LookupModel {
    fn name(&self) -> &'static str {
        "lookup"
    }

    fn should_cost(&mut self, aggregate: &SkuAggregate) -> Decimal {
        match self.table.get(&aggregate.sku) {
            Some(cost) => *cost,
            None => {
                warn!("No should-cost for SKU [{}], using default [{}]", aggregate.sku, self.default);
                self.default
            }
        }
    }
}
