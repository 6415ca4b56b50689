mod components;
mod lookup;
mod simulated;

use std::collections::BTreeMap;
use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, info};

use crate::aggregate::SkuAggregate;
use crate::models::SkuSummary;
use crate::pipeline::PipelineError;
use crate::types::Money;

pub use components::ComponentModel;
pub use lookup::LookupModel;
pub use simulated::SimulatedModel;

pub const DEFAULT_SEED: u64 = 42;

/// A rule producing the modeled baseline cost of one unit of a SKU.
///
/// Models are applied to SKUs in ascending SKU order, once per SKU.
pub trait ShouldCostModel {
    fn name(&self) -> &'static str;
    fn should_cost(&mut self, aggregate: &SkuAggregate) -> Decimal;
}

/// Serialized selection of a should-cost model.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CostModelConfig {
    Components {
        material: Decimal,
        labor: Decimal,
        packaging: Decimal,
        #[serde(default)]
        overhead_pct: Decimal
    },
    Lookup {
        #[serde(default)]
        costs: BTreeMap<String, Decimal>,
        /// CSV file with `sku,should_cost` columns. Inline `costs` win over it.
        #[serde(default)]
        path: Option<PathBuf>,
        #[serde(default)]
        default: Option<Decimal>
    },
    Simulated {
        #[serde(default = "default_seed")]
        seed: u64
    }
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

impl Default for CostModelConfig {
    fn default() -> Self {
        CostModelConfig::Simulated { seed: DEFAULT_SEED }
    }
}

impl CostModelConfig {
    pub fn build(&self) -> Result<Box<dyn ShouldCostModel>, PipelineError> {
        let model: Box<dyn ShouldCostModel> = match self {
            CostModelConfig::Components { material, labor, packaging, overhead_pct } => {
                Box::new(ComponentModel::new(*material, *labor, *packaging, *overhead_pct))
            }
            CostModelConfig::Lookup { costs, path, default } => {
                let mut table = match path {
                    Some(path) => LookupModel::read_table(path)?,
                    None => BTreeMap::new()
                };
                table.extend(costs.iter().map(|(sku, cost)| (sku.clone(), *cost)));

                Box::new(LookupModel::new(table, default.unwrap_or_default()))
            }
            CostModelConfig::Simulated { seed } => Box::new(SimulatedModel::new(*seed))
        };

        info!("Using the [{}] should-cost model", model.name());

        Ok(model)
    }
}

/// Applies the should-cost model to every aggregate and derives the variance fields.
///
/// Variance is taken between the quote and should-cost as they are printed, so the
/// emitted `avg_quote - should_cost` always equals the emitted `variance`.
pub fn apply(model: &mut dyn ShouldCostModel, aggregates: &[SkuAggregate]) -> Result<Vec<SkuSummary>, PipelineError> {
    aggregates.iter()
        .map(|aggregate| -> Result<SkuSummary, PipelineError> {
            let avg_quote = Money::new(aggregate.avg_quote).rounded();
            let should_cost = Money::new(model.should_cost(aggregate)).rounded();
            let variance = avg_quote.checked_sub(should_cost)
                .ok_or_else(|| PipelineError::overflow(&aggregate.sku))?;

            debug!(
                "SKU [{}]: {} transactions, sales {}, quote {}, should-cost {}",
                aggregate.sku, aggregate.transactions, aggregate.total_sales, avg_quote, should_cost
            );

            Ok(SkuSummary {
                sku: aggregate.sku.clone(),
                description: aggregate.description.clone(),
                total_quantity: aggregate.total_quantity,
                avg_quote: Money::new(avg_quote),
                should_cost: Money::new(should_cost),
                variance: Money::new(variance),
                variance_pct: variance_percent(variance, should_cost),
                quality_flag: aggregate.quality_flag
            })
        })
        .collect()
}

/// `variance / should_cost * 100`, or `None` when the should-cost is zero.
pub fn variance_percent(variance: Decimal, should_cost: Decimal) -> Option<Decimal> {
    variance.checked_div(should_cost)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
}
