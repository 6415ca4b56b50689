use rand::distr::{Distribution, StandardUniform};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use crate::aggregate::SkuAggregate;
use crate::cost_model::{ComponentModel, ShouldCostModel};

const MATERIAL: (f64, f64) = (1.50, 5.00);
const LABOR: (f64, f64) = (1.00, 3.00);
const PACKAGING: (f64, f64) = (0.20, 1.00);
const OVERHEAD_PCT: (f64, f64) = (0.10, 0.25);
const COMPONENT_PLACES: u32 = 4;

/// Draws random cost components per SKU from a seeded generator.
///
/// Draws happen in the order SKUs are presented, which is ascending SKU order, so
/// the same seed and the same set of SKUs always produce the same costs.
pub struct SimulatedModel {
    rng: StdRng
}

impl SimulatedModel {
    pub fn new(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    fn draw(&mut self, (low, high): (f64, f64)) -> Decimal {
        let unit: f64 = StandardUniform.sample(&mut self.rng);
        let value = low + (high - low) * unit;

        Decimal::from_f64(value)
            .map(|value| value.round_dp(COMPONENT_PLACES))
            .unwrap_or_default()
    }
}

impl ShouldCostModel for SimulatedModel {
    fn name(&self) -> &'static str {
        "simulated"
    }

    fn should_cost(&mut self, _aggregate: &SkuAggregate) -> Decimal {
        let material = self.draw(MATERIAL);
        let labor = self.draw(LABOR);
        let packaging = self.draw(PACKAGING);
        let overhead_pct = self.draw(OVERHEAD_PCT);

        ComponentModel::cost(material, labor, packaging, overhead_pct)
    }
}
