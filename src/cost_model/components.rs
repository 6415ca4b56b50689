use rust_decimal::Decimal;

use crate::aggregate::SkuAggregate;
use crate::cost_model::ShouldCostModel;

/// The same fixed cost components for every SKU, with overhead charged on top of
/// material, labor and packaging.
#[derive(Debug, Clone)]
pub struct ComponentModel {
    material: Decimal,
    labor: Decimal,
    packaging: Decimal,
    overhead_pct: Decimal
}

impl ComponentModel {
    pub fn new(material: Decimal, labor: Decimal, packaging: Decimal, overhead_pct: Decimal) -> Self {
        Self { material, labor, packaging, overhead_pct }
    }

    /// `(material + labor + packaging) * (1 + overhead_pct)`
    pub fn cost(material: Decimal, labor: Decimal, packaging: Decimal, overhead_pct: Decimal) -> Decimal {
        let direct = material + labor + packaging;
        direct + direct * overhead_pct
    }
}

impl ShouldCostModel for ComponentModel {
    fn name(&self) -> &'static str {
        "components"
    }

    fn should_cost(&mut self, _aggregate: &SkuAggregate) -> Decimal {
        Self::cost(self.material, self.labor, self.packaging, self.overhead_pct)
    }
}
