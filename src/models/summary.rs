use rust_decimal::Decimal;

use crate::models::QualityFlag;
use crate::types::{Money, Quantity, Sku};

pub const OUTPUT_HEADER: [&str; 8] = [
    "sku",
    "description",
    "total_quantity",
    "avg_quote",
    "should_cost",
    "variance",
    "variance_pct",
    "quality_flag"
];

/// The per-SKU output row.
#[derive(Debug, Clone, PartialEq)]
pub struct SkuSummary {
    pub sku: Sku,
    pub description: String,
    pub total_quantity: Quantity,
    /// Average vendor-quoted unit price observed in the transactions.
    pub avg_quote: Money,
    /// Modeled baseline cost for one unit.
    pub should_cost: Money,
    /// `avg_quote - should_cost`.
    pub variance: Money,
    /// `variance / should_cost * 100`, or `None` when the should-cost is zero.
    pub variance_pct: Option<Decimal>,
    pub quality_flag: QualityFlag
}

impl SkuSummary {
    /// Renders the row in `OUTPUT_HEADER` column order.
    pub fn to_record(&self) -> [String; 8] {
        [
            self.sku.clone(),
            self.description.clone(),
            self.total_quantity.to_string(),
            self.avg_quote.to_string(),
            self.should_cost.to_string(),
            self.variance.to_string(),
            self.variance_pct.map(|pct| Money::new(pct).to_string()).unwrap_or_default(),
            self.quality_flag.as_str().to_string()
        ]
    }
}
