use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::info;

use crate::aggregate::AveragingRule;
use crate::cleaning::most_common;
use crate::models::{CleanRecord, QualityFlag};
use crate::pipeline::PipelineError;
use crate::types::{Quantity, Sku};

/// Totals for one SKU before a should-cost is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct SkuAggregate {
    pub sku: Sku,
    pub description: String,
    pub total_quantity: Quantity,
    pub total_sales: Decimal,
    pub avg_quote: Decimal,
    pub transactions: usize,
    pub quality_flag: QualityFlag
}

/// Groups cleaned records by SKU, in ascending SKU order.
///
/// Fails with an overflow error when a SKU's totals leave the range of their type.
pub fn aggregate(records: &[CleanRecord], rule: AveragingRule) -> Result<Vec<SkuAggregate>, PipelineError> {
    let mut groups = BTreeMap::<&str, Vec<&CleanRecord>>::new();

    for record in records {
        groups.entry(record.sku.as_str()).or_default().push(record);
    }

    let aggregates: Vec<SkuAggregate> = groups.into_iter()
        .map(|(sku, rows)| summarize(sku, &rows, rule))
        .collect::<Result<_, _>>()?;

    info!("Aggregated {} rows into {} SKUs", records.len(), aggregates.len());

    Ok(aggregates)
}

fn summarize(sku: &str, rows: &[&CleanRecord], rule: AveragingRule) -> Result<SkuAggregate, PipelineError> {
    let overflow = || PipelineError::overflow(sku);

    let total_quantity = rows.iter()
        .try_fold(0 as Quantity, |total, row| total.checked_add(row.quantity))
        .ok_or_else(overflow)?;

    let total_sales = rows.iter()
        .try_fold(Decimal::ZERO, |total, row| row.line_total().and_then(|line| total.checked_add(line)))
        .ok_or_else(overflow)?;

    //NOTE: Cleaned rows always have a positive quantity, so neither divisor can be zero for a non-empty group.
    let avg_quote = match rule {
        AveragingRule::Weighted => total_sales / Decimal::from(total_quantity),
        AveragingRule::Simple => {
            let price_sum = rows.iter()
                .try_fold(Decimal::ZERO, |total, row| total.checked_add(row.unit_price))
                .ok_or_else(overflow)?;

            price_sum / Decimal::from(rows.len())
        }
    };

    let description = most_common(rows.iter().map(|row| row.description.as_str()))
        .unwrap_or_default()
        .to_string();

    let quality_flag = if rows.iter().any(|row| row.imputed) {
        QualityFlag::Imputed
    } else {
        QualityFlag::Clean
    };

    Ok(SkuAggregate {
        sku: sku.to_string(),
        description,
        total_quantity,
        total_sales,
        avg_quote,
        transactions: rows.len(),
        quality_flag
    })
}
