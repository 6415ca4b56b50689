use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::types::{Quantity, Sku};

/// A single row of the source dataset, exactly as it was read.
///
/// Nothing is guaranteed about the values: quantities and prices may be
/// negative for returns and adjustments, and the optional columns may be empty.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub invoice: String,
    pub sku: Sku,
    pub description: Option<String>,
    pub quantity: Quantity,
    pub invoice_date: NaiveDateTime,
    pub unit_price: Decimal,
    pub customer_id: Option<String>,
    pub country: String
}

/// A record that survived the cleaning policy.
///
/// Quantity and unit price are strictly positive, identifiers are non-empty and
/// the description is always present. `imputed` marks descriptions that were
/// filled in rather than read from the source.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CleanRecord {
    pub invoice: String,
    pub sku: Sku,
    pub invoice_date: NaiveDateTime,
    pub quantity: Quantity,
    pub unit_price: Decimal,
    pub description: String,
    pub customer_id: Option<String>,
    pub country: String,
    pub imputed: bool
}

impl CleanRecord {
    /// Rows sharing this key are duplicates of one another.
    pub fn identity(&self) -> (&str, &str, NaiveDateTime) {
        (&self.invoice, &self.sku, self.invoice_date)
    }

    /// `quantity * unit_price`, or `None` when the product does not fit a `Decimal`.
    pub fn line_total(&self) -> Option<Decimal> {
        Decimal::from(self.quantity).checked_mul(self.unit_price)
    }
}
