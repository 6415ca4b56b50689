mod cleaner;
mod imputation;
#[cfg(test)]
mod tests;

use std::fmt;
use std::fmt::{Display, Formatter};

use serde::Deserialize;

pub use cleaner::Cleaner;
pub use imputation::most_common;

/// Rules deciding which raw rows are kept and how gaps are filled.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CleaningPolicy {
    /// Invoices starting with this prefix are cancellations. `None` disables the check.
    pub cancellation_prefix: Option<String>,
    /// Drop rows that carry no customer identifier.
    pub require_customer: bool,
    /// Description used for a SKU that never has one in the dataset.
    pub placeholder_description: String
}

impl Default for CleaningPolicy {
    fn default() -> Self {
        Self {
            cancellation_prefix: Some("C".to_string()),
            require_customer: false,
            placeholder_description: "Unknown".to_string()
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Rejection {
    Malformed,
    MissingIdentifier,
    Cancellation,
    NonPositiveQuantity,
    NonPositivePrice,
    MissingCustomer,
    Duplicate
}

/// Run-level counters for dropped and imputed rows.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct RejectionTally {
    pub malformed: usize,
    pub missing_identifier: usize,
    pub cancellation: usize,
    pub non_positive_quantity: usize,
    pub non_positive_price: usize,
    pub missing_customer: usize,
    pub duplicate: usize,
    /// Kept rows whose description was filled in. Not a rejection.
    pub imputed_descriptions: usize
}

impl RejectionTally {
    pub fn record(&mut self, rejection: Rejection) {
        let counter = match rejection {
            Rejection::Malformed => &mut self.malformed,
            Rejection::MissingIdentifier => &mut self.missing_identifier,
            Rejection::Cancellation => &mut self.cancellation,
            Rejection::NonPositiveQuantity => &mut self.non_positive_quantity,
            Rejection::NonPositivePrice => &mut self.non_positive_price,
            Rejection::MissingCustomer => &mut self.missing_customer,
            Rejection::Duplicate => &mut self.duplicate
        };

        *counter += 1;
    }

    /// Total number of dropped rows.
    pub fn total(&self) -> usize {
        self.malformed
            + self.missing_identifier
            + self.cancellation
            + self.non_positive_quantity
            + self.non_positive_price
            + self.missing_customer
            + self.duplicate
    }
}

impl Display for RejectionTally {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "malformed={} missing_identifier={} cancellation={} non_positive_quantity={} non_positive_price={} missing_customer={} duplicate={}",
            self.malformed,
            self.missing_identifier,
            self.cancellation,
            self.non_positive_quantity,
            self.non_positive_price,
            self.missing_customer,
            self.duplicate
        )
    }
}
