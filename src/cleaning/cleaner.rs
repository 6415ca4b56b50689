use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::cleaning::imputation::description_index;
use crate::cleaning::{CleaningPolicy, Rejection, RejectionTally};
use crate::models::{CleanRecord, RawRecord};
use crate::types::Sku;

/// Records that passed the cleaning policy along with the tally of everything that did not.
#[derive(Debug, Clone, Default)]
pub struct CleanOutcome {
    /// Sorted by invoice, SKU and timestamp.
    pub records: Vec<CleanRecord>,
    pub tally: RejectionTally
}

pub struct Cleaner {
    policy: CleaningPolicy
}

impl Cleaner {
    pub fn new(policy: CleaningPolicy) -> Self {
        Self { policy }
    }

    /// Applies the cleaning policy to every raw record.
    ///
    /// Rejected rows are only counted. Duplicates (same invoice, SKU and timestamp)
    /// collapse onto the smallest row under `CleanRecord`'s ordering so the survivor
    /// does not depend on the order rows were read in.
    pub fn clean(&self, raw: Vec<RawRecord>) -> CleanOutcome {
        let descriptions = description_index(&raw);
        let mut tally = RejectionTally::default();
        let mut records = Vec::with_capacity(raw.len());

        for record in raw {
            if let Err(rejection) = self.check(&record) {
                debug!("Rejected row [{}]:[{}] as {rejection:?}", record.invoice, record.sku);
                tally.record(rejection);
                continue;
            }

            records.push(self.impute(record, &descriptions));
        }

        records.sort();

        let before = records.len();
        records.dedup_by(|later, earlier| later.identity() == earlier.identity());
        tally.duplicate = before - records.len();
        tally.imputed_descriptions = records.iter().filter(|record| record.imputed).count();

        info!("Cleaning kept {} rows and dropped {} ({tally})", records.len(), tally.total());

        CleanOutcome { records, tally }
    }

    fn check(&self, record: &RawRecord) -> Result<(), Rejection> {
        if record.invoice.is_empty() || record.sku.is_empty() {
            return Err(Rejection::MissingIdentifier);
        }

        if let Some(prefix) = self.policy.cancellation_prefix.as_deref() {
            if !prefix.is_empty() && record.invoice.starts_with(prefix) {
                return Err(Rejection::Cancellation);
            }
        }

        if record.quantity <= 0 {
            return Err(Rejection::NonPositiveQuantity);
        }

        if record.unit_price <= Decimal::ZERO {
            return Err(Rejection::NonPositivePrice);
        }

        //NOTE: A line total that does not fit a Decimal cannot be aggregated.
        if Decimal::from(record.quantity).checked_mul(record.unit_price).is_none() {
            return Err(Rejection::Malformed);
        }

        if self.policy.require_customer && record.customer_id.is_none() {
            return Err(Rejection::MissingCustomer);
        }

        Ok(())
    }

    fn impute(&self, record: RawRecord, descriptions: &HashMap<Sku, String>) -> CleanRecord {
        let (description, imputed) = match record.description {
            Some(description) => (description, false),
            None => {
                let description = descriptions.get(&record.sku)
                    .cloned()
                    .unwrap_or_else(|| self.policy.placeholder_description.clone());

                debug!("Imputed description [{description}] for SKU [{}] on invoice [{}]", record.sku, record.invoice);
                (description, true)
            }
        };

        CleanRecord {
            invoice: record.invoice,
            sku: record.sku,
            invoice_date: record.invoice_date,
            quantity: record.quantity,
            unit_price: record.unit_price,
            description,
            customer_id: record.customer_id,
            country: record.country,
            imputed
        }
    }
}
