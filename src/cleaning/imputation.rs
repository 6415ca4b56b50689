use std::collections::{BTreeMap, HashMap};

use crate::models::RawRecord;
use crate::types::Sku;

/// Returns the most frequent value, breaking ties with the smallest one.
pub fn most_common<'a, I>(values: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>
{
    let mut counts = BTreeMap::<&str, usize>::new();

    for value in values {
        *counts.entry(value).or_default() += 1;
    }

    // BTreeMap iterates in ascending order and max_by_key keeps the last maximum,
    // so iterate in reverse to land on the smallest of the tied values.
    counts.into_iter().rev().max_by_key(|(_, count)| *count).map(|(value, _)| value)
}

/// The most common description of every SKU that has at least one.
pub fn description_index(records: &[RawRecord]) -> HashMap<Sku, String> {
    let mut by_sku = HashMap::<&str, Vec<&str>>::new();

    for record in records {
        if let Some(description) = record.description.as_deref() {
            by_sku.entry(record.sku.as_str()).or_default().push(description);
        }
    }

    by_sku.into_iter()
        .filter_map(|(sku, descriptions)| {
            most_common(descriptions).map(|description| (sku.to_string(), description.to_string()))
        })
        .collect()
}
