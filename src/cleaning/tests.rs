use super::{most_common, Cleaner, CleaningPolicy, Rejection, RejectionTally};

use std::str::FromStr;

use anyhow::Result;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::models::RawRecord;

fn create_record(invoice: &str, sku: &str, quantity: i64, price: &str, description: Option<&str>) -> Result<RawRecord> {
    Ok(RawRecord {
        invoice: invoice.to_string(),
        sku: sku.to_string(),
        description: description.map(str::to_string),
        quantity,
        invoice_date: NaiveDateTime::parse_from_str("2010-12-01 08:26:00", "%Y-%m-%d %H:%M:%S")?,
        unit_price: Decimal::from_str(price)?,
        customer_id: Some("17850".to_string()),
        country: "United Kingdom".to_string()
    })
}

#[test]
fn test_most_common_prefers_frequency_then_smallest_value() {
    assert_eq!(most_common(["b", "a", "b"]), Some("b"));
    assert_eq!(most_common(["b", "a"]), Some("a"));
    assert_eq!(most_common(["c", "b", "c", "b"]), Some("b"));
    assert_eq!(most_common(Vec::<&str>::new()), None);
}

#[test]
fn test_non_positive_quantities_and_prices_are_dropped() -> Result<()> {
    let cleaner = Cleaner::new(CleaningPolicy::default());
    let outcome = cleaner.clean(vec![
        create_record("536365", "A1", 2, "10.00", Some("LANTERN"))?,
        create_record("536366", "A1", -5, "10.00", Some("LANTERN"))?,
        create_record("536367", "A1", 0, "10.00", Some("LANTERN"))?,
        create_record("536368", "A1", 3, "0.00", Some("LANTERN"))?,
        create_record("536369", "A1", 3, "-11.06", Some("LANTERN"))?,
    ]);

    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].invoice, "536365");
    assert_eq!(outcome.tally.non_positive_quantity, 2);
    assert_eq!(outcome.tally.non_positive_price, 2);
    assert_eq!(outcome.tally.total(), 4);

    Ok(())
}

#[test]
fn test_cancellation_invoices_are_dropped_before_quantity_checks() -> Result<()> {
    let cleaner = Cleaner::new(CleaningPolicy::default());
    let outcome = cleaner.clean(vec![
        create_record("C536379", "A1", -1, "27.50", Some("LANTERN"))?,
        create_record("536380", "A1", 1, "27.50", Some("LANTERN"))?,
    ]);

    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.tally.cancellation, 1);
    assert_eq!(outcome.tally.non_positive_quantity, 0);

    Ok(())
}

#[test]
fn test_cancellation_check_can_be_disabled() -> Result<()> {
    let policy = CleaningPolicy { cancellation_prefix: None, ..CleaningPolicy::default() };
    let outcome = Cleaner::new(policy).clean(vec![create_record("C536379", "A1", 1, "27.50", Some("LANTERN"))?]);

    assert_eq!(outcome.records.len(), 1);

    Ok(())
}

#[test]
fn test_empty_identifiers_are_dropped() -> Result<()> {
    let cleaner = Cleaner::new(CleaningPolicy::default());
    let outcome = cleaner.clean(vec![
        create_record("", "A1", 1, "1.00", Some("LANTERN"))?,
        create_record("536365", "", 1, "1.00", Some("LANTERN"))?,
    ]);

    assert!(outcome.records.is_empty());
    assert_eq!(outcome.tally.missing_identifier, 2);

    Ok(())
}

#[test]
fn test_missing_customer_is_only_dropped_when_required() -> Result<()> {
    let mut record = create_record("536365", "A1", 1, "1.00", Some("LANTERN"))?;
    record.customer_id = None;

    let lenient = Cleaner::new(CleaningPolicy::default()).clean(vec![record.clone()]);
    let strict = Cleaner::new(CleaningPolicy { require_customer: true, ..CleaningPolicy::default() }).clean(vec![record]);

    assert_eq!(lenient.records.len(), 1);
    assert!(strict.records.is_empty());
    assert_eq!(strict.tally.missing_customer, 1);

    Ok(())
}

#[test]
fn test_missing_description_uses_most_common_for_sku() -> Result<()> {
    let cleaner = Cleaner::new(CleaningPolicy::default());
    let outcome = cleaner.clean(vec![
        create_record("536365", "A1", 1, "1.00", Some("WHITE LANTERN"))?,
        create_record("536366", "A1", 1, "1.00", Some("WHITE LANTERN"))?,
        create_record("536367", "A1", 1, "1.00", Some("LANTERN"))?,
        create_record("536368", "A1", 1, "1.00", None)?,
    ]);

    let imputed = outcome.records.iter().find(|record| record.invoice == "536368").ok_or_else(|| anyhow::anyhow!("row missing"))?;

    assert_eq!(imputed.description, "WHITE LANTERN");
    assert!(imputed.imputed);
    assert_eq!(outcome.tally.imputed_descriptions, 1);

    Ok(())
}

#[test]
fn test_description_from_rejected_rows_still_counts_for_imputation() -> Result<()> {
    let cleaner = Cleaner::new(CleaningPolicy::default());
    let outcome = cleaner.clean(vec![
        create_record("C536365", "A1", -1, "1.00", Some("LANTERN"))?,
        create_record("536368", "A1", 1, "1.00", None)?,
    ]);

    assert_eq!(outcome.records[0].description, "LANTERN");

    Ok(())
}

#[test]
fn test_sku_without_any_description_gets_placeholder() -> Result<()> {
    let policy = CleaningPolicy { placeholder_description: "NO DESCRIPTION".to_string(), ..CleaningPolicy::default() };
    let outcome = Cleaner::new(policy).clean(vec![create_record("536365", "B2", 1, "1.00", None)?]);

    assert_eq!(outcome.records[0].description, "NO DESCRIPTION");
    assert!(outcome.records[0].imputed);

    Ok(())
}

#[test]
fn test_duplicates_collapse_to_the_same_row_regardless_of_order() -> Result<()> {
    let cleaner = Cleaner::new(CleaningPolicy::default());
    let first = create_record("536365", "A1", 6, "2.55", Some("LANTERN"))?;
    let second = create_record("536365", "A1", 2, "2.55", Some("LANTERN"))?;

    let forward = cleaner.clean(vec![first.clone(), second.clone()]);
    let backward = cleaner.clean(vec![second, first]);

    assert_eq!(forward.records, backward.records);
    assert_eq!(forward.records.len(), 1);
    assert_eq!(forward.records[0].quantity, 2);
    assert_eq!(forward.tally.duplicate, 1);

    Ok(())
}

#[test]
fn test_rows_with_unrepresentable_line_total_are_malformed() -> Result<()> {
    let cleaner = Cleaner::new(CleaningPolicy::default());

    let outcome = cleaner.clean(vec![
        create_record("536365", "A1", 9_000_000_000_000_000_000, "10000000000", Some("LANTERN"))?,
        create_record("536366", "A1", 2, "10.00", Some("LANTERN"))?,
    ]);

    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].invoice, "536366");
    assert_eq!(outcome.tally.malformed, 1);

    Ok(())
}

#[test]
fn test_tally_total_excludes_imputations() {
    let mut tally = RejectionTally::default();
    tally.record(Rejection::Malformed);
    tally.record(Rejection::Duplicate);
    tally.record(Rejection::Duplicate);
    tally.imputed_descriptions = 5;

    assert_eq!(tally.total(), 3);
    assert_eq!(tally.duplicate, 2);
}
