use super::{aggregate, AveragingRule};

use std::str::FromStr;

use anyhow::Result;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::models::{CleanRecord, QualityFlag};
use crate::pipeline::PipelineError;

fn create_record(invoice: &str, sku: &str, quantity: i64, price: &str, description: &str, imputed: bool) -> Result<CleanRecord> {
    Ok(CleanRecord {
        invoice: invoice.to_string(),
        sku: sku.to_string(),
        invoice_date: NaiveDateTime::parse_from_str("2011-01-10 10:32:00", "%Y-%m-%d %H:%M:%S")?,
        quantity,
        unit_price: Decimal::from_str(price)?,
        description: description.to_string(),
        customer_id: None,
        country: "France".to_string(),
        imputed
    })
}

#[test]
fn test_weighted_average_divides_sales_by_quantity() -> Result<()> {
    let records = vec![
        create_record("1", "A1", 2, "10.00", "LANTERN", false)?,
        create_record("2", "A1", 3, "12.00", "LANTERN", false)?,
    ];

    let aggregates = aggregate(&records, AveragingRule::Weighted)?;

    assert_eq!(aggregates.len(), 1);
    assert_eq!(aggregates[0].total_quantity, 5);
    assert_eq!(aggregates[0].total_sales, Decimal::from_str("56.00")?);
    assert_eq!(aggregates[0].avg_quote, Decimal::from_str("11.2")?);
    assert_eq!(aggregates[0].transactions, 2);

    Ok(())
}

#[test]
fn test_simple_average_gives_each_transaction_one_vote() -> Result<()> {
    let records = vec![
        create_record("1", "A1", 2, "10.00", "LANTERN", false)?,
        create_record("2", "A1", 3, "12.00", "LANTERN", false)?,
    ];

    let aggregates = aggregate(&records, AveragingRule::Simple)?;

    assert_eq!(aggregates[0].avg_quote, Decimal::from_str("11")?);

    Ok(())
}

#[test]
fn test_skus_are_emitted_in_ascending_order() -> Result<()> {
    let records = vec![
        create_record("1", "85123A", 1, "2.55", "HEART", false)?,
        create_record("2", "22752", 1, "7.65", "DOLLY", false)?,
        create_record("3", "71053", 1, "3.39", "LANTERN", false)?,
    ];

    let skus: Vec<String> = aggregate(&records, AveragingRule::Weighted)?.into_iter().map(|a| a.sku).collect();

    assert_eq!(skus, vec!["22752", "71053", "85123A"]);

    Ok(())
}

#[test]
fn test_any_imputed_row_flags_the_sku() -> Result<()> {
    let records = vec![
        create_record("1", "A1", 1, "1.00", "LANTERN", false)?,
        create_record("2", "A1", 1, "1.00", "LANTERN", true)?,
        create_record("3", "B2", 1, "1.00", "DOLLY", false)?,
    ];

    let aggregates = aggregate(&records, AveragingRule::Weighted)?;

    assert_eq!(aggregates[0].quality_flag, QualityFlag::Imputed);
    assert_eq!(aggregates[1].quality_flag, QualityFlag::Clean);

    Ok(())
}

#[test]
fn test_description_is_most_common_for_the_sku() -> Result<()> {
    let records = vec![
        create_record("1", "A1", 1, "1.00", "WHITE LANTERN", false)?,
        create_record("2", "A1", 1, "1.00", "LANTERN", false)?,
        create_record("3", "A1", 1, "1.00", "LANTERN", false)?,
    ];

    assert_eq!(aggregate(&records, AveragingRule::Weighted)?[0].description, "LANTERN");

    Ok(())
}

#[test]
fn test_no_records_yield_no_aggregates() -> Result<()> {
    assert!(aggregate(&[], AveragingRule::Weighted)?.is_empty());

    Ok(())
}

#[test]
fn test_quantity_total_out_of_range_is_an_overflow_error() -> Result<()> {
    let records = vec![
        create_record("1", "A1", 5_000_000_000_000_000_000, "1.00", "LANTERN", false)?,
        create_record("2", "A1", 5_000_000_000_000_000_000, "1.00", "LANTERN", false)?,
    ];

    match aggregate(&records, AveragingRule::Weighted) {
        Err(PipelineError::Overflow { sku }) => assert_eq!(sku, "A1"),
        other => panic!("expected overflow, got {other:?}")
    }

    Ok(())
}

#[test]
fn test_sales_total_out_of_range_is_an_overflow_error() -> Result<()> {
    let records = vec![
        create_record("1", "B2", 1_000_000_000_000_000_000, "50000000000", "TIN", false)?,
        create_record("2", "B2", 1_000_000_000_000_000_000, "50000000000", "TIN", false)?,
    ];

    let result = aggregate(&records, AveragingRule::Weighted);

    assert!(matches!(result, Err(PipelineError::Overflow { .. })));

    Ok(())
}
