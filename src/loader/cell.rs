use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::types::Money;

const DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S"
];
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// Largest float that still converts to an integer without losing digits.
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

/// A single input value, independent of the file format it came from.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    DateTime(NaiveDateTime)
}

impl Cell {
    /// Trims text and maps blank text to `Empty`.
    pub fn text(value: &str) -> Self {
        let value = value.trim();

        if value.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Renders the cell as text. Whole floats print without a fraction, so a
    /// spreadsheet customer id of `17850.0` reads back as `17850`.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Text(value) => Some(value.clone()),
            Cell::Int(value) => Some(value.to_string()),
            Cell::Float(value) => match whole_float(*value) {
                Some(whole) => Some(whole.to_string()),
                None => Some(value.to_string())
            },
            Cell::DateTime(value) => Some(value.to_string())
        }
    }

    pub fn as_quantity(&self) -> Option<i64> {
        match self {
            Cell::Int(value) => Some(*value),
            Cell::Float(value) => whole_float(*value),
            Cell::Text(value) => value.parse::<i64>().ok().or_else(|| {
                Decimal::from_str(value).ok()
                    .filter(|decimal| decimal.fract().is_zero())
                    .and_then(|decimal| decimal.to_i64())
            }),
            Cell::Empty | Cell::DateTime(_) => None
        }
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Cell::Int(value) => Some(Decimal::from(*value)),
            //NOTE: Going through the shortest float representation keeps 2.55 as 2.55 instead of 2.54999...
            Cell::Float(value) if value.is_finite() => Decimal::from_str(&value.to_string()).ok(),
            Cell::Text(value) => Money::from_str(value).ok().map(|money| money.value()),
            _ => None
        }
    }

    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Cell::DateTime(value) => Some(*value),
            Cell::Text(value) => parse_datetime(value),
            _ => None
        }
    }
}

fn whole_float(value: f64) -> Option<i64> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_EXACT_FLOAT {
        Some(value as i64)
    } else {
        None
    }
}

pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS.iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            DATE_FORMATS.iter()
                .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}
