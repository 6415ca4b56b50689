use crate::types::errors::MoneyError;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{de, Deserialize, Deserializer};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::ops::AddAssign;
use std::str::FromStr;
use tracing::error;

const DECIMAL_PLACES: u32 = 2;

/// A currency amount printed with a fixed two decimal places.
///
/// The wrapped value keeps full precision; rounding (half away from zero)
/// only happens when the amount is displayed.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Money(Decimal);

impl Money {
    pub fn new(value: Decimal) -> Self {
        Money(value)
    }

    pub fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// The amount rounded to the display precision.
    pub fn rounded(&self) -> Decimal {
        let mut rounded = self.0.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(DECIMAL_PLACES);

        if rounded.is_zero() {
            rounded.set_sign_positive(true);
        }

        rounded
    }
}

impl AddAssign<Money> for Money {
    fn add_assign(&mut self, rhs: Money) {
        if let Some(new_val) = self.checked_add(rhs) {
            self.0 = new_val.0;
        } else {
            error!("Money AddAssign error: Overflow")
        }
    }
}

impl Display for Money {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.rounded())
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim().trim_start_matches('$');

        if value.is_empty() {
            return Err(MoneyError::InvalidFormat("Value is an empty string".to_string()));
        }

        let parsed = Decimal::from_str(value)
            .or_else(|_| Decimal::from_scientific(value))
            .map_err(|error| MoneyError::InvalidFormat(format!("'{value}' is not a decimal: {error}")))?;

        Ok(Money(parsed))
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Money::from_str(&value).map_err(de::Error::custom)
    }
}
