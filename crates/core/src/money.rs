//! Money amounts in minor units with an explicit currency.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Currencies the reseller prices in (East African markets plus USD).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Kes,
    Ugx,
    Tzs,
    Rwf,
    Bif,
    Usd,
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Kes => "KES",
            Currency::Ugx => "UGX",
            Currency::Tzs => "TZS",
            Currency::Rwf => "RWF",
            Currency::Bif => "BIF",
            Currency::Usd => "USD",
        }
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Currency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "KES" => Ok(Currency::Kes),
            "UGX" => Ok(Currency::Ugx),
            "TZS" => Ok(Currency::Tzs),
            "RWF" => Ok(Currency::Rwf),
            "BIF" => Ok(Currency::Bif),
            "USD" => Ok(Currency::Usd),
            other => Err(DomainError::validation(format!(
                "unknown currency: {other}"
            ))),
        }
    }
}

/// An amount of money in the smallest currency unit (e.g. cents).
///
/// Arithmetic across currencies is intentionally unrepresentable: totals are
/// computed per currency by the callers that hold mixed-currency rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    pub amount_minor: i64,
    pub currency: Currency,
}

impl Money {
    pub fn new(amount_minor: i64, currency: Currency) -> Self {
        Self {
            amount_minor,
            currency,
        }
    }

    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    pub fn is_positive(&self) -> bool {
        self.amount_minor > 0
    }

    /// Add another amount of the same currency.
    pub fn checked_add(&self, other: Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        Some(Money::new(
            self.amount_minor.checked_add(other.amount_minor)?,
            self.currency,
        ))
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} {}", self.currency, self.amount_minor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_parses_case_insensitively() {
        assert_eq!("kes".parse::<Currency>().unwrap(), Currency::Kes);
        assert_eq!("UGX".parse::<Currency>().unwrap(), Currency::Ugx);
        assert!("EUR".parse::<Currency>().is_err());
    }

    #[test]
    fn mixed_currency_addition_is_rejected() {
        let a = Money::new(100, Currency::Kes);
        let b = Money::new(100, Currency::Ugx);
        assert!(a.checked_add(b).is_none());
        assert_eq!(
            a.checked_add(Money::new(50, Currency::Kes)),
            Some(Money::new(150, Currency::Kes))
        );
    }
}
