//! Currency codes supported by the ledger
//!
//! Currencies are only tags: an account is opened in one currency and every
//! operation on it must use that same currency. There is no conversion.

use super::error::BankError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Three-letter currency code
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// US dollar
    Usd,
    /// Euro
    Eur,
    /// Ukrainian hryvnia
    ///
    /// Older data files spell this `UAN`, which is accepted when parsing.
    #[serde(alias = "UAN")]
    Uah,
}

impl Currency {
    /// All supported currencies
    pub const ALL: [Currency; 3] = [Currency::Usd, Currency::Eur, Currency::Uah];

    /// Canonical currency code
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Uah => "UAH",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = BankError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "UAH" | "UAN" => Ok(Currency::Uah),
            _ => Err(BankError::unsupported_currency(value)),
        }
    }
}
