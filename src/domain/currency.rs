use crate::utils::error::{QiwiError, Result};
use serde::{Serialize, Serializer};
use std::fmt;

/// An ISO-4217 currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Currency {
    pub numeric: u16,
    pub alpha: &'static str,
    pub name: &'static str,
}

const CURRENCIES: &[Currency] = &[
    Currency { numeric: 643, alpha: "RUB", name: "Russian ruble" },
    Currency { numeric: 840, alpha: "USD", name: "US dollar" },
    Currency { numeric: 978, alpha: "EUR", name: "Euro" },
    Currency { numeric: 398, alpha: "KZT", name: "Kazakhstani tenge" },
    Currency { numeric: 933, alpha: "BYN", name: "Belarusian ruble" },
    Currency { numeric: 980, alpha: "UAH", name: "Ukrainian hryvnia" },
    Currency { numeric: 944, alpha: "AZN", name: "Azerbaijani manat" },
    Currency { numeric: 51, alpha: "AMD", name: "Armenian dram" },
    Currency { numeric: 981, alpha: "GEL", name: "Georgian lari" },
    Currency { numeric: 417, alpha: "KGS", name: "Kyrgyzstani som" },
    Currency { numeric: 498, alpha: "MDL", name: "Moldovan leu" },
    Currency { numeric: 972, alpha: "TJS", name: "Tajikistani somoni" },
    Currency { numeric: 934, alpha: "TMT", name: "Turkmenistan manat" },
    Currency { numeric: 860, alpha: "UZS", name: "Uzbekistan sum" },
    Currency { numeric: 826, alpha: "GBP", name: "Pound sterling" },
    Currency { numeric: 156, alpha: "CNY", name: "Renminbi" },
    Currency { numeric: 392, alpha: "JPY", name: "Japanese yen" },
    Currency { numeric: 756, alpha: "CHF", name: "Swiss franc" },
    Currency { numeric: 949, alpha: "TRY", name: "Turkish lira" },
    Currency { numeric: 985, alpha: "PLN", name: "Polish zloty" },
    Currency { numeric: 203, alpha: "CZK", name: "Czech koruna" },
    Currency { numeric: 376, alpha: "ILS", name: "Israeli new shekel" },
    Currency { numeric: 356, alpha: "INR", name: "Indian rupee" },
];

impl Currency {
    /// Canonical numeric code as sent on the wire, zero padded to three digits.
    pub fn code(&self) -> String {
        format!("{:03}", self.numeric)
    }

    pub fn from_numeric(numeric: u16) -> Result<Self> {
        CURRENCIES
            .iter()
            .find(|c| c.numeric == numeric)
            .copied()
            .ok_or_else(|| lookup_error(numeric.to_string()))
    }

    pub fn from_alpha(alpha: &str) -> Result<Self> {
        CURRENCIES
            .iter()
            .find(|c| c.alpha == alpha)
            .copied()
            .ok_or_else(|| lookup_error(alpha.to_string()))
    }

    /// Accepts either `"RUB"` or `"643"`.
    pub fn lookup(code: &str) -> Result<Self> {
        if !code.is_empty() && code.chars().all(|c| c.is_ascii_digit()) {
            let numeric = code.parse::<u16>().map_err(|_| lookup_error(code.to_string()))?;
            Self::from_numeric(numeric)
        } else {
            Self::from_alpha(code)
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.alpha, self.code())
    }
}

impl Serialize for Currency {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.code())
    }
}

fn lookup_error(value: String) -> QiwiError {
    QiwiError::ParameterLookup {
        kind: "currency",
        value,
    }
}

/// Anything that can name a currency.
#[derive(Debug, Clone, PartialEq)]
pub enum CurrencyRef {
    Resolved(Currency),
    Code(String),
    Numeric(u16),
}

impl From<Currency> for CurrencyRef {
    fn from(currency: Currency) -> Self {
        CurrencyRef::Resolved(currency)
    }
}

impl From<&str> for CurrencyRef {
    fn from(code: &str) -> Self {
        CurrencyRef::Code(code.to_string())
    }
}

impl From<String> for CurrencyRef {
    fn from(code: String) -> Self {
        CurrencyRef::Code(code)
    }
}

impl From<u16> for CurrencyRef {
    fn from(numeric: u16) -> Self {
        CurrencyRef::Numeric(numeric)
    }
}

impl CurrencyRef {
    pub fn resolve(&self) -> Result<Currency> {
        match self {
            CurrencyRef::Resolved(currency) => Ok(*currency),
            CurrencyRef::Code(code) => Currency::lookup(code),
            CurrencyRef::Numeric(numeric) => Currency::from_numeric(*numeric),
        }
    }
}

/// Numeric wire code for any currency reference.
pub fn get_currency(currency: impl Into<CurrencyRef>) -> Result<String> {
    currency.into().resolve().map(|c| c.code())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_alpha_and_numeric() {
        assert_eq!(get_currency("RUB").unwrap(), "643");
        assert_eq!(get_currency("643").unwrap(), "643");
        assert_eq!(get_currency(840u16).unwrap(), "840");
        assert_eq!(get_currency("AMD").unwrap(), "051");
        assert_eq!(get_currency("051").unwrap(), "051");
    }

    #[test]
    fn test_resolved_currency_is_returned_unchanged() {
        let eur = Currency::from_alpha("EUR").unwrap();
        assert_eq!(get_currency(eur).unwrap(), eur.code());
    }

    #[test]
    fn test_lookup_is_idempotent() {
        for input in ["RUB", "USD", "978", "KZT", "51"] {
            let once = get_currency(input).unwrap();
            let twice = get_currency(once.as_str()).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_unknown_currency_is_lookup_error() {
        for input in ["XXX", "rub", "999", ""] {
            assert!(matches!(
                get_currency(input),
                Err(QiwiError::ParameterLookup { kind: "currency", .. })
            ));
        }
        assert!(get_currency(1u16).is_err());
    }
}
