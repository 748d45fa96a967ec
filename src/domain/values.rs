use crate::utils::error::{QiwiError, Result};
use serde::{Serialize, Serializer};
use std::fmt;

/// Enum-like value with a fixed wire code and a static alias table.
///
/// Every alias in [`DomainValue::ALIASES`] resolves to exactly one variant; lookup is
/// case-sensitive and an unknown alias is a [`QiwiError::ParameterLookup`].
pub trait DomainValue: Copy + Sized + 'static {
    /// Human readable name used in lookup errors.
    const KIND: &'static str;
    const ALIASES: &'static [(&'static str, Self)];

    type Code: fmt::Display;

    fn code(&self) -> Self::Code;

    fn resolve(alias: &str) -> Result<Self> {
        Self::ALIASES
            .iter()
            .find(|(name, _)| *name == alias)
            .map(|(_, value)| *value)
            .ok_or_else(|| QiwiError::ParameterLookup {
                kind: Self::KIND,
                value: alias.to_string(),
            })
    }

    /// All aliases registered for this value.
    fn aliases(&self) -> Vec<&'static str>
    where
        Self: PartialEq,
    {
        Self::ALIASES
            .iter()
            .filter(|(_, value)| value == self)
            .map(|(name, _)| *name)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentType {
    Incoming,
    Outgoing,
    QiwiCard,
    All,
}

impl DomainValue for PaymentType {
    const KIND: &'static str = "payment type";
    const ALIASES: &'static [(&'static str, Self)] = &[
        ("incoming", PaymentType::Incoming),
        ("IN", PaymentType::Incoming),
        ("outgoing", PaymentType::Outgoing),
        ("OUT", PaymentType::Outgoing),
        ("qiwi_card", PaymentType::QiwiCard),
        ("QIWI_CARD", PaymentType::QiwiCard),
        ("all", PaymentType::All),
        ("ALL", PaymentType::All),
    ];

    type Code = &'static str;

    fn code(&self) -> &'static str {
        match self {
            PaymentType::Incoming => "IN",
            PaymentType::Outgoing => "OUT",
            PaymentType::QiwiCard => "QIWI_CARD",
            PaymentType::All => "ALL",
        }
    }
}

/// Transfer destinations accepted by the payment endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    QiwiWallet,
    VisaRu,
    VisaForeign,
    MastercardRu,
    MastercardForeign,
    MirCard,
    Tinkoff,
    AlfaBank,
    PromsvyazBank,
    RusskiyStandart,
    /// 按銀行帳戶資料轉帳
    Custom,
}

impl DomainValue for Provider {
    const KIND: &'static str = "provider";
    const ALIASES: &'static [(&'static str, Self)] = &[
        ("QIWI_WALLET", Provider::QiwiWallet),
        ("QIWI Wallet", Provider::QiwiWallet),
        ("VISA_RU", Provider::VisaRu),
        ("VISA_FOREIGN", Provider::VisaForeign),
        ("MASTERCARD_RU", Provider::MastercardRu),
        ("MASTERCARD_FOREIGN", Provider::MastercardForeign),
        ("MIR_CARD", Provider::MirCard),
        ("MIR", Provider::MirCard),
        ("TINKOFF", Provider::Tinkoff),
        ("TINKOFF_BANK", Provider::Tinkoff),
        ("Tinkoff", Provider::Tinkoff),
        ("Tinkoff Bank", Provider::Tinkoff),
        ("ALPHA", Provider::AlfaBank),
        ("ALFA", Provider::AlfaBank),
        ("ALFA_BANK", Provider::AlfaBank),
        ("ALPHA_BANK", Provider::AlfaBank),
        ("Alfa-Bank", Provider::AlfaBank),
        ("PROSVYAZ_BANK", Provider::PromsvyazBank),
        ("Promsvyazbank", Provider::PromsvyazBank),
        ("RUSSKIY_STANDART", Provider::RusskiyStandart),
        ("Russian Standard", Provider::RusskiyStandart),
        ("CUSTOM", Provider::Custom),
        ("BANK_DETAILS", Provider::Custom),
    ];

    type Code = u32;

    fn code(&self) -> u32 {
        match self {
            Provider::QiwiWallet => 99,
            Provider::VisaRu => 1963,
            Provider::VisaForeign => 1960,
            Provider::MastercardRu => 21013,
            Provider::MastercardForeign => 21012,
            Provider::MirCard => 31652,
            Provider::Tinkoff => 466,
            Provider::AlfaBank => 464,
            Provider::PromsvyazBank => 821,
            Provider::RusskiyStandart => 815,
            Provider::Custom => 1717,
        }
    }
}

impl Provider {
    const ALL: [Provider; 11] = [
        Provider::QiwiWallet,
        Provider::VisaRu,
        Provider::VisaForeign,
        Provider::MastercardRu,
        Provider::MastercardForeign,
        Provider::MirCard,
        Provider::Tinkoff,
        Provider::AlfaBank,
        Provider::PromsvyazBank,
        Provider::RusskiyStandart,
        Provider::Custom,
    ];

    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|p| i64::from(p.code()) == code)
    }
}

/// Receipt file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChequeType {
    Jpeg,
    Pdf,
}

impl DomainValue for ChequeType {
    const KIND: &'static str = "cheque format";
    const ALIASES: &'static [(&'static str, Self)] =
        &[("JPEG", ChequeType::Jpeg), ("PDF", ChequeType::Pdf)];

    type Code = &'static str;

    fn code(&self) -> &'static str {
        match self {
            ChequeType::Jpeg => "JPEG",
            ChequeType::Pdf => "PDF",
        }
    }
}

impl ChequeType {
    pub fn contains(format: &str) -> bool {
        Self::resolve(format).is_ok()
    }
}

macro_rules! wire_code_impls {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.code())
                }
            }

            impl std::str::FromStr for $ty {
                type Err = QiwiError;

                fn from_str(s: &str) -> Result<Self> {
                    <$ty as DomainValue>::resolve(s)
                }
            }

            impl Serialize for $ty {
                fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                    serializer.collect_str(&self.code())
                }
            }
        )*
    };
}

wire_code_impls!(PaymentType, Provider, ChequeType);
