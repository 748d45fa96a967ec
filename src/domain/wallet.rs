use crate::core::params::{params_filter, Params};
use crate::domain::currency::Currency;
use crate::domain::ports::ApiModel;
use crate::domain::values::{DomainValue, PaymentType, Provider};
use crate::utils::error::{QiwiError, Result};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::json;

/// 帳戶歷史每頁筆數上限
pub const MAX_HISTORY_ROWS: u32 = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryQuery {
    pub rows: u32,
    pub operation: Option<PaymentType>,
    pub sources: Option<Vec<String>>,
    pub start_date: Option<DateTime<FixedOffset>>,
    pub end_date: Option<DateTime<FixedOffset>>,
    pub next_txn_id: Option<i64>,
    pub next_txn_date: Option<DateTime<FixedOffset>>,
}

impl HistoryQuery {
    pub fn new(rows: u32) -> Self {
        Self {
            rows,
            operation: None,
            sources: None,
            start_date: None,
            end_date: None,
            next_txn_id: None,
            next_txn_date: None,
        }
    }

    /// Sets the operation filter from any payment type alias (`"incoming"`, `"IN"`, ...).
    pub fn with_operation(mut self, alias: &str) -> Result<Self> {
        self.operation = Some(PaymentType::resolve(alias)?);
        Ok(self)
    }

    pub fn with_period(
        mut self,
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    ) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Continues from the cursor returned by a previous page.
    pub fn after(mut self, page: &History) -> Self {
        self.next_txn_id = page.next_txn_id;
        self.next_txn_date = page.next_txn_date;
        self
    }

    pub fn to_params(&self) -> Result<Params> {
        if self.rows == 0 || self.rows > MAX_HISTORY_ROWS {
            return Err(QiwiError::InvalidParameter {
                field: "rows".to_string(),
                value: self.rows.to_string(),
                reason: format!("must be between 1 and {}", MAX_HISTORY_ROWS),
            });
        }
        if self.start_date.is_some() != self.end_date.is_some() {
            return Err(QiwiError::InvalidParameter {
                field: "startDate/endDate".to_string(),
                value: format!("{:?}/{:?}", self.start_date, self.end_date),
                reason: "both bounds of the period are required".to_string(),
            });
        }

        Ok(params_filter(&json!({
            "rows": self.rows,
            "operation": self.operation.map(|op| op.code()),
            "sources": self.sources,
            "startDate": self.start_date.map(|d| d.to_rfc3339()),
            "endDate": self.end_date.map(|d| d.to_rfc3339()),
            "nextTxnId": self.next_txn_id,
            "nextTxnDate": self.next_txn_date.map(|d| d.to_rfc3339()),
        })))
    }
}

fn numeric_code<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<u16, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u16),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

/// Money amount; the API sends the currency either as a number or as a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amount {
    pub amount: f64,
    #[serde(deserialize_with = "numeric_code")]
    pub currency: u16,
}

impl Amount {
    pub fn currency(&self) -> Result<Currency> {
        Currency::from_numeric(self.currency)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderInfo {
    pub id: i64,
    pub short_name: Option<String>,
    pub long_name: Option<String>,
}

impl ProviderInfo {
    pub fn provider(&self) -> Option<Provider> {
        Provider::from_code(self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub txn_id: i64,
    pub person_id: i64,
    pub date: DateTime<FixedOffset>,
    pub error_code: Option<i64>,
    pub error: Option<String>,
    pub status: String,
    #[serde(rename = "type")]
    pub txn_type: String,
    pub status_text: Option<String>,
    pub trm_txn_id: Option<String>,
    pub account: Option<String>,
    pub sum: Amount,
    pub commission: Option<Amount>,
    pub total: Option<Amount>,
    pub provider: Option<ProviderInfo>,
    pub comment: Option<String>,
    pub currency_rate: Option<f64>,
}

impl Transaction {
    pub fn payment_type(&self) -> Result<PaymentType> {
        PaymentType::resolve(&self.txn_type)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct History {
    pub data: Vec<Transaction>,
    pub next_txn_id: Option<i64>,
    pub next_txn_date: Option<DateTime<FixedOffset>>,
}

impl ApiModel for History {
    const FIELDS: &'static [&'static str] = &["data", "next_txn_id", "next_txn_date"];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commission {
    pub provider_id: i64,
    pub withdraw_sum: Amount,
    pub enrollment_sum: Amount,
    pub qw_commission: Amount,
    pub funding_source_commission: Option<Amount>,
    pub withdraw_to_enrollment_rate: Option<f64>,
}

impl ApiModel for Commission {
    const FIELDS: &'static [&'static str] = &[
        "provider_id",
        "withdraw_sum",
        "enrollment_sum",
        "qw_commission",
        "funding_source_commission",
        "withdraw_to_enrollment_rate",
    ];
}
