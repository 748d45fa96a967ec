use crate::config::toml_config::ClientConfig;
use crate::config::urls::Urls;
use crate::core::params::params_filter;
use crate::core::requests::{Requests, SessionOwner};
use crate::core::response::SpecMode;
use crate::core::session::{new_http_session, SessionOptions};
use crate::domain::currency::{get_currency, CurrencyRef};
use crate::domain::identification::{IdentificationResult, IdentificationWidget};
use crate::domain::values::{ChequeType, DomainValue, PaymentType, Provider};
use crate::domain::wallet::{Commission, History, HistoryQuery};
use crate::utils::error::{QiwiError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_required_field};
use serde_json::json;

/// Wallet API client; every call is authorized with the bearer token.
#[derive(Debug)]
pub struct QiwiWallet {
    requests: Requests,
    urls: Urls,
}

impl QiwiWallet {
    pub fn new(token: &str) -> Result<Self> {
        Self::with_urls(token, Urls::default())
    }

    pub fn with_urls(token: &str, urls: Urls) -> Result<Self> {
        validate_non_empty_string("token", token)?;
        let session = new_http_session(&SessionOptions::with_token(token))?;
        Ok(Self {
            requests: Requests::new(session),
            urls,
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let options = config.session_options();
        validate_required_field("client.token", &options.token)?;
        let session = new_http_session(&options)?;
        Ok(Self {
            requests: Requests::new(session),
            urls: config.urls.clone(),
        })
    }

    /// One page of payment history for `wallet` (phone number without `+`).
    pub async fn history(&self, wallet: &str, query: &HistoryQuery) -> Result<History> {
        let params = query.to_params()?;
        self.requests
            .get::<History>(&self.urls.history(wallet), Some(&params), SpecMode::Filter)
            .await?
            .into_one()
    }

    /// Commission the provider charges for transferring `amount` to `account`.
    pub async fn commission(
        &self,
        provider: Provider,
        account: &str,
        amount: f64,
        currency: impl Into<CurrencyRef>,
    ) -> Result<Commission> {
        let currency = get_currency(currency)?;
        let body = json!({
            "account": account,
            "paymentMethod": {
                "type": "Account",
                "accountId": currency,
            },
            "purchaseTotals": {
                "total": {
                    "amount": amount,
                    "currency": currency,
                },
            },
        });

        self.requests
            .post::<Commission, _>(&self.urls.commission(provider.code()), &body, SpecMode::Filter)
            .await?
            .into_one()
    }

    /// Receipt for a transaction as raw `JPEG` or `PDF` bytes.
    pub async fn cheque_file(
        &self,
        txn_id: i64,
        payment_type: PaymentType,
        format: &str,
    ) -> Result<Vec<u8>> {
        if !ChequeType::contains(format) {
            return Err(QiwiError::ParameterLookup {
                kind: ChequeType::KIND,
                value: format.to_string(),
            });
        }

        let params = params_filter(&json!({
            "type": payment_type.code(),
            "format": format,
        }));
        self.requests
            .get_bytes(&self.urls.cheque_file(txn_id), Some(&params))
            .await
    }

    /// Submits identification data; only the fields set on `widget` are sent.
    pub async fn identification(
        &self,
        wallet: &str,
        widget: &IdentificationWidget,
    ) -> Result<IdentificationResult> {
        if widget.is_empty() {
            return Err(QiwiError::InvalidParameter {
                field: "widget".to_string(),
                value: "{}".to_string(),
                reason: "at least one identification field is required".to_string(),
            });
        }

        self.requests
            .post::<IdentificationResult, _>(
                &self.urls.identification(wallet),
                widget,
                SpecMode::Filter,
            )
            .await?
            .into_one()
    }
}

impl SessionOwner for QiwiWallet {
    fn requests(&self) -> &Requests {
        &self.requests
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wallet_requires_token() {
        assert!(matches!(
            QiwiWallet::new(""),
            Err(QiwiError::InvalidConfigValueError { .. })
        ));
        assert!(matches!(
            QiwiWallet::from_config(&ClientConfig::default()),
            Err(QiwiError::MissingConfigError { .. })
        ));
    }

    #[tokio::test]
    async fn test_unknown_cheque_format_fails_before_request() {
        let wallet = QiwiWallet::with_urls("token", Urls::with_base("http://127.0.0.1:9")).unwrap();
        let err = wallet
            .cheque_file(1, PaymentType::Incoming, "PNG")
            .await
            .unwrap_err();
        assert!(matches!(err, QiwiError::ParameterLookup { kind: "cheque format", .. }));
    }

    #[tokio::test]
    async fn test_unknown_currency_fails_before_request() {
        let wallet = QiwiWallet::with_urls("token", Urls::with_base("http://127.0.0.1:9")).unwrap();
        let err = wallet
            .commission(Provider::QiwiWallet, "79001234567", 10.0, "XYZ")
            .await
            .unwrap_err();
        assert!(matches!(err, QiwiError::ParameterLookup { kind: "currency", .. }));
    }
}
