use anyhow::Result;
use httpmock::prelude::*;
use qiwi_client::{
    ChequeType, DomainValue, HistoryQuery, IdentificationWidget, PaymentType, Provider,
    QiwiError, QiwiWallet, Urls,
};

const WALLET: &str = "79001234567";

fn wallet(server: &MockServer) -> Result<QiwiWallet> {
    Ok(QiwiWallet::with_urls("test-token", Urls::with_base(&server.base_url()))?)
}

#[tokio::test]
async fn test_history_with_bearer_token() -> Result<()> {
    let server = MockServer::start_async().await;

    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(format!("/payment-history/v2/persons/{}/payments", WALLET))
                .header("Authorization", "Bearer test-token")
                .query_param("rows", "2")
                .query_param("operation", "OUT");
            then.status(200).json_body(serde_json::json!({
                "data": [
                    {
                        "txnId": 9309,
                        "personId": 79001234567i64,
                        "date": "2024-02-01T12:00:00+03:00",
                        "errorCode": 0,
                        "error": null,
                        "status": "SUCCESS",
                        "type": "OUT",
                        "statusText": "Success",
                        "trmTxnId": "1489826461807",
                        "account": "0003***",
                        "sum": {"amount": 70, "currency": 643},
                        "commission": {"amount": 0, "currency": 643},
                        "total": {"amount": 70, "currency": 643},
                        "provider": {"id": 466, "shortName": "Tinkoff", "longName": "Тинькофф Банк"},
                        "comment": null,
                        "currencyRate": 1,
                        "extras": {"unused": true}
                    },
                    {
                        "txnId": 9310,
                        "personId": 79001234567i64,
                        "date": "2024-02-02T09:30:00+03:00",
                        "errorCode": 0,
                        "status": "SUCCESS",
                        "type": "OUT",
                        "sum": {"amount": 15.5, "currency": "643"}
                    }
                ],
                "nextTxnId": 9311,
                "nextTxnDate": "2024-02-02T09:30:00+03:00",
                "debugInfo": "dropped by the schema filter"
            }));
        })
        .await;

    let client = wallet(&server)?;
    let query = HistoryQuery::new(2).with_operation("outgoing")?;
    let history = client.history(WALLET, &query).await?;

    api_mock.assert_async().await;
    assert_eq!(history.data.len(), 2);
    assert_eq!(history.data[0].txn_id, 9309);
    assert_eq!(history.data[0].payment_type()?, PaymentType::Outgoing);
    assert_eq!(
        history.data[0].provider.as_ref().and_then(|p| p.provider()),
        Some(Provider::Tinkoff)
    );
    assert_eq!(history.data[1].sum.currency()?.alpha, "RUB");
    assert_eq!(history.next_txn_id, Some(9311));

    let next = HistoryQuery::new(2).after(&history).to_params()?;
    assert_eq!(next["nextTxnId"], "9311");
    Ok(())
}

#[tokio::test]
async fn test_commission_posts_resolved_currency() -> Result<()> {
    let server = MockServer::start_async().await;

    let api_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/sinap/providers/466/onlineCommission")
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "account": "4256000000000000",
                    "paymentMethod": {"type": "Account", "accountId": "643"},
                    "purchaseTotals": {"total": {"amount": 1000.0, "currency": "643"}}
                }));
            then.status(200).json_body(serde_json::json!({
                "providerId": 466,
                "withdrawSum": {"amount": 1020.0, "currency": "643"},
                "enrollmentSum": {"amount": 1000.0, "currency": "643"},
                "qwCommission": {"amount": 20.0, "currency": "643"},
                "fundingSourceCommission": {"amount": 0, "currency": "643"},
                "withdrawToEnrollmentRate": 1
            }));
        })
        .await;

    let client = wallet(&server)?;
    let provider = Provider::resolve("Tinkoff Bank")?;
    let commission = client
        .commission(provider, "4256000000000000", 1000.0, "RUB")
        .await?;

    api_mock.assert_async().await;
    assert_eq!(commission.provider_id, 466);
    assert_eq!(commission.qw_commission.amount, 20.0);
    assert_eq!(commission.withdraw_to_enrollment_rate, Some(1.0));
    Ok(())
}

#[tokio::test]
async fn test_cheque_file_returns_bytes() -> Result<()> {
    let server = MockServer::start_async().await;

    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/payment-history/v1/transactions/9309/cheque/file")
                .query_param("type", "IN")
                .query_param("format", "PDF");
            then.status(200)
                .header("Content-Type", "application/pdf")
                .body(b"%PDF-1.4 fake".to_vec());
        })
        .await;

    let client = wallet(&server)?;
    let bytes = client
        .cheque_file(9309, PaymentType::Incoming, ChequeType::Pdf.code())
        .await?;

    api_mock.assert_async().await;
    assert!(bytes.starts_with(b"%PDF"));
    Ok(())
}

#[tokio::test]
async fn test_cheque_file_not_found() -> Result<()> {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/payment-history/v1/transactions/1/cheque/file");
            then.status(404).body("");
        })
        .await;

    let client = wallet(&server)?;
    let err = client
        .cheque_file(1, PaymentType::Outgoing, "JPEG")
        .await
        .unwrap_err();
    assert!(matches!(err, QiwiError::Api { status: 404, .. }));
    Ok(())
}

#[tokio::test]
async fn test_identification_sends_only_set_fields() -> Result<()> {
    let server = MockServer::start_async().await;

    let api_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(format!("/identification/v1/persons/{}/identification", WALLET))
                .json_body(serde_json::json!({
                    "birthDate": "1998-02-11",
                    "firstName": "Иван",
                    "lastName": "Иванов",
                    "passport": "4400111222"
                }));
            then.status(200).json_body(serde_json::json!({
                "id": 79001234567i64,
                "type": "SIMPLE",
                "birthDate": "1998-02-11",
                "firstName": "Иван",
                "middleName": null,
                "lastName": "Иванов",
                "passport": "4400111222",
                "inn": null,
                "snils": null,
                "oms": null
            }));
        })
        .await;

    let widget = IdentificationWidget {
        birth_date: Some("1998-02-11".to_string()),
        first_name: Some("Иван".to_string()),
        last_name: Some("Иванов".to_string()),
        passport: Some("4400111222".to_string()),
        ..Default::default()
    };

    let client = wallet(&server)?;
    let result = client.identification(WALLET, &widget).await?;

    api_mock.assert_async().await;
    assert_eq!(result.level, "SIMPLE");
    assert_eq!(result.first_name.as_deref(), Some("Иван"));
    assert_eq!(result.inn, None);
    Ok(())
}

#[tokio::test]
async fn test_error_payload_in_success_response() -> Result<()> {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path("/sinap/providers/99/onlineCommission");
            then.status(200).json_body(serde_json::json!({
                "errorCode": "validation.error",
                "userMessage": "Неверный номер счета"
            }));
        })
        .await;

    let client = wallet(&server)?;
    let err = client
        .commission(Provider::QiwiWallet, "000", 1.0, 643u16)
        .await
        .unwrap_err();

    match err {
        QiwiError::Api { status, code, .. } => {
            assert_eq!(status, 200);
            assert_eq!(code.as_deref(), Some("validation.error"));
        }
        other => panic!("expected API error, got {other:?}"),
    }
    Ok(())
}
