use anyhow::Result;
use httpmock::prelude::*;
use qiwi_client::{QiwiError, QiwiMaps, SessionOwner, Urls};
use tokio_test::assert_ok;

async fn partners_in_scope(maps: &QiwiMaps) -> qiwi_client::Result<usize> {
    let scoped = maps.enter();
    let partners = scoped.partners().await?;
    Ok(partners.len())
}

/// 範圍正常結束後 session 已關閉
#[tokio::test]
async fn test_scope_closes_session_after_success() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/locator/v3/ttp-groups");
            then.status(200)
                .json_body(serde_json::json!([{"id": 1, "label": "QIWI"}]));
        })
        .await;

    let maps = QiwiMaps::with_urls(Urls::with_base(&server.base_url()))?;
    assert_eq!(assert_ok!(partners_in_scope(&maps).await), 1);

    assert!(maps.is_closed());
    let err = maps.partners().await.unwrap_err();
    assert!(matches!(err, QiwiError::SessionClosed));
    Ok(())
}

/// 範圍因錯誤提前結束時 session 同樣被關閉
#[tokio::test]
async fn test_scope_closes_session_after_error() -> Result<()> {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/locator/v3/ttp-groups");
            then.status(401).json_body(serde_json::json!({
                "errorCode": "auth.unauthorized",
                "userMessage": "Unauthorized",
            }));
        })
        .await;

    let maps = QiwiMaps::with_urls(Urls::with_base(&server.base_url()))?;
    let err = partners_in_scope(&maps).await.unwrap_err();
    assert!(matches!(err, QiwiError::Api { status: 401, .. }));

    let err = maps.partners().await.unwrap_err();
    assert!(matches!(err, QiwiError::SessionClosed));
    assert_eq!(err.category(), qiwi_client::utils::error::ErrorCategory::Usage);

    // the closed session never reaches the server
    api_mock.assert_hits_async(1).await;
    Ok(())
}

#[tokio::test]
async fn test_explicit_close_is_safe_to_repeat() -> Result<()> {
    let maps = QiwiMaps::new()?;
    assert!(maps.close());
    assert!(!maps.close());

    {
        // a scope over an already closed client does not panic on drop
        let _scoped = maps.enter();
    }
    assert!(maps.is_closed());
    Ok(())
}
