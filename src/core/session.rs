use crate::core::params::params_filter;
use crate::utils::error::{QiwiError, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use serde_json::{json, Value};
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Serializes outgoing request bodies.
pub type JsonSerializer = fn(&Value) -> serde_json::Result<Vec<u8>>;

#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub token: Option<String>,
    pub timeout: Option<Duration>,
    pub content_type: Option<String>,
    pub accept_type: Option<String>,
}

impl SessionOptions {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..Self::default()
        }
    }
}

/// HTTP session shared by all calls of one client.
///
/// Cloning is cheap and shares the connection pool.
#[derive(Debug, Clone)]
pub struct Session {
    client: Client,
    headers: HeaderMap,
    timeout: Duration,
    serializer: JsonSerializer,
}

impl Session {
    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn default_headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn serialize_body(&self, body: &Value) -> Result<Vec<u8>> {
        Ok((self.serializer)(body)?)
    }
}

/// 建立 HTTP session：預設 header、逾時與 JSON 序列化。不會主動建立連線。
pub fn new_http_session(options: &SessionOptions) -> Result<Session> {
    let authorization = options
        .token
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .map(|t| format!("Bearer {}", t));

    let header_values = params_filter(&json!({
        "Accept": options.accept_type.as_deref().unwrap_or(JSON_CONTENT_TYPE),
        "Content-Type": options.content_type.as_deref().unwrap_or(JSON_CONTENT_TYPE),
        "Authorization": authorization,
    }));

    let mut headers = HeaderMap::new();
    for (key, value) in header_values {
        if value.is_empty() {
            continue;
        }
        let name = HeaderName::from_str(&key)
            .map_err(|e| QiwiError::InvalidHeader(format!("Invalid header name ({}): {}", key, e)))?;
        let mut value = HeaderValue::from_str(&value)
            .map_err(|e| QiwiError::InvalidHeader(format!("Invalid header value for {}: {}", key, e)))?;
        if name == reqwest::header::AUTHORIZATION {
            value.set_sensitive(true);
        }
        headers.insert(name, value);
    }

    let timeout = options.timeout.unwrap_or(DEFAULT_TIMEOUT);
    let client = Client::builder()
        .default_headers(headers.clone())
        .timeout(timeout)
        .build()?;

    tracing::debug!(
        "🔧 HTTP session created (timeout: {:?}, auth: {})",
        timeout,
        headers.contains_key(reqwest::header::AUTHORIZATION)
    );

    Ok(Session {
        client,
        headers,
        timeout,
        serializer: serde_json::to_vec,
    })
}
