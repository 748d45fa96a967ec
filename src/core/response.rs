use crate::domain::ports::ApiModel;
use crate::utils::error::{QiwiError, Result};
use crate::utils::naming::to_snake_case;
use reqwest::StatusCode;
use serde_json::{Map, Value};

/// How strictly a response is checked against [`ApiModel::FIELDS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecMode {
    /// No schema pass; unknown keys are ignored by the decoder.
    Ignore,
    /// Keys missing from the schema are dropped before decoding.
    Filter,
    /// Keys missing from the schema are rejected.
    ///
    /// 只檢查最外層的 key；巢狀物件交給 serde 解碼，未知欄位會被忽略。
    Strict,
}

impl SpecMode {
    pub fn from_spec_ignore(spec_ignore: bool) -> Self {
        if spec_ignore {
            SpecMode::Ignore
        } else {
            SpecMode::Filter
        }
    }
}

/// A single entity or an ordered list of entities, following the body shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Mapped<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> Mapped<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Mapped::One(item) => vec![item],
            Mapped::Many(items) => items,
        }
    }

    pub fn into_one(self) -> Result<T> {
        match self {
            Mapped::One(item) => Ok(item),
            Mapped::Many(_) => Err(QiwiError::UnexpectedShape {
                expected: "a single object",
            }),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Mapped::One(_) => 1,
            Mapped::Many(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Reads the whole body and maps it; see [`map_body`].
pub async fn make_return<T: ApiModel>(response: reqwest::Response, mode: SpecMode) -> Result<Mapped<T>> {
    let status = response.status();
    let url = response.url().clone();
    let body = response.bytes().await?;

    tracing::debug!("📡 {} -> {} ({} bytes)", url, status, body.len());
    map_body(status, &body, mode)
}

/// Fails with [`QiwiError::Api`] on a non-2xx status, otherwise returns the raw body.
pub async fn ensure_success(response: reqwest::Response) -> Result<Vec<u8>> {
    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        return Err(api_error(status, &body));
    }
    Ok(body.to_vec())
}

pub fn map_body<T: ApiModel>(status: StatusCode, body: &[u8], mode: SpecMode) -> Result<Mapped<T>> {
    if !status.is_success() {
        return Err(api_error(status, body));
    }

    let value: Value = serde_json::from_slice(body)?;
    if let Some(err) = embedded_error(status, &value) {
        return Err(err);
    }

    match translate_keys(value) {
        Value::Array(items) => items
            .into_iter()
            .map(|item| build::<T>(item, mode))
            .collect::<Result<Vec<_>>>()
            .map(Mapped::Many),
        item @ Value::Object(_) => build::<T>(item, mode).map(Mapped::One),
        _ => Err(QiwiError::UnexpectedShape {
            expected: "a JSON object or array",
        }),
    }
}

fn build<T: ApiModel>(item: Value, mode: SpecMode) -> Result<T> {
    let item = match (mode, item) {
        (SpecMode::Ignore, item) => item,
        (mode, Value::Object(map)) => Value::Object(apply_spec::<T>(map, mode)?),
        (_, other) => other,
    };
    Ok(serde_json::from_value(item)?)
}

fn apply_spec<T: ApiModel>(map: Map<String, Value>, mode: SpecMode) -> Result<Map<String, Value>> {
    let mut kept = Map::with_capacity(map.len());
    for (key, value) in map {
        if T::FIELDS.contains(&key.as_str()) {
            kept.insert(key, value);
        } else if mode == SpecMode::Strict {
            return Err(QiwiError::UnexpectedField {
                model: T::model_name(),
                field: key,
            });
        } else {
            tracing::debug!("Dropping unknown field '{}' for {}", key, T::model_name());
        }
    }
    Ok(kept)
}

/// Renames every object key from the wire convention to snake_case, recursively.
pub fn translate_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (to_snake_case(&key), translate_keys(value)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(translate_keys).collect()),
        other => other,
    }
}

fn api_error(status: StatusCode, body: &[u8]) -> QiwiError {
    match serde_json::from_slice::<Value>(body) {
        Ok(value) => {
            let (code, message) = error_fields(&value);
            QiwiError::Api {
                status: status.as_u16(),
                code,
                message: message.unwrap_or_else(|| default_message(status)),
            }
        }
        Err(_) => {
            let text = String::from_utf8_lossy(body);
            let text = text.trim();
            QiwiError::Api {
                status: status.as_u16(),
                code: None,
                message: if text.is_empty() {
                    default_message(status)
                } else {
                    text.chars().take(512).collect()
                },
            }
        }
    }
}

fn default_message(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string()
}

/// `code` + `message` payloads count as errors only when nothing else is present.
const BARE_ERROR_KEYS: &[&str] = &["code", "message", "serviceName"];

/// Error payloads returned with a 2xx status.
fn embedded_error(status: StatusCode, value: &Value) -> Option<QiwiError> {
    let obj = value.as_object()?;

    let has_message = ["userMessage", "message", "description"]
        .iter()
        .any(|k| obj.get(*k).is_some_and(Value::is_string));

    let flagged = match obj.get("errorCode") {
        Some(Value::Number(n)) => n.as_i64() != Some(0),
        Some(Value::String(s)) => !s.is_empty() && s != "0",
        _ => false,
    };
    let bare_code = obj.contains_key("code")
        && obj.contains_key("message")
        && obj.keys().all(|k| BARE_ERROR_KEYS.contains(&k.as_str()));

    if (flagged && has_message) || bare_code {
        let (code, message) = error_fields(value);
        return Some(QiwiError::Api {
            status: status.as_u16(),
            code,
            message: message.unwrap_or_else(|| default_message(status)),
        });
    }
    None
}

fn error_fields(value: &Value) -> (Option<String>, Option<String>) {
    let pick = |keys: &[&str]| {
        keys.iter().find_map(|k| match value.get(*k) {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        })
    };
    (
        pick(&["errorCode", "code"]),
        pick(&["userMessage", "message", "description"]),
    )
}
