use serde_json::Value;
use std::collections::BTreeMap;

/// Query parameters after filtering: every value present and in its string wire form.
pub type Params = BTreeMap<String, String>;

/// 移除 null 值並把其餘值轉為字串，用於 query string 與 header。
///
/// Non-object input yields an empty set. The source value is never modified.
pub fn params_filter(source: &Value) -> Params {
    let Some(map) = source.as_object() else {
        if !source.is_null() {
            tracing::warn!("params_filter expects an object, got: {}", source);
        }
        return Params::new();
    };

    map.iter()
        .filter_map(|(key, value)| wire_string(value).map(|v| (key.clone(), v)))
        .collect()
}

/// String wire form of a single parameter value, `None` when the value is absent.
pub fn wire_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => {
            let parts = items.iter().filter_map(wire_string).collect::<Vec<_>>();
            // 空清單視同未提供
            (!parts.is_empty()).then(|| parts.join(","))
        }
        Value::Object(_) => Some(value.to_string()),
    }
}
