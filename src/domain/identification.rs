use crate::domain::ports::ApiModel;
use crate::utils::naming::to_lower_camel_case;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// Personal data sent to the wallet identification endpoint.
///
/// | field         | meaning                                   |
/// |---------------|-------------------------------------------|
/// | `birth_date`  | date of birth, `YYYY-MM-DD`               |
/// | `first_name`  | first name                                |
/// | `middle_name` | patronymic                                |
/// | `last_name`   | last name                                 |
/// | `passport`    | passport series and number, digits only   |
/// | `inn`         | taxpayer number (INN)                     |
/// | `snils`       | insurance account number (SNILS)          |
/// | `oms`         | medical insurance policy number (OMS)     |
///
/// Only the fields that are set are serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentificationWidget {
    pub birth_date: Option<String>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub passport: Option<String>,
    pub inn: Option<String>,
    pub snils: Option<String>,
    pub oms: Option<String>,
}

impl IdentificationWidget {
    fn fields(&self) -> [(&'static str, &Option<String>); 8] {
        [
            ("birth_date", &self.birth_date),
            ("first_name", &self.first_name),
            ("middle_name", &self.middle_name),
            ("last_name", &self.last_name),
            ("passport", &self.passport),
            ("inn", &self.inn),
            ("snils", &self.snils),
            ("oms", &self.oms),
        ]
    }

    /// Sparse wire form: lowerCamelCase keys, unset fields omitted.
    pub fn as_dict(&self) -> Map<String, Value> {
        self.fields()
            .into_iter()
            .filter_map(|(name, value)| {
                value
                    .as_ref()
                    .map(|v| (to_lower_camel_case(name), Value::String(v.clone())))
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.fields().iter().all(|(_, value)| value.is_none())
    }
}

impl Serialize for IdentificationWidget {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_dict().serialize(serializer)
    }
}

/// Identification state returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentificationResult {
    pub id: i64,
    /// `ANONYMOUS`, `SIMPLE`, `VERIFIED` or `FULL`.
    #[serde(rename = "type")]
    pub level: String,
    pub birth_date: Option<String>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub passport: Option<String>,
    pub inn: Option<String>,
    pub snils: Option<String>,
    pub oms: Option<String>,
}

impl ApiModel for IdentificationResult {
    const FIELDS: &'static [&'static str] = &[
        "id",
        "type",
        "birth_date",
        "first_name",
        "middle_name",
        "last_name",
        "passport",
        "inn",
        "snils",
        "oms",
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serializes_only_set_fields() {
        let widget = IdentificationWidget {
            birth_date: Some("1998-02-11".to_string()),
            first_name: Some("Иван".to_string()),
            passport: Some("4400111222".to_string()),
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(&widget).unwrap(),
            json!({
                "birthDate": "1998-02-11",
                "firstName": "Иван",
                "passport": "4400111222",
            })
        );
        assert_eq!(widget.as_dict().len(), 3);
    }

    #[test]
    fn test_empty_widget() {
        let widget = IdentificationWidget::default();
        assert!(widget.is_empty());
        assert_eq!(serde_json::to_string(&widget).unwrap(), "{}");
    }
}
