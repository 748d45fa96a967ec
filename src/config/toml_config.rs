use crate::config::urls::Urls;
use crate::core::session::SessionOptions;
use crate::utils::error::{QiwiError, Result};
use crate::utils::validation::{validate_range, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const MAX_TIMEOUT_SECONDS: u64 = 600;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub client: ClientSection,
    #[serde(default)]
    pub urls: Urls,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientSection {
    pub token: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub content_type: Option<String>,
    pub accept_type: Option<String>,
}

impl ClientConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(QiwiError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| QiwiError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${QIWI_TOKEN})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| QiwiError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| {
                tracing::warn!("Environment variable {} is not set", var_name);
                String::new()
            })
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_url("urls.maps", &self.urls.maps)?;
        validate_url("urls.ttp_groups", &self.urls.ttp_groups)?;
        validate_url("urls.edge", &self.urls.edge)?;

        if let Some(timeout) = self.client.timeout_seconds {
            validate_range("client.timeout_seconds", timeout, 1, MAX_TIMEOUT_SECONDS)?;
        }

        Ok(())
    }

    /// Token with empty values treated as absent.
    pub fn token(&self) -> Option<&str> {
        self.client
            .token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            token: self.token().map(str::to_string),
            timeout: self.client.timeout_seconds.map(Duration::from_secs),
            content_type: self.client.content_type.clone(),
            accept_type: self.client.accept_type.clone(),
        }
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_client_config() {
        let toml_content = r#"
[client]
token = "abc123"
timeout_seconds = 15
accept_type = "application/json;charset=UTF-8"

[urls]
edge = "http://127.0.0.1:9000"
"#;

        let config = ClientConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.token(), Some("abc123"));
        assert_eq!(config.urls.edge, "http://127.0.0.1:9000");
        // 未設定的 URL 使用預設值
        assert_eq!(config.urls.maps, crate::config::urls::MAPS_URL);

        let options = config.session_options();
        assert_eq!(options.timeout, Some(Duration::from_secs(15)));
        assert_eq!(options.content_type, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ClientConfig::from_toml_str("").unwrap();
        assert_eq!(config.urls, Urls::default());
        assert_eq!(config.token(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("QIWI_CLIENT_TEST_TOKEN", "from-env");

        let config = ClientConfig::from_toml_str(
            r#"
[client]
token = "${QIWI_CLIENT_TEST_TOKEN}"
"#,
        )
        .unwrap();
        assert_eq!(config.token(), Some("from-env"));

        std::env::remove_var("QIWI_CLIENT_TEST_TOKEN");
    }

    #[test]
    fn test_missing_env_var_means_no_token() {
        let config = ClientConfig::from_toml_str(
            r#"
[client]
token = "${QIWI_CLIENT_TEST_UNSET_VAR}"
"#,
        )
        .unwrap();
        assert_eq!(config.token(), None);
        assert_eq!(config.session_options().token, None);
    }

    #[test]
    fn test_config_validation() {
        let config = ClientConfig::from_toml_str(
            r#"
[client]
timeout_seconds = 0

[urls]
maps = "invalid-url"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = ClientConfig::from_toml_str("[client]\ntimeout_seconds = 0\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(QiwiError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[client]\ntoken = \"file-token\"\n")
            .unwrap();

        let config = ClientConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.token(), Some("file-token"));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            ClientConfig::from_toml_str("[client\n"),
            Err(QiwiError::ConfigError { .. })
        ));
    }
}
