use crate::config::toml_config::ClientConfig;
use crate::config::urls::Urls;
use crate::core::requests::{Requests, SessionOwner};
use crate::core::response::SpecMode;
use crate::core::session::{new_http_session, SessionOptions};
use crate::domain::model::{Partner, Terminal, TerminalQuery};
use crate::domain::ports::TerminalLocator;
use crate::utils::error::Result;
use async_trait::async_trait;

pub const MAPS_ACCEPT_TYPE: &str = "application/json;charset=UTF-8";

/// Terminal map client. The map endpoints need no token.
#[derive(Debug)]
pub struct QiwiMaps {
    requests: Requests,
    urls: Urls,
}

impl QiwiMaps {
    pub fn new() -> Result<Self> {
        Self::with_urls(Urls::default())
    }

    pub fn with_urls(urls: Urls) -> Result<Self> {
        let options = SessionOptions {
            accept_type: Some(MAPS_ACCEPT_TYPE.to_string()),
            ..SessionOptions::default()
        };
        Self::with_options(urls, &options)
    }

    pub fn with_options(urls: Urls, options: &SessionOptions) -> Result<Self> {
        let session = new_http_session(options)?;
        Ok(Self {
            requests: Requests::new(session),
            urls,
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let mut options = config.session_options();
        options.accept_type.get_or_insert_with(|| MAPS_ACCEPT_TYPE.to_string());
        Self::with_options(config.urls.clone(), &options)
    }

    /// Terminals inside `query.polygon`, filtered by the rest of the query.
    pub async fn terminals(&self, query: &TerminalQuery) -> Result<Vec<Terminal>> {
        let params = query.to_params();
        tracing::debug!("🗺️ Fetching terminals with {:?}", params);

        let terminals = self
            .requests
            .get::<Terminal>(&self.urls.maps, Some(&params), SpecMode::from_spec_ignore(true))
            .await?
            .into_vec();

        tracing::debug!("Received {} terminals", terminals.len());
        Ok(terminals)
    }

    /// Partner groups usable as `terminal_groups` in a [`TerminalQuery`].
    pub async fn partners(&self) -> Result<Vec<Partner>> {
        Ok(self
            .requests
            .get::<Partner>(&self.urls.ttp_groups, None, SpecMode::from_spec_ignore(true))
            .await?
            .into_vec())
    }
}

impl SessionOwner for QiwiMaps {
    fn requests(&self) -> &Requests {
        &self.requests
    }
}

#[async_trait]
impl TerminalLocator for QiwiMaps {
    async fn terminals(&self, query: &TerminalQuery) -> Result<Vec<Terminal>> {
        QiwiMaps::terminals(self, query).await
    }

    async fn partners(&self) -> Result<Vec<Partner>> {
        QiwiMaps::partners(self).await
    }
}
