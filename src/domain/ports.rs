use crate::domain::model::{Partner, Terminal, TerminalQuery};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;

/// A typed entity the response mapper can build.
///
/// `FIELDS` lists the model's field names after wire-name translation (snake_case).
/// It is the schema used by [`crate::core::response::SpecMode::Filter`] and
/// [`crate::core::response::SpecMode::Strict`].
pub trait ApiModel: DeserializeOwned + Send {
    const FIELDS: &'static [&'static str];

    fn model_name() -> &'static str {
        std::any::type_name::<Self>()
            .rsplit("::")
            .next()
            .unwrap_or("model")
    }
}

#[async_trait]
pub trait TerminalLocator: Send + Sync {
    async fn terminals(&self, query: &TerminalQuery) -> Result<Vec<Terminal>>;
    async fn partners(&self) -> Result<Vec<Partner>>;
}
