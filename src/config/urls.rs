use serde::{Deserialize, Serialize};

pub const MAPS_URL: &str = "https://edge.qiwi.com/locator/v3/nearest/clusters";
pub const TTP_GROUPS_URL: &str = "https://edge.qiwi.com/locator/v3/ttp-groups";
pub const EDGE_URL: &str = "https://edge.qiwi.com";

/// Per-endpoint base URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Urls {
    pub maps: String,
    pub ttp_groups: String,
    pub edge: String,
}

impl Default for Urls {
    fn default() -> Self {
        Self {
            maps: MAPS_URL.to_string(),
            ttp_groups: TTP_GROUPS_URL.to_string(),
            edge: EDGE_URL.to_string(),
        }
    }
}

impl Urls {
    /// Points every endpoint at `base`, keeping the default paths. Used for mock servers
    /// and proxies.
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            maps: format!("{}/locator/v3/nearest/clusters", base),
            ttp_groups: format!("{}/locator/v3/ttp-groups", base),
            edge: base.to_string(),
        }
    }

    pub fn history(&self, wallet: &str) -> String {
        format!("{}/payment-history/v2/persons/{}/payments", self.edge, wallet)
    }

    pub fn cheque_file(&self, txn_id: i64) -> String {
        format!("{}/payment-history/v1/transactions/{}/cheque/file", self.edge, txn_id)
    }

    pub fn commission(&self, provider_code: u32) -> String {
        format!("{}/sinap/providers/{}/onlineCommission", self.edge, provider_code)
    }

    pub fn identification(&self, wallet: &str) -> String {
        format!("{}/identification/v1/persons/{}/identification", self.edge, wallet)
    }
}
