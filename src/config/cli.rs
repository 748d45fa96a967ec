use crate::config::toml_config::ClientConfig;
use crate::domain::model::{Polygon, TerminalQuery};
use crate::utils::error::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "qiwi-client")]
#[command(about = "Query the QIWI terminal map and wallet API")]
pub struct CliConfig {
    #[arg(long, help = "Path to a TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, help = "API token (overrides the configuration file)")]
    pub token: Option<String>,

    #[arg(long, help = "Request timeout in seconds")]
    pub timeout: Option<u64>,

    #[arg(long, help = "Override the base URL of every endpoint")]
    pub base_url: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit JSON logs")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Terminals inside a bounding box
    Terminals {
        #[arg(long, allow_hyphen_values = true)]
        sw_lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        sw_lng: f64,
        #[arg(long, allow_hyphen_values = true)]
        ne_lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        ne_lng: f64,
        #[arg(long)]
        zoom: Option<u32>,
        #[arg(long, default_value = "30")]
        active_within_minutes: u32,
        #[arg(long)]
        include_partners: Option<bool>,
        #[arg(long, value_delimiter = ',')]
        partner_ids: Vec<String>,
        #[arg(long)]
        cash: Option<bool>,
        #[arg(long)]
        card: Option<bool>,
        #[arg(long)]
        identification_types: Option<u8>,
        #[arg(long, value_delimiter = ',')]
        terminal_groups: Vec<String>,
    },
    /// Terminal partner groups
    Partners,
    /// Wallet payment history
    History {
        #[arg(long)]
        wallet: String,
        #[arg(long, default_value = "10")]
        rows: u32,
        #[arg(long, help = "incoming, outgoing, qiwi_card or all")]
        operation: Option<String>,
    },
    /// Commission for a transfer
    Commission {
        #[arg(long, help = "Provider alias, e.g. QIWI_WALLET or \"Tinkoff Bank\"")]
        provider: String,
        #[arg(long)]
        account: String,
        #[arg(long)]
        amount: f64,
        #[arg(long, default_value = "RUB")]
        currency: String,
    },
}

impl CliConfig {
    /// File configuration (if any) with command line overrides applied.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.config {
            Some(path) => ClientConfig::from_file(path)?,
            None => ClientConfig::default(),
        };

        if let Some(token) = &self.token {
            config.client.token = Some(token.clone());
        }
        if let Some(timeout) = self.timeout {
            config.client.timeout_seconds = Some(timeout);
        }
        if let Some(base) = &self.base_url {
            config.urls = crate::config::urls::Urls::with_base(base);
        }

        Ok(config)
    }
}

pub fn terminal_query(command: &Command) -> Option<TerminalQuery> {
    let Command::Terminals {
        sw_lat,
        sw_lng,
        ne_lat,
        ne_lng,
        zoom,
        active_within_minutes,
        include_partners,
        partner_ids,
        cash,
        card,
        identification_types,
        terminal_groups,
    } = command
    else {
        return None;
    };

    let non_empty = |v: &Vec<String>| (!v.is_empty()).then(|| v.clone());

    Some(TerminalQuery {
        polygon: Polygon::from_corners((*sw_lat, *sw_lng), (*ne_lat, *ne_lng)),
        zoom: *zoom,
        active_within_minutes: Some(*active_within_minutes),
        include_partners: *include_partners,
        partner_ids: non_empty(partner_ids),
        cache_terminals: *cash,
        card_terminals: *card,
        identification_types: *identification_types,
        terminal_groups: non_empty(terminal_groups),
    })
}
