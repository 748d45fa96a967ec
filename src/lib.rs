pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::{ClientConfig, Urls};

pub use crate::core::{
    maps::QiwiMaps,
    params::{params_filter, Params},
    requests::{Requests, SessionOwner, SessionScope},
    response::{Mapped, SpecMode},
    session::{new_http_session, Session, SessionOptions},
    wallet::QiwiWallet,
};
pub use crate::domain::{
    currency::{get_currency, Currency, CurrencyRef},
    identification::{IdentificationResult, IdentificationWidget},
    model::{GeoPoint, Partner, Polygon, Terminal, TerminalQuery},
    values::{ChequeType, DomainValue, PaymentType, Provider},
    wallet::{Commission, History, HistoryQuery, Transaction},
};
pub use crate::utils::error::{QiwiError, Result};
