pub mod maps;
pub mod params;
pub mod requests;
pub mod response;
pub mod session;
pub mod wallet;

pub use crate::domain::ports::{ApiModel, TerminalLocator};
pub use crate::utils::error::Result;
