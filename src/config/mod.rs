#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;
pub mod urls;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::ClientConfig;
pub use urls::Urls;
