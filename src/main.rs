use clap::Parser;
use qiwi_client::config::cli::{terminal_query, Command};
use qiwi_client::domain::ports::TerminalLocator;
use qiwi_client::utils::error::ErrorSeverity;
use qiwi_client::utils::{logger, validation::Validate};
use qiwi_client::{
    CliConfig, ClientConfig, DomainValue, HistoryQuery, Provider, QiwiError, QiwiMaps,
    QiwiWallet, SessionOwner,
};
use serde::Serialize;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting qiwi-client CLI");

    match run(&cli).await {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::error!(
                "❌ Request failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }
}

async fn run(cli: &CliConfig) -> Result<(), QiwiError> {
    let config = cli.client_config()?;
    config.validate()?;
    if cli.verbose {
        tracing::debug!("Endpoints: {:?}", config.urls);
    }

    match &cli.command {
        Command::Terminals { .. } | Command::Partners => {
            let maps = QiwiMaps::from_config(&config)?;
            let maps = maps.enter();
            run_maps(&*maps, &cli.command).await?;
        }
        Command::History {
            wallet,
            rows,
            operation,
        } => {
            let mut query = HistoryQuery::new(*rows);
            if let Some(op) = operation {
                query = query.with_operation(op)?;
            }
            let client = wallet_client(&config)?;
            let client = client.enter();
            let history = client.history(wallet, &query).await?;
            tracing::info!("✅ Received {} transactions", history.data.len());
            print_json(&history)?;
        }
        Command::Commission {
            provider,
            account,
            amount,
            currency,
        } => {
            let provider = Provider::resolve(provider)?;
            let client = wallet_client(&config)?;
            let client = client.enter();
            let commission = client
                .commission(provider, account, *amount, currency.as_str())
                .await?;
            print_json(&commission)?;
        }
    }

    Ok(())
}

async fn run_maps(locator: &dyn TerminalLocator, command: &Command) -> Result<(), QiwiError> {
    if let Some(query) = terminal_query(command) {
        let terminals = locator.terminals(&query).await?;
        tracing::info!("✅ Found {} terminals", terminals.len());
        print_json(&terminals)
    } else {
        let partners = locator.partners().await?;
        tracing::info!("✅ Found {} partner groups", partners.len());
        print_json(&partners)
    }
}

fn wallet_client(config: &ClientConfig) -> Result<QiwiWallet, QiwiError> {
    QiwiWallet::from_config(config)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), QiwiError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
