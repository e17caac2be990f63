pub mod cli;
pub mod core;
pub mod providers;
pub mod web;

use crate::core::config::AppConfig;
use crate::core::resolver::RateResolver;
use anyhow::Result;
use tracing::{debug, info};

pub enum AppCommand {
    Serve,
    Convert {
        amount: String,
        from: String,
        to: String,
    },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Currency converter starting...");

    let config = AppConfig::load_with_env(config_path)?;
    debug!(
        listen_addr = %config.listen_addr,
        timeout_secs = config.timeout_secs,
        primary_configured = config.providers.currencylayer.api_key().is_some(),
        "Loaded config"
    );

    match command {
        AppCommand::Serve => web::run_server(&config).await,
        AppCommand::Convert { amount, from, to } => {
            let resolver = RateResolver::from_config(&config)?;
            cli::convert::run(&resolver, &amount, &from, &to).await
        }
    }
}
