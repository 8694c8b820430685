use std::process::ExitCode;
use std::sync::Arc;

use teloxide::prelude::*;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use storefront_bot::commerce::CommerceClient;
use storefront_bot::config::BotConfig;
use storefront_bot::dispatcher::{ConversationDispatcher, DispatcherSettings};
use storefront_bot::relay::TelegramRelay;
use storefront_bot::transport;

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting Storefront Telegram Bot");

    let config = match BotConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Bot stopped with an error");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: BotConfig) -> anyhow::Result<()> {
    let bot = Bot::new(&config.bot_token);

    let catalog = Arc::new(CommerceClient::new(&config.commerce)?);
    let relay = Arc::new(TelegramRelay::new(bot.clone(), ChatId(config.admin_chat_id)));
    let conversation = Arc::new(ConversationDispatcher::new(
        catalog,
        relay,
        DispatcherSettings::from_config(&config),
    ));

    info!(
        store = %config.commerce.store_domain,
        port = config.port,
        "Bot initialized, starting dispatcher"
    );

    transport::run(bot, conversation, &config).await
}
