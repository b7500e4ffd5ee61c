use std::sync::Arc;

use answerkeybot::{
    auth::SingleAdmin,
    config::Config,
    database::connection::Connection,
    logging, transport, BoxedError,
};
use dotenvy::dotenv;
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::error_handlers::IgnoringErrorHandlerSafe;
use teloxide::prelude::*;
use teloxide::update_listeners::webhooks::{self, Options};

#[tokio::main]
async fn main() -> Result<(), BoxedError> {
    dotenv().ok();
    let config = Config::from_env()?;
    logging::init(&config.log_level)?;

    run(config).await.inspect_err(|e| tracing::error!("Bot stopped: {}", e))
}

async fn run(config: Config) -> Result<(), BoxedError> {
    let connection = Connection::connect(&config.database_url, config.max_connections).await?;
    connection.run_migrations().await?;

    let bot = Bot::new(&config.token);
    let me = bot.get_me().await?;
    tracing::info!("Starting bot @{}...", me.username());
    if config.admin_id.is_none() {
        tracing::warn!("ADMIN_ID is not set, nobody can manage tests");
    }

    let router = Arc::new(
        transport::BotRouter::new(
            Arc::new(connection),
            SingleAdmin::new(config.admin_id),
            InMemStorage::new(),
        )
        .with_bot_username(me.username())
        .with_welcome_photo(config.welcome_photo.clone()),
    );

    let mut dispatcher = Dispatcher::builder(bot.clone(), transport::schema())
        .dependencies(dptree::deps![router])
        .enable_ctrlc_handler()
        .build();

    if let Some(webhook) = config.webhook {
        let listener = webhooks::axum(bot, Options::new(webhook.addr, webhook.url)).await?;
        dispatcher
            .dispatch_with_listener(listener, Arc::new(IgnoringErrorHandlerSafe))
            .await
    } else {
        dispatcher.dispatch().await
    }

    Ok(())
}
