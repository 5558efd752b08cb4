//! EduGames Telegram Bot
//!
//! Main application entry point

use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;
use teloxide::{prelude::*, types::{MenuButton, Update, WebAppInfo}};
use teloxide::dispatching::UpdateHandler;
use teloxide::update_listeners::webhooks;
use teloxide::utils::command::BotCommands;
use tokio::signal;
use tracing::{info, warn, error, debug};

use EduGames::{
    config::Settings,
    utils::logging,
    database::{DatabaseService, PoolConfig, create_pool},
    services::ServiceFactory,
    middleware::AdminSet,
    handlers::commands::{Command, handle_command},
    api::ApiServer,
};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new().context("Failed to load configuration")?;
    settings.validate().context("Invalid configuration")?;

    // Initialize logging; the guard flushes the log file on exit
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", EduGames::info());

    // Initialize database connection
    info!("Connecting to database...");
    let db_pool = create_pool(&PoolConfig::from(&settings.database))
        .await
        .context("Failed to connect to database")?;
    let database_service = DatabaseService::new(db_pool);

    // Schema and admin flags
    let admins = AdminSet::from_settings(&settings);
    database_service
        .bootstrap(admins.ids())
        .await
        .context("Failed to prepare database")?;

    // Initialize bot and services
    let bot = Bot::new(&settings.bot.token);
    let services = ServiceFactory::new(bot.clone(), &settings, database_service.clone(), admins);

    install_bot_menu(&bot, &settings.bot.web_app_url).await;

    let handler = create_handler();
    let mut dispatcher = Dispatcher::builder(bot.clone(), handler)
        .dependencies(dptree::deps![
            Arc::new(services.clone()),
            Arc::new(settings.clone())
        ])
        .default_handler(|upd| async move {
            debug!(update_id = ?upd.id, "Unhandled update");
        })
        .error_handler(LoggingErrorHandler::with_custom_text("An error has occurred in the dispatcher"))
        .build();

    let shutdown_token = dispatcher.shutdown_token();

    let bot_task = match &settings.bot.webhook_url {
        Some(webhook_url) => {
            let address = SocketAddr::from((
                settings.api.host.parse::<std::net::IpAddr>()?,
                settings.bot.webhook_port,
            ));
            let options = webhooks::Options::new(address, webhook_url.parse::<url::Url>()?);
            let listener = webhooks::axum(bot.clone(), options)
                .await
                .context("Failed to set up webhook")?;

            info!(webhook_url = %webhook_url, address = %address, "Starting bot in webhook mode");
            tokio::spawn(async move {
                dispatcher
                    .dispatch_with_listener(
                        listener,
                        LoggingErrorHandler::with_custom_text("An error from the update listener"),
                    )
                    .await;
            })
        }
        None => {
            info!("Starting bot with polling mode...");
            tokio::spawn(async move {
                dispatcher.dispatch().await;
            })
        }
    };

    // Serve the API until a shutdown signal arrives
    let api_server = ApiServer::new(settings.api.clone(), services, settings.bot.web_app_url.clone());
    let api_result = api_server.run(shutdown_signal()).await;
    if let Err(e) = &api_result {
        error!(error = %e, "API server failed");
    }

    info!("Stopping dispatcher...");
    match shutdown_token.shutdown() {
        Ok(stopped) => stopped.await,
        Err(e) => warn!(error = ?e, "Dispatcher was not running"),
    }
    if let Err(e) = bot_task.await {
        error!(error = %e, "Dispatcher task failed");
    }

    database_service.close().await;
    info!("EduGames bot has been shut down.");

    api_result?;
    Ok(())
}

/// Register the command list and the web app menu button.
///
/// Failures are logged; the bot works without them.
async fn install_bot_menu(bot: &Bot, web_app_url: &str) {
    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!(error = %e, "Failed to register bot commands");
    }

    let url = match web_app_url.parse::<url::Url>() {
        Ok(url) => url,
        Err(e) => {
            warn!(error = %e, "Invalid web app URL, menu button not installed");
            return;
        }
    };

    let menu_button = MenuButton::WebApp {
        text: "🎮 O'yinlar".to_string(),
        web_app: WebAppInfo { url },
    };

    match bot.set_chat_menu_button().menu_button(menu_button).await {
        Ok(_) => info!("Web app menu button installed"),
        Err(e) => warn!(error = %e, "Failed to install web app menu button"),
    }
}

/// Create the main update handler
fn create_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    Update::filter_message()
        .filter_command::<Command>()
        .endpoint(handle_commands)
}

/// Handle bot commands
async fn handle_commands(
    bot: Bot,
    msg: Message,
    cmd: Command,
    services: Arc<ServiceFactory>,
    settings: Arc<Settings>,
) -> HandlerResult {
    let chat_id = msg.chat.id;

    if let Err(e) = handle_command(bot.clone(), msg, cmd.clone(), (*services).clone(), &settings.bot.web_app_url).await {
        error!(error = %e, command = ?cmd, "Error handling command");

        // Best effort: tell the user something went wrong
        if let Err(send_err) = bot.send_message(chat_id, format!("⚠️ {}", e.public_message())).await {
            warn!(error = %send_err, "Failed to report command error to user");
        }
        return Err(e.into());
    }

    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C signal"),
        _ = terminate => info!("Received terminate signal"),
    }
}
