use tokio::net::TcpListener;
use tracing::{error, info, warn};
use triplog::config::AppConfig;
use triplog::db::init_pool;
use triplog::error::AppError;
use triplog::routes::create_router;
use triplog::services::telegram_api::TelegramApi;
use triplog::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_logging();

    let config = AppConfig::from_env()?;
    let db = init_pool(&config.database_url).await?;

    if let Err(err) = sqlx::migrate!("./migrations").run(&db).await {
        error!("migration failed: {err:?}");
        return Err(AppError::Other(err.into()));
    }

    register_telegram_webhook(&config).await;

    let state = AppState::new(config.clone(), db);
    let app = create_router(state);

    let listener = TcpListener::bind(config.listen_addr).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

/// Best-effort webhook registration: a failure is logged and the server
/// still starts, so out-of-band registration keeps working.
async fn register_telegram_webhook(config: &AppConfig) {
    let Some(token) = config.telegram_bot_token.as_deref() else {
        return;
    };
    let api = TelegramApi::new(token);

    match config.site_url.as_ref() {
        Some(site_url) => {
            if let Err(err) = api
                .set_webhook(site_url, config.telegram_webhook_secret.as_deref())
                .await
            {
                error!("telegram webhook registration failed: {err}");
            }
        }
        None => match api.webhook_info().await {
            Ok(info) if info.url.is_empty() => {
                warn!("telegram bot token set but no webhook registered and no SITE_URL configured");
            }
            Ok(info) => {
                info!(
                    url = %info.url,
                    pending = info.pending_update_count,
                    last_error = ?info.last_error_message,
                    "telegram webhook already registered"
                );
            }
            Err(err) => error!("could not query telegram webhook info: {err}"),
        },
    }
}

fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);
    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,triplog=debug".into());

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
