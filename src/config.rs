use std::{env, net::SocketAddr};

use url::Url;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub listen_addr: SocketAddr,
    /// Shared secret Telegram echoes back in the
    /// `X-Telegram-Bot-Api-Secret-Token` header. Unset disables the check.
    pub telegram_webhook_secret: Option<String>,
    pub telegram_bot_token: Option<String>,
    /// Public base URL of this deployment, used to register the Telegram
    /// webhook at startup.
    pub site_url: Option<Url>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://triplog.db".to_string());
        let listen_addr: SocketAddr = env::var("APP_LISTEN_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
            .parse()
            .map_err(|err| AppError::Config(format!("invalid APP_LISTEN_ADDR: {err}")))?;

        let telegram_webhook_secret = non_empty(env::var("TELEGRAM_WEBHOOK_SECRET").ok());
        let telegram_bot_token = non_empty(env::var("TELEGRAM_BOT_TOKEN").ok());

        let site_url = non_empty(env::var("SITE_URL").ok())
            .map(|raw| {
                Url::parse(&raw).map_err(|err| AppError::Config(format!("invalid SITE_URL: {err}")))
            })
            .transpose()?;

        Ok(Self {
            database_url,
            listen_addr,
            telegram_webhook_secret,
            telegram_bot_token,
            site_url,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.and_then(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
