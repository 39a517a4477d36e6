use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use url::Url;

use crate::error::AppError;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Outbound Telegram Bot API client, used only to manage the webhook
/// registration for this deployment.
#[derive(Clone)]
pub struct TelegramApi {
    http: reqwest::Client,
    token: String,
}

#[derive(Debug, Serialize)]
struct SetWebhookRequest<'a> {
    url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    secret_token: Option<&'a str>,
    allowed_updates: &'a [&'a str],
    drop_pending_updates: bool,
}

#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    result: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookInfo {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub pending_update_count: i64,
    #[serde(default)]
    pub last_error_message: Option<String>,
}

impl std::fmt::Debug for TelegramApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramApi")
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl TelegramApi {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            token: token.into(),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{TELEGRAM_API_BASE}/bot{}/{method}", self.token)
    }

    /// Point the bot's webhook at `{site_url}/webhook/telegram`. Only
    /// `message` updates are requested; pending updates are kept.
    pub async fn set_webhook(
        &self,
        site_url: &Url,
        secret_token: Option<&str>,
    ) -> Result<(), AppError> {
        let webhook_url = site_url
            .join("/webhook/telegram")
            .map_err(|err| AppError::Config(format!("invalid SITE_URL for webhook: {err}")))?;

        let request = SetWebhookRequest {
            url: webhook_url.as_str(),
            secret_token,
            allowed_updates: &["message"],
            drop_pending_updates: false,
        };

        let envelope: ApiEnvelope = self
            .http
            .post(self.method_url("setWebhook"))
            .json(&request)
            .send()
            .await?
            .json()
            .await?;

        if !envelope.ok {
            return Err(AppError::Telegram(
                envelope
                    .description
                    .unwrap_or_else(|| "setWebhook rejected".to_string()),
            ));
        }

        info!(url = %webhook_url, used_secret = secret_token.is_some(), "telegram webhook registered");
        Ok(())
    }

    pub async fn webhook_info(&self) -> Result<WebhookInfo, AppError> {
        let envelope: ApiEnvelope = self
            .http
            .get(self.method_url("getWebhookInfo"))
            .send()
            .await?
            .json()
            .await?;

        if !envelope.ok {
            return Err(AppError::Telegram(
                envelope
                    .description
                    .unwrap_or_else(|| "getWebhookInfo rejected".to_string()),
            ));
        }

        let info = envelope
            .result
            .ok_or_else(|| AppError::Telegram("getWebhookInfo returned no result".to_string()))?;
        serde_json::from_value(info)
            .map_err(|err| AppError::Telegram(format!("unexpected getWebhookInfo shape: {err}")))
    }
}
