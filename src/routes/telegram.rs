use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error};

use crate::{
    services::{identity::Channel, ingest::InboundMessage},
    state::AppState,
};

/// Header Telegram echoes the `secret_token` from `setWebhook` in.
pub const SECRET_HEADER: &str = "x-telegram-bot-api-secret-token";

pub fn router() -> Router<AppState> {
    Router::new().route("/telegram", post(receive))
}

/// Minimal slice of a Telegram `Update`. Everything is optional: updates
/// without a message (edits, reactions) or without text (stickers, photos)
/// must parse cleanly and be acknowledged as no-ops.
#[derive(Debug, Default, Deserialize)]
struct TelegramUpdate {
    #[serde(default)]
    message: Option<TelegramMessage>,
}

#[derive(Debug, Default, Deserialize)]
struct TelegramMessage {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    from: Option<TelegramSender>,
}

#[derive(Debug, Default, Deserialize)]
struct TelegramSender {
    #[serde(default)]
    id: Option<i64>,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    username: Option<String>,
}

/// Telegram treats any non-200 ack as a delivery failure and retries, so
/// business outcomes are reported in-band; only transport-level problems
/// (content type, unparsable JSON, bad secret) get an error status.
async fn receive(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");
    if !content_type.contains("application/json") {
        return StatusCode::UNSUPPORTED_MEDIA_TYPE.into_response();
    }

    if let Some(secret) = state.config.telegram_webhook_secret.as_deref() {
        let provided = headers.get(SECRET_HEADER).and_then(|value| value.to_str().ok());
        if provided != Some(secret) {
            return StatusCode::UNAUTHORIZED.into_response();
        }
    }

    let update: TelegramUpdate = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(err) => {
            debug!(error = %err, "unparsable telegram update");
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    let Some(message) = update.message else {
        return ignored();
    };
    let text = message.text.as_deref().map(str::trim).unwrap_or("");
    let Some(sender_id) = message.from.as_ref().and_then(|from| from.id) else {
        return ignored();
    };
    if text.is_empty() {
        return ignored();
    }

    let inbound = InboundMessage {
        channel: Channel::Telegram,
        sender_id: sender_id.to_string(),
        sender_name: message.from.as_ref().and_then(display_name),
        text: text.to_string(),
    };

    match state.ingest.ingest(inbound, Utc::now()).await {
        Ok(summary) => Json(json!({ "ok": true, "result": summary })).into_response(),
        Err(err) => {
            error!(error = %err, "telegram ingest failed");
            Json(json!({ "ok": false, "error": "Failed to log trip" })).into_response()
        }
    }
}

fn ignored() -> Response {
    Json(json!({ "ok": true, "result": "ignored" })).into_response()
}

/// `first_name last_name` with empty parts dropped, falling back to the
/// username when both are absent.
fn display_name(sender: &TelegramSender) -> Option<String> {
    let joined = [sender.first_name.as_deref(), sender.last_name.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if !joined.is_empty() {
        return Some(joined);
    }
    sender
        .username
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}
