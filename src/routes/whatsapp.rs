use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::post,
    Form, Router,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::error;

use crate::{
    services::{identity::Channel, ingest::InboundMessage},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/whatsapp", post(receive))
}

/// Fields Twilio posts for an inbound WhatsApp message. Everything else in
/// the form is ignored.
#[derive(Debug, Deserialize)]
struct TwilioWebhook {
    #[serde(default, rename = "Body")]
    body: Option<String>,
    #[serde(default, rename = "From")]
    from: Option<String>,
    #[serde(default, rename = "ProfileName")]
    profile_name: Option<String>,
}

/// Twilio expects HTTP 200 with a TwiML envelope for every business outcome;
/// only a wrong content type is rejected at the transport level (the `Form`
/// extractor answers 415 before this handler runs).
async fn receive(State(state): State<AppState>, Form(payload): Form<TwilioWebhook>) -> Response {
    let text = payload.body.as_deref().map(str::trim).unwrap_or("");
    let from = payload.from.as_deref().map(str::trim).unwrap_or("");

    if text.is_empty() || from.is_empty() {
        return twiml_reply("Missing required fields.");
    }

    let message = InboundMessage {
        channel: Channel::WhatsApp,
        sender_id: from.to_string(),
        sender_name: payload
            .profile_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string),
        text: text.to_string(),
    };

    match state.ingest.ingest(message, Utc::now()).await {
        Ok(summary) => twiml_reply(&summary),
        Err(err) => {
            error!(error = %err, "whatsapp ingest failed");
            twiml_reply("Sorry, we couldn't log that trip. Please try again.")
        }
    }
}

fn twiml_reply(message: &str) -> Response {
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><Response><Message>{}</Message></Response>"#,
        xml_escape(message)
    );
    ([(header::CONTENT_TYPE, "text/xml")], xml).into_response()
}

fn xml_escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
