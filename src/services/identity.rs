use std::fmt;

use anyhow::anyhow;
use tracing::info;

use crate::{error::AppError, models::user::User, services::store::TripStore};

/// Chat channel a message arrived on. The tag keeps aliases from colliding
/// across channels and with web-registered accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    WhatsApp,
    Telegram,
}

impl Channel {
    pub fn tag(self) -> &'static str {
        match self {
            Channel::WhatsApp => "wa",
            Channel::Telegram => "tg",
        }
    }

    /// Deterministic synthetic identifier for a sender, e.g.
    /// `tg_123@internal`. Stable across repeat contact.
    pub fn alias(self, sender_id: &str) -> String {
        format!("{}_{}@internal", self.tag(), sender_id)
    }

    fn placeholder_name(self, sender_id: &str) -> String {
        match self {
            Channel::WhatsApp => format!("WhatsApp User {sender_id}"),
            Channel::Telegram => format!("Telegram User {sender_id}"),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::WhatsApp => write!(f, "whatsapp"),
            Channel::Telegram => write!(f, "telegram"),
        }
    }
}

/// Maps a channel sender to a stable internal user, creating an anonymous
/// account on first contact.
#[derive(Clone)]
pub struct IdentityResolver {
    store: TripStore,
}

impl IdentityResolver {
    pub fn new(store: TripStore) -> Self {
        Self { store }
    }

    /// Idempotent per `(channel, sender_id)`. The first-contact display name
    /// wins; later hints never update it.
    pub async fn resolve(
        &self,
        channel: Channel,
        sender_id: &str,
        display_name_hint: Option<&str>,
    ) -> Result<User, AppError> {
        let alias = channel.alias(sender_id);

        if let Some(user) = self.store.find_user_by_alias(&alias).await? {
            return Ok(user);
        }

        let display_name = display_name_hint
            .map(str::trim)
            .filter(|hint| !hint.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| channel.placeholder_name(sender_id));

        if let Some(created) = self.store.insert_user(&alias, &display_name).await? {
            info!(%channel, alias = %created.alias, "created chat identity");
            return Ok(created);
        }

        // Lost the insert race to a concurrent first message; the winner's
        // row is committed, so the lookup must succeed now.
        self.store
            .find_user_by_alias(&alias)
            .await?
            .ok_or_else(|| AppError::Other(anyhow!("user for alias {alias} vanished after insert conflict")))
    }
}
