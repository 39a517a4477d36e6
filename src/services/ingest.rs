use chrono::{DateTime, Utc};
use tracing::info;

use crate::{
    error::AppError,
    services::{
        defaults,
        identity::{Channel, IdentityResolver},
        parser,
        store::TripStore,
    },
};

/// Canonical decoded form of an inbound chat message, produced by the
/// channel adapters.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub channel: Channel,
    pub sender_id: String,
    pub sender_name: Option<String>,
    pub text: String,
}

/// Runs one message through parse → default → resolve → record and returns
/// the confirmation summary. Stateless per request; concurrent messages from
/// the same sender only meet at the store's alias constraint.
#[derive(Clone)]
pub struct IngestService {
    store: TripStore,
    identity: IdentityResolver,
}

impl IngestService {
    pub fn new(store: TripStore) -> Self {
        let identity = IdentityResolver::new(store.clone());
        Self { store, identity }
    }

    pub async fn ingest(
        &self,
        message: InboundMessage,
        now: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let draft = parser::parse(&message.text);
        let trip = defaults::complete(draft, now);

        let user = self
            .identity
            .resolve(
                message.channel,
                &message.sender_id,
                message.sender_name.as_deref(),
            )
            .await?;

        let saved = self.store.create_trip(user.id, &trip).await?;
        info!(
            channel = %message.channel,
            user = %user.alias,
            trip = %saved.uuid,
            "trip logged"
        );

        Ok(trip.summary())
    }
}
