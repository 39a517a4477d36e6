use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Account row. Chat senders get anonymous accounts keyed by their channel
/// alias; they carry no credential and cannot log in interactively.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub uuid: String,
    pub alias: String,
    pub display_name: String,
    pub is_anonymous: bool,
    pub created_at: DateTime<Utc>,
}
