use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Partial trip extracted from one chat message. Every field stays optional
/// until the defaulting pass fills in the gaps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripDraft {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub transport_mode: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub co_travelers: Option<i64>,
    pub notes: Option<String>,
}

/// Completed trip record ready for persistence. All fields are concrete
/// except `notes`, which is omitted rather than placeholdered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTrip {
    pub origin: String,
    pub destination: String,
    pub transport_mode: String,
    pub date: String,
    pub time: String,
    pub co_travelers: i64,
    pub notes: Option<String>,
}

impl NewTrip {
    /// Human-readable confirmation sent back over the originating channel.
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "Trip logged: {} → {} via {} at {} on {}",
            self.origin, self.destination, self.transport_mode, self.time, self.date
        );
        if self.co_travelers > 0 {
            summary.push_str(&format!(" with {}", self.co_travelers));
        }
        summary
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Trip {
    pub id: i64,
    pub uuid: String,
    pub user_id: i64,
    pub origin: String,
    pub destination: String,
    pub transport_mode: String,
    pub date: String,
    pub time: String,
    pub co_travelers: i64,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Per-user aggregate over logged trips.
#[derive(Debug, Clone, Serialize)]
pub struct TripStats {
    pub total_trips: i64,
    pub most_used_transport: String,
    pub total_co_travelers: i64,
}
