use chrono::{DateTime, Utc};

use crate::models::trip::{NewTrip, TripDraft};

pub const UNKNOWN_PLACE: &str = "Unknown";

/// Fill every missing draft field with its deterministic fallback. Pure in
/// `(draft, now)`; callers inject the ingestion instant.
pub fn complete(draft: TripDraft, now: DateTime<Utc>) -> NewTrip {
    NewTrip {
        origin: draft.origin.unwrap_or_else(|| UNKNOWN_PLACE.to_string()),
        destination: draft
            .destination
            .unwrap_or_else(|| UNKNOWN_PLACE.to_string()),
        transport_mode: draft
            .transport_mode
            .unwrap_or_else(|| UNKNOWN_PLACE.to_string()),
        date: draft
            .date
            .unwrap_or_else(|| now.format("%Y-%m-%d").to_string()),
        time: draft
            .time
            .unwrap_or_else(|| now.format("%H:%M").to_string()),
        co_travelers: draft.co_travelers.unwrap_or(0).max(0),
        notes: draft.notes,
    }
}
