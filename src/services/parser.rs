use crate::models::trip::TripDraft;

/// Best-effort extraction of trip fields from one line of chat text.
///
/// The accepted grammar is `key: value, key: value, ...`. Segments without a
/// colon or with an empty value are skipped, unknown keys are dropped, and a
/// key repeated later in the message overwrites the earlier value. Garbled
/// input degrades to an empty draft; this never fails.
pub fn parse(text: &str) -> TripDraft {
    let mut draft = TripDraft::default();

    for segment in text.split(',') {
        let Some((raw_key, raw_value)) = segment.split_once(':') else {
            continue;
        };
        let key = raw_key.trim().to_lowercase();
        let value = raw_value.trim();
        if value.is_empty() {
            continue;
        }

        match key.as_str() {
            "origin" => draft.origin = Some(value.to_string()),
            "destination" | "to" => draft.destination = Some(value.to_string()),
            "mode" | "transport" | "transportmode" => {
                draft.transport_mode = Some(value.to_string());
            }
            // Stored verbatim; the web form validates dates, chat input does not.
            "date" => draft.date = Some(value.to_string()),
            "time" => draft.time = Some(value.to_string()),
            "co" | "cotravellers" | "co-travelers" | "co_travelers" | "cotravelers" => {
                draft.co_travelers = Some(parse_count(value));
            }
            "notes" => draft.notes = Some(value.to_string()),
            _ => {}
        }
    }

    draft
}

/// Lenient counter parse: takes the leading digit run, so "2 friends" is 2
/// and anything non-numeric is 0.
fn parse_count(value: &str) -> i64 {
    let digits: String = value
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}
