//! Time helpers for displaying a flight's schedule.

use chrono::{DateTime, FixedOffset, Utc};

use super::FlightRecord;

/// Format an RFC 3339 timestamp as `HH:MM` in its own offset.
///
/// Returns `N/A` for empty or unparsable input.
#[must_use]
pub fn format_time(timestamp: &str) -> String {
    parse(timestamp).map_or_else(|| "N/A".to_string(), |t| t.format("%H:%M").to_string())
}

/// Format an RFC 3339 timestamp as `Mon D HH:MM`.
#[must_use]
pub fn format_date_time(timestamp: &str) -> String {
    parse(timestamp).map_or_else(
        || "N/A".to_string(),
        |t| t.format("%b %-d %H:%M").to_string(),
    )
}

/// How far along the scheduled block time `now` is, from 0 to 100.
///
/// Before departure (or with unparsable times) this is 0; after arrival it
/// is 100.
#[must_use]
pub fn progress(flight: &FlightRecord, now: DateTime<Utc>) -> f64 {
    let (Some(departure), Some(arrival)) = (
        parse(&flight.departure.scheduled_time),
        parse(&flight.arrival.scheduled_time),
    ) else {
        return 0.0;
    };

    let departure = departure.with_timezone(&Utc);
    let arrival = arrival.with_timezone(&Utc);

    if now < departure {
        return 0.0;
    }
    if now > arrival {
        return 100.0;
    }

    let total = (arrival - departure).num_milliseconds();
    if total <= 0 {
        return 100.0;
    }
    let elapsed = (now - departure).num_milliseconds();

    #[allow(clippy::cast_precision_loss)]
    let percent = elapsed as f64 / total as f64 * 100.0;
    percent.clamp(0.0, 100.0)
}

fn parse(timestamp: &str) -> Option<DateTime<FixedOffset>> {
    if timestamp.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc3339(timestamp).ok()
}
