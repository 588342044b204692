//! Live flight tracking.
//!
//! Polls the strict lookup on a fixed interval. Each refresh runs as its own
//! task, so a slow provider response can still be in flight when the next
//! refresh starts; results carry a generation [`Ticket`] and anything but the
//! newest generation is dropped on arrival.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use crate::error::Result;
use crate::flight::{normalize_with_fallback, FlightRecord};
use crate::generation::{RequestGeneration, Ticket};
use crate::service::FlightService;

/// A refresh result that was allowed through.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackUpdate {
    /// Generation of the refresh that produced this.
    pub ticket: Ticket,
    /// The flight as of this refresh.
    pub flight: FlightRecord,
}

/// What happened over a tracking run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackSummary {
    /// Refreshes handed to the callback.
    pub delivered: u32,
    /// Refreshes dropped because a newer one had started.
    pub superseded: u32,
    /// Current refreshes that failed.
    pub failed: u32,
}

impl TrackSummary {
    /// Total refreshes accounted for.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.delivered + self.superseded + self.failed
    }
}

/// Shortest period between refreshes; shorter intervals are raised to it.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Refresh `flight_number` `count` times, `interval` apart.
///
/// Returns once every refresh has finished. `on_update` sees only results
/// that were current when they arrived. An `interval` below
/// [`MIN_INTERVAL`] (including zero) is raised to it.
pub async fn track<F>(
    service: &FlightService,
    flight_number: &str,
    interval: Duration,
    count: u32,
    mut on_update: F,
) -> TrackSummary
where
    F: FnMut(TrackUpdate),
{
    let mut summary = TrackSummary::default();
    if count == 0 {
        return summary;
    }

    let generation = RequestGeneration::new();
    let (tx, mut rx) = mpsc::unbounded_channel::<(Ticket, Result<serde_json::Value>)>();

    let mut ticker = tokio::time::interval(interval.max(MIN_INTERVAL));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut started = 0;
    let mut finished = 0;

    loop {
        tokio::select! {
            _ = ticker.tick(), if started < count => {
                let ticket = generation.begin();
                started += 1;
                debug!(flight_number, generation = ticket.generation(), "Starting refresh");

                let service = service.clone();
                let flight_number = flight_number.to_string();
                let tx = tx.clone();
                tokio::spawn(async move {
                    let result = service.flight(&flight_number).await;
                    // The receiver only goes away once tracking has finished
                    let _ = tx.send((ticket, result));
                });
            }
            Some((ticket, result)) = rx.recv() => {
                finished += 1;

                if !generation.is_current(ticket) {
                    debug!(generation = ticket.generation(), "Dropping superseded refresh");
                    summary.superseded += 1;
                } else {
                    match result {
                        Ok(raw) => {
                            summary.delivered += 1;
                            on_update(TrackUpdate {
                                ticket,
                                flight: normalize_with_fallback(&raw, flight_number),
                            });
                        }
                        Err(e) => {
                            warn!(flight_number, error = %e, "Refresh failed");
                            summary.failed += 1;
                        }
                    }
                }

                if finished == count {
                    break;
                }
            }
        }
    }

    summary
}
