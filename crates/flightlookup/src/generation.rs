//! Request generations.
//!
//! When refreshes overlap, only the most recently started one may publish
//! its result. Each refresh takes a [`Ticket`] when it starts and checks it
//! before publishing; starting a newer refresh makes older tickets stale.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Proof of which generation a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    /// The generation number.
    #[must_use]
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// A cloneable generation counter shared between tasks.
#[derive(Debug, Clone, Default)]
pub struct RequestGeneration {
    current: Arc<AtomicU64>,
}

impl RequestGeneration {
    /// Create a counter with no requests started.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding every earlier ticket.
    #[must_use]
    pub fn begin(&self) -> Ticket {
        Ticket(self.current.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether no newer request has started since `ticket` was issued.
    #[must_use]
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.current.load(Ordering::SeqCst) == ticket.0
    }
}
