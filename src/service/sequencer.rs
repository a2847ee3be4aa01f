//! Monotonic request tickets.

use std::sync::atomic::{AtomicU64, Ordering};

/// Hands out increasing tickets and remembers the latest one.
///
/// A response is applied only if its ticket is still the latest issued;
/// anything older has been superseded by a newer request.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: AtomicU64,
}

impl RequestSequencer {
    /// Creates a sequencer. The first ticket issued is `1`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues the next ticket, superseding all earlier ones.
    pub fn issue(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst).wrapping_add(1)
    }

    /// Returns `true` if `ticket` is the most recently issued one.
    #[must_use]
    pub fn is_latest(&self, ticket: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket
    }

    /// Returns the most recently issued ticket, `0` before the first.
    #[must_use]
    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }
}
