//! Single-flight guard for the sampling loop.
//!
//! At most one sampling cycle may be in flight per controller. Overlapping
//! triggers (a rapid double-click in the UI) are rejected deterministically
//! rather than queued. The token releases on drop, so every exit path of the
//! holder, including panic and future cancellation, frees the gate.

use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Grants exclusive sampling rights while held.
#[derive(Debug)]
pub struct GateToken {
    _permit: OwnedSemaphorePermit,
}

/// One-permit gate; `try_acquire` never waits.
#[derive(Debug)]
pub struct RequestGate {
    permit: Arc<Semaphore>,
}

impl RequestGate {
    pub fn new() -> Self {
        Self {
            permit: Arc::new(Semaphore::new(1)),
        }
    }

    /// Take the gate if it is free. `None` means another cycle is in flight.
    pub fn try_acquire(&self) -> Option<GateToken> {
        Arc::clone(&self.permit)
            .try_acquire_owned()
            .ok()
            .map(|permit| GateToken { _permit: permit })
    }

    /// Whether a cycle currently holds the gate.
    pub fn is_busy(&self) -> bool {
        self.permit.available_permits() == 0
    }
}

impl Default for RequestGate {
    fn default() -> Self {
        Self::new()
    }
}
