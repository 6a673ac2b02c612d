//! Sampler error types.
//!
//! `SourceError` describes failures of the remote item service; it is
//! defined here rather than in the client crate so the sampling controller
//! can classify failures for control-flow decisions without string
//! matching. `SampleError` is the taxonomy surfaced to callers.

use thiserror::Error;

/// Errors produced by an [`ItemSource`](crate::traits::ItemSource).
///
/// `Clone` so mock sources can script failure replies.
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    /// Network-level failure reaching the item service (connect, timeout).
    #[error("network error reaching item service: {0}")]
    Transport(String),

    /// Non-success response or malformed payload from the item service.
    /// Decode failures use status 0.
    #[error("item service error (HTTP {status}): {message}")]
    Protocol { status: u16, message: String },
}

impl SourceError {
    /// Returns `true` for network-level failures, `false` for protocol ones.
    pub fn is_transport(&self) -> bool {
        matches!(self, SourceError::Transport(_))
    }
}

/// Errors surfaced by [`SamplingController::sample`](crate::sampler::SamplingController::sample).
///
/// Source failures propagate immediately without consuming retry budget;
/// duplicate exhaustion is handled internally (bag reset plus one more
/// cycle) and only escalates to [`SampleError::RetriesExhausted`] when both
/// cycles fail to produce a fresh item.
#[derive(Debug, Error)]
pub enum SampleError {
    /// The item service failed; the caller owns any retry-with-backoff policy.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Two full bag cycles produced nothing fresh. Indicates a persistently
    /// tiny or degenerate pool; recoverable by calling `sample` again.
    #[error("no fresh item after {attempts} attempts across two bag cycles")]
    RetriesExhausted { attempts: u32 },

    /// Another sampling call is already in flight on this controller.
    #[error("a sampling request is already in flight")]
    Busy,
}

impl SampleError {
    /// Returns `true` if this is the single-flight rejection, which callers
    /// typically ignore or queue rather than treat as a failure.
    pub fn is_busy(&self) -> bool {
        matches!(self, SampleError::Busy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_error_classification() {
        assert!(SourceError::Transport("connection refused".into()).is_transport());
        assert!(!SourceError::Protocol {
            status: 500,
            message: "boom".into()
        }
        .is_transport());
    }

    #[test]
    fn sample_error_from_source() {
        let err: SampleError = SourceError::Protocol {
            status: 502,
            message: "bad gateway".into(),
        }
        .into();
        assert!(matches!(
            err,
            SampleError::Source(SourceError::Protocol { status: 502, .. })
        ));
        assert!(!err.is_busy());
        assert!(SampleError::Busy.is_busy());
    }

    #[test]
    fn error_messages() {
        let err = SampleError::RetriesExhausted { attempts: 20 };
        assert!(err.to_string().contains("20 attempts"));

        let err = SourceError::Protocol {
            status: 429,
            message: "slow down".into(),
        };
        assert!(err.to_string().contains("HTTP 429"));
    }
}
