//! Retry-once-then-elide persistence policy (spec §5 "Shared resources").
//!
//! Each store call site gets one retry; if that also fails the write is
//! dropped and logged, and parsing continues with coherent in-memory state.
//! This is a narrow, purpose-built helper rather than a generic retry
//! framework, matching the teacher's preference for small mechanisms over
//! middleware.

use tw_store::StoreError;

pub fn with_retry<F>(site: &'static str, mut attempt: F)
where
    F: FnMut() -> Result<(), StoreError>,
{
    if let Err(e) = attempt() {
        tracing::warn!(target: "persist", site, error = %e, "persist failed, retrying once");
        if let Err(e) = attempt() {
            tracing::warn!(target: "persist", site, error = %e, "retry failed, eliding write");
        }
    }
}
