//! Per-seat mutual-exclusion locks.
//!
//! Every (event, seat) pair maps to exactly one lock handle, created lazily
//! on first reference and retained for the lifetime of the process. Callers
//! acquire whole seat sets in canonical (identifier-sorted) order, which is
//! what makes cyclic waits impossible.

mod registry;

pub use registry::{HeldSeatLocks, SeatLockRegistry};

use thiserror::Error;

/// Errors that can occur while acquiring seat locks.
#[derive(Debug, Error)]
pub enum LockError {
    /// Gave up waiting for a contended lock. Locks acquired earlier in the
    /// same call have already been released.
    #[error("timed out waiting for lock on seat {seat_id}")]
    WaitLimit { seat_id: String },
}
