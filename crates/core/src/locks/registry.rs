//! Lazily-created registry of per-(event, seat) locks.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use tracing::debug;

use super::LockError;

type SeatKey = (String, String);

/// Registry handing out one mutex per (event, seat) pair.
///
/// Handles are created on first reference and cached, so every caller that
/// asks for the same pair contends on the same mutex. Creation is
/// double-checked under the map's write lock, which guarantees a single
/// handle per pair even when two callers race the first access.
#[derive(Debug, Default)]
pub struct SeatLockRegistry {
    locks: RwLock<HashMap<SeatKey, Arc<Mutex<()>>>>,
}

/// One acquired seat lock, released when dropped.
#[derive(Debug)]
struct HeldSeatLock {
    seat_id: String,
    _guard: OwnedMutexGuard<()>,
}

/// The full set of locks held for one operation, in acquisition order.
///
/// Dropping the set releases every guard exactly once; release itself can
/// never fail. Dropping the future that is still inside
/// [`SeatLockRegistry::acquire`] releases the partial set the same way.
#[derive(Debug)]
pub struct HeldSeatLocks {
    locks: Vec<HeldSeatLock>,
}

impl HeldSeatLocks {
    /// Seat identifiers in the order the locks were acquired (sorted).
    pub fn seat_ids(&self) -> Vec<&str> {
        self.locks.iter().map(|l| l.seat_id.as_str()).collect()
    }

    /// Number of locks held.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }

    /// Release every held lock. Equivalent to dropping the set; provided so
    /// the release step reads explicitly at call sites.
    pub fn release(self) {}
}

impl SeatLockRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lock handles created so far (across all events).
    pub async fn handle_count(&self) -> usize {
        self.locks.read().await.len()
    }

    /// Get or create the lock handle for one (event, seat) pair.
    async fn handle(&self, event_id: &str, seat_id: &str) -> Arc<Mutex<()>> {
        let key = (event_id.to_string(), seat_id.to_string());
        if let Some(lock) = self.locks.read().await.get(&key) {
            return Arc::clone(lock);
        }

        let mut locks = self.locks.write().await;
        Arc::clone(locks.entry(key).or_insert_with(|| Arc::new(Mutex::new(()))))
    }

    /// Acquire locks for every seat in the set, in canonical order.
    ///
    /// The requested identifiers are sorted lexicographically before
    /// acquisition, so two callers asking for overlapping sets always lock
    /// in the same relative order and cannot deadlock. Duplicate identifiers
    /// collapse to a single lock (the underlying mutexes are not reentrant).
    ///
    /// With a `wait_limit`, a lock that stays contended past the limit makes
    /// the whole call fail with [`LockError::WaitLimit`] after releasing the
    /// locks acquired so far.
    pub async fn acquire(
        &self,
        event_id: &str,
        seat_ids: &[String],
        wait_limit: Option<Duration>,
    ) -> Result<HeldSeatLocks, LockError> {
        let mut ordered: Vec<&str> = seat_ids.iter().map(String::as_str).collect();
        ordered.sort_unstable();
        ordered.dedup();

        let mut held = Vec::with_capacity(ordered.len());
        for seat_id in ordered {
            let handle = self.handle(event_id, seat_id).await;
            let guard = match wait_limit {
                Some(limit) => match tokio::time::timeout(limit, handle.lock_owned()).await {
                    Ok(guard) => guard,
                    Err(_) => {
                        debug!(
                            event_id,
                            seat_id, "lock wait limit hit, releasing partial set"
                        );
                        // `held` drops here, releasing everything acquired so far.
                        return Err(LockError::WaitLimit {
                            seat_id: seat_id.to_string(),
                        });
                    }
                },
                None => handle.lock_owned().await,
            };
            held.push(HeldSeatLock {
                seat_id: seat_id.to_string(),
                _guard: guard,
            });
        }

        Ok(HeldSeatLocks { locks: held })
    }
}
