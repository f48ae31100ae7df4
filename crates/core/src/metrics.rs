//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Reservation engine (booking attempts, durations, cancellations)
//! - Seat lock registry (time spent waiting for contended locks)

use once_cell::sync::Lazy;
use prometheus::{Histogram, HistogramOpts, HistogramVec, IntCounterVec, Opts};

// =============================================================================
// Reservation engine
// =============================================================================

/// Booking attempts total by result.
pub static BOOKING_ATTEMPTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("encore_booking_attempts_total", "Total booking attempts"),
        &["result"], // "booked", "seat_unavailable", "payment_failed", ...
    )
    .unwrap()
});

/// Booking duration in seconds.
pub static BOOKING_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "encore_booking_duration_seconds",
            "Duration of booking attempts",
        )
        .buckets(vec![
            0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0,
        ]),
        &["result"],
    )
    .unwrap()
});

/// Cancellations total by result.
pub static CANCELLATIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("encore_cancellations_total", "Total cancellation attempts"),
        &["result"], // "cancelled", "not_found", "invalid_state", ...
    )
    .unwrap()
});

// =============================================================================
// Seat lock registry
// =============================================================================

/// Time spent acquiring the full seat-lock set for one operation.
pub static SEAT_LOCK_WAIT: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "encore_seat_lock_wait_seconds",
            "Time spent waiting to acquire all seat locks for an operation",
        )
        .buckets(vec![0.0001, 0.001, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(BOOKING_ATTEMPTS.clone()),
        Box::new(BOOKING_DURATION.clone()),
        Box::new(CANCELLATIONS.clone()),
        Box::new(SEAT_LOCK_WAIT.clone()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_metrics_register_cleanly() {
        let registry = prometheus::Registry::new();
        for metric in all_metrics() {
            registry.register(metric).unwrap();
        }
    }
}
