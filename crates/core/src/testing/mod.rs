//! Testing utilities and mock implementations.
//!
//! This module provides a mock payment processor and fixture helpers so the
//! engine can be exercised without a real gateway.
//!
//! # Example
//!
//! ```rust,ignore
//! use encore_core::testing::{fixtures, MockPaymentGateway};
//!
//! let gateway = MockPaymentGateway::new();
//! gateway.set_next_error_declined().await;
//!
//! let event = fixtures::mixed_seat_event("event-1", 5);
//! // Use in a BookingEngine...
//! ```

mod mock_payment;

pub use mock_payment::{MockPaymentGateway, RecordedCharge};

/// Test fixtures and helper functions.
pub mod fixtures {
    use std::sync::Arc;

    use chrono::Utc;

    use crate::venue::{EventShow, Seat, SeatKind, Venue};

    /// Create a venue with the given (seat id, tier) pairs, in order.
    pub fn venue_with_kinds(venue_id: &str, seats: &[(&str, SeatKind)]) -> Venue {
        Venue::new(
            venue_id,
            "Test Hall",
            seats
                .iter()
                .map(|(id, kind)| Seat::new(*id, *kind))
                .collect(),
        )
    }

    /// Create an event starting now at the given venue.
    pub fn event_at(event_id: &str, venue: Venue) -> EventShow {
        EventShow::new(event_id, Utc::now(), Arc::new(venue))
    }

    /// Create an event with `seat_count` seats named `S1..Sn`.
    ///
    /// The last two seats are Premium and Vip; the rest are Regular, so a
    /// fixture venue always exercises all pricing tiers when large enough.
    pub fn mixed_seat_event(event_id: &str, seat_count: usize) -> EventShow {
        let seats = (1..=seat_count)
            .map(|i| {
                let kind = if i == seat_count && seat_count >= 2 {
                    SeatKind::Vip
                } else if i + 1 == seat_count && seat_count >= 3 {
                    SeatKind::Premium
                } else {
                    SeatKind::Regular
                };
                Seat::new(format!("S{}", i), kind)
            })
            .collect();

        EventShow::new(
            event_id,
            Utc::now(),
            Arc::new(Venue::new(format!("venue-{}", event_id), "Test Hall", seats)),
        )
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_mixed_seat_event_tiers() {
            let event = mixed_seat_event("event-1", 5);
            let venue = event.venue();
            assert_eq!(venue.seats().len(), 5);
            assert_eq!(venue.seat("S1").unwrap().kind(), SeatKind::Regular);
            assert_eq!(venue.seat("S4").unwrap().kind(), SeatKind::Premium);
            assert_eq!(venue.seat("S5").unwrap().kind(), SeatKind::Vip);
        }
    }
}
