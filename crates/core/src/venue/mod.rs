//! Venue and seat model: seats, seat tiers, events, and the venues that own
//! them.

mod types;

pub use types::{EventShow, Seat, SeatKind, SeatStatus, Venue};
