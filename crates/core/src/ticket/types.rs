//! Core ticket data types.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

use crate::venue::Seat;

/// Current status of a ticket.
///
/// State machine flow:
/// ```text
/// Pending -> Booked -> Cancelled
///    |
///    v
///  Failed
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum TicketStatus {
    /// Reservation attempt created, not yet committed.
    Pending = 0,
    /// Seats committed and payment charged.
    Booked = 1,
    /// Booked ticket released back by the user (terminal).
    Cancelled = 2,
    /// Attempt failed before commit (terminal).
    Failed = 3,
}

impl TicketStatus {
    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => TicketStatus::Pending,
            1 => TicketStatus::Booked,
            2 => TicketStatus::Cancelled,
            _ => TicketStatus::Failed,
        }
    }

    /// Returns true if no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TicketStatus::Cancelled | TicketStatus::Failed)
    }

    /// Returns true if the ticket can be cancelled from this status.
    pub fn can_cancel(&self) -> bool {
        matches!(self, TicketStatus::Booked)
    }

    /// Returns the status as a string (for filtering and logging).
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Pending => "pending",
            TicketStatus::Booked => "booked",
            TicketStatus::Cancelled => "cancelled",
            TicketStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A ticket representing one reservation attempt for a set of seats.
///
/// Identity, seat snapshot, price, and timestamp are fixed at creation; only
/// the status cell transitions afterwards. Tickets are never deleted.
#[derive(Debug)]
pub struct Ticket {
    ticket_id: String,
    user_id: String,
    event_id: String,
    seats: Vec<Arc<Seat>>,
    total_price: u64,
    created_at: DateTime<Utc>,
    status: AtomicU8,
}

impl Ticket {
    /// Create a new pending ticket with a fresh unique identifier.
    pub fn new(
        user_id: impl Into<String>,
        event_id: impl Into<String>,
        seats: Vec<Arc<Seat>>,
        total_price: u64,
    ) -> Self {
        Self {
            ticket_id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            event_id: event_id.into(),
            seats,
            total_price,
            created_at: Utc::now(),
            status: AtomicU8::new(TicketStatus::Pending as u8),
        }
    }

    /// Globally unique ticket identifier.
    pub fn ticket_id(&self) -> &str {
        &self.ticket_id
    }

    /// Owning user.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Event the seats belong to.
    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    /// Seat snapshot taken at booking time, in request order.
    pub fn seats(&self) -> &[Arc<Seat>] {
        &self.seats
    }

    /// Seat identifiers of the snapshot, in request order.
    pub fn seat_ids(&self) -> Vec<String> {
        self.seats.iter().map(|s| s.seat_id().to_string()).collect()
    }

    /// Total price at booking time. Never changes after creation.
    pub fn total_price(&self) -> u64 {
        self.total_price
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Current status.
    pub fn status(&self) -> TicketStatus {
        TicketStatus::from_u8(self.status.load(Ordering::SeqCst))
    }

    /// Transition the ticket status unconditionally.
    pub(crate) fn set_status(&self, status: TicketStatus) {
        self.status.store(status as u8, Ordering::SeqCst);
    }

    /// Transition `from -> to` atomically. Returns false if the ticket was
    /// not in `from`, leaving the status untouched.
    pub(crate) fn try_transition(&self, from: TicketStatus, to: TicketStatus) -> bool {
        self.status
            .compare_exchange(from as u8, to as u8, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }
}

impl Serialize for Ticket {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let seats: Vec<&Seat> = self.seats.iter().map(|s| s.as_ref()).collect();
        let mut s = serializer.serialize_struct("Ticket", 7)?;
        s.serialize_field("ticket_id", &self.ticket_id)?;
        s.serialize_field("user_id", &self.user_id)?;
        s.serialize_field("event_id", &self.event_id)?;
        s.serialize_field("seats", &seats)?;
        s.serialize_field("total_price", &self.total_price)?;
        s.serialize_field("created_at", &self.created_at)?;
        s.serialize_field("status", &self.status())?;
        s.end()
    }
}
