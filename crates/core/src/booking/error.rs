//! Error types for the reservation engine.

use thiserror::Error;

use crate::locks::LockError;
use crate::payment::PaymentError;
use crate::ticket::TicketStatus;

/// Errors that can occur while booking or cancelling.
#[derive(Debug, Error)]
pub enum BookingError {
    /// Malformed or missing input, detected before any lock is taken.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Unknown event id.
    #[error("event not found: {0}")]
    EventNotFound(String),

    /// A requested seat id is absent from the event's venue.
    #[error("seat not found in venue: {0}")]
    SeatNotFound(String),

    /// Fewer unique seats resolved than requested (duplicate ids).
    #[error("requested {requested} seats but {resolved} resolved in venue")]
    SeatCountMismatch { requested: usize, resolved: usize },

    /// Unknown ticket id.
    #[error("ticket not found: {0}")]
    TicketNotFound(String),

    /// A seat was booked by a concurrent operation; observed under lock.
    #[error("seat {seat_id} is not available")]
    SeatUnavailable { seat_id: String },

    /// The payment step rejected the charge.
    #[error("payment failed for ticket {ticket_id}")]
    PaymentFailed {
        ticket_id: String,
        #[source]
        source: PaymentError,
    },

    /// The ticket's current status does not allow the operation.
    #[error("cannot {operation} ticket {ticket_id}: current status is {status}")]
    InvalidState {
        ticket_id: String,
        status: TicketStatus,
        operation: &'static str,
    },

    /// The operation was aborted while waiting for a seat lock. All locks
    /// acquired before the abort have been released.
    #[error("aborted while waiting for lock on seat {seat_id}")]
    Cancelled { seat_id: String },
}

impl BookingError {
    /// Whether the error reports an unknown event, seat, or ticket.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::EventNotFound(_)
                | Self::SeatNotFound(_)
                | Self::SeatCountMismatch { .. }
                | Self::TicketNotFound(_)
        )
    }

    /// Metric label for the attempt outcome.
    pub(crate) fn metric_label(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "invalid_argument",
            Self::EventNotFound(_)
            | Self::SeatNotFound(_)
            | Self::SeatCountMismatch { .. }
            | Self::TicketNotFound(_) => "not_found",
            Self::SeatUnavailable { .. } => "seat_unavailable",
            Self::PaymentFailed { .. } => "payment_failed",
            Self::InvalidState { .. } => "invalid_state",
            Self::Cancelled { .. } => "aborted",
        }
    }
}

impl From<LockError> for BookingError {
    fn from(err: LockError) -> Self {
        match err {
            LockError::WaitLimit { seat_id } => Self::Cancelled { seat_id },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_grouping() {
        assert!(BookingError::EventNotFound("e".into()).is_not_found());
        assert!(BookingError::SeatNotFound("s".into()).is_not_found());
        assert!(BookingError::TicketNotFound("t".into()).is_not_found());
        assert!(BookingError::SeatCountMismatch {
            requested: 2,
            resolved: 1
        }
        .is_not_found());
        assert!(!BookingError::InvalidArgument("x".into()).is_not_found());
    }

    #[test]
    fn test_error_display() {
        let err = BookingError::SeatUnavailable {
            seat_id: "A1".to_string(),
        };
        assert_eq!(err.to_string(), "seat A1 is not available");

        let err = BookingError::InvalidState {
            ticket_id: "ticket-1".to_string(),
            status: TicketStatus::Cancelled,
            operation: "cancel",
        };
        assert_eq!(
            err.to_string(),
            "cannot cancel ticket ticket-1: current status is cancelled"
        );
    }

    #[test]
    fn test_lock_error_maps_to_cancelled() {
        let err: BookingError = LockError::WaitLimit {
            seat_id: "A1".to_string(),
        }
        .into();
        assert!(matches!(err, BookingError::Cancelled { seat_id } if seat_id == "A1"));
    }
}
