//! Ticket records for reservation attempts.

mod types;

pub use types::{Ticket, TicketStatus};
