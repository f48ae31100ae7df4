//! Error types for the payment module.

use thiserror::Error;

/// Errors that can occur while charging a ticket.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// The charge was declined.
    #[error("payment declined for ticket {ticket_id}")]
    Declined { ticket_id: String },

    /// The gateway itself failed (network, credentials, ...).
    #[error("payment gateway failure: {0}")]
    Gateway(anyhow::Error),
}

impl From<anyhow::Error> for PaymentError {
    fn from(err: anyhow::Error) -> Self {
        Self::Gateway(err)
    }
}

impl PaymentError {
    /// Whether retrying the same charge could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Gateway(_))
    }
}
