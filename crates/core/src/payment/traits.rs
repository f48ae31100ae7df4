//! Trait definitions for the payment module.

use async_trait::async_trait;

use crate::ticket::Ticket;

use super::error::PaymentError;

/// A payment processor that can charge and refund tickets.
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Returns the name of this processor implementation.
    fn name(&self) -> &str;

    /// Charges the ticket's total price.
    ///
    /// Called by the engine while it holds every seat lock of the booking,
    /// so implementations should not block longer than the gateway requires.
    async fn charge(&self, ticket: &Ticket) -> Result<(), PaymentError>;

    /// Compensates a failed or abandoned charge.
    ///
    /// Must be idempotent: a no-op when nothing was charged, and safe to
    /// call more than once. Never fails; implementations log and swallow
    /// downstream refund errors.
    async fn refund(&self, ticket: &Ticket);
}
