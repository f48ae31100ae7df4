//! Mock payment processor for testing.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::payment::{PaymentError, PaymentProcessor};
use crate::ticket::Ticket;

/// A recorded charge for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedCharge {
    /// Ticket the charge was attempted for.
    pub ticket_id: String,
    /// Amount charged.
    pub amount: u64,
    /// Whether the charge succeeded.
    pub success: bool,
}

/// Mock implementation of the PaymentProcessor trait.
///
/// Provides controllable behavior for testing:
/// - Track charges and refunds for assertions
/// - Simulate declines via error injection
/// - Simulate gateway latency
#[derive(Debug, Default)]
pub struct MockPaymentGateway {
    /// Recorded charges.
    charges: Arc<RwLock<Vec<RecordedCharge>>>,
    /// Ticket ids that were refunded.
    refunds: Arc<RwLock<Vec<String>>>,
    /// If set, the next charge will fail with this error.
    next_error: Arc<RwLock<Option<PaymentError>>>,
    /// Simulated charge latency in milliseconds.
    charge_delay_ms: Arc<RwLock<u64>>,
}

impl MockPaymentGateway {
    /// Create a new mock gateway that accepts every charge instantly.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded charges.
    pub async fn recorded_charges(&self) -> Vec<RecordedCharge> {
        self.charges.read().await.clone()
    }

    /// Number of charges attempted.
    pub async fn charge_count(&self) -> usize {
        self.charges.read().await.len()
    }

    /// Ticket ids refunded so far.
    pub async fn refunded_ticket_ids(&self) -> Vec<String> {
        self.refunds.read().await.clone()
    }

    /// Number of refunds performed.
    pub async fn refund_count(&self) -> usize {
        self.refunds.read().await.len()
    }

    /// Configure the next charge to fail with the given error.
    pub async fn set_next_error(&self, error: PaymentError) {
        *self.next_error.write().await = Some(error);
    }

    /// Configure the next charge to be declined.
    pub async fn set_next_error_declined(&self) {
        self.set_next_error(PaymentError::Declined {
            ticket_id: "<next charge>".to_string(),
        })
        .await;
    }

    /// Set the simulated charge latency.
    pub async fn set_charge_delay(&self, delay: Duration) {
        *self.charge_delay_ms.write().await = delay.as_millis() as u64;
    }

    /// Take the next error if set.
    async fn take_error(&self) -> Option<PaymentError> {
        self.next_error.write().await.take()
    }
}

#[async_trait]
impl PaymentProcessor for MockPaymentGateway {
    fn name(&self) -> &str {
        "mock"
    }

    async fn charge(&self, ticket: &Ticket) -> Result<(), PaymentError> {
        let delay_ms = *self.charge_delay_ms.read().await;
        if delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }

        if let Some(err) = self.take_error().await {
            self.charges.write().await.push(RecordedCharge {
                ticket_id: ticket.ticket_id().to_string(),
                amount: ticket.total_price(),
                success: false,
            });
            return Err(err);
        }

        self.charges.write().await.push(RecordedCharge {
            ticket_id: ticket.ticket_id().to_string(),
            amount: ticket.total_price(),
            success: true,
        });
        Ok(())
    }

    async fn refund(&self, ticket: &Ticket) {
        self.refunds
            .write()
            .await
            .push(ticket.ticket_id().to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(price: u64) -> Ticket {
        Ticket::new("user-1", "event-1", vec![], price)
    }

    #[tokio::test]
    async fn test_charges_are_recorded() {
        let gateway = MockPaymentGateway::new();

        gateway.charge(&ticket(100)).await.unwrap();
        gateway.charge(&ticket(700)).await.unwrap();

        let charges = gateway.recorded_charges().await;
        assert_eq!(charges.len(), 2);
        assert!(charges[0].success);
        assert_eq!(charges[1].amount, 700);
    }

    #[tokio::test]
    async fn test_error_injection_is_consumed() {
        let gateway = MockPaymentGateway::new();
        gateway.set_next_error_declined().await;

        let result = gateway.charge(&ticket(100)).await;
        assert!(result.is_err());

        // Error consumed, charge recorded as failed, next charge succeeds.
        let charges = gateway.recorded_charges().await;
        assert_eq!(charges.len(), 1);
        assert!(!charges[0].success);

        assert!(gateway.charge(&ticket(100)).await.is_ok());
    }

    #[tokio::test]
    async fn test_refunds_are_recorded() {
        let gateway = MockPaymentGateway::new();
        let t = ticket(100);

        gateway.refund(&t).await;
        assert_eq!(gateway.refund_count().await, 1);
        assert_eq!(gateway.refunded_ticket_ids().await, vec![t.ticket_id()]);
    }

    #[tokio::test]
    async fn test_charge_delay() {
        let gateway = MockPaymentGateway::new();
        gateway.set_charge_delay(Duration::from_millis(30)).await;

        let started = std::time::Instant::now();
        gateway.charge(&ticket(100)).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(30));
    }
}
