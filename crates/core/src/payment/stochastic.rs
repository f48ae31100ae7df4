//! Stochastic reference gateway.

use async_trait::async_trait;
use rand::Rng;
use tracing::{debug, warn};

use crate::ticket::Ticket;

use super::config::PaymentConfig;
use super::error::PaymentError;
use super::traits::PaymentProcessor;

/// Payment processor that declines a configurable fraction of charges.
///
/// Stands in for a real gateway and exists to exercise the engine's
/// compensation path under realistic failure rates.
#[derive(Debug)]
pub struct StochasticGateway {
    failure_probability: f64,
}

impl StochasticGateway {
    /// Create a gateway declining with the given probability, clamped to
    /// [0.0, 1.0].
    pub fn new(failure_probability: f64) -> Self {
        Self {
            failure_probability: failure_probability.clamp(0.0, 1.0),
        }
    }

    /// Create a gateway from configuration.
    pub fn from_config(config: &PaymentConfig) -> Self {
        Self::new(config.failure_probability)
    }
}

impl Default for StochasticGateway {
    fn default() -> Self {
        Self::from_config(&PaymentConfig::default())
    }
}

#[async_trait]
impl PaymentProcessor for StochasticGateway {
    fn name(&self) -> &str {
        "stochastic"
    }

    async fn charge(&self, ticket: &Ticket) -> Result<(), PaymentError> {
        let roll: f64 = rand::thread_rng().gen();
        if roll < self.failure_probability {
            warn!(
                ticket_id = ticket.ticket_id(),
                amount = ticket.total_price(),
                "charge declined"
            );
            return Err(PaymentError::Declined {
                ticket_id: ticket.ticket_id().to_string(),
            });
        }

        debug!(
            ticket_id = ticket.ticket_id(),
            amount = ticket.total_price(),
            "charge accepted"
        );
        Ok(())
    }

    async fn refund(&self, ticket: &Ticket) {
        // Nothing was captured on decline, so compensation is a no-op here.
        debug!(ticket_id = ticket.ticket_id(), "refund hook invoked");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket() -> Ticket {
        Ticket::new("user-1", "event-1", vec![], 100)
    }

    #[tokio::test]
    async fn test_zero_probability_never_declines() {
        let gateway = StochasticGateway::new(0.0);
        for _ in 0..100 {
            assert!(gateway.charge(&ticket()).await.is_ok());
        }
    }

    #[tokio::test]
    async fn test_full_probability_always_declines() {
        let gateway = StochasticGateway::new(1.0);
        for _ in 0..100 {
            let err = gateway.charge(&ticket()).await.unwrap_err();
            assert!(matches!(err, PaymentError::Declined { .. }));
        }
    }

    #[test]
    fn test_probability_is_clamped() {
        let gateway = StochasticGateway::new(7.5);
        assert_eq!(gateway.failure_probability, 1.0);

        let gateway = StochasticGateway::new(-1.0);
        assert_eq!(gateway.failure_probability, 0.0);
    }

    #[tokio::test]
    async fn test_refund_is_idempotent() {
        let gateway = StochasticGateway::new(1.0);
        let t = ticket();
        gateway.refund(&t).await;
        gateway.refund(&t).await;
    }
}
