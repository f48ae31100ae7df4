//! Pluggable payment step.
//!
//! The engine calls [`PaymentProcessor::charge`] while holding every seat
//! lock of the booking and runs the [`PaymentProcessor::refund`]
//! compensation hook when the charge fails. Implementations talk to a real
//! gateway in production; the in-tree [`StochasticGateway`] injects failures
//! at a configured probability to exercise the compensation path.

mod config;
mod error;
mod stochastic;
mod traits;

pub use config::PaymentConfig;
pub use error::PaymentError;
pub use stochastic::StochasticGateway;
pub use traits::PaymentProcessor;
