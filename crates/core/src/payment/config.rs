//! Payment configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the payment step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentConfig {
    /// Probability in [0.0, 1.0] that the stochastic gateway declines a
    /// charge. Only used by the in-tree gateway.
    #[serde(default = "default_failure_probability")]
    pub failure_probability: f64,
}

fn default_failure_probability() -> f64 {
    0.05
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            failure_probability: default_failure_probability(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PaymentConfig::default();
        assert_eq!(config.failure_probability, 0.05);
    }

    #[test]
    fn test_deserialize_minimal() {
        let config: PaymentConfig = toml::from_str("").unwrap();
        assert_eq!(config.failure_probability, 0.05);
    }

    #[test]
    fn test_deserialize_full() {
        let toml = r#"
            failure_probability = 0.25
        "#;
        let config: PaymentConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.failure_probability, 0.25);
    }
}
