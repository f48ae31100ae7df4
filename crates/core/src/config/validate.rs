use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Payment failure probability is within [0.0, 1.0]
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let p = config.payment.failure_probability;
    if !(0.0..=1.0).contains(&p) {
        return Err(ConfigError::ValidationError(format!(
            "payment.failure_probability must be within [0.0, 1.0], got {}",
            p
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payment::PaymentConfig;

    #[test]
    fn test_validate_default_config() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_out_of_range_probability_fails() {
        let config = Config {
            payment: PaymentConfig {
                failure_probability: 1.5,
            },
            ..Default::default()
        };
        let result = validate_config(&config);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_validate_negative_probability_fails() {
        let config = Config {
            payment: PaymentConfig {
                failure_probability: -0.1,
            },
            ..Default::default()
        };
        assert!(validate_config(&config).is_err());
    }
}
