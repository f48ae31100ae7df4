//! Reservation engine configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for the reservation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfig {
    /// Upper bound in milliseconds on how long one operation may wait for a
    /// contended seat lock before aborting (0 = wait indefinitely).
    #[serde(default)]
    pub lock_wait_timeout_ms: u64,
}

impl BookingConfig {
    /// The configured wait bound as a duration, or `None` for unlimited.
    pub fn lock_wait_limit(&self) -> Option<Duration> {
        match self.lock_wait_timeout_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            lock_wait_timeout_ms: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_waits_indefinitely() {
        let config = BookingConfig::default();
        assert_eq!(config.lock_wait_timeout_ms, 0);
        assert!(config.lock_wait_limit().is_none());
    }

    #[test]
    fn test_deserialize_minimal() {
        let config: BookingConfig = toml::from_str("").unwrap();
        assert!(config.lock_wait_limit().is_none());
    }

    #[test]
    fn test_deserialize_full() {
        let toml = r#"
            lock_wait_timeout_ms = 1500
        "#;
        let config: BookingConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.lock_wait_limit(), Some(Duration::from_millis(1500)));
    }
}
