use serde::{Deserialize, Serialize};

use crate::booking::BookingConfig;
use crate::payment::PaymentConfig;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub booking: BookingConfig,
    #[serde(default)]
    pub payment: PaymentConfig,
}
