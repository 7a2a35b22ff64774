//! # Register Configuration
//!
//! Configuration loaded once when the session opens.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`TILL_*`)
//! 2. Defaults (this file)
//!
//! Configuration is read-only after the session opens, so no interior
//! mutability is needed.

use serde::{Deserialize, Serialize};
use tracing::warn;

use till_core::validation::validate_tax_rate_bps;
use till_core::DEFAULT_TAX_RATE_BPS;

/// Register configuration.
///
/// Most fields have sensible defaults for development; a deployed register
/// overrides them through the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterConfig {
    /// Store name (printed at the top of receipts)
    pub store_name: String,

    /// Store address lines (for receipts)
    pub store_address: Vec<String>,

    /// VAT rate in basis points (2000 = 20%)
    pub tax_rate_bps: u32,

    /// Receipt paper width in characters (typically 32, 42, or 48)
    pub receipt_width: usize,
}

impl Default for RegisterConfig {
    /// Returns default configuration suitable for development.
    ///
    /// ## Default Values
    /// - Store: "Till Dev Store"
    /// - VAT: 20% (standard French rate)
    /// - Receipt width: 32 characters
    fn default() -> Self {
        RegisterConfig {
            store_name: "Till Dev Store".to_string(),
            store_address: vec!["12 rue du Marché".to_string(), "75011 Paris".to_string()],
            tax_rate_bps: DEFAULT_TAX_RATE_BPS,
            receipt_width: 32,
        }
    }
}

impl RegisterConfig {
    /// Creates a RegisterConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `TILL_STORE_NAME`: Override store name
    /// - `TILL_TAX_RATE`: Override VAT rate as a percentage (e.g., "5.5")
    /// - `TILL_RECEIPT_WIDTH`: Override receipt width in characters
    pub fn from_env() -> Self {
        let mut config = RegisterConfig::default();

        if let Ok(store_name) = std::env::var("TILL_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Ok(tax_rate_str) = std::env::var("TILL_TAX_RATE") {
            match tax_rate_str.parse::<f64>() {
                Ok(rate) => {
                    let bps = (rate * 100.0).round() as u32;
                    if validate_tax_rate_bps(bps).is_ok() {
                        config.tax_rate_bps = bps;
                    } else {
                        warn!(rate = %tax_rate_str, "Ignoring out-of-range TILL_TAX_RATE");
                    }
                }
                Err(_) => warn!(rate = %tax_rate_str, "Ignoring unparseable TILL_TAX_RATE"),
            }
        }

        if let Ok(width_str) = std::env::var("TILL_RECEIPT_WIDTH") {
            if let Ok(width) = width_str.parse::<usize>() {
                config.receipt_width = width;
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RegisterConfig::default();
        assert_eq!(config.tax_rate_bps, 2000);
        assert_eq!(config.receipt_width, 32);
        assert!(!config.store_name.is_empty());
    }
}
