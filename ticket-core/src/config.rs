//! # Application Configuration
//!
//! Build-time configuration for the ticket front-end. There is no runtime
//! environment in the browser and nothing is persisted, so every value is
//! either a compiled-in default or an `option_env!` override captured when the
//! WASM bundle is built.
//!
//! | Variable                  | Default                                      |
//! |---------------------------|----------------------------------------------|
//! | `TICKET_CONTRACT_ADDRESS` | `0x5FbDB2315678afecb367f032d93F642f64180aa3` |
//! | `TICKET_RECEIPT_POLL_MS`  | `1000`                                       |
//! | `TICKET_APP_TITLE`        | `Ticket Booth`                               |
//!
//! ## Global Config Access
//!
//! ```rust
//! use ticket_core::config::{app_config, init_config};
//!
//! init_config().expect("valid build configuration");
//! let contract = app_config().contract_address;
//! assert!(!contract.is_zero());
//! ```

use std::sync::OnceLock;

use alloy_primitives::Address;

use crate::pricing::PricingTiers;

/// Address of the contract on the local development chain.
pub const DEFAULT_CONTRACT_ADDRESS: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

pub const DEFAULT_RECEIPT_POLL_MS: u32 = 1_000;

pub const DEFAULT_APP_TITLE: &str = "Ticket Booth";

/// Labels and prompts for the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayOptions {
    pub title: String,
    pub currency_symbol: String,
    pub install_prompt: String,
    pub connect_label: String,
    pub purchase_label: String,
    pub withdraw_label: String,
    pub spent_label: String,
    pub owned_label: String,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_APP_TITLE.to_string(),
            currency_symbol: "ETH".to_string(),
            install_prompt: "To buy tickets, please install MetaMask".to_string(),
            connect_label: "Connect your MetaMask wallet".to_string(),
            purchase_label: "Purchase tickets".to_string(),
            withdraw_label: "Withdraw tickets".to_string(),
            spent_label: "Total spent".to_string(),
            owned_label: "Tickets owned".to_string(),
        }
    }
}

/// Application configuration fixed at build time.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// The one contract every binding targets.
    pub contract_address: Address,

    /// Decimals of the native currency used to render spent totals.
    ///
    /// The contract records spent totals in the same integer units it is
    /// paid in, so the default is `0`.
    pub value_decimals: u8,

    /// Delay between receipt polls while waiting for inclusion.
    pub receipt_poll_ms: u32,

    pub pricing: PricingTiers,

    pub display: DisplayOptions,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            contract_address: DEFAULT_CONTRACT_ADDRESS.parse().unwrap_or(Address::ZERO),
            value_decimals: 0,
            receipt_poll_ms: DEFAULT_RECEIPT_POLL_MS,
            pricing: PricingTiers::default(),
            display: DisplayOptions::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from values captured at compile time.
    pub fn from_build_env() -> Result<Self, String> {
        let contract_address = option_env!("TICKET_CONTRACT_ADDRESS")
            .unwrap_or(DEFAULT_CONTRACT_ADDRESS)
            .parse::<Address>()
            .map_err(|e| format!("TICKET_CONTRACT_ADDRESS must be a valid address: {}", e))?;

        let receipt_poll_ms = match option_env!("TICKET_RECEIPT_POLL_MS") {
            Some(raw) => raw
                .parse()
                .map_err(|e| format!("TICKET_RECEIPT_POLL_MS must be a valid number: {}", e))?,
            None => DEFAULT_RECEIPT_POLL_MS,
        };

        let mut display = DisplayOptions::default();
        if let Some(title) = option_env!("TICKET_APP_TITLE") {
            display.title = title.to_string();
        }

        Ok(Self {
            contract_address,
            receipt_poll_ms,
            display,
            ..Self::default()
        })
    }

    /// Reject configurations that can never produce a working session.
    pub fn validate(&self) -> Result<(), String> {
        if self.contract_address.is_zero() {
            return Err("Contract address must not be the zero address".to_string());
        }

        if self.receipt_poll_ms == 0 {
            return Err("Receipt poll interval must be greater than zero".to_string());
        }

        if self.value_decimals > 36 {
            return Err("Value decimals must be at most 36".to_string());
        }

        self.pricing.validate()
    }
}

/// Global configuration instance (initialized once at startup).
static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Initialize the global configuration.
///
/// Calling it again after a successful initialization is a no-op, since the
/// values come from the same compiled bundle.
pub fn init_config() -> Result<(), String> {
    if CONFIG.get().is_some() {
        return Ok(());
    }

    let config = AppConfig::from_build_env()?;
    config.validate()?;

    // A concurrent initializer stored an identical value.
    let _ = CONFIG.set(config);
    Ok(())
}

/// Get a reference to the global configuration.
///
/// # Panics
///
/// Panics if [`init_config()`] has not been called yet.
pub fn app_config() -> &'static AppConfig {
    CONFIG.get().expect("Config must be initialized with init_config() before use")
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(
            config.contract_address,
            DEFAULT_CONTRACT_ADDRESS.parse::<Address>().unwrap()
        );
    }

    #[test]
    fn test_zero_address_rejected() {
        let config = AppConfig {
            contract_address: Address::ZERO,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_poll_interval_rejected() {
        let config = AppConfig {
            receipt_poll_ms: 0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_price_rejected() {
        let mut config = AppConfig::default();
        config.pricing.bulk_unit_price = U256::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_init_config_is_idempotent() {
        assert!(init_config().is_ok());
        assert!(init_config().is_ok());
        assert!(!app_config().contract_address.is_zero());
    }
}
