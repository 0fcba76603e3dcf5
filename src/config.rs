//! Store configuration

use std::{fs, path::Path};

use rusty_money::iso::{COP, Currency, EUR, GBP, USD};
use serde::Deserialize;
use thiserror::Error;

/// Sizes at or below this value are priced with the small-size tier.
pub const SIZE_TIER_THRESHOLD: u8 = 8;

/// Size preselected when a product is opened.
pub const DEFAULT_SIZE: u8 = 9;

/// Storage slot holding the persisted cart.
pub const CART_STORAGE_KEY: &str = "ao33-cart";

/// Host of the messaging deep link.
pub const MESSAGING_HOST: &str = "wa.me";

/// Destination the checkout message is addressed to.
pub const CHECKOUT_DESTINATION: &str = "573001234567";

/// First line of the checkout message.
pub const CHECKOUT_GREETING: &str = "Hola! Quiero comprar:";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading the configuration file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// A required value was empty
    #[error("Config value `{0}` must not be empty")]
    Empty(&'static str),
}

/// Store-wide settings shared by the catalog, the cart and the checkout hand-off.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct StoreConfig {
    /// Storage slot name for the cart snapshot
    pub storage_key: String,

    /// Messaging host used for the checkout deep link
    pub messaging_host: String,

    /// Destination identifier on the messaging host
    pub checkout_destination: String,

    /// Greeting placed before the item lines
    pub greeting: String,

    /// Largest size still priced with the small-size tier
    pub size_tier_threshold: u8,

    /// Size preselected for new selections
    pub default_size: u8,

    /// ISO currency code prices are expressed in
    pub currency: String,

    /// Thousands separator used when formatting prices
    pub thousands_separator: char,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: CART_STORAGE_KEY.to_string(),
            messaging_host: MESSAGING_HOST.to_string(),
            checkout_destination: CHECKOUT_DESTINATION.to_string(),
            greeting: CHECKOUT_GREETING.to_string(),
            size_tier_threshold: SIZE_TIER_THRESHOLD,
            default_size: DEFAULT_SIZE,
            currency: "COP".to_string(),
            thousands_separator: '.',
        }
    }
}

impl StoreConfig {
    /// Parse a configuration document. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the YAML is invalid, the currency is unknown
    /// or a slot/destination name is empty.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: StoreConfig = serde_norway::from_str(yaml)?;

        config.validate()?;

        Ok(config)
    }

    /// Load a configuration document from disk.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read or is invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// Resolve the configured currency code.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownCurrency`] for unsupported codes.
    pub fn currency(&self) -> Result<&'static Currency, ConfigError> {
        currency_for_code(&self.currency)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::Empty("storage_key"));
        }

        if self.messaging_host.trim().is_empty() {
            return Err(ConfigError::Empty("messaging_host"));
        }

        if self.checkout_destination.trim().is_empty() {
            return Err(ConfigError::Empty("checkout_destination"));
        }

        self.currency().map(|_currency| ())
    }
}

/// Map an ISO code onto one of the supported currencies.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownCurrency`] for any other code.
pub fn currency_for_code(code: &str) -> Result<&'static Currency, ConfigError> {
    match code {
        "COP" => Ok(COP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        "GBP" => Ok(GBP),
        other => Err(ConfigError::UnknownCurrency(other.to_string())),
    }
}
