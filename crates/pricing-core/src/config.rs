//! Display configuration for formatted amounts.
//!
//! Configuration is loaded from environment variables with fallback to defaults:
//!
//! | Variable                 | Default | Example |
//! |--------------------------|---------|---------|
//! | `ORDER_PRICING_CURRENCY` | `USD`   | `EUR`   |
//! | `ORDER_PRICING_LOCALE`   | `en-US` | `de-DE` |
//!
//! Configuration only affects [`PricingConfig::format`]. Totals are the same
//! regardless of currency or locale.

use std::env;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::money::format_currency;

pub const CURRENCY_ENV: &str = "ORDER_PRICING_CURRENCY";
pub const LOCALE_ENV: &str = "ORDER_PRICING_LOCALE";

/// Currency and locale used to display amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingConfig {
    /// ISO 4217 code, upper case.
    pub currency_code: String,
    /// BCP 47 locale tag.
    pub locale: String,
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            currency_code: "USD".to_string(),
            locale: "en-US".to_string(),
        }
    }
}

impl PricingConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = PricingConfig::default();

        let currency_code = match lookup(CURRENCY_ENV) {
            Some(raw) => parse_currency_code(&raw)?,
            None => defaults.currency_code,
        };

        let locale = lookup(LOCALE_ENV)
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .unwrap_or(defaults.locale);

        debug!(currency = %currency_code, locale = %locale, "pricing config loaded");

        Ok(PricingConfig {
            currency_code,
            locale,
        })
    }

    /// Formats an amount with the configured currency and locale.
    ///
    /// ```rust
    /// use pricing_core::PricingConfig;
    ///
    /// assert_eq!(PricingConfig::default().format(19.9), "$19.90");
    /// ```
    pub fn format(&self, amount: f64) -> String {
        format_currency(amount, &self.currency_code, &self.locale)
    }
}

fn parse_currency_code(raw: &str) -> Result<String, ConfigError> {
    let code = raw.trim();
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ConfigError::InvalidValue {
            key: CURRENCY_ENV.to_string(),
            reason: format!("'{code}' is not a 3-letter ISO 4217 code"),
        });
    }
    Ok(code.to_ascii_uppercase())
}
