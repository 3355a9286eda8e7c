//! # Error Types
//!
//! Error types for pricing-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pricing-core errors (this file)                                       │
//! │  ├── PricingError  - Precondition failures the caller must handle      │
//! │  └── ConfigError   - Invalid environment configuration                 │
//! │                                                                         │
//! │  NOT errors (silently sanitized to zero):                              │
//! │  ├── negative / non-finite quantity or unit price                      │
//! │  ├── negative / missing tax rate                                       │
//! │  └── negative / non-finite shipping or discount overrides              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The summary calculation itself has no error path. Only the order payload
//! projection can fail, and only when the order has no customer.

use thiserror::Error;

// =============================================================================
// Pricing Error
// =============================================================================

/// Errors raised by pricing-core operations.
#[derive(Debug, Error)]
pub enum PricingError {
    /// The order has no customer reference, so it cannot be saved.
    ///
    /// ## When This Occurs
    /// - An admin edits a draft order that was never assigned a customer
    /// - A persisted order lost its customer link
    ///
    /// This signals a caller bug and must be propagated, never swallowed.
    #[error("Order {order_id} must reference a customer before updates can be saved")]
    MissingCustomerReference { order_id: i64 },

    /// Configuration error (wraps ConfigError).
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

// =============================================================================
// Config Error
// =============================================================================

/// Errors from loading [`PricingConfig`](crate::config::PricingConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A configuration value could not be parsed.
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with PricingError.
pub type PricingResult<T> = Result<T, PricingError>;

// =============================================================================
// Unit Tests
// =============================================================================
