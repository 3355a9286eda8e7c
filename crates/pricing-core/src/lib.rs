//! # pricing-core: Order Pricing and Coupon Summaries
//!
//! Pure functions that turn order lines, shipping, discounts and coupons into
//! an order summary. No I/O, no shared state.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Order Pricing Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Callers (cart, checkout, admin order editor)        │   │
//! │  │   supply LineInput[], coupon already deemed eligible, base       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ pricing-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   line    │  │  summary  │  │  payload  │  │   money   │  │   │
//! │  │   │ LineTotals│  │  coupons  │  │ AdminOrder│  │ rounding  │  │   │
//! │  │   │ tax lines │  │ overrides │  │  Payload  │  │ formatting│  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ OrderSummary (JSON)                    │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 Persistence / API responses                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Wire types (LineInput, OrderSummary, AppliedCoupon, ...)
//! - [`line`] - Per-line totals and tax breakdown
//! - [`summary`] - Order summary aggregation and coupon discounts
//! - [`payload`] - Persisted order to save-payload projection
//! - [`money`] - Cent rounding and currency formatting
//! - [`config`] - Display currency/locale from the environment
//! - [`error`] - Error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, bit for bit
//! 2. **Never Fail on Numbers**: malformed amounts count as zero
//! 3. **Round at the Boundary**: every output amount is rounded to cents
//! 4. **Explicit Overrides**: override → base summary → zero, in one place
//!
//! ## Example Usage
//!
//! ```rust
//! use pricing_core::summary::{compute_summary, SummaryOverrides};
//! use pricing_core::{AppliedCoupon, DiscountType, LineInput};
//!
//! let lines = [LineInput::new(1, 10.0, 0.0)];
//! let overrides = SummaryOverrides::default()
//!     .with_coupon(AppliedCoupon::new(1, "Double", "DOUBLE", DiscountType::Percentage, 200.0));
//!
//! let summary = compute_summary(&lines, None, &overrides);
//! assert_eq!(summary.discount_total, 20.0);
//! assert_eq!(summary.grand_total, 0.0); // floored, never negative
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod line;
pub mod money;
pub mod payload;
pub mod summary;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use config::PricingConfig;
pub use error::{ConfigError, PricingError, PricingResult};
pub use line::{compute_line_totals, tax_lines};
pub use money::{format_currency, round_currency};
pub use payload::to_admin_order_payload;
pub use summary::{compute_summary, compute_summary_from_order, Override, SummaryOverrides};
pub use types::*;
