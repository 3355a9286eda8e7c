//! # Order Payload Projection
//!
//! Turns a persisted [`OrderDetail`] into the [`AdminOrderPayload`] sent back
//! when an admin saves an order.
//!
//! ```text
//! OrderDetail
//!   │
//!   ├── customer_id missing? ──► Err(MissingCustomerReference)
//!   │
//!   ├── summary present? ──► reuse as-is
//!   │   └── absent ─────────► compute_summary_from_order(lines, None)
//!   │
//!   └── lines ──► CheckoutOrderLine (qty ≥ 0, unit price backfilled)
//! ```
//!
//! The customer check is the only failure. Everything else degrades to
//! `None`.

use tracing::{debug, warn};

use crate::error::{PricingError, PricingResult};
use crate::money::round_currency;
use crate::summary::{compute_summary_from_order, SummaryOverrides};
use crate::types::{AdminOrderPayload, CheckoutOrderLine, OrderDetail, OrderLine, OrderSummary};

/// Normalizes a persisted line for saving.
///
/// Non-positive quantities become `0`. A missing unit price is backfilled
/// from `line_total / quantity` (dividing by 1 when the quantity is not
/// positive) and rounded to cents.
///
/// ## Example
/// ```rust
/// use pricing_core::payload::to_checkout_order_line;
/// use pricing_core::OrderLine;
///
/// let line = OrderLine { quantity: 3, line_total: Some(10.0), ..Default::default() };
/// let normalized = to_checkout_order_line(&line);
/// assert_eq!(normalized.unit_price, 3.33);
/// ```
pub fn to_checkout_order_line(line: &OrderLine) -> CheckoutOrderLine {
    let quantity = line.quantity.max(0);
    let divisor = if quantity > 0 { quantity as f64 } else { 1.0 };
    let unit_price = line
        .unit_price
        .unwrap_or_else(|| line.line_total.unwrap_or(0.0) / divisor);

    CheckoutOrderLine {
        product_id: line.product_id,
        name: line.name.clone(),
        quantity,
        unit_price: round_currency(unit_price),
        tax_rate: line.tax_rate,
        product_slug: line.product_slug.clone(),
        variant_id: line.variant_id,
        variant_sku: line.variant_sku.clone(),
        variant_label: line.variant_label.clone(),
    }
}

/// Returns the order's stored summary, or computes one from its lines.
pub fn ensure_summary(order: &OrderDetail) -> OrderSummary {
    match &order.summary {
        Some(summary) => summary.clone(),
        None => {
            debug!(order_id = order.id, "order has no summary, recomputing from lines");
            compute_summary_from_order(&order.lines, None, &SummaryOverrides::default())
        }
    }
}

/// Builds the save/update payload for an order.
///
/// ## Errors
/// [`PricingError::MissingCustomerReference`] when the order has no customer.
///
/// ## Example
/// ```rust
/// use pricing_core::payload::to_admin_order_payload;
/// use pricing_core::{OrderDetail, OrderLine, PricingError};
///
/// let mut order = OrderDetail {
///     id: 10,
///     lines: vec![OrderLine { quantity: 2, unit_price: Some(5.0), ..Default::default() }],
///     ..Default::default()
/// };
/// assert!(matches!(
///     to_admin_order_payload(&order),
///     Err(PricingError::MissingCustomerReference { order_id: 10 })
/// ));
///
/// order.customer_id = Some(7);
/// let payload = to_admin_order_payload(&order).unwrap();
/// assert_eq!(payload.customer_id, 7);
/// assert_eq!(payload.summary.grand_total, 10.0);
/// ```
pub fn to_admin_order_payload(order: &OrderDetail) -> PricingResult<AdminOrderPayload> {
    let Some(customer_id) = order.customer_id else {
        warn!(order_id = order.id, "order has no customer reference");
        return Err(PricingError::MissingCustomerReference { order_id: order.id });
    };

    Ok(AdminOrderPayload {
        customer_id,
        customer_email: order.customer_email.clone(),
        customer_name: order.customer_name.clone(),
        status: order.status.clone(),
        shipping_address: order.shipping_address.clone(),
        billing_address: order.billing_address.clone(),
        payment_method: order.payment_method.clone(),
        summary: ensure_summary(order),
        lines: order.lines.iter().map(to_checkout_order_line).collect(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
