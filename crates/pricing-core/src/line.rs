//! # Line Totals
//!
//! Turns a single order line into its subtotal, tax and total.
//!
//! ```text
//! quantity ──┐
//!            ├──► subtotal = qty × price ──► tax = subtotal × rate
//! price ─────┘                                     │
//!                                                  ▼
//!                               total = round(subtotal + tax)
//! ```
//!
//! Each input is sanitized on its own. A negative price zeroes the price but
//! leaves the quantity alone, and vice versa; either way the line just
//! contributes nothing. No error is ever returned.

use crate::money::{non_negative, round_currency};
use crate::types::{LineInput, LineTotals, OrderLine, OrderTaxLine};

/// Computes the totals for one line.
///
/// `subtotal` and `tax_amount` are rounded to cents independently. `total`
/// is the rounded sum of the *unrounded* subtotal and tax, so it can differ
/// by a cent from `subtotal + tax_amount`.
///
/// ## Example
/// ```rust
/// use pricing_core::line::compute_line_totals;
///
/// let totals = compute_line_totals(2, 25.0, Some(0.10));
/// assert_eq!(totals.subtotal, 50.0);
/// assert_eq!(totals.tax_amount, 5.0);
/// assert_eq!(totals.total, 55.0);
///
/// // Malformed input contributes nothing.
/// assert_eq!(compute_line_totals(-3, 25.0, None).total, 0.0);
/// ```
pub fn compute_line_totals(quantity: i64, unit_price: f64, tax_rate: Option<f64>) -> LineTotals {
    let quantity = if quantity > 0 { quantity as f64 } else { 0.0 };
    let unit_price = non_negative(unit_price);
    let tax_rate = tax_rate.map(non_negative).unwrap_or(0.0);

    let subtotal = quantity * unit_price;
    let tax_amount = subtotal * tax_rate;
    let total = subtotal + tax_amount;

    LineTotals {
        subtotal: round_currency(subtotal),
        tax_amount: round_currency(tax_amount),
        total: round_currency(total),
    }
}

impl LineInput {
    /// Computes this line's totals. See [`compute_line_totals`].
    #[inline]
    pub fn totals(&self) -> LineTotals {
        compute_line_totals(self.quantity, self.unit_price, self.tax_rate)
    }
}

/// Builds the per-line tax breakdown for an order.
///
/// Only lines that actually carry tax produce an entry; untaxed and
/// malformed lines are skipped.
///
/// ## Example
/// ```rust
/// use pricing_core::line::tax_lines;
/// use pricing_core::OrderLine;
///
/// let lines = vec![
///     OrderLine { quantity: 2, unit_price: Some(10.0), tax_rate: Some(0.05), ..Default::default() },
///     OrderLine { quantity: 1, unit_price: Some(3.0), ..Default::default() },
/// ];
/// let breakdown = tax_lines(&lines);
/// assert_eq!(breakdown.len(), 1);
/// assert_eq!(breakdown[0].tax_amount, 1.0);
/// ```
pub fn tax_lines(lines: &[OrderLine]) -> Vec<OrderTaxLine> {
    lines
        .iter()
        .filter_map(|line| {
            let input = line.to_line_input();
            let totals = input.totals();
            if totals.tax_amount <= 0.0 {
                return None;
            }
            Some(OrderTaxLine {
                product_id: line.product_id,
                product_name: line.name.clone(),
                taxable_amount: totals.subtotal,
                tax_rate: input.tax_rate.map(non_negative).unwrap_or(0.0),
                tax_amount: totals.tax_amount,
            })
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
