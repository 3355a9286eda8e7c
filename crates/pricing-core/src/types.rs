//! # Domain Types
//!
//! Wire types shared with the storefront and the order persistence layer.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   LineInput     │   │  OrderSummary   │   │  AppliedCoupon  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  quantity       │   │  productTotal   │   │  code           │       │
//! │  │  unit_price     │   │  taxTotal       │   │  discountType   │       │
//! │  │  tax_rate       │   │  shippingTotal  │   │  discountValue  │       │
//! │  └─────────────────┘   │  discountTotal  │   │  discountAmount │       │
//! │                        │  grandTotal     │   └─────────────────┘       │
//! │  ┌─────────────────┐   │  + pass-through │   ┌─────────────────┐       │
//! │  │   LineTotals    │   └─────────────────┘   │  DiscountType   │       │
//! │  │  subtotal       │                         │  Percentage     │       │
//! │  │  tax_amount     │                         │  Flat           │       │
//! │  │  total          │                         └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All amounts are decimal currency units (dollars with cents), not minor
//! units. JSON field names are camelCase to match the storefront.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Line Input
// =============================================================================

/// One order line's pricing facts.
///
/// Values are taken as given; [`compute_line_totals`](crate::line::compute_line_totals)
/// sanitizes them, so a malformed line contributes zero instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineInput {
    /// Number of units.
    pub quantity: i64,

    /// Price of one unit.
    pub unit_price: f64,

    /// Tax rate as a fraction (0.10 = 10%). Missing means untaxed.
    #[serde(default)]
    pub tax_rate: Option<f64>,
}

impl LineInput {
    /// Creates a line input.
    pub fn new(quantity: i64, unit_price: f64, tax_rate: impl Into<Option<f64>>) -> Self {
        LineInput {
            quantity,
            unit_price,
            tax_rate: tax_rate.into(),
        }
    }
}

// =============================================================================
// Line Totals
// =============================================================================

/// Derived totals for a single line, each rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineTotals {
    pub subtotal: f64,
    pub tax_amount: f64,
    pub total: f64,
}

// =============================================================================
// Coupons
// =============================================================================

/// How a coupon's `discount_value` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum DiscountType {
    /// `discount_value` is a percentage (0-100) of the order amount.
    Percentage,
    /// `discount_value` is a fixed currency amount.
    Flat,
}

/// A coupon the caller has already decided applies to this order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AppliedCoupon {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub discount_type: DiscountType,

    /// Percentage for [`DiscountType::Percentage`], amount for [`DiscountType::Flat`].
    #[serde(default)]
    pub discount_value: Option<f64>,

    /// Computed discount for this order. Overwritten on every summary.
    #[serde(default)]
    pub discount_amount: Option<f64>,
}

impl AppliedCoupon {
    /// Creates a coupon with no computed discount amount yet.
    pub fn new(
        id: i64,
        name: impl Into<String>,
        code: impl Into<String>,
        discount_type: DiscountType,
        discount_value: f64,
    ) -> Self {
        AppliedCoupon {
            id,
            name: name.into(),
            code: code.into(),
            discount_type,
            discount_value: Some(discount_value),
            discount_amount: None,
        }
    }
}

// =============================================================================
// Summary Pass-Through Types
// =============================================================================

/// Shipping cost resolved for a destination, most specific level wins.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct ShippingQuote {
    pub country_id: Option<i64>,
    pub state_id: Option<i64>,
    pub city_id: Option<i64>,
    pub country_name: Option<String>,
    pub state_name: Option<String>,
    pub city_name: Option<String>,
    pub country_cost: Option<f64>,
    pub state_cost: Option<f64>,
    pub city_cost: Option<f64>,
    pub effective_cost: Option<f64>,
}

/// Tax charged on one order line.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderTaxLine {
    pub product_id: Option<i64>,
    pub product_name: Option<String>,
    pub taxable_amount: f64,
    pub tax_rate: f64,
    pub tax_amount: f64,
}

// =============================================================================
// Order Summary
// =============================================================================

/// The monetary summary of an order.
///
/// The five totals and `applied_coupon.discount_amount` are computed by
/// [`compute_summary`](crate::summary::compute_summary). Every other field is
/// carried over from the base summary.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct OrderSummary {
    pub product_total: f64,
    pub tax_total: f64,
    pub shipping_total: f64,
    pub discount_total: f64,
    pub grand_total: f64,
    pub applied_coupon: Option<AppliedCoupon>,
    pub shipping_breakdown: Option<ShippingQuote>,
    pub tax_lines: Vec<OrderTaxLine>,
    pub payment_status: Option<String>,
    #[ts(as = "Option<String>")]
    pub due_date: Option<NaiveDate>,
    pub balance_due: Option<f64>,
    pub amount_due: Option<f64>,
    pub notes: Option<String>,
    pub shipping_method: Option<String>,
}

// =============================================================================
// Persisted Orders
// =============================================================================

/// A line as stored on a persisted order. Prices may be missing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct OrderLine {
    pub product_id: Option<i64>,
    pub name: Option<String>,
    pub quantity: i64,
    pub unit_price: Option<f64>,
    pub line_total: Option<f64>,
    pub tax_rate: Option<f64>,
    pub product_slug: Option<String>,
    pub variant_id: Option<i64>,
    pub variant_sku: Option<String>,
    pub variant_label: Option<String>,
}

impl OrderLine {
    /// Pricing facts for this line; missing price and rate count as zero.
    pub fn to_line_input(&self) -> LineInput {
        LineInput {
            quantity: self.quantity,
            unit_price: self.unit_price.unwrap_or(0.0),
            tax_rate: Some(self.tax_rate.unwrap_or(0.0)),
        }
    }
}

/// A normalized line ready to be sent back when saving an order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CheckoutOrderLine {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub quantity: i64,
    pub unit_price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_label: Option<String>,
}

/// Shipping or billing address attached to an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum AddressType {
    Shipping,
    Billing,
}

/// A customer address snapshot. Carried through the payload untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CheckoutAddress {
    pub id: i64,
    #[serde(rename = "type")]
    pub address_type: AddressType,
    pub country_id: Option<i64>,
    pub state_id: Option<i64>,
    pub city_id: Option<i64>,
    pub country_name: Option<String>,
    pub state_name: Option<String>,
    pub city_name: Option<String>,
    pub full_name: String,
    pub mobile_number: String,
    pub pin_code: Option<String>,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub landmark: Option<String>,
    pub default_address: bool,
}

/// A payment method offered at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PaymentMethod {
    pub key: String,
    pub display_name: String,
    pub enabled: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A persisted order as returned by the order service.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct OrderDetail {
    pub id: i64,
    pub order_number: String,
    pub status: Option<String>,
    pub customer_id: Option<i64>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub payment_status: Option<String>,
    pub summary: Option<OrderSummary>,
    pub lines: Vec<OrderLine>,
    pub shipping_address: Option<CheckoutAddress>,
    pub billing_address: Option<CheckoutAddress>,
    pub payment_method: Option<PaymentMethod>,
}

/// Body sent to the admin order save/update endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AdminOrderPayload {
    pub customer_id: i64,
    pub customer_email: Option<String>,
    pub customer_name: Option<String>,
    pub status: Option<String>,
    pub shipping_address: Option<CheckoutAddress>,
    pub billing_address: Option<CheckoutAddress>,
    pub payment_method: Option<PaymentMethod>,
    pub summary: OrderSummary,
    pub lines: Vec<CheckoutOrderLine>,
}

// =============================================================================
// Unit Tests
// =============================================================================
