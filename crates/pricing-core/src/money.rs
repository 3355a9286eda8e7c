//! # Money Module
//!
//! Rounding, sanitization and display formatting for monetary amounts.
//!
//! ## Why Round at Every Boundary?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Amounts arrive as decimal dollars (f64), e.g. from JSON:               │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ drift                            │
//! │                                                                         │
//! │  A summary is recomputed every time an admin edits an order.           │
//! │  Unrounded drift would compound across recomputations.                 │
//! │                                                                         │
//! │  OUR SOLUTION: round to cents at every output boundary                  │
//! │    round_currency(0.1 + 0.2) = 0.30                                     │
//! │    round_currency(round_currency(x)) == round_currency(x)               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pricing_core::money::{format_currency, round_currency};
//!
//! assert_eq!(round_currency(10.005_1), 10.01);
//! assert_eq!(format_currency(1234.5, "USD", "en-US"), "$1,234.50");
//! ```

// =============================================================================
// Rounding
// =============================================================================

/// Rounds an amount to 2 decimal places, half away from zero.
///
/// Computed as `round(value × 100) / 100`. Non-finite input yields `0`.
///
/// ## Example
/// ```rust
/// use pricing_core::money::round_currency;
///
/// assert_eq!(round_currency(2.345_6), 2.35);
/// assert_eq!(round_currency(-0.125), -0.13);
/// assert_eq!(round_currency(f64::NAN), 0.0);
/// ```
#[inline]
pub fn round_currency(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    (value * 100.0).round() / 100.0
}

/// Returns `value` if it is finite and non-negative, otherwise `0`.
#[inline]
pub(crate) fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        0.0
    }
}

// =============================================================================
// Formatting
// =============================================================================

/// Where the currency symbol goes relative to the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SymbolPosition {
    /// `$1,234.50`
    Prefix,
    /// `1.234,50 €`
    Suffix,
}

/// How integer digits are grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Grouping {
    /// 1,234,567
    Thousands,
    /// 12,34,567 (lakh/crore)
    Indian,
}

/// Number formatting conventions for a locale.
#[derive(Debug, Clone, Copy)]
struct LocaleConventions {
    group_separator: &'static str,
    decimal_separator: char,
    grouping: Grouping,
    symbol_position: SymbolPosition,
}

impl LocaleConventions {
    /// Resolves conventions from a BCP 47 tag such as `de-DE` or `en_IN`.
    /// Unknown locales use `en-US` conventions.
    fn for_locale(locale: &str) -> Self {
        let tag = locale.trim().replace('_', "-").to_ascii_lowercase();
        let language = tag.split('-').next().unwrap_or("");
        let region = tag.split('-').nth(1).unwrap_or("");

        match (language, region) {
            (_, "in") | ("hi", _) => LocaleConventions {
                group_separator: ",",
                decimal_separator: '.',
                grouping: Grouping::Indian,
                symbol_position: SymbolPosition::Prefix,
            },
            ("de" | "es" | "it" | "nl" | "pt", _) => LocaleConventions {
                group_separator: ".",
                decimal_separator: ',',
                grouping: Grouping::Thousands,
                symbol_position: SymbolPosition::Suffix,
            },
            ("fr", _) => LocaleConventions {
                group_separator: "\u{202f}",
                decimal_separator: ',',
                grouping: Grouping::Thousands,
                symbol_position: SymbolPosition::Suffix,
            },
            _ => LocaleConventions {
                group_separator: ",",
                decimal_separator: '.',
                grouping: Grouping::Thousands,
                symbol_position: SymbolPosition::Prefix,
            },
        }
    }

    fn group_digits(&self, whole: u128) -> String {
        let digits = whole.to_string();
        if digits.len() <= 3 {
            return digits;
        }

        // The last three digits always form one group; the head is split
        // into groups of three (or two for Indian grouping).
        let (head, tail) = digits.split_at(digits.len() - 3);
        let size = match self.grouping {
            Grouping::Thousands => 3,
            Grouping::Indian => 2,
        };

        let mut groups = Vec::new();
        let mut end = head.len();
        while end > 0 {
            let start = end.saturating_sub(size);
            groups.push(&head[start..end]);
            end = start;
        }
        groups.reverse();

        let mut out = groups.join(self.group_separator);
        out.push_str(self.group_separator);
        out.push_str(tail);
        out
    }
}

/// Returns the display symbol and number of minor units for an ISO 4217 code.
///
/// Unknown codes display as the code itself with 2 minor units.
fn currency_symbol(code: &str) -> (&str, u32) {
    match code {
        "USD" => ("$", 2),
        "EUR" => ("€", 2),
        "GBP" => ("£", 2),
        "INR" => ("₹", 2),
        "JPY" => ("¥", 0),
        "CAD" => ("CA$", 2),
        "AUD" => ("A$", 2),
        other => (other, 2),
    }
}

/// Formats an amount for display in the given currency and locale.
///
/// Pure function: no formatter is cached between calls, so it is safe to
/// call from any thread. Non-finite amounts format as zero.
///
/// ## Example
/// ```rust
/// use pricing_core::money::format_currency;
///
/// assert_eq!(format_currency(1234.5, "USD", "en-US"), "$1,234.50");
/// assert_eq!(format_currency(1234.5, "EUR", "de-DE"), "1.234,50\u{a0}€");
/// assert_eq!(format_currency(1234567.0, "INR", "en-IN"), "₹12,34,567.00");
/// assert_eq!(format_currency(-5.5, "GBP", "en-GB"), "-£5.50");
/// ```
pub fn format_currency(amount: f64, currency_code: &str, locale: &str) -> String {
    let code = currency_code.trim().to_ascii_uppercase();
    let (symbol, minor_units) = currency_symbol(&code);
    let conventions = LocaleConventions::for_locale(locale);

    let amount = if amount.is_finite() { amount } else { 0.0 };
    let scale = 10u128.pow(minor_units);
    // `as` saturates for out-of-range floats.
    let units = (amount.abs() * scale as f64).round() as u128;
    let whole = units / scale;
    let fraction = units % scale;

    let mut number = conventions.group_digits(whole);
    if minor_units > 0 {
        number.push(conventions.decimal_separator);
        number.push_str(&format!(
            "{:0width$}",
            fraction,
            width = minor_units as usize
        ));
    }

    let sign = if amount < 0.0 && units > 0 { "-" } else { "" };
    let is_code = symbol == code;

    match conventions.symbol_position {
        SymbolPosition::Prefix if is_code => format!("{sign}{symbol}\u{a0}{number}"),
        SymbolPosition::Prefix => format!("{sign}{symbol}{number}"),
        SymbolPosition::Suffix => format!("{sign}{number}\u{a0}{symbol}"),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
