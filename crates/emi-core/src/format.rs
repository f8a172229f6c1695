//! Display formatting for calculator output.
//!
//! Amounts are rounded through `rust_decimal` so half-way cases round away
//! from zero the way browser number formatting does, rather than inheriting
//! binary floating-point artefacts.

use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Currency, Money};

/// Number-grouping convention for displayed amounts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Locale {
    /// `$1,234,567`
    #[default]
    EnUs,
    /// `₹12,34,567` (lakh/crore grouping)
    EnIn,
}

impl Locale {
    pub fn currency(&self) -> Currency {
        match self {
            Locale::EnUs => Currency::USD,
            Locale::EnIn => Currency::INR,
        }
    }
}

/// Whole-unit currency string, e.g. `$1,219` or `₹8,678`.
///
/// Non-finite amounts render as zero.
pub fn format_currency(amount: Money, locale: Locale) -> String {
    let rounded = round_to(amount, 0);
    let digits = rounded.abs().trunc().to_string();
    let grouped = match locale {
        Locale::EnUs => group_thousands(&digits),
        Locale::EnIn => group_lakhs(&digits),
    };
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{}{grouped}", locale.currency().symbol())
}

/// Percentage with a fixed number of decimals, e.g. `66.7`.
pub fn format_percent(value: f64, decimals: u32) -> String {
    let mut rounded = round_to(value, decimals);
    rounded.rescale(decimals);
    rounded.to_string()
}

/// Compact chart-axis label in thousands, e.g. `$100K`.
pub fn format_axis_thousands(amount: Money, locale: Locale) -> String {
    let thousands = (to_decimal(amount) / dec!(1000))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    format!("{}{}K", locale.currency().symbol(), thousands.normalize())
}

fn to_decimal(value: f64) -> Decimal {
    if value.is_finite() {
        Decimal::from_f64_retain(value).unwrap_or_default()
    } else {
        Decimal::ZERO
    }
}

fn round_to(value: f64, decimals: u32) -> Decimal {
    to_decimal(value).round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero)
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn group_lakhs(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let head_len = head.len();
    let mut out = String::with_capacity(digits.len() + head_len / 2 + 1);
    for (i, ch) in head.chars().enumerate() {
        if i > 0 && (head_len - i) % 2 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.push(',');
    out.push_str(tail);
    out
}
