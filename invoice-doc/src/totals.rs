//! The invoice totals calculator.
//!
//! All arithmetic is carried in full `f64` precision; rounding happens
//! exactly once, at the display boundary in [`crate::format`]. The
//! calculator performs no validation and never fails: negative or
//! out-of-range inputs produce the arithmetically literal result, and
//! a large discount can legitimately drive the total negative.

use crate::model::{DiscountKind, DiscountPolicy, LineItem, Totals};

/// Derive subtotal, tax, discount, and grand total from the line
/// items and discount policy.
pub fn compute_totals(items: &[LineItem], discount: &DiscountPolicy) -> Totals {
    let mut subtotal = 0.0_f64;
    let mut tax_total = 0.0_f64;
    for item in items {
        let line = item.quantity * item.unit_price;
        subtotal += line;
        tax_total += line * (item.tax_percent / 100.0);
    }

    let discount_amount = match discount.kind {
        DiscountKind::PercentOfSubtotal => subtotal * discount.amount / 100.0,
        DiscountKind::Absolute => discount.amount,
    };

    Totals {
        subtotal,
        tax_total,
        discount_amount,
        total: subtotal + tax_total - discount_amount,
    }
}

/// Tax-inclusive total of a single line, as shown in the items table:
/// `quantity * unit_price * (1 + tax_percent / 100)`.
pub fn line_total(item: &LineItem) -> f64 {
    item.quantity * item.unit_price * (1.0 + item.tax_percent / 100.0)
}
