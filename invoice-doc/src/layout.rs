//! Page geometry and pure layout arithmetic.
//!
//! Everything here is deterministic math over the document data:
//! identical inputs always produce identical widths and heights. The
//! renderer draws from these plans, and tests pin them down without
//! touching PDF bytes.

use pdf_render::Color;

use crate::format::format_amount;
use crate::model::{Branding, InvoiceDocument, Totals};

// A4 in points.
pub const PAGE_WIDTH: f64 = 595.28;
pub const PAGE_HEIGHT: f64 = 841.89;
pub const MARGIN: f64 = 40.0;
pub const CONTENT_WIDTH: f64 = PAGE_WIDTH - 2.0 * MARGIN;

/// Header band across the full page width on the first page.
pub const BAND_HEIGHT: f64 = 96.0;
/// Vertical area reserved for the footer rule, caption, and page
/// number on every page.
pub const FOOTER_HEIGHT: f64 = 46.0;
pub const SECTION_SPACING: f64 = 18.0;

/// Band fill when branding supplies no usable accent color.
pub const DEFAULT_ACCENT: Color = Color {
    r: 0.118,
    g: 0.227,
    b: 0.373,
};

// ---- metadata column negotiation -----------------------------------

pub const COLUMN_GUTTER: f64 = 12.0;
pub const FROM_DESIRED_WIDTH: f64 = 170.0;
pub const FROM_MIN_WIDTH: f64 = 130.0;
pub const DETAILS_DESIRED_WIDTH: f64 = 150.0;
pub const DETAILS_MIN_WIDTH: f64 = 120.0;
/// The middle ("Bill To") column's usual floor.
pub const BILL_TO_MIN_WIDTH: f64 = 150.0;
/// Absolute minimum accepted when both outer columns are already at
/// their floors.
pub const BILL_TO_ABSOLUTE_MIN_WIDTH: f64 = 90.0;

/// Resolve the three metadata column widths `[from, bill_to,
/// details]` for the given available width.
///
/// The outer columns start at their desired widths and the middle
/// takes the remainder. When the middle falls below its floor, space
/// is recovered greedily: first the details column shrinks toward its
/// own floor, then the from column toward its floor, and finally the
/// middle column is accepted at no less than an absolute minimum.
/// Whenever that last clamp is not hit, the three widths plus the two
/// gutters sum exactly to `avail`.
pub fn negotiate_metadata_columns(avail: f64) -> [f64; 3] {
    let mut from = FROM_DESIRED_WIDTH;
    let mut details = DETAILS_DESIRED_WIDTH;
    let inner = avail - 2.0 * COLUMN_GUTTER;
    let mut middle = inner - from - details;

    if middle < BILL_TO_MIN_WIDTH {
        let give = (details - DETAILS_MIN_WIDTH)
            .min(BILL_TO_MIN_WIDTH - middle)
            .max(0.0);
        details -= give;
        middle += give;
    }
    if middle < BILL_TO_MIN_WIDTH {
        let give = (from - FROM_MIN_WIDTH)
            .min(BILL_TO_MIN_WIDTH - middle)
            .max(0.0);
        from -= give;
        middle += give;
    }
    if middle < BILL_TO_MIN_WIDTH {
        middle = middle.max(BILL_TO_ABSOLUTE_MIN_WIDTH);
    }

    [from, middle, details]
}

/// Band fill color: the branding accent when it parses, the default
/// otherwise. A malformed accent degrades with a warning rather than
/// failing the render.
pub fn resolve_accent(branding: Option<&Branding>) -> Color {
    match branding.and_then(|b| b.accent_color.as_deref()) {
        Some(hex) => match Color::from_hex(hex) {
            Some(color) => color,
            None => {
                tracing::warn!(accent = hex, "ignoring malformed branding accent color");
                DEFAULT_ACCENT
            }
        },
        None => DEFAULT_ACCENT,
    }
}

// ---- line-item table -----------------------------------------------

pub const QTY_COLUMN_WIDTH: f64 = 45.0;
pub const PRICE_COLUMN_WIDTH: f64 = 70.0;
pub const TAX_COLUMN_WIDTH: f64 = 45.0;
pub const LINE_TOTAL_COLUMN_WIDTH: f64 = 75.0;
pub const LABEL_COLUMN_WIDTH: f64 = 115.0;

/// Column widths for the items table: label and description flex into
/// whatever the fixed numeric columns leave over.
pub fn item_table_columns() -> Vec<f64> {
    let numeric = QTY_COLUMN_WIDTH
        + PRICE_COLUMN_WIDTH
        + TAX_COLUMN_WIDTH
        + LINE_TOTAL_COLUMN_WIDTH;
    let description = CONTENT_WIDTH - LABEL_COLUMN_WIDTH - numeric;
    vec![
        LABEL_COLUMN_WIDTH,
        description,
        QTY_COLUMN_WIDTH,
        PRICE_COLUMN_WIDTH,
        TAX_COLUMN_WIDTH,
        LINE_TOTAL_COLUMN_WIDTH,
    ]
}

// ---- totals card ---------------------------------------------------

pub const CARD_WIDTH: f64 = 230.0;
pub const CARD_PADDING: f64 = 12.0;
/// Fixed per-line increment; every conditional line adds exactly this
/// much height.
pub const CARD_LINE_HEIGHT: f64 = 16.0;
pub const CARD_DIVIDER_HEIGHT: f64 = 9.0;
pub const CARD_CORNER_RADIUS: f64 = 6.0;

/// One row of the totals card.
#[derive(Debug, Clone, PartialEq)]
pub enum CardLine {
    Entry {
        label: String,
        value: String,
        bold: bool,
        /// Drawn in the attention color (overdue amounts).
        attention: bool,
    },
    /// Small-print line without a value column.
    Caption(String),
    Divider,
}

/// The totals card plan: which lines are drawn, in order. The card
/// height derives from this same set, so the box can never clip a
/// line that the renderer decided to draw.
#[derive(Debug, Clone)]
pub struct TotalsCard {
    pub lines: Vec<CardLine>,
}

impl TotalsCard {
    pub fn height(&self) -> f64 {
        let body: f64 = self
            .lines
            .iter()
            .map(|line| match line {
                CardLine::Divider => CARD_DIVIDER_HEIGHT,
                _ => CARD_LINE_HEIGHT,
            })
            .sum();
        body + 2.0 * CARD_PADDING
    }
}

/// Decide the totals card contents for this invoice.
pub fn plan_totals_card(
    doc: &InvoiceDocument,
    totals: &Totals,
    include_payment: bool,
) -> TotalsCard {
    let currency = doc.currency.as_str();
    let entry = |label: &str, value: String, bold: bool, attention: bool| CardLine::Entry {
        label: label.to_string(),
        value,
        bold,
        attention,
    };

    let mut lines = vec![
        entry("Subtotal", format_amount(totals.subtotal, currency), false, false),
        entry("Tax", format_amount(totals.tax_total, currency), false, false),
    ];
    if totals.discount_amount > 0.0 {
        lines.push(entry(
            "Discount",
            format!("-{}", format_amount(totals.discount_amount, currency)),
            false,
            false,
        ));
    }
    lines.push(CardLine::Divider);
    lines.push(entry("Total", format_amount(totals.total, currency), true, false));

    if include_payment {
        if let Some(paid) = doc.amount_paid.filter(|v| *v != 0.0) {
            lines.push(entry(
                "Amount Paid",
                format_amount(paid, currency),
                false,
                false,
            ));
        }
        if let Some(due) = doc.amount_due {
            lines.push(entry(
                "Amount Due",
                format_amount(due, currency),
                true,
                due > 0.0,
            ));
        }
        if let Some(method) = doc.payment_method {
            lines.push(CardLine::Caption(format!(
                "Payment method: {}",
                method.label()
            )));
        }
    }

    TotalsCard { lines }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        DiscountPolicy, InvoiceStatus, PartySnapshot, PaymentMethod,
    };
    use crate::totals::compute_totals;
    use chrono::NaiveDate;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn wide_page_keeps_desired_outer_columns() {
        let [from, middle, details] = negotiate_metadata_columns(CONTENT_WIDTH);
        assert!(close(from, FROM_DESIRED_WIDTH));
        assert!(close(details, DETAILS_DESIRED_WIDTH));
        assert!(middle >= BILL_TO_MIN_WIDTH);
        assert!(close(from + middle + details + 2.0 * COLUMN_GUTTER, CONTENT_WIDTH));
    }

    #[test]
    fn first_step_shrinks_details_only() {
        // inner = 446, initial middle = 126: details gives 24.
        let avail = 470.0;
        let [from, middle, details] = negotiate_metadata_columns(avail);
        assert!(close(from, FROM_DESIRED_WIDTH));
        assert!(close(middle, BILL_TO_MIN_WIDTH));
        assert!(close(details, 126.0));
        assert!(details >= DETAILS_MIN_WIDTH);
        assert!(close(from + middle + details + 2.0 * COLUMN_GUTTER, avail));
    }

    #[test]
    fn second_step_shrinks_from_after_details_floor() {
        // inner = 416, initial middle = 96: details bottoms out at its
        // floor, the from column covers the rest.
        let avail = 440.0;
        let [from, middle, details] = negotiate_metadata_columns(avail);
        assert!(close(details, DETAILS_MIN_WIDTH));
        assert!(close(middle, BILL_TO_MIN_WIDTH));
        assert!(close(from, 146.0));
        assert!(from >= FROM_MIN_WIDTH);
        assert!(close(from + middle + details + 2.0 * COLUMN_GUTTER, avail));
    }

    #[test]
    fn third_step_accepts_middle_below_usual_floor() {
        // All three steps fire; the middle lands between the absolute
        // minimum and the usual floor, so the sum stays exact.
        let avail = 380.0;
        let [from, middle, details] = negotiate_metadata_columns(avail);
        assert!(close(from, FROM_MIN_WIDTH));
        assert!(close(details, DETAILS_MIN_WIDTH));
        assert!(middle < BILL_TO_MIN_WIDTH);
        assert!(middle >= BILL_TO_ABSOLUTE_MIN_WIDTH);
        assert!(close(middle, 106.0));
        assert!(close(from + middle + details + 2.0 * COLUMN_GUTTER, avail));
    }

    #[test]
    fn impossible_width_clamps_middle_to_absolute_min() {
        let [from, middle, details] = negotiate_metadata_columns(300.0);
        assert!(close(from, FROM_MIN_WIDTH));
        assert!(close(details, DETAILS_MIN_WIDTH));
        assert!(close(middle, BILL_TO_ABSOLUTE_MIN_WIDTH));
    }

    #[test]
    fn negotiation_is_deterministic() {
        assert_eq!(
            negotiate_metadata_columns(431.5),
            negotiate_metadata_columns(431.5)
        );
    }

    #[test]
    fn item_columns_fill_content_width() {
        let total: f64 = item_table_columns().iter().sum();
        assert!(close(total, CONTENT_WIDTH));
    }

    fn base_doc() -> InvoiceDocument {
        InvoiceDocument {
            id: "1".into(),
            number: "INV-1".into(),
            issue_date: NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2026, 4, 30).unwrap(),
            status: InvoiceStatus::Unpaid,
            currency: "USD".into(),
            sender: None,
            bill_to: PartySnapshot::empty(),
            items: vec![crate::model::LineItem::new("Work", 2.0, 50.0, 10.0)],
            discount: DiscountPolicy::none(),
            notes: None,
            terms: None,
            payment_method: None,
            amount_paid: None,
            amount_due: None,
        }
    }

    #[test]
    fn card_base_height_covers_four_lines_and_divider() {
        let doc = base_doc();
        let totals = compute_totals(&doc.items, &doc.discount);
        let card = plan_totals_card(&doc, &totals, true);
        // Subtotal, tax, divider, total.
        assert_eq!(card.lines.len(), 4);
        let expected = 3.0 * CARD_LINE_HEIGHT + CARD_DIVIDER_HEIGHT + 2.0 * CARD_PADDING;
        assert!(close(card.height(), expected));
    }

    #[test]
    fn card_grows_by_fixed_increment_per_conditional_line() {
        let doc = base_doc();
        let totals = compute_totals(&doc.items, &doc.discount);
        let base = plan_totals_card(&doc, &totals, true).height();

        let mut with_paid = doc.clone();
        with_paid.amount_paid = Some(60.0);
        let paid_height = plan_totals_card(&with_paid, &totals, true).height();
        assert!(close(paid_height - base, CARD_LINE_HEIGHT));

        let mut with_both = with_paid.clone();
        with_both.amount_due = Some(50.0);
        let both_height = plan_totals_card(&with_both, &totals, true).height();
        assert!(close(both_height - base, 2.0 * CARD_LINE_HEIGHT));

        let mut with_all = with_both.clone();
        with_all.payment_method = Some(PaymentMethod::Card);
        let all_height = plan_totals_card(&with_all, &totals, true).height();
        assert!(close(all_height - base, 3.0 * CARD_LINE_HEIGHT));
    }

    #[test]
    fn discount_line_only_when_positive() {
        let mut doc = base_doc();
        let totals = compute_totals(&doc.items, &doc.discount);
        let card = plan_totals_card(&doc, &totals, true);
        assert!(!card
            .lines
            .iter()
            .any(|l| matches!(l, CardLine::Entry { label, .. } if label == "Discount")));

        doc.discount = DiscountPolicy::absolute(15.0);
        let totals = compute_totals(&doc.items, &doc.discount);
        let card = plan_totals_card(&doc, &totals, true);
        let discount = card.lines.iter().find_map(|l| match l {
            CardLine::Entry { label, value, .. } if label == "Discount" => Some(value.clone()),
            _ => None,
        });
        assert_eq!(discount.as_deref(), Some("-$15.00"));
    }

    #[test]
    fn amount_due_is_flagged_when_positive() {
        let mut doc = base_doc();
        doc.amount_due = Some(25.0);
        let totals = compute_totals(&doc.items, &doc.discount);
        let card = plan_totals_card(&doc, &totals, true);
        let attention = card.lines.iter().any(
            |l| matches!(l, CardLine::Entry { label, attention: true, .. } if label == "Amount Due"),
        );
        assert!(attention);

        doc.amount_due = Some(0.0);
        let card = plan_totals_card(&doc, &totals, true);
        let calm = card.lines.iter().any(
            |l| matches!(l, CardLine::Entry { label, attention: false, .. } if label == "Amount Due"),
        );
        assert!(calm);
    }

    #[test]
    fn payment_section_can_be_disabled() {
        let mut doc = base_doc();
        doc.amount_paid = Some(10.0);
        doc.amount_due = Some(100.0);
        doc.payment_method = Some(PaymentMethod::Cash);
        let totals = compute_totals(&doc.items, &doc.discount);
        let card = plan_totals_card(&doc, &totals, false);
        assert_eq!(card.lines.len(), 4);
    }

    #[test]
    fn accent_parses_or_falls_back() {
        assert_eq!(resolve_accent(None), DEFAULT_ACCENT);
        let branding = Branding {
            accent_color: Some("#ff8800".into()),
            ..Branding::default()
        };
        let accent = resolve_accent(Some(&branding));
        assert!((accent.r - 1.0).abs() < 1e-9);
        let bad = Branding {
            accent_color: Some("not-a-color".into()),
            ..Branding::default()
        };
        assert_eq!(resolve_accent(Some(&bad)), DEFAULT_ACCENT);
    }
}
