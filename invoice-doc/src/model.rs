//! Invoice domain value objects.
//!
//! Everything here is passed by value into the calculator and the
//! renderer; the core holds no persistent state and owns no record
//! lifecycle. Snapshots are immutable copies captured at invoice
//! creation time, so later edits to a customer or profile record
//! never change an issued invoice.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One billable row on an invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    /// The "item" label shown in the first table column.
    pub description_primary: String,
    /// Optional free-text detail.
    #[serde(default)]
    pub description_secondary: Option<String>,
    pub quantity: f64,
    pub unit_price: f64,
    #[serde(default)]
    pub tax_percent: f64,
}

impl LineItem {
    pub fn new(label: impl Into<String>, quantity: f64, unit_price: f64, tax_percent: f64) -> Self {
        LineItem {
            description_primary: label.into(),
            description_secondary: None,
            quantity,
            unit_price,
            tax_percent,
        }
    }
}

/// How a discount amount is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    /// The amount is subtracted verbatim.
    Absolute,
    /// The amount is a percentage of the subtotal.
    PercentOfSubtotal,
}

/// A discount applied to the whole invoice.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DiscountPolicy {
    pub kind: DiscountKind,
    pub amount: f64,
}

impl DiscountPolicy {
    pub fn none() -> Self {
        DiscountPolicy {
            kind: DiscountKind::Absolute,
            amount: 0.0,
        }
    }

    pub fn absolute(amount: f64) -> Self {
        DiscountPolicy {
            kind: DiscountKind::Absolute,
            amount,
        }
    }

    pub fn percent(amount: f64) -> Self {
        DiscountPolicy {
            kind: DiscountKind::PercentOfSubtotal,
            amount,
        }
    }
}

impl Default for DiscountPolicy {
    fn default() -> Self {
        Self::none()
    }
}

/// The four derived financial figures. Recomputed on demand from the
/// line items and discount policy; never cached or persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub subtotal: f64,
    pub tax_total: f64,
    pub discount_amount: f64,
    pub total: f64,
}

/// Payment state of an invoice. An independently settable flag: the
/// renderer reflects whatever it is given and never derives the
/// status from the paid/due amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Unpaid,
    Paid,
}

impl InvoiceStatus {
    pub fn label(self) -> &'static str {
        match self {
            InvoiceStatus::Unpaid => "Unpaid",
            InvoiceStatus::Paid => "Paid",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Card,
    Credit,
}

impl PaymentMethod {
    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Card",
            PaymentMethod::Credit => "Credit",
        }
    }
}

/// Whether a party is a company or a private individual. Controls
/// which name fields apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartyKind {
    Company,
    Individual,
}

impl Default for PartyKind {
    fn default() -> Self {
        PartyKind::Company
    }
}

/// A point-in-time copy of a party's identifying and contact details,
/// for either the sender or the bill-to side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartySnapshot {
    #[serde(default)]
    pub kind: PartyKind,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub registration_number: Option<String>,
    #[serde(default)]
    pub vat_number: Option<String>,
    /// Sender side only.
    #[serde(default)]
    pub bank_name: Option<String>,
    #[serde(default)]
    pub bank_account: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

impl PartySnapshot {
    /// A snapshot with every field absent, used when no fallback
    /// profile resolves either.
    pub fn empty() -> Self {
        PartySnapshot::default()
    }

    /// Name resolved by kind: company name for companies, joined
    /// first/last name for individuals. None when the relevant
    /// fields are empty.
    pub fn display_name(&self) -> Option<String> {
        match self.kind {
            PartyKind::Company => trimmed(&self.company_name),
            PartyKind::Individual => {
                let first = trimmed(&self.first_name);
                let last = trimmed(&self.last_name);
                match (first, last) {
                    (Some(f), Some(l)) => Some(format!("{} {}", f, l)),
                    (Some(f), None) => Some(f),
                    (None, Some(l)) => Some(l),
                    (None, None) => None,
                }
            }
        }
    }
}

/// Presentation-only overrides layered on top of snapshots at render
/// time; never persisted with the invoice.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Branding {
    #[serde(default)]
    pub logo_url: Option<String>,
    /// `#RRGGBB` accent color for the header band.
    #[serde(default)]
    pub accent_color: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

/// The full render input for one invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceDocument {
    pub id: String,
    pub number: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: InvoiceStatus,
    /// ISO 4217-like code, used only for display formatting.
    pub currency: String,
    /// Sender snapshot captured at creation time. When absent the
    /// fallback profile supplies sender details.
    #[serde(default)]
    pub sender: Option<PartySnapshot>,
    pub bill_to: PartySnapshot,
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub discount: DiscountPolicy,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub terms: Option<String>,
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
    /// Tracked independently of the computed totals.
    #[serde(default)]
    pub amount_paid: Option<f64>,
    #[serde(default)]
    pub amount_due: Option<f64>,
}

impl InvoiceDocument {
    /// The reference used in filenames and the header band: the
    /// invoice number when set, else the record id.
    pub fn reference(&self) -> &str {
        if self.number.trim().is_empty() {
            &self.id
        } else {
            &self.number
        }
    }
}

pub(crate) fn trimmed(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn company_display_name() {
        let snap = PartySnapshot {
            kind: PartyKind::Company,
            company_name: Some("Acme GmbH".into()),
            first_name: Some("ignored".into()),
            ..PartySnapshot::default()
        };
        assert_eq!(snap.display_name().as_deref(), Some("Acme GmbH"));
    }

    #[test]
    fn individual_display_name_joins_parts() {
        let snap = PartySnapshot {
            kind: PartyKind::Individual,
            first_name: Some("Ada".into()),
            last_name: Some("Lovelace".into()),
            ..PartySnapshot::default()
        };
        assert_eq!(snap.display_name().as_deref(), Some("Ada Lovelace"));

        let only_last = PartySnapshot {
            kind: PartyKind::Individual,
            last_name: Some("Lovelace".into()),
            ..PartySnapshot::default()
        };
        assert_eq!(only_last.display_name().as_deref(), Some("Lovelace"));
    }

    #[test]
    fn blank_names_resolve_to_none() {
        let snap = PartySnapshot {
            kind: PartyKind::Company,
            company_name: Some("   ".into()),
            ..PartySnapshot::default()
        };
        assert_eq!(snap.display_name(), None);
    }

    #[test]
    fn reference_prefers_number() {
        let mut doc = sample_doc();
        assert_eq!(doc.reference(), "INV-0042");
        doc.number = "".into();
        assert_eq!(doc.reference(), "rec-1");
    }

    fn sample_doc() -> InvoiceDocument {
        InvoiceDocument {
            id: "rec-1".into(),
            number: "INV-0042".into(),
            issue_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2026, 2, 15).unwrap(),
            status: InvoiceStatus::Unpaid,
            currency: "USD".into(),
            sender: None,
            bill_to: PartySnapshot::default(),
            items: Vec::new(),
            discount: DiscountPolicy::none(),
            notes: None,
            terms: None,
            payment_method: None,
            amount_paid: None,
            amount_due: None,
        }
    }
}
