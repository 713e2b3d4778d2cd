//! Field-precedence merging for the metadata block.
//!
//! Each field of the "From" column resolves through a fixed, ordered
//! chain over branding, the invoice's sender snapshot, and the
//! account's fallback profile. The chains are plain data flow, one
//! function per block with no reflection, so the resolution order is
//! auditable and testable field by field.

use crate::format::format_date;
use crate::model::{trimmed, Branding, InvoiceDocument, PartySnapshot};

/// Rendered in place of a name or block that resolved to nothing.
pub const PLACEHOLDER: &str = "-";

/// Sender display name: branding company name, else the snapshot's
/// name by kind, else the fallback profile's name by kind, else the
/// placeholder.
pub fn resolve_sender_name(
    sender: Option<&PartySnapshot>,
    fallback: &PartySnapshot,
    branding: Option<&Branding>,
) -> String {
    branding
        .and_then(|b| trimmed(&b.company_name))
        .or_else(|| sender.and_then(|s| s.display_name()))
        .or_else(|| fallback.display_name())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Sender email: snapshot first, then fallback profile, then
/// branding.
pub fn resolve_sender_email(
    sender: Option<&PartySnapshot>,
    fallback: &PartySnapshot,
    branding: Option<&Branding>,
) -> Option<String> {
    sender
        .and_then(|s| trimmed(&s.email))
        .or_else(|| trimmed(&fallback.email))
        .or_else(|| branding.and_then(|b| trimmed(&b.email)))
}

/// The "From" column: name, address, contact, registration, and bank
/// lines in render order. Always at least one line.
pub fn resolve_from_lines(
    sender: Option<&PartySnapshot>,
    fallback: &PartySnapshot,
    branding: Option<&Branding>,
) -> Vec<String> {
    let mut lines = vec![resolve_sender_name(sender, fallback, branding)];

    // Address comes from the first source with any address content.
    let branding_addr = branding
        .map(|b| address_lines(&b.street, &b.city, &b.postal_code, &b.country))
        .unwrap_or_default();
    let addr = if !branding_addr.is_empty() {
        branding_addr
    } else {
        let snapshot_addr = sender
            .map(|s| address_lines(&s.street, &s.city, &s.postal_code, &s.country))
            .unwrap_or_default();
        if !snapshot_addr.is_empty() {
            snapshot_addr
        } else {
            address_lines(
                &fallback.street,
                &fallback.city,
                &fallback.postal_code,
                &fallback.country,
            )
        }
    };
    lines.extend(addr);

    if let Some(email) = resolve_sender_email(sender, fallback, branding) {
        lines.push(email);
    }

    let phone = branding
        .and_then(|b| trimmed(&b.phone))
        .or_else(|| sender.and_then(|s| trimmed(&s.phone)))
        .or_else(|| trimmed(&fallback.phone));
    if let Some(phone) = phone {
        lines.push(phone);
    }

    let registration = sender
        .and_then(|s| trimmed(&s.registration_number))
        .or_else(|| trimmed(&fallback.registration_number));
    if let Some(reg) = registration {
        lines.push(format!("Reg. No: {}", reg));
    }
    let vat = sender
        .and_then(|s| trimmed(&s.vat_number))
        .or_else(|| trimmed(&fallback.vat_number));
    if let Some(vat) = vat {
        lines.push(format!("VAT: {}", vat));
    }

    // Bank details only ever come from the account's own profile.
    if let Some(bank) = trimmed(&fallback.bank_name) {
        lines.push(format!("Bank: {}", bank));
    }
    if let Some(account) = trimmed(&fallback.bank_account) {
        lines.push(format!("Account: {}", account));
    }

    let website = branding
        .and_then(|b| trimmed(&b.website))
        .or_else(|| trimmed(&fallback.website));
    if let Some(site) = website {
        lines.push(site);
    }

    lines
}

/// The "Bill To" column: name by kind, email, phone, and one composed
/// address line.
pub fn resolve_bill_to_lines(bill_to: &PartySnapshot) -> Vec<String> {
    let mut lines = vec![bill_to
        .display_name()
        .unwrap_or_else(|| PLACEHOLDER.to_string())];
    if let Some(email) = trimmed(&bill_to.email) {
        lines.push(email);
    }
    if let Some(phone) = trimmed(&bill_to.phone) {
        lines.push(phone);
    }
    if let Some(address) = composed_address(bill_to) {
        lines.push(address);
    }
    lines
}

/// The "Invoice Details" column: dates, status, and (when the
/// payment section is enabled) any present, nonzero payment fields
/// in fixed order.
pub fn resolve_details_lines(doc: &InvoiceDocument, include_payment: bool) -> Vec<String> {
    let mut lines = vec![
        format!("Issue Date: {}", format_date(doc.issue_date)),
        format!("Due Date: {}", format_date(doc.due_date)),
        format!("Status: {}", doc.status.label()),
    ];
    if include_payment {
        if let Some(method) = doc.payment_method {
            lines.push(format!("Payment Method: {}", method.label()));
        }
        if let Some(paid) = doc.amount_paid.filter(|v| *v != 0.0) {
            lines.push(format!(
                "Amount Paid: {}",
                crate::format::format_amount(paid, &doc.currency)
            ));
        }
        if let Some(due) = doc.amount_due.filter(|v| *v != 0.0) {
            lines.push(format!(
                "Amount Due: {}",
                crate::format::format_amount(due, &doc.currency)
            ));
        }
    }
    lines
}

/// Multi-line postal address: street, then "city, postal", then
/// country, skipping empty parts.
fn address_lines(
    street: &Option<String>,
    city: &Option<String>,
    postal: &Option<String>,
    country: &Option<String>,
) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(street) = trimmed(street) {
        lines.push(street);
    }
    match (trimmed(city), trimmed(postal)) {
        (Some(city), Some(postal)) => lines.push(format!("{}, {}", city, postal)),
        (Some(city), None) => lines.push(city),
        (None, Some(postal)) => lines.push(postal),
        (None, None) => {}
    }
    if let Some(country) = trimmed(country) {
        lines.push(country);
    }
    lines
}

/// Single-line address used by the Bill To column, joining the same
/// parts with a fixed ", " separator.
fn composed_address(snapshot: &PartySnapshot) -> Option<String> {
    let parts = address_lines(
        &snapshot.street,
        &snapshot.city,
        &snapshot.postal_code,
        &snapshot.country,
    );
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        DiscountPolicy, InvoiceStatus, PartyKind, PaymentMethod,
    };
    use chrono::NaiveDate;

    fn snapshot(name: &str) -> PartySnapshot {
        PartySnapshot {
            kind: PartyKind::Company,
            company_name: Some(name.to_string()),
            ..PartySnapshot::default()
        }
    }

    #[test]
    fn branding_company_name_wins() {
        let sender = snapshot("Snapshot Co");
        let fallback = snapshot("Fallback Co");
        let branding = Branding {
            company_name: Some("Branded Co".into()),
            ..Branding::default()
        };
        let name = resolve_sender_name(Some(&sender), &fallback, Some(&branding));
        assert_eq!(name, "Branded Co");
    }

    #[test]
    fn snapshot_name_beats_fallback() {
        let sender = snapshot("Snapshot Co");
        let fallback = snapshot("Fallback Co");
        let name = resolve_sender_name(Some(&sender), &fallback, None);
        assert_eq!(name, "Snapshot Co");
    }

    #[test]
    fn missing_everything_yields_placeholder_line() {
        let lines = resolve_from_lines(None, &PartySnapshot::empty(), None);
        assert_eq!(lines, vec![PLACEHOLDER.to_string()]);
    }

    #[test]
    fn email_prefers_snapshot_then_fallback_then_branding() {
        let mut sender = PartySnapshot::empty();
        sender.email = Some("snap@x.test".into());
        let mut fallback = PartySnapshot::empty();
        fallback.email = Some("fall@x.test".into());
        let branding = Branding {
            email: Some("brand@x.test".into()),
            ..Branding::default()
        };

        let email = resolve_sender_email(Some(&sender), &fallback, Some(&branding));
        assert_eq!(email.as_deref(), Some("snap@x.test"));

        let email = resolve_sender_email(None, &fallback, Some(&branding));
        assert_eq!(email.as_deref(), Some("fall@x.test"));

        let email = resolve_sender_email(None, &PartySnapshot::empty(), Some(&branding));
        assert_eq!(email.as_deref(), Some("brand@x.test"));
    }

    #[test]
    fn branding_address_shadows_snapshot_address() {
        let mut sender = snapshot("S");
        sender.street = Some("1 Snapshot St".into());
        let branding = Branding {
            street: Some("2 Brand Ave".into()),
            city: Some("Brandville".into()),
            postal_code: Some("99999".into()),
            ..Branding::default()
        };
        let lines = resolve_from_lines(Some(&sender), &PartySnapshot::empty(), Some(&branding));
        assert!(lines.contains(&"2 Brand Ave".to_string()));
        assert!(lines.contains(&"Brandville, 99999".to_string()));
        assert!(!lines.iter().any(|l| l.contains("Snapshot St")));
    }

    #[test]
    fn bank_details_come_from_fallback_only() {
        let mut sender = snapshot("S");
        sender.bank_name = Some("Snapshot Bank".into());
        let mut fallback = PartySnapshot::empty();
        fallback.bank_name = Some("Profile Bank".into());
        fallback.bank_account = Some("DE00 1234".into());

        let lines = resolve_from_lines(Some(&sender), &fallback, None);
        assert!(lines.contains(&"Bank: Profile Bank".to_string()));
        assert!(lines.contains(&"Account: DE00 1234".to_string()));
        assert!(!lines.iter().any(|l| l.contains("Snapshot Bank")));
    }

    #[test]
    fn registration_lines_are_labeled_and_optional() {
        let mut sender = snapshot("S");
        sender.vat_number = Some("VAT-77".into());
        let lines = resolve_from_lines(Some(&sender), &PartySnapshot::empty(), None);
        assert!(lines.contains(&"VAT: VAT-77".to_string()));
        assert!(!lines.iter().any(|l| l.starts_with("Reg. No:")));
    }

    #[test]
    fn bill_to_address_omits_empty_parts() {
        let mut customer = snapshot("Customer Inc");
        customer.street = Some("5 Harbor Rd".into());
        customer.country = Some("Portugal".into());
        let lines = resolve_bill_to_lines(&customer);
        assert_eq!(lines[0], "Customer Inc");
        assert!(lines.contains(&"5 Harbor Rd, Portugal".to_string()));
    }

    #[test]
    fn bill_to_without_name_uses_placeholder() {
        let lines = resolve_bill_to_lines(&PartySnapshot::empty());
        assert_eq!(lines[0], PLACEHOLDER);
    }

    #[test]
    fn details_payment_lines_follow_fixed_order() {
        let doc = InvoiceDocument {
            id: "1".into(),
            number: "INV-1".into(),
            issue_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
            status: InvoiceStatus::Paid,
            currency: "USD".into(),
            sender: None,
            bill_to: PartySnapshot::empty(),
            items: Vec::new(),
            discount: DiscountPolicy::none(),
            notes: None,
            terms: None,
            payment_method: Some(PaymentMethod::Card),
            amount_paid: Some(100.0),
            amount_due: Some(10.0),
        };
        let lines = resolve_details_lines(&doc, true);
        assert_eq!(lines[0], "Issue Date: 01/03/2026");
        assert_eq!(lines[1], "Due Date: 31/03/2026");
        assert_eq!(lines[2], "Status: Paid");
        assert_eq!(lines[3], "Payment Method: Card");
        assert_eq!(lines[4], "Amount Paid: $100.00");
        assert_eq!(lines[5], "Amount Due: $10.00");

        let without = resolve_details_lines(&doc, false);
        assert_eq!(without.len(), 3);
    }

    #[test]
    fn zero_amounts_are_suppressed_in_details() {
        let doc = InvoiceDocument {
            id: "1".into(),
            number: "INV-1".into(),
            issue_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
            status: InvoiceStatus::Unpaid,
            currency: "USD".into(),
            sender: None,
            bill_to: PartySnapshot::empty(),
            items: Vec::new(),
            discount: DiscountPolicy::none(),
            notes: None,
            terms: None,
            payment_method: None,
            amount_paid: Some(0.0),
            amount_due: Some(0.0),
        };
        let lines = resolve_details_lines(&doc, true);
        assert_eq!(lines.len(), 3);
    }
}
