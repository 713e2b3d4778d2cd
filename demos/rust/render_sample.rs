//! Renders a fully populated sample invoice to disk.
//!
//! Run with:
//!   cargo run --bin render_sample -p demos

use chrono::NaiveDate;
use invoice_doc::{
    suggested_filename, Branding, DiscountPolicy, InvoiceDocument, InvoiceRenderer,
    InvoiceStatus, LineItem, PartyKind, PartySnapshot, PaymentMethod, RenderOptions,
};

fn sample_invoice() -> InvoiceDocument {
    InvoiceDocument {
        id: "rec-2026-0042".into(),
        number: "INV-2026-0042".into(),
        issue_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
        due_date: NaiveDate::from_ymd_opt(2026, 2, 15).unwrap(),
        status: InvoiceStatus::Unpaid,
        currency: "USD".into(),
        sender: None,
        bill_to: PartySnapshot {
            kind: PartyKind::Company,
            company_name: Some("Acme Corporation".into()),
            email: Some("accounts@acme.test".into()),
            street: Some("123 Business Ave".into()),
            city: Some("New York".into()),
            postal_code: Some("10001".into()),
            country: Some("USA".into()),
            ..PartySnapshot::default()
        },
        items: vec![
            LineItem::new("Web Development", 40.0, 150.0, 8.0),
            LineItem {
                description_secondary: Some("Wireframes, visual design, two revisions".into()),
                ..LineItem::new("UI/UX Design", 20.0, 125.0, 8.0)
            },
            LineItem::new("Server Setup", 1.0, 500.0, 0.0),
            LineItem::new("Monthly Maintenance", 3.0, 200.0, 8.0),
        ],
        discount: DiscountPolicy::percent(5.0),
        notes: Some("Thank you for the continued partnership.".into()),
        terms: Some("Net 30. Late payments accrue interest at 1.5% per month.".into()),
        payment_method: Some(PaymentMethod::Card),
        amount_paid: Some(2000.0),
        amount_due: Some(6006.0),
    }
}

fn sender_profile() -> PartySnapshot {
    PartySnapshot {
        kind: PartyKind::Company,
        company_name: Some("NovaPeak Solutions".into()),
        email: Some("info@novapeak.test".into()),
        street: Some("456 Innovation Drive, Suite 200".into()),
        city: Some("San Francisco".into()),
        postal_code: Some("94102".into()),
        country: Some("USA".into()),
        vat_number: Some("US-99-1234567".into()),
        bank_name: Some("First Coastal Bank".into()),
        bank_account: Some("0042-7781-3".into()),
        website: Some("novapeak.test".into()),
        ..PartySnapshot::default()
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let branding = Branding {
        accent_color: Some("#1e3a5f".into()),
        ..Branding::default()
    };

    let renderer = InvoiceRenderer::new()
        .without_logo_fetcher()
        .with_options(RenderOptions {
            compress: true,
            ..RenderOptions::default()
        });

    let invoice = sample_invoice();
    let bytes = renderer
        .render(&invoice, &sender_profile(), Some(&branding))
        .expect("render sample invoice");

    let filename = suggested_filename(&invoice);
    std::fs::write(&filename, &bytes).expect("write PDF");
    println!("Written {} ({} bytes)", filename, bytes.len());
}
