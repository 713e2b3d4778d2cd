use chrono::NaiveDate;
use invoice_doc::{
    DiscountKind, InvoiceDocument, InvoiceStatus, PartyKind, PaymentMethod,
};

#[test]
fn invoice_deserializes_from_backend_payload() {
    let payload = serde_json::json!({
        "id": "rec-3",
        "number": "INV-0100",
        "issue_date": "2026-06-01",
        "due_date": "2026-06-30",
        "status": "paid",
        "currency": "USD",
        "bill_to": {
            "kind": "individual",
            "first_name": "Sam",
            "last_name": "Okafor",
            "email": "sam@example.test"
        },
        "items": [
            {
                "description_primary": "Design sprint",
                "quantity": 1.0,
                "unit_price": 1200.0,
                "tax_percent": 23.0
            }
        ],
        "discount": { "kind": "percent_of_subtotal", "amount": 10.0 },
        "payment_method": "card",
        "amount_paid": 1320.0
    });

    let doc: InvoiceDocument = serde_json::from_value(payload).unwrap();
    assert_eq!(doc.status, InvoiceStatus::Paid);
    assert_eq!(doc.payment_method, Some(PaymentMethod::Card));
    assert_eq!(doc.discount.kind, DiscountKind::PercentOfSubtotal);
    assert_eq!(doc.bill_to.kind, PartyKind::Individual);
    assert_eq!(doc.issue_date, NaiveDate::from_ymd_opt(2026, 6, 1).unwrap());
    // Omitted optionals default.
    assert!(doc.sender.is_none());
    assert!(doc.notes.is_none());
    assert!(doc.amount_due.is_none());
    assert_eq!(doc.items[0].description_secondary, None);
}

#[test]
fn invoice_round_trips_through_json() {
    let payload = serde_json::json!({
        "id": "rec-4",
        "number": "INV-0101",
        "issue_date": "2026-07-01",
        "due_date": "2026-07-15",
        "status": "unpaid",
        "currency": "EUR",
        "bill_to": { "kind": "company", "company_name": "Cliente SA" },
        "items": [],
        "notes": "net 14"
    });
    let doc: InvoiceDocument = serde_json::from_value(payload).unwrap();
    let encoded = serde_json::to_string(&doc).unwrap();
    let decoded: InvoiceDocument = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded.number, "INV-0101");
    assert_eq!(decoded.notes.as_deref(), Some("net 14"));
    assert_eq!(decoded.status, InvoiceStatus::Unpaid);
}

#[test]
fn minimal_line_item_defaults_tax_to_zero() {
    let item: invoice_doc::LineItem = serde_json::from_value(serde_json::json!({
        "description_primary": "Support",
        "quantity": 2,
        "unit_price": 35.5
    }))
    .unwrap();
    assert_eq!(item.tax_percent, 0.0);
}
