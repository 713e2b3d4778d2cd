//! Renders an invoice loaded from a JSON file.
//!
//! Run with:
//!   cargo run --bin render_json -p demos -- invoice.json [profile.json]

use invoice_doc::{
    suggested_filename, InvoiceDocument, InvoiceRenderer, PartySnapshot, RenderOptions,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let Some(invoice_path) = args.next() else {
        eprintln!("usage: render_json <invoice.json> [profile.json]");
        std::process::exit(2);
    };

    let invoice: InvoiceDocument = {
        let raw = std::fs::read_to_string(&invoice_path).expect("read invoice JSON");
        serde_json::from_str(&raw).expect("parse invoice JSON")
    };

    let profile: PartySnapshot = match args.next() {
        Some(path) => {
            let raw = std::fs::read_to_string(&path).expect("read profile JSON");
            serde_json::from_str(&raw).expect("parse profile JSON")
        }
        None => PartySnapshot::empty(),
    };

    let renderer = InvoiceRenderer::new().with_options(RenderOptions {
        compress: true,
        ..RenderOptions::default()
    });

    let bytes = renderer
        .render(&invoice, &profile, None)
        .expect("render invoice");
    let filename = suggested_filename(&invoice);
    std::fs::write(&filename, &bytes).expect("write PDF");
    println!("Written {} ({} bytes)", filename, bytes.len());
}
