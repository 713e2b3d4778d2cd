//! Invoice financial computation and PDF document rendering.
//!
//! Two collaborating pieces form the core: the totals calculator
//! ([`compute_totals`]) derives subtotal, tax, discount, and grand
//! total from a list of line items and a discount policy, and the
//! document renderer ([`InvoiceRenderer`]) lays the invoice out as a
//! paginated PDF: header band, three-column metadata block, line-item
//! table, totals card, and optional notes/terms sections.
//!
//! Both components are synchronous pure computations over value
//! objects. Fetching the invoice, the sender profile, branding, and
//! the logo image belongs to the collaborator traits in [`source`];
//! the renderer itself performs at most the logo fetch and tolerates
//! its failure.

pub mod error;
pub mod format;
pub mod layout;
pub mod merge;
pub mod model;
pub mod render;
pub mod source;
pub mod totals;

pub use error::{RenderError, SourceError};
pub use model::{
    Branding, DiscountKind, DiscountPolicy, InvoiceDocument, InvoiceStatus, LineItem,
    PartyKind, PartySnapshot, PaymentMethod, Totals,
};
pub use render::{suggested_filename, InvoiceRenderer, RenderOptions};
pub use source::{
    generate_invoice_pdf, BrandingStore, FileLogoFetcher, HttpLogoFetcher, InvoiceStore,
    LogoFetcher, ProfileStore, RenderedInvoice,
};
pub use totals::{compute_totals, line_total};
