//! Collaborator interfaces for the hosted backend.
//!
//! Persistence, auth, and storage live behind a managed platform; the
//! core only ever sees these trait seams, injected by the caller.
//! Nothing here touches global state, so two renders can run
//! concurrently against the same stores.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{RenderError, SourceError};
use crate::model::{Branding, InvoiceDocument, PartySnapshot};
use crate::render::{suggested_filename, InvoiceRenderer};

/// Looks up invoices by id.
pub trait InvoiceStore {
    fn fetch_invoice(&self, id: &str) -> Result<InvoiceDocument, SourceError>;
}

/// Supplies the issuing account's own contact/company record, used
/// wherever an invoice's sender snapshot is absent or incomplete.
pub trait ProfileStore {
    fn fetch_sender_profile(&self) -> Result<PartySnapshot, SourceError>;
}

/// Supplies presentation branding. Best-effort: absence is normal.
pub trait BrandingStore {
    fn fetch_branding(&self) -> Option<Branding>;
}

/// Fetches logo image bytes. The renderer treats every failure as a
/// soft degradation.
pub trait LogoFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, SourceError>;
}

/// Fetches logos over HTTP(S) with a bounded timeout.
pub struct HttpLogoFetcher {
    timeout: Duration,
}

impl HttpLogoFetcher {
    pub fn new(timeout: Duration) -> Self {
        HttpLogoFetcher { timeout }
    }
}

impl Default for HttpLogoFetcher {
    fn default() -> Self {
        HttpLogoFetcher {
            timeout: Duration::from_secs(10),
        }
    }
}

impl LogoFetcher for HttpLogoFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, SourceError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| SourceError::Unavailable(e.to_string()))?;
        let response = client
            .get(url)
            .send()
            .map_err(|e| SourceError::Unavailable(e.to_string()))?;
        if !response.status().is_success() {
            return Err(SourceError::Unavailable(format!(
                "logo request returned {}",
                response.status()
            )));
        }
        let bytes = response
            .bytes()
            .map_err(|e| SourceError::Unavailable(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

/// Resolves logo "urls" against a local directory. Useful for demos
/// and for deployments that sync assets to disk.
pub struct FileLogoFetcher {
    base: PathBuf,
}

impl FileLogoFetcher {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        FileLogoFetcher { base: base.into() }
    }
}

impl LogoFetcher for FileLogoFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, SourceError> {
        let path = self.base.join(url);
        std::fs::read(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => SourceError::NotFound,
            _ => SourceError::Unavailable(e.to_string()),
        })
    }
}

/// A finished document plus the filename a save exit should use.
#[derive(Debug)]
pub struct RenderedInvoice {
    pub bytes: Vec<u8>,
    pub filename: String,
}

/// The "Download PDF" / "Print" control flow: fetch the invoice,
/// sender profile, and branding, then render.
///
/// A missing invoice is terminal and produces no output. A missing
/// profile degrades to an empty fallback; missing branding is simply
/// absent.
pub fn generate_invoice_pdf(
    id: &str,
    invoices: &dyn InvoiceStore,
    profiles: &dyn ProfileStore,
    branding: &dyn BrandingStore,
    renderer: &InvoiceRenderer,
) -> Result<RenderedInvoice, RenderError> {
    let invoice = invoices.fetch_invoice(id).map_err(|e| match e {
        SourceError::NotFound => RenderError::NotFound(id.to_string()),
        SourceError::Unavailable(reason) => RenderError::Source(reason),
    })?;

    let profile = match profiles.fetch_sender_profile() {
        Ok(profile) => profile,
        Err(error) => {
            tracing::warn!(%error, "sender profile unavailable; using empty fallback");
            PartySnapshot::empty()
        }
    };
    let branding = branding.fetch_branding();

    let bytes = renderer.render(&invoice, &profile, branding.as_ref())?;
    Ok(RenderedInvoice {
        filename: suggested_filename(&invoice),
        bytes,
    })
}
