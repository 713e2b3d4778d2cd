use thiserror::Error;

/// Failures reported by collaborator stores and fetchers.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The requested record does not exist.
    #[error("record not found")]
    NotFound,
    /// The collaborator could not be reached or answered badly.
    #[error("collaborator unavailable: {0}")]
    Unavailable(String),
}

/// Failures surfaced by document generation.
///
/// Only the total absence of the invoice record is terminal; logo and
/// branding problems degrade inside the renderer without surfacing
/// here.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The invoice id did not resolve. No partial output is produced.
    #[error("invoice {0} not found")]
    NotFound(String),
    /// A collaborator failed before rendering could begin.
    #[error("could not generate document: {0}")]
    Source(String),
    /// Assembling the output byte stream failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
