//! Error types for the cardsense-core library.

use thiserror::Error;

/// Main error type for the cardsense library.
#[derive(Error, Debug)]
pub enum CardSenseError {
    /// Source document could not be turned into text.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Generation service call failed.
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),

    /// Session lookup or update failed.
    #[error("session error: {0}")]
    Session(#[from] SessionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors returned by a generation service.
///
/// None of these abort a reconciliation; the pipeline treats every variant
/// as an undecodable reply.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// Network failure or timeout.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("service returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The service answered but carried no reply text.
    #[error("service returned no reply text")]
    EmptyReply,

    /// The pre-shared key is not available.
    #[error("missing API key (set {0})")]
    MissingApiKey(String),

    /// Generation is switched off.
    #[error("generation service disabled")]
    Disabled,
}

/// Errors related to the session store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// No session exists under the given id.
    #[error("no session found: {0}")]
    NotFound(String),

    /// The session holds no source text to reconcile.
    #[error("session {0} has no source text")]
    EmptyText(String),
}

/// Result type for the cardsense library.
pub type Result<T> = std::result::Result<T, CardSenseError>;
