//! Core library for credit card statement parsing.
//!
//! This crate provides:
//! - PDF processing (page text, tables, image counts)
//! - Rule-based statement field extraction
//! - Reconciliation of rule output with a hosted language model reply
//! - An injectable session store for processed documents

pub mod error;
pub mod generation;
pub mod models;
pub mod pdf;
pub mod session;
pub mod statement;

pub use error::{CardSenseError, GenerationError, PdfError, Result, SessionError};
pub use generation::{DisabledGenerator, GeminiClient, GenerationBackend, GenerationService};
pub use models::config::CardSenseConfig;
pub use models::statement::{CanonicalRecord, PartialRecord, RewardPointsSummary, Transaction};
pub use pdf::{extract_pdf, ExtractedDocument, ExtractedTable, PdfExtractor, PdfProcessor};
pub use session::{InMemorySessionStore, Session, SessionId, SessionStore, SessionSummary};
pub use statement::{is_valid, Reconciler};
