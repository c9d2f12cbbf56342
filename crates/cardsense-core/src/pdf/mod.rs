//! PDF processing module.
//!
//! Turns statement documents into plain text per page, plus the tabular
//! blocks and image counts recorded alongside each session.

mod extractor;
mod tables;

pub use extractor::PdfExtractor;
pub use tables::{detect_tables, ExtractedTable};

use serde::{Deserialize, Serialize};

use crate::error::PdfError;
use crate::models::config::PdfConfig;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract text, tables and image counts for every page of the loaded document.
    fn extract_document(&self) -> Result<ExtractedDocument>;
}

/// Content from a single page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdfPage {
    /// Page number (1-indexed).
    pub number: u32,
    /// Extracted text from this page.
    pub text: String,
    /// Image XObjects on this page.
    pub image_count: usize,
}

/// Everything extracted from one source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedDocument {
    /// All pages, each introduced by `--- Page N ---`.
    pub text: String,
    /// Per-page content.
    pub pages: Vec<PdfPage>,
    /// Tables detected in page text.
    pub tables: Vec<ExtractedTable>,
    /// Images across all pages.
    pub image_count: usize,
}

impl ExtractedDocument {
    /// Assemble a document from its pages.
    pub fn from_pages(pages: Vec<PdfPage>, config: &PdfConfig) -> Self {
        let text: String = pages
            .iter()
            .map(|page| format!("\n--- Page {} ---\n{}", page.number, page.text))
            .collect();

        let tables = if config.detect_tables {
            pages
                .iter()
                .flat_map(|page| {
                    detect_tables(page.number, &page.text, config.min_table_rows, config.min_table_columns)
                })
                .collect()
        } else {
            Vec::new()
        };

        let image_count = pages.iter().map(|page| page.image_count).sum();

        Self {
            text,
            pages,
            tables,
            image_count,
        }
    }

    /// Wrap already-extracted plain text as a single-page document.
    pub fn from_plain_text(text: impl Into<String>, config: &PdfConfig) -> Self {
        Self::from_pages(
            vec![PdfPage {
                number: 1,
                text: text.into(),
                image_count: 0,
            }],
            config,
        )
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Load a PDF and extract its content in one step.
pub fn extract_pdf(data: &[u8], config: &PdfConfig) -> Result<ExtractedDocument> {
    let mut extractor = PdfExtractor::with_config(config.clone());
    extractor.load(data)?;
    extractor.extract_document()
}
