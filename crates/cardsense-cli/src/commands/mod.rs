//! Subcommands and the input handling they share.

pub mod ask;
pub mod batch;
pub mod config;
pub mod process;

use std::fs;
use std::path::Path;

use tracing::debug;

use cardsense_core::models::config::CardSenseConfig;
use cardsense_core::pdf::{extract_pdf, ExtractedDocument};

/// Load configuration from `--config`, else the default file, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<CardSenseConfig> {
    let config = match config_path {
        Some(path) => CardSenseConfig::from_file(Path::new(path))?,
        None => {
            let default_path = config::default_config_path();
            if default_path.exists() {
                debug!("Using config file {}", default_path.display());
                CardSenseConfig::from_file(&default_path)?
            } else {
                CardSenseConfig::default()
            }
        }
    };
    config.validate()?;
    Ok(config)
}

/// Whether a path looks like a supported statement file.
pub fn is_supported(path: &Path) -> bool {
    matches!(extension(path).as_str(), "pdf" | "txt")
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Read a statement file into an extracted document.
///
/// PDFs go through text extraction; `.txt` files are taken as one page.
pub fn load_document(path: &Path, config: &CardSenseConfig) -> anyhow::Result<ExtractedDocument> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    match extension(path).as_str() {
        "pdf" => {
            let data = fs::read(path)?;
            Ok(extract_pdf(&data, &config.pdf)?)
        }
        "txt" => {
            let text = fs::read_to_string(path)?;
            Ok(ExtractedDocument::from_plain_text(text, &config.pdf))
        }
        other => anyhow::bail!("Unsupported file format: {}", other),
    }
}

/// File name used as the session label.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("statement")
        .to_string()
}
