//! Configuration structures for the statement pipeline.

use serde::{Deserialize, Serialize};

use crate::error::CardSenseError;

/// Main configuration for the cardsense pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardSenseConfig {
    /// Generation service configuration.
    pub generation: GenerationConfig,

    /// Field extraction and prompt configuration.
    pub extraction: ExtractionConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,
}

/// Generation service (hosted language model) configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Call the generation service at all. When false, reconciliation is pattern-only.
    pub enabled: bool,

    /// API base URL.
    pub base_url: String,

    /// Model identifier.
    pub model: String,

    /// Name of the environment variable holding the pre-shared key.
    pub api_key_env: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.0-flash-exp".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            timeout_secs: 60,
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Maximum characters of source text embedded in the extraction prompt.
    pub max_source_chars: usize,

    /// Maximum characters of source text embedded in a chat prompt.
    pub chat_context_chars: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_source_chars: 20_000,
            chat_context_chars: 4_000,
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Detect tabular blocks in page text.
    pub detect_tables: bool,

    /// Minimum consecutive rows for a block to count as a table.
    pub min_table_rows: usize,

    /// Minimum cells per row for a line to count as a table row.
    pub min_table_columns: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            detect_tables: true,
            min_table_rows: 2,
            min_table_columns: 2,
        }
    }
}

impl CardSenseConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            CardSenseError::Config(format!("{}: {}", path.display(), e))
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> crate::error::Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| CardSenseError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject settings the pipeline cannot run with.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.generation.enabled {
            if self.generation.base_url.trim().is_empty() {
                return Err(CardSenseError::Config("generation.base_url is empty".to_string()));
            }
            if self.generation.model.trim().is_empty() {
                return Err(CardSenseError::Config("generation.model is empty".to_string()));
            }
            if self.generation.timeout_secs == 0 {
                return Err(CardSenseError::Config("generation.timeout_secs must be positive".to_string()));
            }
        }
        if self.extraction.max_source_chars == 0 {
            return Err(CardSenseError::Config("extraction.max_source_chars must be positive".to_string()));
        }
        Ok(())
    }
}
