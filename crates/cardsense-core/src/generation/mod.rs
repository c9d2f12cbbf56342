//! Generation service clients.
//!
//! A generation service takes one prompt and returns raw reply text. The
//! reconciler never trusts that text and never retries a failed call.

mod gemini;

pub use gemini::GeminiClient;

use std::future::Future;
use tracing::info;

use crate::error::GenerationError;
use crate::models::config::GenerationConfig;

/// Result type for generation calls.
pub type Result<T> = std::result::Result<T, GenerationError>;

/// A hosted language model reachable with a single prompt round-trip.
pub trait GenerationService: Send + Sync {
    /// Send `prompt` and return the reply text.
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Service used in offline mode; every call fails with [`GenerationError::Disabled`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledGenerator;

impl GenerationService for DisabledGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Err(GenerationError::Disabled)
    }
}

/// Runtime choice of generation service.
#[derive(Debug, Clone)]
pub enum GenerationBackend {
    Gemini(GeminiClient),
    Disabled(DisabledGenerator),
}

impl GenerationBackend {
    /// Pick the backend from config. `offline` forces pattern-only mode.
    ///
    /// A missing API key is not an error here: the backend falls back to
    /// disabled so reconciliation still produces the pattern record.
    pub fn from_config(config: &GenerationConfig, offline: bool) -> Self {
        if offline || !config.enabled {
            info!("Generation service disabled, using pattern extraction only");
            return Self::Disabled(DisabledGenerator);
        }

        match GeminiClient::from_config(config) {
            Ok(client) => Self::Gemini(client),
            Err(err) => {
                info!(error = %err, "Generation service unavailable, using pattern extraction only");
                Self::Disabled(DisabledGenerator)
            }
        }
    }

    /// Whether calls will reach a real service.
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Gemini(_))
    }
}

impl GenerationService for GenerationBackend {
    async fn generate(&self, prompt: &str) -> Result<String> {
        match self {
            Self::Gemini(client) => client.generate(prompt).await,
            Self::Disabled(disabled) => disabled.generate(prompt).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_generator_fails() {
        let result = DisabledGenerator.generate("prompt").await;
        assert!(matches!(result, Err(GenerationError::Disabled)));
    }

    #[test]
    fn test_offline_selects_disabled() {
        let backend = GenerationBackend::from_config(&GenerationConfig::default(), true);
        assert!(!backend.is_enabled());

        let config = GenerationConfig {
            enabled: false,
            ..GenerationConfig::default()
        };
        assert!(!GenerationBackend::from_config(&config, false).is_enabled());
    }

    #[test]
    fn test_missing_key_selects_disabled() {
        let config = GenerationConfig {
            api_key_env: "CARDSENSE_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..GenerationConfig::default()
        };
        assert!(!GenerationBackend::from_config(&config, false).is_enabled());
    }
}
