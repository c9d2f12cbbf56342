//! End-to-end reconciliation of one statement text.
//!
//! text → pattern record + (prompt → generation service → decoded model
//! record) → merge → completion. Only session lookups can fail; every
//! generation or decoding problem degrades to the pattern-only result.

use tracing::{debug, info, warn};

use crate::error::{Result, SessionError};
use crate::generation::GenerationService;
use crate::models::config::ExtractionConfig;
use crate::models::statement::{CanonicalRecord, PartialRecord};
use crate::session::{SessionId, SessionStore};
use crate::statement::chat::ChatPromptBuilder;
use crate::statement::completer::complete;
use crate::statement::decoder::decode_reply;
use crate::statement::merge::merge;
use crate::statement::prompt::PromptBuilder;
use crate::statement::rules::extract_patterns;

/// Runs the extraction pipeline against a generation service.
pub struct Reconciler<G> {
    service: G,
    prompt: PromptBuilder,
    chat: ChatPromptBuilder,
}

impl<G: GenerationService> Reconciler<G> {
    /// Create a reconciler with default prompt limits.
    pub fn new(service: G) -> Self {
        Self::with_config(service, &ExtractionConfig::default())
    }

    /// Create a reconciler with prompt limits from config.
    pub fn with_config(service: G, config: &ExtractionConfig) -> Self {
        Self {
            service,
            prompt: PromptBuilder::new(config.max_source_chars),
            chat: ChatPromptBuilder::new(config.chat_context_chars),
        }
    }

    /// The underlying generation service.
    pub fn service(&self) -> &G {
        &self.service
    }

    /// Reconcile `text` into a complete record. Never fails.
    pub async fn reconcile(&self, text: &str) -> CanonicalRecord {
        let pattern = extract_patterns(text);
        let prompt = self.prompt.build(text, &pattern);

        let model = match self.service.generate(&prompt).await {
            Ok(reply) => decode_reply(&reply),
            Err(err) => {
                warn!(error = %err, "Generation failed, continuing with pattern record");
                PartialRecord::fallback()
            }
        };

        let merged = merge(model, &pattern);
        let record = complete(merged);

        let (filled, total) = record.coverage();
        debug!(filled, total, transactions = record.transactions.len(), "Reconciled record");
        record
    }

    /// Reconcile the text of a stored session and store the result.
    pub async fn reconcile_session<S>(&self, store: &S, id: SessionId) -> std::result::Result<CanonicalRecord, SessionError>
    where
        S: SessionStore + ?Sized,
    {
        let session = store.get(id)?;
        if session.text.trim().is_empty() {
            return Err(SessionError::EmptyText(id.to_string()));
        }

        let record = self.reconcile(&session.text).await;
        store.update_record(id, record.clone())?;

        info!(session_id = %id, filename = %session.filename, "Session reconciled");
        Ok(record)
    }

    /// Answer a question about a stored session.
    pub async fn ask<S>(&self, store: &S, id: SessionId, question: &str) -> Result<String>
    where
        S: SessionStore + ?Sized,
    {
        let session = store.get(id)?;
        let prompt = self.chat.build(&session.text, session.record.as_ref(), question);
        let answer = self.service.generate(&prompt).await?;

        debug!(session_id = %id, answer_len = answer.len(), "Answered question");
        Ok(answer)
    }
}
