//! Session store: one entry per processed source document.
//!
//! The store owns every [`Session`]; callers get clones. Reads run
//! concurrently and a record update is last-writer-wins per id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::SessionError;
use crate::models::statement::CanonicalRecord;
use crate::pdf::{ExtractedDocument, ExtractedTable};

/// Opaque session identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// A fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for SessionId {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| SessionError::NotFound(s.to_string()))
    }
}

/// Artifacts produced for one source document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    /// Original file name of the source document.
    pub filename: String,
    /// Full extracted text, page separated.
    pub text: String,
    pub tables: Vec<ExtractedTable>,
    pub page_count: usize,
    pub image_count: usize,
    pub created_at: DateTime<Utc>,
    /// Latest reconciled record, if a reconciliation has run.
    pub record: Option<CanonicalRecord>,
}

/// Listing view of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: SessionId,
    pub filename: String,
    pub created_at: DateTime<Utc>,
    pub text_length: usize,
    pub tables_count: usize,
    pub pages_count: usize,
    pub image_count: usize,
    pub has_record: bool,
}

impl From<&Session> for SessionSummary {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id,
            filename: session.filename.clone(),
            created_at: session.created_at,
            text_length: session.text.chars().count(),
            tables_count: session.tables.len(),
            pages_count: session.page_count,
            image_count: session.image_count,
            has_record: session.record.is_some(),
        }
    }
}

/// Storage for sessions, injected into the reconciler.
pub trait SessionStore: Send + Sync {
    /// Store a newly extracted document under a fresh id.
    fn insert(&self, filename: &str, document: ExtractedDocument) -> SessionId;

    /// Clone of the session, if it exists.
    fn get(&self, id: SessionId) -> Result<Session, SessionError>;

    /// Replace the latest reconciled record.
    fn update_record(&self, id: SessionId, record: CanonicalRecord) -> Result<(), SessionError>;

    /// Delete a session.
    fn remove(&self, id: SessionId) -> Result<(), SessionError>;

    /// Summaries of all sessions, oldest first.
    fn list(&self) -> Vec<SessionSummary>;
}

/// Process-lifetime store backed by a map.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionId, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStore for InMemorySessionStore {
    fn insert(&self, filename: &str, document: ExtractedDocument) -> SessionId {
        let id = SessionId::new();
        let session = Session {
            id,
            filename: filename.to_string(),
            page_count: document.page_count(),
            image_count: document.image_count,
            text: document.text,
            tables: document.tables,
            created_at: Utc::now(),
            record: None,
        };

        info!(session_id = %id, filename, "Session created");
        self.sessions
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(id, session);
        id
    }

    fn get(&self, id: SessionId) -> Result<Session, SessionError> {
        self.sessions
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&id)
            .cloned()
            .ok_or_else(|| SessionError::NotFound(id.to_string()))
    }

    fn update_record(&self, id: SessionId, record: CanonicalRecord) -> Result<(), SessionError> {
        let mut sessions = self.sessions.write().unwrap_or_else(|e| e.into_inner());
        let session = sessions
            .get_mut(&id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;
        session.record = Some(record);
        debug!(session_id = %id, "Session record updated");
        Ok(())
    }

    fn remove(&self, id: SessionId) -> Result<(), SessionError> {
        self.sessions
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&id)
            .map(|_| info!(session_id = %id, "Session deleted"))
            .ok_or_else(|| SessionError::NotFound(id.to_string()))
    }

    fn list(&self) -> Vec<SessionSummary> {
        let sessions = self.sessions.read().unwrap_or_else(|e| e.into_inner());
        let mut summaries: Vec<SessionSummary> = sessions.values().map(SessionSummary::from).collect();
        summaries.sort_by_key(|s| s.created_at);
        summaries
    }
}
