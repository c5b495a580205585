//! Per-session state.
//!
//! A [`SessionContext`] is created when a user session starts, moved through
//! [`crate::App::dispatch`] once per user action and cleared when the session
//! ends. Nothing in it is shared between sessions.

use crate::chat::ChatMessage;
use crate::notes::NoteRow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct CachedNotes {
    pub rows: Arc<Vec<NoteRow>>,
    pub fetched_at: DateTime<Utc>
}

impl CachedNotes {
    pub fn new(rows: Vec<NoteRow>, fetched_at: DateTime<Utc>) -> Self {
        Self {
            rows: Arc::new(rows),
            fetched_at
        }
    }

    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        match chrono::Duration::from_std(ttl) {
            Ok(ttl) => now.signed_duration_since(self.fetched_at) < ttl,
            Err(_) => true
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnrichmentState {
    pub company: Option<String>,
    pub messages: Vec<ChatMessage>,
    pub report: Option<String>
}

impl EnrichmentState {
    /// Follow-up questions are offered once the first research reply is in.
    pub fn accepts_follow_up(&self) -> bool {
        self.messages.len() >= 2
    }
}

#[derive(Debug, Clone)]
pub struct SessionContext {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub crm_chat: Vec<ChatMessage>,
    pub coach_chat: Vec<ChatMessage>,
    pub enrichment: EnrichmentState,
    pub notes: Option<CachedNotes>
}

impl SessionContext {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            crm_chat: Vec::new(),
            coach_chat: Vec::new(),
            enrichment: EnrichmentState::default(),
            notes: None
        }
    }

    pub fn fresh_notes(&self, now: DateTime<Utc>, ttl: Duration) -> Option<Arc<Vec<NoteRow>>> {
        self.notes
            .as_ref()
            .filter(|cached| cached.is_fresh(now, ttl))
            .map(|cached| Arc::clone(&cached.rows))
    }

    /// Drops all conversation and cached state; the session id is kept.
    pub fn clear(&mut self) {
        self.crm_chat.clear();
        self.coach_chat.clear();
        self.enrichment = EnrichmentState::default();
        self.notes = None;
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}
