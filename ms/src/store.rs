//! Store traits
//!
//! The pipeline only ever sees these traits, so tests can swap the SQLite
//! store for [`crate::MemoryStore`].

use crate::error::StoreError;
use crate::record::{EmotionRecord, GamePlan, GamePlanRecord, JournalRecord, TranscriptRecord};

/// Read/append access to the transcript and journal corpus
pub trait CorpusStore: Send + Sync {
    /// All transcripts in persistence order
    fn fetch_transcripts(&self) -> Result<Vec<TranscriptRecord>, StoreError>;

    /// All journal entries in persistence order
    fn fetch_journals(&self) -> Result<Vec<JournalRecord>, StoreError>;

    /// Append a transcript. `session_id` must be non-empty.
    fn add_transcript(&self, session_id: &str, text: &str) -> Result<TranscriptRecord, StoreError>;

    /// Append a journal entry. `text` must be non-empty.
    fn add_journal(&self, text: &str) -> Result<JournalRecord, StoreError>;

    /// Transcripts for one voice session, in persistence order
    fn transcripts_by_session(&self, session_id: &str) -> Result<Vec<TranscriptRecord>, StoreError>;
}

/// Append/list access to synthesized game plans
pub trait GamePlanStore: Send + Sync {
    /// Persist a plan and return it with its assigned id
    fn save(&self, plan: &GamePlan) -> Result<GamePlanRecord, StoreError>;

    /// All plans, most recent first
    fn list_all(&self) -> Result<Vec<GamePlanRecord>, StoreError>;
}

/// Mood-tracker log
pub trait EmotionStore: Send + Sync {
    fn add_emotion(&self, date: &str, emotion: &str) -> Result<EmotionRecord, StoreError>;

    /// All entries in persistence order
    fn list_emotions(&self) -> Result<Vec<EmotionRecord>, StoreError>;
}

/// Everything a deployment needs from one backing store
pub trait Store: CorpusStore + GamePlanStore + EmotionStore {
    /// Delete every row from every table
    fn clear(&self) -> Result<(), StoreError>;
}

pub(crate) fn validate_transcript(session_id: &str) -> Result<(), StoreError> {
    if session_id.trim().is_empty() {
        return Err(StoreError::Invalid("session_id must not be empty".to_string()));
    }
    Ok(())
}

pub(crate) fn validate_journal(text: &str) -> Result<(), StoreError> {
    if text.trim().is_empty() {
        return Err(StoreError::Invalid("content cannot be empty".to_string()));
    }
    Ok(())
}

pub(crate) fn validate_emotion(date: &str, emotion: &str) -> Result<(), StoreError> {
    if date.trim().is_empty() {
        return Err(StoreError::Invalid("date must not be empty".to_string()));
    }
    if emotion.trim().is_empty() {
        return Err(StoreError::Invalid("emotion must not be empty".to_string()));
    }
    Ok(())
}

/// Tasks are persisted one per line, so each must be a single non-blank line
pub(crate) fn validate_plan(plan: &GamePlan) -> Result<(), StoreError> {
    for task in &plan.tasks {
        if task.trim().is_empty() {
            return Err(StoreError::Invalid("task must not be empty".to_string()));
        }
        if task.contains('\n') || task.contains('\r') {
            return Err(StoreError::Invalid(format!("task must be a single line: {:?}", task)));
        }
    }
    Ok(())
}
