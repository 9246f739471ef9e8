//! In-memory store
//!
//! Same contract as [`crate::SqliteStore`] without a database file. Reads and
//! writes can be switched to fail so callers can exercise their storage-fault
//! paths.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

use crate::error::StoreError;
use crate::record::{EmotionRecord, GamePlan, GamePlanRecord, JournalRecord, TranscriptRecord, now_ms};
use crate::store::{
    CorpusStore, EmotionStore, GamePlanStore, Store, validate_emotion, validate_journal, validate_plan,
    validate_transcript,
};

#[derive(Debug, Default)]
struct Tables {
    transcripts: Vec<TranscriptRecord>,
    journals: Vec<JournalRecord>,
    plans: Vec<GamePlanRecord>,
    emotions: Vec<EmotionRecord>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Vec-backed store owned by whoever constructs it
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every read fail with [`StoreError::Unavailable`]
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every write fail with [`StoreError::Unavailable`]
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn read(&self) -> Result<MutexGuard<'_, Tables>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            debug!("MemoryStore::read: failing on request");
            return Err(StoreError::Unavailable("memory store reads disabled".to_string()));
        }
        self.lock()
    }

    fn write(&self) -> Result<MutexGuard<'_, Tables>, StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            debug!("MemoryStore::write: failing on request");
            return Err(StoreError::Unavailable("memory store writes disabled".to_string()));
        }
        self.lock()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, StoreError> {
        self.tables
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }
}

impl CorpusStore for MemoryStore {
    fn fetch_transcripts(&self) -> Result<Vec<TranscriptRecord>, StoreError> {
        Ok(self.read()?.transcripts.clone())
    }

    fn fetch_journals(&self) -> Result<Vec<JournalRecord>, StoreError> {
        Ok(self.read()?.journals.clone())
    }

    fn add_transcript(&self, session_id: &str, text: &str) -> Result<TranscriptRecord, StoreError> {
        validate_transcript(session_id)?;
        let mut tables = self.write()?;
        let record = TranscriptRecord {
            id: tables.next_id(),
            session_id: session_id.to_string(),
            text: text.to_string(),
            created_at: now_ms(),
        };
        tables.transcripts.push(record.clone());
        Ok(record)
    }

    fn add_journal(&self, text: &str) -> Result<JournalRecord, StoreError> {
        validate_journal(text)?;
        let mut tables = self.write()?;
        let record = JournalRecord {
            id: tables.next_id(),
            text: text.to_string(),
            created_at: now_ms(),
        };
        tables.journals.push(record.clone());
        Ok(record)
    }

    fn transcripts_by_session(&self, session_id: &str) -> Result<Vec<TranscriptRecord>, StoreError> {
        Ok(self
            .read()?
            .transcripts
            .iter()
            .filter(|t| t.session_id == session_id)
            .cloned()
            .collect())
    }
}

impl GamePlanStore for MemoryStore {
    fn save(&self, plan: &GamePlan) -> Result<GamePlanRecord, StoreError> {
        validate_plan(plan)?;
        let mut tables = self.write()?;
        let record = GamePlanRecord {
            id: tables.next_id(),
            created_at: now_ms(),
            plan: plan.clone(),
        };
        tables.plans.push(record.clone());
        Ok(record)
    }

    fn list_all(&self) -> Result<Vec<GamePlanRecord>, StoreError> {
        Ok(self.read()?.plans.iter().rev().cloned().collect())
    }
}

impl EmotionStore for MemoryStore {
    fn add_emotion(&self, date: &str, emotion: &str) -> Result<EmotionRecord, StoreError> {
        validate_emotion(date, emotion)?;
        let mut tables = self.write()?;
        let record = EmotionRecord {
            id: tables.next_id(),
            date: date.to_string(),
            emotion: emotion.to_string(),
        };
        tables.emotions.push(record.clone());
        Ok(record)
    }

    fn list_emotions(&self) -> Result<Vec<EmotionRecord>, StoreError> {
        Ok(self.read()?.emotions.clone())
    }
}

impl Store for MemoryStore {
    fn clear(&self) -> Result<(), StoreError> {
        let mut tables = self.write()?;
        tables.transcripts.clear();
        tables.journals.clear();
        tables.plans.clear();
        tables.emotions.clear();
        Ok(())
    }
}
