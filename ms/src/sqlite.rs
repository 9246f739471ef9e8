//! SQLite-backed store

use rusqlite::{Connection, Row, params};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

use crate::error::StoreError;
use crate::record::{EmotionRecord, EmotionalState, GamePlan, GamePlanRecord, JournalRecord, TranscriptRecord, now_ms};
use crate::store::{
    CorpusStore, EmotionStore, GamePlanStore, Store, validate_emotion, validate_journal, validate_plan,
    validate_transcript,
};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS transcripts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    session_id TEXT NOT NULL,
    transcript TEXT NOT NULL,
    created_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_transcripts_session ON transcripts(session_id);

CREATE TABLE IF NOT EXISTS journals (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    content TEXT NOT NULL,
    created_at INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS game_plans (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    tasks TEXT NOT NULL,
    summary TEXT NOT NULL,
    emotional_state TEXT NOT NULL,
    created_at INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS emotions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    date TEXT NOT NULL,
    emotion TEXT NOT NULL
);
"#;

/// SQLite store; one connection guarded by a mutex
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create a database at the given path, creating parent directories
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::Unavailable(format!("Failed to create {}: {}", parent.display(), e)))?;
        }

        let conn = Connection::open(path)?;
        let store = Self { conn: Mutex::new(conn) };
        store.bootstrap()?;
        info!(path = %path.display(), "Opened store");
        Ok(store)
    }

    /// Open a private in-memory database
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn: Mutex::new(conn) };
        store.bootstrap()?;
        Ok(store)
    }

    fn bootstrap(&self) -> Result<(), StoreError> {
        debug!("bootstrap: creating tables");
        self.lock_conn()?.execute_batch(SCHEMA)?;
        Ok(())
    }

    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Unavailable("store connection lock poisoned".to_string()))
    }

    fn map_transcript(row: &Row<'_>) -> rusqlite::Result<TranscriptRecord> {
        Ok(TranscriptRecord {
            id: row.get(0)?,
            session_id: row.get(1)?,
            text: row.get(2)?,
            created_at: row.get(3)?,
        })
    }

    fn map_game_plan(row: &Row<'_>) -> rusqlite::Result<GamePlanRecord> {
        let tasks: String = row.get(1)?;
        let state: String = row.get(3)?;
        let emotional_state = state.parse::<EmotionalState>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, e.into())
        })?;

        Ok(GamePlanRecord {
            id: row.get(0)?,
            created_at: row.get(4)?,
            plan: GamePlan {
                tasks: GamePlan::tasks_from_blob(&tasks),
                summary: row.get(2)?,
                emotional_state,
            },
        })
    }
}

impl CorpusStore for SqliteStore {
    fn fetch_transcripts(&self) -> Result<Vec<TranscriptRecord>, StoreError> {
        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare("SELECT id, session_id, transcript, created_at FROM transcripts ORDER BY id ASC")?;
        let rows = stmt
            .query_map([], Self::map_transcript)?
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = rows.len(), "fetch_transcripts: done");
        Ok(rows)
    }

    fn fetch_journals(&self) -> Result<Vec<JournalRecord>, StoreError> {
        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare("SELECT id, content, created_at FROM journals ORDER BY id ASC")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(JournalRecord {
                    id: row.get(0)?,
                    text: row.get(1)?,
                    created_at: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = rows.len(), "fetch_journals: done");
        Ok(rows)
    }

    fn add_transcript(&self, session_id: &str, text: &str) -> Result<TranscriptRecord, StoreError> {
        validate_transcript(session_id)?;
        let created_at = now_ms();
        let conn = self.lock_conn()?;
        conn.execute(
            "INSERT INTO transcripts (session_id, transcript, created_at) VALUES (?1, ?2, ?3)",
            params![session_id, text, created_at],
        )?;
        let id = conn.last_insert_rowid();
        debug!(id, session_id, "add_transcript: inserted");
        Ok(TranscriptRecord {
            id,
            session_id: session_id.to_string(),
            text: text.to_string(),
            created_at,
        })
    }

    fn add_journal(&self, text: &str) -> Result<JournalRecord, StoreError> {
        validate_journal(text)?;
        let created_at = now_ms();
        let conn = self.lock_conn()?;
        conn.execute(
            "INSERT INTO journals (content, created_at) VALUES (?1, ?2)",
            params![text, created_at],
        )?;
        let id = conn.last_insert_rowid();
        debug!(id, "add_journal: inserted");
        Ok(JournalRecord {
            id,
            text: text.to_string(),
            created_at,
        })
    }

    fn transcripts_by_session(&self, session_id: &str) -> Result<Vec<TranscriptRecord>, StoreError> {
        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, session_id, transcript, created_at FROM transcripts WHERE session_id = ?1 ORDER BY id ASC",
        )?;
        let rows = stmt
            .query_map(params![session_id], Self::map_transcript)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

impl GamePlanStore for SqliteStore {
    fn save(&self, plan: &GamePlan) -> Result<GamePlanRecord, StoreError> {
        validate_plan(plan)?;
        let created_at = now_ms();
        let conn = self.lock_conn()?;
        conn.execute(
            "INSERT INTO game_plans (tasks, summary, emotional_state, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![plan.tasks_blob(), plan.summary, plan.emotional_state.as_str(), created_at],
        )?;
        let id = conn.last_insert_rowid();
        info!(id, emotional_state = %plan.emotional_state, "Saved game plan");
        Ok(GamePlanRecord {
            id,
            created_at,
            plan: plan.clone(),
        })
    }

    fn list_all(&self) -> Result<Vec<GamePlanRecord>, StoreError> {
        let conn = self.lock_conn()?;
        let mut stmt =
            conn.prepare("SELECT id, tasks, summary, emotional_state, created_at FROM game_plans ORDER BY id DESC")?;
        let rows = stmt
            .query_map([], Self::map_game_plan)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

impl EmotionStore for SqliteStore {
    fn add_emotion(&self, date: &str, emotion: &str) -> Result<EmotionRecord, StoreError> {
        validate_emotion(date, emotion)?;
        let conn = self.lock_conn()?;
        conn.execute(
            "INSERT INTO emotions (date, emotion) VALUES (?1, ?2)",
            params![date, emotion],
        )?;
        Ok(EmotionRecord {
            id: conn.last_insert_rowid(),
            date: date.to_string(),
            emotion: emotion.to_string(),
        })
    }

    fn list_emotions(&self) -> Result<Vec<EmotionRecord>, StoreError> {
        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare("SELECT id, date, emotion FROM emotions ORDER BY id ASC")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(EmotionRecord {
                    id: row.get(0)?,
                    date: row.get(1)?,
                    emotion: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

impl Store for SqliteStore {
    fn clear(&self) -> Result<(), StoreError> {
        self.lock_conn()?.execute_batch(
            "DELETE FROM transcripts; DELETE FROM journals; DELETE FROM game_plans; DELETE FROM emotions;",
        )?;
        info!("Cleared all tables");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn plan(summary: &str, state: EmotionalState) -> GamePlan {
        GamePlan {
            tasks: vec!["Walk 10 min".to_string(), "Write 3 gratitudes".to_string()],
            summary: summary.to_string(),
            emotional_state: state,
        }
    }

    #[test]
    fn test_open_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("mindful.db");
        let _store = SqliteStore::open(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_corpus_in_persistence_order() {
        let store = SqliteStore::in_memory().unwrap();
        store.add_transcript("s1", "first").unwrap();
        store.add_transcript("s2", "second").unwrap();
        store.add_journal("journal one").unwrap();

        let transcripts = store.fetch_transcripts().unwrap();
        let texts: Vec<_> = transcripts.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second"]);
        assert!(transcripts[0].id < transcripts[1].id);

        let journals = store.fetch_journals().unwrap();
        assert_eq!(journals.len(), 1);
        assert_eq!(journals[0].text, "journal one");
    }

    #[test]
    fn test_empty_corpus_is_not_an_error() {
        let store = SqliteStore::in_memory().unwrap();
        assert!(store.fetch_transcripts().unwrap().is_empty());
        assert!(store.fetch_journals().unwrap().is_empty());
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_rejects_empty_input() {
        let store = SqliteStore::in_memory().unwrap();
        assert!(store.add_transcript("", "text").unwrap_err().is_invalid());
        assert!(store.add_journal("   ").unwrap_err().is_invalid());
        assert!(store.add_emotion("2024-01-01", "").unwrap_err().is_invalid());
        assert!(store.add_emotion("", "calm").unwrap_err().is_invalid());
        assert!(store.fetch_transcripts().unwrap().is_empty());
        assert!(store.list_emotions().unwrap().is_empty());
    }

    #[test]
    fn test_transcripts_by_session() {
        let store = SqliteStore::in_memory().unwrap();
        store.add_transcript("a", "one").unwrap();
        store.add_transcript("b", "two").unwrap();
        store.add_transcript("a", "three").unwrap();

        let a = store.transcripts_by_session("a").unwrap();
        assert_eq!(a.len(), 2);
        assert_eq!(a[1].text, "three");
        assert!(store.transcripts_by_session("missing").unwrap().is_empty());
    }

    #[test]
    fn test_save_and_list_round_trip() {
        let store = SqliteStore::in_memory().unwrap();
        let original = plan("User seems anxious but hopeful", EmotionalState::Nervous);
        let saved = store.save(&original).unwrap();
        assert_eq!(saved.plan, original);

        let all = store.list_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, saved.id);
        assert_eq!(all[0].plan, original);
    }

    #[test]
    fn test_list_all_most_recent_first() {
        let store = SqliteStore::in_memory().unwrap();
        store.save(&plan("first", EmotionalState::Happy)).unwrap();
        store.save(&plan("second", EmotionalState::Sad)).unwrap();

        let all = store.list_all().unwrap();
        assert_eq!(all[0].plan.summary, "second");
        assert_eq!(all[1].plan.summary, "first");
    }

    #[test]
    fn test_plan_without_tasks_round_trips() {
        let store = SqliteStore::in_memory().unwrap();
        let empty = GamePlan {
            tasks: vec![],
            summary: String::new(),
            emotional_state: EmotionalState::Neutral,
        };
        store.save(&empty).unwrap();
        assert_eq!(store.list_all().unwrap()[0].plan, empty);
    }

    #[test]
    fn test_multi_line_task_is_rejected() {
        let store = SqliteStore::in_memory().unwrap();
        let mut bad = plan("split", EmotionalState::Neutral);
        bad.tasks = vec!["Walk\nthen rest".to_string()];
        assert!(store.save(&bad).unwrap_err().is_invalid());
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_emotions() {
        let store = SqliteStore::in_memory().unwrap();
        store.add_emotion("2024-05-01", "calm").unwrap();
        store.add_emotion("2024-05-02", "tired").unwrap();
        let emotions = store.list_emotions().unwrap();
        assert_eq!(emotions.len(), 2);
        assert_eq!(emotions[1].emotion, "tired");
    }

    #[test]
    fn test_clear() {
        let store = SqliteStore::in_memory().unwrap();
        store.add_transcript("s", "t").unwrap();
        store.add_journal("j").unwrap();
        store.add_emotion("d", "e").unwrap();
        store.save(&plan("p", EmotionalState::Neutral)).unwrap();

        store.clear().unwrap();

        assert!(store.fetch_transcripts().unwrap().is_empty());
        assert!(store.fetch_journals().unwrap().is_empty());
        assert!(store.list_emotions().unwrap().is_empty());
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_data_survives_reopen() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("mindful.db");
        {
            let store = SqliteStore::open(&path).unwrap();
            store.add_journal("persisted").unwrap();
        }
        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.fetch_journals().unwrap()[0].text, "persisted");
    }
}
