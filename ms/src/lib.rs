//! MindStore - persistence for the mindful journaling backend
//!
//! Holds the corpus the game plan pipeline reads (voice-session transcripts
//! and journal entries), the game plans it writes, and the mood log.
//!
//! # Architecture
//!
//! ```text
//! CorpusStore ───┐
//! GamePlanStore ─┼── Store ──┬── SqliteStore   (deployment)
//! EmotionStore ──┘           └── MemoryStore   (tests, fakes)
//! ```
//!
//! All tables are append-only except for [`Store::clear`]. An empty table is a
//! valid empty `Vec`; deciding whether that means "not found" is left to the
//! caller.
//!
//! # Example
//!
//! ```ignore
//! use mindstore::{CorpusStore, GamePlanStore, SqliteStore};
//!
//! let store = SqliteStore::open("mindful.db")?;
//! store.add_journal("Slept badly, felt better after a walk")?;
//! let journals = store.fetch_journals()?;
//! let plans = store.list_all()?;
//! ```

mod error;
mod memory;
mod record;
mod sqlite;
mod store;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use record::{
    EmotionRecord, EmotionalState, GamePlan, GamePlanRecord, JournalRecord, TranscriptRecord, now_ms,
};
pub use sqlite::SqliteStore;
pub use store::{CorpusStore, EmotionStore, GamePlanStore, Store};
