//! Mindful - wellness journaling backend
//!
//! Stores voice-session transcripts and journal entries, and turns the whole
//! corpus into a "game plan": a few concrete wellness tasks plus a summary of
//! the user's emotional state, tagged with a categorical label.
//!
//! # Pipeline
//!
//! ```text
//! CorpusStore ─> compose_prompt ─> GenerationClient ─> decode ─> classify ─> GamePlanStore
//! ```
//!
//! # Modules
//!
//! - [`prompt`] - Fixed instruction header plus the corpus
//! - [`generate`] - One request to the generation service
//! - [`llm`] - Transport clients (OpenAI, Anthropic)
//! - [`decode`] - Raw answer to tasks and summary
//! - [`emotion`] - Summary to emotional state label
//! - [`pipeline`] - The synthesizer tying the stages together
//! - [`serve`] - HTTP API
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use mindful::{GenerationClient, Synthesizer, config::Config, llm::create_client};
//! use mindstore::SqliteStore;
//!
//! let config = Config::load(None)?;
//! let store = Arc::new(SqliteStore::open(&config.storage.db_path)?);
//! let generator = GenerationClient::from_config(&config.llm, create_client(&config.llm)?);
//! let plan = Synthesizer::new(store.clone(), store, generator).synthesize().await?;
//! ```

pub mod cli;
pub mod config;
pub mod decode;
pub mod emotion;
pub mod error;
pub mod generate;
pub mod llm;
pub mod pipeline;
pub mod prompt;
pub mod serve;

pub use decode::{DecodeError, DecodedPlan, decode};
pub use emotion::classify;
pub use error::{Error, ErrorKind};
pub use generate::GenerationClient;
pub use pipeline::Synthesizer;
pub use prompt::compose_prompt;
