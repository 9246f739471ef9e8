//! Game plan synthesis pipeline
//!
//! ```text
//! fetch corpus -> compose prompt -> generate -> decode -> classify -> save
//! ```
//!
//! Stages run once each, in order. The first failing stage ends the run with
//! its own error kind, and nothing is persisted unless every stage before the
//! save succeeded.

use std::sync::Arc;
use tracing::{debug, info, warn};

use mindstore::{CorpusStore, GamePlan, GamePlanRecord, GamePlanStore, StoreError};

use crate::decode::decode;
use crate::emotion::classify;
use crate::error::Error;
use crate::generate::GenerationClient;
use crate::prompt::compose_prompt;

/// Run a synchronous store call on the blocking pool
///
/// SQLite does disk I/O under a mutex; it must not hold an async worker.
pub(crate) async fn run_blocking<T, F>(op: F) -> Result<T, StoreError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, StoreError> + Send + 'static,
{
    tokio::task::spawn_blocking(op)
        .await
        .map_err(|e| StoreError::Unavailable(format!("store task failed: {}", e)))?
}

/// Runs the synthesis pipeline against a corpus and a plan store
#[derive(Clone)]
pub struct Synthesizer {
    corpus: Arc<dyn CorpusStore>,
    plans: Arc<dyn GamePlanStore>,
    generator: GenerationClient,
}

impl Synthesizer {
    pub fn new(corpus: Arc<dyn CorpusStore>, plans: Arc<dyn GamePlanStore>, generator: GenerationClient) -> Self {
        Self {
            corpus,
            plans,
            generator,
        }
    }

    /// Synthesize a game plan from the whole corpus and persist it
    ///
    /// Returns the stored record, including its assigned id.
    pub async fn synthesize(&self) -> Result<GamePlanRecord, Error> {
        debug!("synthesize: called");

        let corpus = self.corpus.clone();
        let (transcripts, journals) =
            run_blocking(move || Ok((corpus.fetch_transcripts()?, corpus.fetch_journals()?))).await?;
        info!(
            transcripts = transcripts.len(),
            journals = journals.len(),
            "synthesize: corpus fetched"
        );

        let prompt = compose_prompt(&transcripts, &journals);
        let raw = self.generator.generate(&prompt).await?;

        let decoded = decode(&raw).inspect_err(|e| warn!(error = %e, "synthesize: undecodable answer"))?;
        if decoded.tasks.is_empty() {
            debug!("synthesize: answer carried no usable tasks");
        }

        let emotional_state = classify(&decoded.summary);
        let plan = GamePlan {
            tasks: decoded.tasks,
            summary: decoded.summary,
            emotional_state,
        };

        let plans = self.plans.clone();
        let record = run_blocking(move || plans.save(&plan)).await?;
        info!(
            id = record.id,
            tasks = record.plan.tasks.len(),
            emotional_state = %record.plan.emotional_state,
            "synthesize: game plan saved"
        );
        Ok(record)
    }

    /// Previously synthesized plans, most recent first
    pub fn list_plans(&self) -> Result<Vec<GamePlanRecord>, Error> {
        debug!("list_plans: called");
        Ok(self.plans.list_all()?)
    }
}
