//! Game plan prompt composition
//!
//! The prompt is the fixed instruction header, a newline, then every
//! transcript followed by every journal entry, one per line. Equal corpora
//! always produce byte-identical prompts.

use mindstore::{JournalRecord, TranscriptRecord};
use tracing::debug;

/// Number of wellness tasks the header asks for
pub const TASK_COUNT: usize = 3;

/// Instruction header; commits the model to the JSON contract `decode` expects
pub const GAMEPLAN_HEADER: &str = r#"You are a supportive wellness coach. Below are transcripts of the user's voice sessions followed by entries from their personal journal.

Based on this material, generate exactly 3 specific, actionable wellness tasks the user can do in the coming days, and write one short summary of the user's current emotional state.

Respond with ONLY a JSON object in exactly this shape, with no other text:
{"tasks": ["<task 1>", "<task 2>", "<task 3>"], "summary": "<emotional state summary>"}

- "tasks" is an array of strings, each one a single sentence.
- "summary" is a string.

Conversations and journal entries:"#;

/// Build the synthesis prompt from the corpus
pub fn compose_prompt(transcripts: &[TranscriptRecord], journals: &[JournalRecord]) -> String {
    debug!(
        transcript_count = transcripts.len(),
        journal_count = journals.len(),
        "compose_prompt: called"
    );

    let corpus_len: usize = transcripts.iter().map(|t| t.text.len() + 1).sum::<usize>()
        + journals.iter().map(|j| j.text.len() + 1).sum::<usize>();

    let mut prompt = String::with_capacity(GAMEPLAN_HEADER.len() + 1 + corpus_len);
    prompt.push_str(GAMEPLAN_HEADER);
    prompt.push('\n');

    for transcript in transcripts {
        prompt.push_str(&transcript.text);
        prompt.push('\n');
    }
    for journal in journals {
        prompt.push_str(&journal.text);
        prompt.push('\n');
    }

    prompt
}
