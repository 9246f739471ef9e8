//! Response decoding
//!
//! Turns the generation service's raw text into tasks and a summary. Models
//! sometimes wrap the JSON in a fenced code block, so a failed raw parse is
//! retried once with the fence markers stripped. Clean JSON is never touched.

use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::debug;

/// Leading fence line (with optional language tag), body, trailing fence
static FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A```[A-Za-z0-9_+.\-]*[ \t]*\r?\n(.*?)\r?\n?[ \t]*```\z").expect("fence regex is valid")
});

/// Errors from decoding a generation response
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("response is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("response does not match the game plan contract: {0}")]
    Contract(#[source] serde_json::Error),
}

/// Tasks and summary as decoded, before classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPlan {
    pub tasks: Vec<String>,
    pub summary: String,
}

/// Wire shape of the answer. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
struct Payload {
    tasks: Vec<String>,
    summary: String,
}

/// Decode a raw generation answer
pub fn decode(raw: &str) -> Result<DecodedPlan, DecodeError> {
    debug!(raw_len = raw.len(), "decode: called");
    let trimmed = raw.trim();

    let value: serde_json::Value = match serde_json::from_str(trimmed) {
        Ok(value) => value,
        Err(raw_err) => match strip_fence(trimmed) {
            Some(inner) => {
                debug!("decode: raw parse failed, retrying without fence");
                serde_json::from_str(inner).map_err(DecodeError::InvalidJson)?
            }
            None => return Err(DecodeError::InvalidJson(raw_err)),
        },
    };

    // Structs also deserialize from arrays; the contract is an object
    if !value.is_object() {
        return Err(DecodeError::Contract(serde::de::Error::custom("expected a JSON object")));
    }
    let payload: Payload = serde_json::from_value(value).map_err(DecodeError::Contract)?;

    Ok(DecodedPlan {
        tasks: payload.tasks.iter().filter_map(|t| normalize_task(t)).collect(),
        summary: payload.summary,
    })
}

/// Body of a fenced block, or None if `text` is not exactly one fenced block
fn strip_fence(text: &str) -> Option<&str> {
    FENCE.captures(text).and_then(|c| c.get(1)).map(|m| m.as_str())
}

/// Trim a task and fold its lines onto one; blank tasks are dropped
///
/// Spacing inside a line is left as the model wrote it.
fn normalize_task(task: &str) -> Option<String> {
    let line = task
        .split(['\r', '\n'])
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if line.is_empty() { None } else { Some(line) }
}
