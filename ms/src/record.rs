//! Record types persisted by the store

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Current time as unix milliseconds
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// A voice-session transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptRecord {
    /// Row id, assigned on persist
    pub id: i64,
    /// Voice session the transcript came from
    pub session_id: String,
    /// Transcript text
    #[serde(rename = "transcript")]
    pub text: String,
    /// Creation timestamp (unix ms)
    pub created_at: i64,
}

/// A text journal entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalRecord {
    /// Row id, assigned on persist
    pub id: i64,
    /// Journal text
    #[serde(rename = "content")]
    pub text: String,
    /// Creation timestamp (unix ms)
    pub created_at: i64,
}

/// A mood-tracker entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionRecord {
    pub id: i64,
    /// Calendar date as supplied by the client (free-form, usually YYYY-MM-DD)
    pub date: String,
    pub emotion: String,
}

/// Categorical emotional state attached to a game plan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionalState {
    Happy,
    Sad,
    Nervous,
    Angry,
    Fearful,
    /// No keyword matched. This is a real label, not an absence marker.
    #[default]
    Neutral,
}

impl EmotionalState {
    /// Every label, in declaration order
    pub const ALL: [EmotionalState; 6] = [
        EmotionalState::Happy,
        EmotionalState::Sad,
        EmotionalState::Nervous,
        EmotionalState::Angry,
        EmotionalState::Fearful,
        EmotionalState::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionalState::Happy => "happy",
            EmotionalState::Sad => "sad",
            EmotionalState::Nervous => "nervous",
            EmotionalState::Angry => "angry",
            EmotionalState::Fearful => "fearful",
            EmotionalState::Neutral => "neutral",
        }
    }
}

impl fmt::Display for EmotionalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EmotionalState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| format!("Unknown emotional state: {}", s))
    }
}

/// The synthesized output of one pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamePlan {
    /// Actionable wellness tasks, each a single non-empty line
    pub tasks: Vec<String>,
    /// Free-text emotional-state summary
    pub summary: String,
    /// Label derived from the summary
    pub emotional_state: EmotionalState,
}

impl GamePlan {
    /// Tasks as stored in the `game_plans.tasks` column
    pub(crate) fn tasks_blob(&self) -> String {
        self.tasks.join("\n")
    }

    /// Inverse of [`GamePlan::tasks_blob`]
    pub(crate) fn tasks_from_blob(blob: &str) -> Vec<String> {
        if blob.is_empty() {
            return Vec::new();
        }
        blob.split('\n').map(str::to_string).collect()
    }
}

/// A game plan as persisted, with its row id and creation time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamePlanRecord {
    pub id: i64,
    /// Creation timestamp (unix ms)
    pub created_at: i64,
    #[serde(flatten)]
    pub plan: GamePlan,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emotional_state_default_is_neutral() {
        assert_eq!(EmotionalState::default(), EmotionalState::Neutral);
    }

    #[test]
    fn test_emotional_state_parse() {
        for state in EmotionalState::ALL {
            assert_eq!(state.as_str().parse::<EmotionalState>().unwrap(), state);
        }
        assert!("ecstatic".parse::<EmotionalState>().is_err());
    }

    #[test]
    fn test_emotional_state_serializes_lowercase() {
        let json = serde_json::to_string(&EmotionalState::Nervous).unwrap();
        assert_eq!(json, "\"nervous\"");
    }

    #[test]
    fn test_tasks_blob() {
        let plan = GamePlan {
            tasks: vec!["Walk 10 min".to_string(), "Call a friend".to_string()],
            summary: String::new(),
            emotional_state: EmotionalState::Neutral,
        };
        assert_eq!(plan.tasks_blob(), "Walk 10 min\nCall a friend");
        assert_eq!(GamePlan::tasks_from_blob(&plan.tasks_blob()), plan.tasks);
    }

    #[test]
    fn test_empty_tasks_blob() {
        assert!(GamePlan::tasks_from_blob("").is_empty());
    }

    #[test]
    fn test_game_plan_record_flattens_plan() {
        let record = GamePlanRecord {
            id: 7,
            created_at: 1_700_000_000_000,
            plan: GamePlan {
                tasks: vec!["Stretch".to_string()],
                summary: "Calm".to_string(),
                emotional_state: EmotionalState::Neutral,
            },
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["tasks"][0], "Stretch");
        assert_eq!(value["emotional_state"], "neutral");
    }

    #[test]
    fn test_record_field_names_match_api() {
        let t = TranscriptRecord {
            id: 1,
            session_id: "s1".to_string(),
            text: "hello".to_string(),
            created_at: 0,
        };
        let value = serde_json::to_value(&t).unwrap();
        assert_eq!(value["transcript"], "hello");

        let j = JournalRecord {
            id: 1,
            text: "dear diary".to_string(),
            created_at: 0,
        };
        let value = serde_json::to_value(&j).unwrap();
        assert_eq!(value["content"], "dear diary");
    }
}
