//! Contract tests run against every Store implementation
//!
//! SqliteStore and MemoryStore must be interchangeable behind the traits.

use mindstore::{CorpusStore, EmotionStore, EmotionalState, GamePlan, GamePlanStore, MemoryStore, SqliteStore, Store};
use tempfile::TempDir;

fn sample_plan(summary: &str) -> GamePlan {
    GamePlan {
        tasks: vec![
            "Walk 10 min".to_string(),
            "Write 3 gratitudes".to_string(),
            "Call a friend".to_string(),
        ],
        summary: summary.to_string(),
        emotional_state: EmotionalState::Nervous,
    }
}

fn check_corpus_contract(store: &dyn Store) {
    assert!(store.fetch_transcripts().unwrap().is_empty());
    assert!(store.fetch_journals().unwrap().is_empty());

    let t1 = store.add_transcript("session-1", "I felt tense at work").unwrap();
    let t2 = store.add_transcript("session-2", "Better after the run").unwrap();
    let j1 = store.add_journal("Slept eight hours").unwrap();

    assert!(t1.id >= 0);
    assert!(t2.id > t1.id);

    let transcripts = store.fetch_transcripts().unwrap();
    assert_eq!(transcripts, vec![t1.clone(), t2]);
    assert_eq!(store.fetch_journals().unwrap(), vec![j1]);
    assert_eq!(store.transcripts_by_session("session-1").unwrap(), vec![t1]);
}

fn check_game_plan_contract(store: &dyn Store) {
    assert!(store.list_all().unwrap().is_empty());

    let first = store.save(&sample_plan("first")).unwrap();
    let second = store.save(&sample_plan("second")).unwrap();

    let all = store.list_all().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0], second);
    assert_eq!(all[1], first);
    assert_eq!(all[1].plan, sample_plan("first"));
}

fn check_plan_validation_contract(store: &dyn Store) {
    let before = store.list_all().unwrap();

    for tasks in [vec!["Walk\nthen rest"], vec!["Stretch\r\nBreathe"], vec!["Walk", ""], vec!["   "]] {
        let plan = GamePlan {
            tasks: tasks.into_iter().map(str::to_string).collect(),
            ..sample_plan("rejected")
        };
        assert!(store.save(&plan).unwrap_err().is_invalid(), "accepted {:?}", plan.tasks);
    }
    assert_eq!(store.list_all().unwrap(), before);

    // What goes in is exactly what comes back
    let plan = GamePlan {
        tasks: vec!["Walk  10 min".to_string(), " Breathe ".to_string()],
        ..sample_plan("kept")
    };
    let saved = store.save(&plan).unwrap();
    assert_eq!(saved.plan, plan);
    assert_eq!(store.list_all().unwrap()[0], saved);
}

fn check_emotion_contract(store: &dyn Store) {
    assert!(store.add_emotion("", "calm").unwrap_err().is_invalid());
    assert!(store.add_emotion("  ", "calm").unwrap_err().is_invalid());
    assert!(store.add_emotion("2024-06-01", " ").unwrap_err().is_invalid());
    assert!(store.list_emotions().unwrap().is_empty());

    let record = store.add_emotion("2024-06-01", "calm").unwrap();
    assert_eq!(store.list_emotions().unwrap(), vec![record]);
}

fn check_clear_contract(store: &dyn Store) {
    store.add_journal("to be removed").unwrap();
    store.add_emotion("2024-06-01", "hopeful").unwrap();
    store.save(&sample_plan("gone")).unwrap();

    store.clear().unwrap();

    assert!(store.fetch_journals().unwrap().is_empty());
    assert!(store.list_emotions().unwrap().is_empty());
    assert!(store.list_all().unwrap().is_empty());
}

#[test]
fn test_sqlite_store_contract() {
    let temp = TempDir::new().unwrap();
    let store = SqliteStore::open(temp.path().join("contract.db")).unwrap();
    check_corpus_contract(&store);
    check_game_plan_contract(&store);
    check_plan_validation_contract(&store);
    check_emotion_contract(&store);
    check_clear_contract(&store);
}

#[test]
fn test_memory_store_contract() {
    let store = MemoryStore::new();
    check_corpus_contract(&store);
    check_game_plan_contract(&store);
    check_plan_validation_contract(&store);
    check_emotion_contract(&store);
    check_clear_contract(&store);
}
