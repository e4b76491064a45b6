//! File-backed persistence: snapshot round trips, reset, corrupt and legacy data.

use std::fs;

use chrono::Duration;
use greenfield_core::{Clock, InMemoryRepository, JourneyRepository, JourneyStore, StoreOptions};
use greenfield_types::{Decision, JourneyEvent, Phase, PhasePolicy};
use serde_json::{Map, json};

use crate::common::{PLANNING_SET, clock, file_repo, file_store, memory_store};

#[test]
fn snapshot_round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let clock = clock();
    let mut writer = file_store(dir.path(), &clock);

    for id in PLANNING_SET {
        clock.advance(Duration::milliseconds(1_250));
        writer.update_milestone(id, 100.0, None);
    }
    writer.update_milestone("first-insight-generated", 37.5, None);
    let mut patch = Map::new();
    patch.insert("runwayMonths".to_owned(), json!(8.5));
    writer.update_tool_insights("runway-calculator", &patch);
    writer.record_event(&JourneyEvent::decision_made("insight-engine", Decision::default()));

    let reader = file_store(dir.path(), &clock);
    let (a, b) = (writer.journey_state(), reader.journey_state());

    assert_eq!(b.overall_score(), a.overall_score());
    assert_eq!(b.current_phase(), a.current_phase());
    for (left, right) in a.milestones().iter().zip(b.milestones()) {
        assert_eq!(left.id, right.id);
        assert_eq!(left.progress, right.progress);
        assert_eq!(left.completed_at, right.completed_at);
    }
    let ids = |s: &greenfield_types::JourneyState| -> Vec<String> {
        s.achievements().iter().map(|a| a.id.clone()).collect()
    };
    assert_eq!(ids(a), ids(b));
    for (left, right) in a.achievements().iter().zip(b.achievements()) {
        assert_eq!(left.created_at, right.created_at);
    }
    assert_eq!(b.tool_insights(), a.tool_insights());
    assert_eq!(b.last_updated(), a.last_updated());
}

#[test]
fn reset_removes_file_and_next_start_is_fresh() {
    let dir = tempfile::tempdir().unwrap();
    let clock = clock();
    let mut store = file_store(dir.path(), &clock);
    store.update_milestone("first-tool-use", 100.0, None);
    let path = file_repo(dir.path()).path().to_path_buf();
    assert!(path.exists());

    store.reset_journey();

    let state = store.journey_state();
    assert_eq!(state.overall_score(), 0);
    assert_eq!(state.current_phase(), Phase::Discovery);
    assert!(state.achievements().is_empty());
    assert!(!path.exists());
    assert!(file_repo(dir.path()).load().unwrap().is_none());

    let again = file_store(dir.path(), &clock);
    assert_eq!(again.journey_state().overall_score(), 0);
    assert!(again.journey_state().achievements().is_empty());
}

#[test]
fn corrupt_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = file_repo(dir.path()).path().to_path_buf();
    fs::write(&path, "<html>not a journey</html>").unwrap();

    let clock = clock();
    let mut store = file_store(dir.path(), &clock);
    assert_eq!(store.journey_state().overall_score(), 0);
    assert_eq!(store.journey_state().milestones().len(), 15);

    // next save replaces the junk
    store.update_milestone("first-tool-use", 100.0, None);
    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(saved["overallScore"], json!(3));
}

#[test]
fn interrupted_write_is_recovered_from_backup() {
    let dir = tempfile::tempdir().unwrap();
    let clock = clock();
    let mut store = file_store(dir.path(), &clock);
    store.update_milestone("real-wage-calculated", 100.0, None);

    let path = file_repo(dir.path()).path().to_path_buf();
    let mut backup = path.clone().into_os_string();
    backup.push(".bak");
    fs::rename(&path, &backup).unwrap();

    let recovered = file_store(dir.path(), &clock);
    assert_eq!(recovered.journey_state().overall_score(), 5);
    assert!(path.exists());
}

#[test]
fn legacy_snapshot_is_reconciled() {
    let legacy = json!({
        "currentPhase": "discovery",
        "overallScore": 99,
        "milestones": [
            { "id": "first-tool-use", "progress": 100, "completedAt": "2025-11-02T10:00:00.000Z" },
            { "id": "basic-data-entry", "progress": 140 },
            { "id": "retired-milestone", "progress": 100 }
        ],
        "achievements": [
            { "id": "milestone-first-tool-use", "title": "First Step Taken Completed",
              "unlockedAt": "2025-11-02T10:00:00.000Z" },
            { "id": "milestone-first-tool-use", "title": "duplicate",
              "unlockedAt": "2025-11-02T10:00:00.000Z" }
        ],
        "toolInsights": { "runway-calculator": { "runwayMonths": 2 } }
    });
    let repo = InMemoryRepository::with_snapshot(legacy.to_string());
    let store = memory_store(&repo, PhasePolicy::default());

    let state = store.journey_state();
    assert_eq!(state.milestones().len(), 15);
    assert!(state.milestone("retired-milestone").is_none());
    assert_eq!(state.milestone("basic-data-entry").unwrap().progress, 100.0);
    // (3 + 4) / 106
    assert_eq!(state.overall_score(), 7);
    assert_eq!(state.achievements().len(), 1);
    assert_eq!(
        state.tool_insight("runway-calculator").and_then(|i| i.get("runwayMonths")),
        Some(&json!(2))
    );
    assert_eq!(repo.save_count(), 0);
}

#[test]
fn snapshot_without_milestones_is_rejected() {
    let repo =
        InMemoryRepository::with_snapshot(r#"{"currentPhase":"building","overallScore":60}"#);
    let store = memory_store(&repo, PhasePolicy::default());
    assert_eq!(store.journey_state().current_phase(), Phase::Discovery);
    assert_eq!(store.journey_state().overall_score(), 0);
}

#[test]
fn failed_writes_never_surface() {
    let repo = InMemoryRepository::new();
    repo.set_fail_writes(true);
    let clock = clock();
    let mut store = JourneyStore::with_clock(repo.clone(), clock.clone(), StoreOptions::default());

    store.update_milestone("first-tool-use", 100.0, None);
    store.record_event(&JourneyEvent::decision_made("x", Decision::default()));
    store.reset_journey();

    assert_eq!(store.journey_state().overall_score(), 0);
    assert_eq!(store.journey_state().last_updated(), clock.now());
    assert!(repo.snapshot().is_none());
}
