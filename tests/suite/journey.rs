//! Journey store behavior through the public API.

use chrono::Duration;
use greenfield_core::{Clock, InMemoryRepository, JourneyStore, StoreOptions};
use greenfield_types::{
    Decision, DecisionChoice, JourneyEvent, Phase, PhasePolicy, ToolId, TOTAL_CATALOG_WEIGHT,
};
use serde_json::{Map, json};

use crate::common::{PLANNING_SET, clock, memory_store};

#[test]
fn unknown_milestones_leave_state_unchanged() {
    let repo = InMemoryRepository::new();
    let mut store = memory_store(&repo, PhasePolicy::default());
    store.update_milestone("first-tool-use", 40.0, None);
    let before = store.journey_state().clone();

    for id in ["", "FIRST-TOOL-USE", "milestone-first-tool-use", "side-quest"] {
        assert!(store.update_milestone(id, 100.0, None).is_none());
    }

    assert_eq!(store.journey_state(), &before);
}

#[test]
fn stored_progress_is_clamped() {
    let repo = InMemoryRepository::new();
    let mut store = memory_store(&repo, PhasePolicy::default());

    for (input, stored) in [
        (-20.0, 0.0),
        (0.0, 0.0),
        (37.5, 37.5),
        (100.0, 100.0),
        (250.0, 100.0),
        (f64::INFINITY, 100.0),
        (f64::NEG_INFINITY, 0.0),
    ] {
        store.update_milestone("values-identified", input, None);
        let progress = store.journey_state().milestone("values-identified").unwrap().progress;
        assert_eq!(progress, stored, "input {input}");
    }
}

#[test]
fn repeated_completion_logs_one_achievement() {
    let repo = InMemoryRepository::new();
    let mut store = memory_store(&repo, PhasePolicy::default());

    let first = store.update_milestone("first-tool-use", 100.0, None).unwrap();
    let second = store.update_milestone("first-tool-use", 100.0, None).unwrap();

    assert!(first.newly_completed);
    assert!(!second.newly_completed);
    let count = store
        .journey_state()
        .achievements()
        .iter()
        .filter(|a| a.id == "milestone-first-tool-use")
        .count();
    assert_eq!(count, 1);
}

#[test]
fn score_matches_weighted_formula() {
    let repo = InMemoryRepository::new();
    let mut store = memory_store(&repo, PhasePolicy::default());

    let updates = [
        ("first-tool-use", 100.0),
        ("financial-clarity", 64.0),
        ("action-initiated", 12.5),
        ("sustainable-income", 33.0),
        ("financial-clarity", 80.0),
        ("momentum-achieved", 5.0),
    ];
    for (id, progress) in updates {
        store.update_milestone(id, progress, None);

        let state = store.journey_state();
        let earned: f64 = state
            .milestones()
            .iter()
            .map(|m| f64::from(m.weight) * m.progress / 100.0)
            .sum();
        let expected = (100.0 * earned / f64::from(TOTAL_CATALOG_WEIGHT)).round() as u8;
        assert_eq!(state.overall_score(), expected, "after {id}={progress}");
    }
}

#[test]
fn discovery_set_plus_financial_clarity_reaches_planning() {
    let repo = InMemoryRepository::new();
    let mut store = memory_store(&repo, PhasePolicy::default());

    for id in PLANNING_SET {
        store.update_milestone(id, 100.0, None);
    }

    let state = store.journey_state();
    assert_eq!(state.overall_score(), 31);
    assert_eq!(state.current_phase(), Phase::Planning);
    assert!(state.has_achievement("phase-planning"));
    assert_eq!(state.achievements().len(), 7);
}

#[test]
fn decisions_count_and_overwrite() {
    let repo = InMemoryRepository::new();
    let clock = clock();
    let mut store = JourneyStore::with_clock(repo.clone(), clock.clone(), StoreOptions::default());

    let mut metadata = Map::new();
    metadata.insert("choice".to_owned(), json!("A"));
    metadata.insert("confidence".to_owned(), json!(8));
    store.record_event(&JourneyEvent::from_wire("decision_made", "x", metadata));

    let insight = store.journey_state().tool_insight("x").unwrap();
    assert_eq!(insight.decisions_count(), 1);
    let recent = insight.recent_decision().unwrap();
    assert_eq!(recent.choice, DecisionChoice::A);
    assert_eq!(recent.confidence, 8);
    assert_eq!(recent.date, clock.now());

    clock.advance(Duration::hours(3));
    store.record_event(&JourneyEvent::decision_made(
        "x",
        Decision {
            choice: DecisionChoice::Neither,
            confidence: 2,
        },
    ));

    let insight = store.journey_state().tool_insight("x").unwrap();
    assert_eq!(insight.decisions_count(), 2);
    let recent = insight.recent_decision().unwrap();
    assert_eq!(recent.choice, DecisionChoice::Neither);
    assert_eq!(recent.date, clock.now());
}

#[test]
fn decision_defaults_fill_missing_fields() {
    let repo = InMemoryRepository::new();
    let mut store = memory_store(&repo, PhasePolicy::default());

    store.record_event(&JourneyEvent::from_wire("decision_made", "x", Map::new()));

    let recent = store
        .journey_state()
        .tool_insight("x")
        .and_then(|i| i.recent_decision())
        .unwrap();
    assert_eq!(recent.choice, DecisionChoice::A);
    assert_eq!(recent.confidence, Decision::DEFAULT_CONFIDENCE);
}

#[test]
fn tool_used_events_do_not_touch_milestones() {
    let repo = InMemoryRepository::new();
    let mut store = memory_store(&repo, PhasePolicy::default());

    store.record_event(
        &JourneyEvent::tool_used(ToolId::RUNWAY_CALCULATOR, Some("calculate"))
            .with_milestone("first-tool-use"),
    );

    assert_eq!(store.journey_state().milestone("first-tool-use").unwrap().progress, 0.0);
    assert_eq!(repo.save_count(), 0);
}

#[test]
fn lowering_progress_follows_policy() {
    for (policy, expected) in [
        (PhasePolicy::ScoreIsTruth, Phase::Discovery),
        (PhasePolicy::Monotonic, Phase::Planning),
    ] {
        let repo = InMemoryRepository::new();
        let mut store = memory_store(&repo, policy);
        for id in PLANNING_SET {
            store.update_milestone(id, 100.0, None);
        }
        store.update_milestone("financial-clarity", 0.0, None);
        store.update_milestone("values-identified", 0.0, None);

        let state = store.journey_state();
        assert_eq!(state.overall_score(), 17);
        assert_eq!(state.current_phase(), expected, "{policy:?}");
        // completion time survives a lowered value
        assert!(state.milestone("financial-clarity").unwrap().completed_at.is_some());
    }
}

#[test]
fn metadata_lands_in_owning_tool_insights() {
    let repo = InMemoryRepository::new();
    let mut store = memory_store(&repo, PhasePolicy::default());

    let mut metadata = Map::new();
    metadata.insert("realWage".to_owned(), json!(17.25));
    store.update_milestone("real-wage-calculated", 100.0, Some(&metadata));

    let insight = store.journey_state().tool_insight(ToolId::REAL_HOURLY_WAGE).unwrap();
    assert_eq!(insight.get("realWage"), Some(&json!(17.25)));
    assert!(insight.last_updated().is_some());
}
