//! Core domain types for the Liberation Journey.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Scoring, phase resolution and snapshot reconciliation live here so every
//! layer agrees on them.

mod event;
mod ids;
mod insight;
mod journey;
mod milestone;
mod phase;
pub mod timestamp;

pub use event::{EventPayload, JourneyEvent};
pub use ids::{MilestoneId, ToolId};
pub use insight::{
    Decision, DecisionChoice, DecisionChoiceError, InsightPatch, RecentDecision, ToolInsight,
};
pub use journey::{
    Achievement, JourneyState, MilestoneUpdate, PhaseChange, SnapshotError, Streaks,
};
pub use milestone::{
    CompletionCriterion, CriterionKind, Milestone, MilestoneCategory, TOTAL_CATALOG_WEIGHT,
    clamp_progress, milestone_catalog, weighted_score,
};
pub use phase::{
    Phase, PhaseDefinition, PhasePolicy, PhaseProgress, phase_completion, phase_progress,
};

/// Storage key the journey snapshot is saved under.
pub const SNAPSHOT_KEY: &str = "liberation-journey-state";
