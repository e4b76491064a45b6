//! The journey aggregate: milestones, score, phase and everything derived from them.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    Decision, InsightPatch, Milestone, MilestoneCategory, MilestoneId, Phase, PhasePolicy,
    PhaseProgress, ToolId, ToolInsight, clamp_progress, milestone_catalog, phase_progress,
    weighted_score,
};

/// An append-only log entry for a completed milestone or a phase change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: MilestoneCategory,
    #[serde(alias = "unlockedAt", with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Achievement {
    #[must_use]
    pub fn for_milestone(milestone: &Milestone, now: DateTime<Utc>) -> Self {
        Self {
            id: format!("milestone-{}", milestone.id),
            title: format!("{} Completed", milestone.title),
            description: milestone.description.clone(),
            category: milestone.category,
            created_at: now,
        }
    }

    #[must_use]
    pub fn for_phase(phase: Phase, now: DateTime<Utc>) -> Self {
        let title = phase.title();
        Self {
            id: format!("phase-{phase}"),
            title: format!("Entered {title}"),
            description: format!("Advanced to the {title}"),
            category: MilestoneCategory::Insight,
            created_at: now,
        }
    }
}

/// Engagement counters. Nothing in the tracker increments them yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Streaks {
    pub daily_progress: u32,
    pub weekly_goals: u32,
    pub monthly_momentum: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseChange {
    pub from: Phase,
    pub to: Phase,
}

/// Outcome of [`JourneyState::apply_milestone_progress`] for a known milestone.
#[derive(Debug, Clone, PartialEq)]
pub struct MilestoneUpdate {
    pub milestone: MilestoneId,
    /// Stored progress after clamping.
    pub progress: f64,
    /// True only the first time the milestone reaches 100.
    pub newly_completed: bool,
    pub phase_change: Option<PhaseChange>,
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// The canonical progress record.
///
/// `overall_score` and `current_phase` are never set directly; every mutation
/// goes through a method that recomputes them from the milestones.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyState {
    current_phase: Phase,
    overall_score: u8,
    milestones: Vec<Milestone>,
    phase_progress: BTreeMap<Phase, PhaseProgress>,
    tool_insights: BTreeMap<ToolId, ToolInsight>,
    achievements: Vec<Achievement>,
    streaks: Streaks,
    #[serde(with = "crate::timestamp")]
    last_updated: DateTime<Utc>,
}

impl JourneyState {
    /// Fresh journey: full catalog at 0 %, discovery phase, nothing unlocked.
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        let milestones = milestone_catalog();
        let phase_progress = phase_progress(&milestones);
        Self {
            current_phase: Phase::Discovery,
            overall_score: 0,
            milestones,
            phase_progress,
            tool_insights: BTreeMap::new(),
            achievements: Vec::new(),
            streaks: Streaks::default(),
            last_updated: now,
        }
    }

    #[must_use]
    pub fn current_phase(&self) -> Phase {
        self.current_phase
    }

    #[must_use]
    pub fn overall_score(&self) -> u8 {
        self.overall_score
    }

    #[must_use]
    pub fn milestones(&self) -> &[Milestone] {
        &self.milestones
    }

    #[must_use]
    pub fn milestone(&self, id: &str) -> Option<&Milestone> {
        self.milestones.iter().find(|m| m.id == id)
    }

    #[must_use]
    pub fn phase_progress(&self) -> &BTreeMap<Phase, PhaseProgress> {
        &self.phase_progress
    }

    #[must_use]
    pub fn tool_insights(&self) -> &BTreeMap<ToolId, ToolInsight> {
        &self.tool_insights
    }

    #[must_use]
    pub fn tool_insight(&self, tool: &str) -> Option<&ToolInsight> {
        self.tool_insights.get(tool)
    }

    #[must_use]
    pub fn achievements(&self) -> &[Achievement] {
        &self.achievements
    }

    #[must_use]
    pub fn has_achievement(&self, id: &str) -> bool {
        self.achievements.iter().any(|a| a.id == id)
    }

    #[must_use]
    pub fn streaks(&self) -> Streaks {
        self.streaks
    }

    #[must_use]
    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    /// Required milestones of the current phase that are not finished yet.
    #[must_use]
    pub fn open_phase_milestones(&self) -> Vec<&Milestone> {
        self.current_phase
            .definition()
            .required_milestones
            .iter()
            .filter_map(|id| self.milestone(id))
            .filter(|m| !m.is_complete())
            .collect()
    }

    /// Set one milestone's progress and recompute everything derived from it.
    ///
    /// Returns `None`, leaving the state untouched, when `id` is not in the catalog.
    pub fn apply_milestone_progress(
        &mut self,
        id: &str,
        progress: f64,
        metadata: Option<&InsightPatch>,
        now: DateTime<Utc>,
        policy: PhasePolicy,
    ) -> Option<MilestoneUpdate> {
        let index = self.milestones.iter().position(|m| m.id == id)?;
        let progress = clamp_progress(progress);

        let milestone = &mut self.milestones[index];
        milestone.progress = progress;
        let newly_completed = progress >= 100.0 && milestone.completed_at.is_none();
        if newly_completed {
            milestone.completed_at = Some(now);
        }
        let milestone = milestone.clone();

        if newly_completed {
            self.push_achievement(Achievement::for_milestone(&milestone, now));
        }
        if let Some(patch) = metadata {
            self.tool_insights
                .entry(milestone.tool.clone())
                .or_default()
                .merge(patch, now);
        }

        let phase_change = self.recompute(policy);
        if let Some(change) = phase_change {
            self.push_achievement(Achievement::for_phase(change.to, now));
        }
        self.last_updated = now;

        Some(MilestoneUpdate {
            milestone: milestone.id,
            progress,
            newly_completed,
            phase_change,
        })
    }

    /// Count a decision against `tool` and remember it as the most recent one.
    pub fn apply_decision(&mut self, tool: &ToolId, decision: &Decision, now: DateTime<Utc>) {
        self.tool_insights
            .entry(tool.clone())
            .or_default()
            .record_decision(decision, now);
        self.last_updated = now;
    }

    pub fn merge_tool_insights(&mut self, tool: &ToolId, patch: &InsightPatch, now: DateTime<Utc>) {
        self.tool_insights
            .entry(tool.clone())
            .or_default()
            .merge(patch, now);
        self.last_updated = now;
    }

    /// Pretty-printed JSON of the whole state.
    pub fn to_snapshot(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse a stored snapshot and reconcile it with the current catalog.
    ///
    /// Stored progress is kept for every known milestone id; unknown ids are
    /// dropped and missing ones start at 0 %. Score, phase and phase progress
    /// are recomputed rather than trusted. `now` stands in for a missing
    /// `lastUpdated`.
    pub fn from_snapshot(
        raw: &str,
        policy: PhasePolicy,
        now: DateTime<Utc>,
    ) -> Result<Self, SnapshotError> {
        let wire: SnapshotWire = serde_json::from_str(raw)?;

        let mut milestones = milestone_catalog();
        for stored in wire.milestones {
            if let Some(milestone) = milestones.iter_mut().find(|m| m.id == stored.id) {
                milestone.progress = clamp_progress(stored.progress);
                milestone.completed_at = stored.completed_at;
            }
        }

        let mut state = Self {
            current_phase: wire.current_phase.unwrap_or_default(),
            overall_score: 0,
            phase_progress: BTreeMap::new(),
            milestones,
            tool_insights: wire.tool_insights,
            achievements: Vec::new(),
            streaks: wire.streaks,
            last_updated: wire.last_updated.unwrap_or(now),
        };
        for achievement in wire.achievements {
            state.push_achievement(achievement);
        }
        state.recompute(policy);
        Ok(state)
    }

    /// Refresh score, phase progress and phase. Reports a phase change, if any.
    fn recompute(&mut self, policy: PhasePolicy) -> Option<PhaseChange> {
        self.overall_score = weighted_score(&self.milestones);
        self.phase_progress = phase_progress(&self.milestones);

        let previous = self.current_phase;
        let next = policy.resolve(previous, Phase::for_score(self.overall_score));
        self.current_phase = next;
        (next != previous).then_some(PhaseChange {
            from: previous,
            to: next,
        })
    }

    fn push_achievement(&mut self, achievement: Achievement) {
        if !self.has_achievement(&achievement.id) {
            self.achievements.push(achievement);
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotWire {
    #[serde(default)]
    current_phase: Option<Phase>,
    milestones: Vec<MilestoneWire>,
    #[serde(default)]
    tool_insights: BTreeMap<ToolId, ToolInsight>,
    #[serde(default)]
    achievements: Vec<Achievement>,
    #[serde(default)]
    streaks: Streaks,
    #[serde(default, with = "crate::timestamp::option")]
    last_updated: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MilestoneWire {
    id: MilestoneId,
    #[serde(default)]
    progress: f64,
    #[serde(default, with = "crate::timestamp::option")]
    completed_at: Option<DateTime<Utc>>,
}
