//! Liberation phases and their score bands.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Milestone;

/// The five ordered stages of the journey. Ordering follows progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Discovery,
    Planning,
    Building,
    Transitioning,
    Liberated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseDefinition {
    pub phase: Phase,
    pub title: &'static str,
    pub description: &'static str,
    /// `[min, max)` on the overall score; the last band also includes its max.
    pub score_range: (u8, u8),
    pub required_milestones: &'static [&'static str],
    pub recommended_actions: &'static [&'static str],
}

const DISCOVERY: PhaseDefinition = PhaseDefinition {
    phase: Phase::Discovery,
    title: "Discovery Phase",
    description: "Learning about your current situation and exploring possibilities",
    score_range: (0, 25),
    required_milestones: &[
        "first-tool-use",
        "basic-data-entry",
        "real-wage-calculated",
        "cognitive-debt-assessed",
        "values-identified",
    ],
    recommended_actions: &[
        "Calculate your runway",
        "Assess your real hourly wage",
        "Complete cognitive debt assessment",
        "Complete values-vocation assessment",
    ],
};

const PLANNING: PhaseDefinition = PhaseDefinition {
    phase: Phase::Planning,
    title: "Planning Phase",
    description: "Creating strategy and understanding your path forward",
    score_range: (25, 50),
    required_milestones: &["financial-clarity", "first-insight-generated"],
    recommended_actions: &[
        "Set financial targets",
        "Create first strategic insight",
        "Plan your transition strategy",
    ],
};

const BUILDING: PhaseDefinition = PhaseDefinition {
    phase: Phase::Building,
    title: "Building Phase",
    description: "Taking action and building your liberation foundation",
    score_range: (50, 75),
    required_milestones: &[
        "first-decision-made",
        "action-initiated",
        "consistency-achieved",
    ],
    recommended_actions: &[
        "Start your first small bet",
        "Implement strategic decisions",
        "Track progress consistently",
    ],
};

const TRANSITIONING: PhaseDefinition = PhaseDefinition {
    phase: Phase::Transitioning,
    title: "Transitioning Phase",
    description: "Actively moving toward your liberation goals",
    score_range: (75, 90),
    required_milestones: &[
        "momentum-achieved",
        "multiple-successes",
        "advanced-insights",
    ],
    recommended_actions: &[
        "Scale successful bets",
        "Reduce dependencies",
        "Build sustainable income streams",
    ],
};

const LIBERATED: PhaseDefinition = PhaseDefinition {
    phase: Phase::Liberated,
    title: "Liberated",
    description: "Achieved sustainable freedom and autonomy",
    score_range: (90, 100),
    required_milestones: &["sustainable-income", "autonomy-achieved"],
    recommended_actions: &[
        "Optimize your portfolio",
        "Help others on their journey",
        "Pursue meaningful projects",
    ],
};

impl Phase {
    pub const ALL: [Phase; 5] = [
        Phase::Discovery,
        Phase::Planning,
        Phase::Building,
        Phase::Transitioning,
        Phase::Liberated,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Discovery => "discovery",
            Self::Planning => "planning",
            Self::Building => "building",
            Self::Transitioning => "transitioning",
            Self::Liberated => "liberated",
        }
    }

    #[must_use]
    pub const fn definition(self) -> &'static PhaseDefinition {
        match self {
            Self::Discovery => &DISCOVERY,
            Self::Planning => &PLANNING,
            Self::Building => &BUILDING,
            Self::Transitioning => &TRANSITIONING,
            Self::Liberated => &LIBERATED,
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        self.definition().title
    }

    /// Phase owning `score`. Scores above 100 land in the terminal phase.
    #[must_use]
    pub fn for_score(score: u8) -> Phase {
        Self::ALL
            .into_iter()
            .find(|phase| {
                let (min, max) = phase.definition().score_range;
                score >= min && score < max
            })
            .unwrap_or(Phase::Liberated)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the stored phase follows the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhasePolicy {
    /// The phase is recomputed from the score on every update and may move back.
    #[default]
    #[serde(rename = "score")]
    ScoreIsTruth,
    /// The phase never drops below the highest phase already reached.
    Monotonic,
}

impl PhasePolicy {
    #[must_use]
    pub fn resolve(self, current: Phase, computed: Phase) -> Phase {
        match self {
            Self::ScoreIsTruth => computed,
            Self::Monotonic => current.max(computed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseProgress {
    /// Percentage of the phase's required milestones at 100 %.
    pub score: u8,
    pub completed_milestones: u32,
    pub total_milestones: u32,
}

#[must_use]
pub fn phase_completion(phase: Phase, milestones: &[Milestone]) -> PhaseProgress {
    let required = phase.definition().required_milestones;
    let completed = required
        .iter()
        .filter(|id| {
            milestones
                .iter()
                .any(|m| m.id == **id && m.is_complete())
        })
        .count() as u32;
    let total = required.len() as u32;
    let score = if total == 0 {
        0
    } else {
        (f64::from(completed) * 100.0 / f64::from(total)).round() as u8
    };
    PhaseProgress {
        score,
        completed_milestones: completed,
        total_milestones: total,
    }
}

#[must_use]
pub fn phase_progress(milestones: &[Milestone]) -> BTreeMap<Phase, PhaseProgress> {
    Phase::ALL
        .into_iter()
        .map(|phase| (phase, phase_completion(phase, milestones)))
        .collect()
}
