//! Milestone catalog.
//!
//! Milestones are a fixed, predefined set. Users never create or delete them;
//! they only move a milestone's progress between 0 and 100.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::{MilestoneId, ToolId};

/// Sum of every catalog weight. The overall score is normalised against it.
pub const TOTAL_CATALOG_WEIGHT: u32 = 106;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MilestoneCategory {
    Financial,
    Career,
    Wellbeing,
    Action,
    #[default]
    Insight,
}

impl MilestoneCategory {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Financial => "financial",
            Self::Career => "career",
            Self::Wellbeing => "wellbeing",
            Self::Action => "action",
            Self::Insight => "insight",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriterionKind {
    DataEntered,
    AssessmentCompleted,
    DecisionMade,
    GoalAchieved,
    ThresholdReached,
}

/// What a calling tool should observe before it reports a milestone as done.
///
/// Informational only: the store never evaluates criteria, callers decide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionCriterion {
    #[serde(rename = "type")]
    pub kind: CriterionKind,
    #[serde(default)]
    pub details: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: MilestoneId,
    pub title: String,
    pub description: String,
    pub tool: ToolId,
    pub category: MilestoneCategory,
    pub weight: u32,
    pub completion_criteria: CompletionCriterion,
    #[serde(
        default,
        with = "crate::timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub completed_at: Option<DateTime<Utc>>,
    pub progress: f64,
}

impl Milestone {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.progress >= 100.0
    }
}

/// Clamp a caller-supplied progress value into `[0, 100]`.
///
/// NaN carries no information and is treated as no progress.
#[must_use]
pub fn clamp_progress(progress: f64) -> f64 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 100.0)
    }
}

/// `round(100 * Σ(weight * progress / 100) / Σ(weight))`, or 0 for an empty catalog.
#[must_use]
pub fn weighted_score(milestones: &[Milestone]) -> u8 {
    let total_weight: u32 = milestones.iter().map(|m| m.weight).sum();
    if total_weight == 0 {
        return 0;
    }
    let earned: f64 = milestones
        .iter()
        .map(|m| f64::from(m.weight) * clamp_progress(m.progress) / 100.0)
        .sum();
    (100.0 * earned / f64::from(total_weight))
        .round()
        .clamp(0.0, 100.0) as u8
}

#[allow(clippy::too_many_arguments)]
fn entry(
    id: &str,
    title: &str,
    description: &str,
    tool: &str,
    category: MilestoneCategory,
    weight: u32,
    kind: CriterionKind,
    details: Value,
) -> Milestone {
    Milestone {
        id: MilestoneId::new(id),
        title: title.to_owned(),
        description: description.to_owned(),
        tool: ToolId::new(tool),
        category,
        weight,
        completion_criteria: CompletionCriterion { kind, details },
        completed_at: None,
        progress: 0.0,
    }
}

/// The fifteen shipped milestones, all at 0 %.
#[must_use]
pub fn milestone_catalog() -> Vec<Milestone> {
    use CriterionKind::{
        AssessmentCompleted, DataEntered, DecisionMade, GoalAchieved, ThresholdReached,
    };
    use MilestoneCategory::{Action, Career, Financial, Insight, Wellbeing};

    vec![
        // Discovery
        entry(
            "first-tool-use",
            "First Step Taken",
            "Used your first liberation tool",
            ToolId::RUNWAY_CALCULATOR,
            Financial,
            3,
            DataEntered,
            json!({ "anyTool": true }),
        ),
        entry(
            "basic-data-entry",
            "Basic Info Provided",
            "Entered basic financial information",
            ToolId::RUNWAY_CALCULATOR,
            Financial,
            4,
            DataEntered,
            json!({ "expenses": true, "savings": true }),
        ),
        entry(
            "real-wage-calculated",
            "Real Wage Calculated",
            "Discovered your true hourly compensation",
            ToolId::REAL_HOURLY_WAGE,
            Financial,
            5,
            AssessmentCompleted,
            json!({ "calculatedWage": true }),
        ),
        entry(
            "cognitive-debt-assessed",
            "Cognitive Debt Assessed",
            "Evaluated your mental and emotional costs",
            ToolId::COGNITIVE_DEBT_ASSESSMENT,
            Wellbeing,
            6,
            AssessmentCompleted,
            json!({ "assessmentComplete": true }),
        ),
        // Planning
        entry(
            "financial-clarity",
            "Financial Clarity Achieved",
            "Clear picture of your financial situation",
            ToolId::RUNWAY_CALCULATOR,
            Financial,
            7,
            ThresholdReached,
            json!({ "runwayMonths": 3 }),
        ),
        entry(
            "values-identified",
            "Values Identified",
            "Completed values assessment and found matches",
            ToolId::VALUES_VOCATION_MATCHER,
            Career,
            8,
            AssessmentCompleted,
            json!({ "topMatches": 3 }),
        ),
        entry(
            "first-insight-generated",
            "Strategic Insight Generated",
            "Created your first strategic analysis",
            ToolId::INSIGHT_ENGINE,
            Insight,
            6,
            AssessmentCompleted,
            json!({ "blueprintGenerated": true }),
        ),
        // Building
        entry(
            "first-decision-made",
            "First Strategic Decision",
            "Made your first recorded strategic decision",
            ToolId::INSIGHT_ENGINE,
            Insight,
            8,
            DecisionMade,
            json!({ "decisionRecorded": true }),
        ),
        entry(
            "action-initiated",
            "Action Initiated",
            "Started your first small bet or action",
            ToolId::SMALL_BETS_PORTFOLIO,
            Action,
            9,
            DataEntered,
            json!({ "activeBets": 1 }),
        ),
        entry(
            "consistency-achieved",
            "Consistency Achieved",
            "Regular tool usage and progress tracking",
            ToolId::RUNWAY_CALCULATOR,
            Action,
            5,
            ThresholdReached,
            json!({ "weeklyUsage": 2 }),
        ),
        // Transitioning
        entry(
            "momentum-achieved",
            "Momentum Achieved",
            "Multiple successful actions and improving metrics",
            ToolId::SMALL_BETS_PORTFOLIO,
            Action,
            10,
            ThresholdReached,
            json!({ "activeBets": 3, "monthlyRevenue": 100 }),
        ),
        entry(
            "multiple-successes",
            "Multiple Successes",
            "Several bets showing positive results",
            ToolId::SMALL_BETS_PORTFOLIO,
            Action,
            8,
            ThresholdReached,
            json!({ "successfulBets": 2 }),
        ),
        entry(
            "advanced-insights",
            "Advanced Strategic Thinking",
            "Multiple complex decisions with high confidence",
            ToolId::INSIGHT_ENGINE,
            Insight,
            7,
            ThresholdReached,
            json!({ "decisionsCount": 3, "averageConfidence": 8 }),
        ),
        // Liberated
        entry(
            "sustainable-income",
            "Sustainable Income Achieved",
            "Portfolio generating significant recurring income",
            ToolId::SMALL_BETS_PORTFOLIO,
            Action,
            10,
            ThresholdReached,
            json!({ "monthlyIncome": 2000, "runway": 12 }),
        ),
        entry(
            "autonomy-achieved",
            "True Autonomy",
            "Full control over time and decisions",
            ToolId::SMALL_BETS_PORTFOLIO,
            Action,
            10,
            GoalAchieved,
            json!({ "autonomyScore": 9, "financialIndependence": true }),
        ),
    ]
}
