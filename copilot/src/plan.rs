use std::fmt;
use std::str::FromStr;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanPhase {
    pub name: String,
    pub duration: String,
    pub actions: Vec<String>,
    pub milestones: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LiberationPlan {
    pub assessment: String,
    pub timeline: String,
    pub phases: Vec<PlanPhase>,
    pub contingencies: Vec<String>,
    pub resources: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sentiment {
    pub label: String,
    pub confidence: f64,
    pub analysis: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub category: String,
    pub confidence: f64,
    pub alternatives: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskRating {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskAssessment {
    pub level: RiskRating,
    pub factors: Vec<String>,
    pub mitigation: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Opportunities {
    pub primary: String,
    pub secondary: Vec<String>,
    pub timeline: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextInsights {
    pub sentiment: Sentiment,
    pub classification: Classification,
    pub risk_assessment: RiskAssessment,
    pub opportunities: Opportunities,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadinessLevel {
    Building,
    Ready,
    Optimal,
}

impl ReadinessLevel {
    /// 80 and up is optimal, 60 and up ready.
    #[must_use]
    pub fn for_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::Optimal
        } else if score >= 60.0 {
            Self::Ready
        } else {
            Self::Building
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Building => "building",
            Self::Ready => "ready",
            Self::Optimal => "optimal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadinessFactor {
    pub name: &'static str,
    pub score: f64,
    pub impact: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadinessAssessment {
    /// Mean of the factor scores.
    pub score: f64,
    pub level: ReadinessLevel,
    pub factors: Vec<ReadinessFactor>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationCategory {
    Skills,
    Financial,
    Network,
    Wellbeing,
    Strategy,
}

impl RecommendationCategory {
    pub const ALL: [RecommendationCategory; 5] = [
        Self::Skills,
        Self::Financial,
        Self::Network,
        Self::Wellbeing,
        Self::Strategy,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Skills => "skills",
            Self::Financial => "financial",
            Self::Network => "network",
            Self::Wellbeing => "wellbeing",
            Self::Strategy => "strategy",
        }
    }
}

impl fmt::Display for RecommendationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown recommendation category {0:?}")]
pub struct RecommendationCategoryError(pub String);

impl FromStr for RecommendationCategory {
    type Err = RecommendationCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| RecommendationCategoryError(s.to_owned()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EngineMode {
    SmartTemplates,
    Loading,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineStatus {
    pub initialized: bool,
    pub models_loaded: Vec<&'static str>,
    pub mode: EngineMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineMetadata {
    pub name: &'static str,
    pub version: &'static str,
    /// Where inference runs: always `local` for shipped engines.
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub privacy: &'static str,
    pub dependencies: Vec<&'static str>,
}
