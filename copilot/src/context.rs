//! What a plan is generated from.

use std::fmt;
use std::str::FromStr;

use greenfield_types::{JourneyState, ToolId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTolerance {
    Low,
    #[default]
    Medium,
    High,
}

impl RiskTolerance {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for RiskTolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown risk tolerance {0:?} (expected low, medium or high)")]
pub struct RiskToleranceError(pub String);

impl FromStr for RiskTolerance {
    type Err = RiskToleranceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(RiskToleranceError(s.to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiberationContext {
    pub runway_months: f64,
    pub real_hourly_wage: f64,
    pub cognitive_debt_percentage: f64,
    pub skills: Vec<String>,
    pub industry: String,
    pub risk_tolerance: RiskTolerance,
    #[serde(default)]
    pub goals: Vec<String>,
}

impl LiberationContext {
    /// Pull the calculator results out of the journey's tool insights.
    ///
    /// Figures a tool never recorded stay at 0.
    #[must_use]
    pub fn from_journey(
        state: &JourneyState,
        skills: Vec<String>,
        industry: impl Into<String>,
        risk_tolerance: RiskTolerance,
    ) -> Self {
        let number = |tool: &str, key: &str| {
            state
                .tool_insight(tool)
                .and_then(|insight| insight.get(key))
                .and_then(serde_json::Value::as_f64)
                .unwrap_or(0.0)
        };
        Self {
            runway_months: number(ToolId::RUNWAY_CALCULATOR, "runwayMonths"),
            real_hourly_wage: number(ToolId::REAL_HOURLY_WAGE, "realWage"),
            cognitive_debt_percentage: number(ToolId::COGNITIVE_DEBT_ASSESSMENT, "debtPercentage"),
            skills,
            industry: industry.into(),
            risk_tolerance,
            goals: Vec::new(),
        }
    }

    pub(crate) fn skills_lower(&self) -> Vec<String> {
        self.skills.iter().map(|s| s.to_lowercase()).collect()
    }

    pub(crate) fn has_skill(&self, needle: &str) -> bool {
        self.skills_lower().iter().any(|s| s.contains(needle))
    }
}
