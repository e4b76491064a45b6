use std::borrow::Borrow;
use std::fmt;

/// Identifier of a catalog milestone (`first-tool-use`, `financial-clarity`, ...).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct MilestoneId(String);

impl MilestoneId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MilestoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MilestoneId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl PartialEq<str> for MilestoneId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for MilestoneId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Namespace of a tool insight bag.
///
/// The well-known tools have constants below; any other string is accepted so
/// new tools can record insights without a schema change.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ToolId(String);

impl ToolId {
    pub const RUNWAY_CALCULATOR: &'static str = "runway-calculator";
    pub const REAL_HOURLY_WAGE: &'static str = "real-hourly-wage";
    pub const COGNITIVE_DEBT_ASSESSMENT: &'static str = "cognitive-debt-assessment";
    pub const VALUES_VOCATION_MATCHER: &'static str = "values-vocation-matcher";
    pub const INSIGHT_ENGINE: &'static str = "insight-engine";
    pub const AI_COPILOT: &'static str = "ai-copilot";
    pub const SMALL_BETS_PORTFOLIO: &'static str = "small-bets-portfolio";

    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ToolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ToolId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl Borrow<str> for ToolId {
    fn borrow(&self) -> &str {
        &self.0
    }
}
