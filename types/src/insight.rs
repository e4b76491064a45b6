//! Per-tool insight bags.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use thiserror::Error;

/// Free-form fields merged into a tool's insight bag.
pub type InsightPatch = Map<String, Value>;

const DECISIONS_COUNT: &str = "decisionsCount";
const RECENT_DECISION: &str = "recentDecision";
const LAST_UPDATED: &str = "lastUpdated";

/// A tool's shallow key/value snapshot plus the time it last changed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolInsight {
    #[serde(flatten)]
    fields: Map<String, Value>,
    #[serde(
        default,
        with = "crate::timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    last_updated: Option<DateTime<Utc>>,
}

impl ToolInsight {
    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    #[must_use]
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    /// Shallow-merge `patch`: top-level keys overwrite, nested values are replaced whole.
    pub fn merge(&mut self, patch: &InsightPatch, now: DateTime<Utc>) {
        for (key, value) in patch {
            if key == LAST_UPDATED {
                continue;
            }
            self.fields.insert(key.clone(), value.clone());
        }
        self.last_updated = Some(now);
    }

    #[must_use]
    pub fn decisions_count(&self) -> u64 {
        self.fields
            .get(DECISIONS_COUNT)
            .and_then(Value::as_u64)
            .unwrap_or(0)
    }

    #[must_use]
    pub fn recent_decision(&self) -> Option<RecentDecision> {
        self.fields
            .get(RECENT_DECISION)
            .and_then(|value| RecentDecision::deserialize(value).ok())
    }

    /// Increment the decision counter and overwrite the most recent decision.
    ///
    /// `lastUpdated` is left alone: it tracks explicit insight updates.
    pub fn record_decision(&mut self, decision: &Decision, now: DateTime<Utc>) {
        let count = self.decisions_count() + 1;
        self.fields.insert(DECISIONS_COUNT.to_owned(), json!(count));
        self.fields.insert(
            RECENT_DECISION.to_owned(),
            json!({
                "choice": decision.choice.as_str(),
                "confidence": decision.confidence,
                "date": crate::timestamp::format(&now),
            }),
        );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DecisionChoice {
    #[default]
    A,
    B,
    #[serde(rename = "neither")]
    Neither,
    #[serde(rename = "custom")]
    Custom,
}

impl DecisionChoice {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::Neither => "neither",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for DecisionChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown decision choice: {0}")]
pub struct DecisionChoiceError(pub String);

impl FromStr for DecisionChoice {
    type Err = DecisionChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" => Ok(Self::A),
            "b" => Ok(Self::B),
            "neither" => Ok(Self::Neither),
            "custom" => Ok(Self::Custom),
            _ => Err(DecisionChoiceError(s.to_owned())),
        }
    }
}

/// Payload of a `decision_made` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    #[serde(default)]
    pub choice: DecisionChoice,
    #[serde(default = "Decision::default_confidence")]
    pub confidence: u8,
}

impl Decision {
    pub const DEFAULT_CONFIDENCE: u8 = 5;

    const fn default_confidence() -> u8 {
        Self::DEFAULT_CONFIDENCE
    }
}

impl Default for Decision {
    fn default() -> Self {
        Self {
            choice: DecisionChoice::default(),
            confidence: Self::DEFAULT_CONFIDENCE,
        }
    }
}

/// Decision snapshot stored under `recentDecision`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentDecision {
    pub choice: DecisionChoice,
    pub confidence: u8,
    #[serde(with = "crate::timestamp")]
    pub date: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use super::{Decision, DecisionChoice, InsightPatch, ToolInsight};

    fn patch(value: serde_json::Value) -> InsightPatch {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn merge_keeps_existing_keys() {
        let t1 = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let t2 = Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap();
        let mut insight = ToolInsight::default();
        insight.merge(&patch(json!({ "runwayMonths": 6 })), t1);
        insight.merge(&patch(json!({ "trend": "improving" })), t2);

        assert_eq!(insight.get("runwayMonths"), Some(&json!(6)));
        assert_eq!(insight.get("trend"), Some(&json!("improving")));
        assert_eq!(insight.last_updated(), Some(t2));
    }

    #[test]
    fn merge_is_shallow() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let mut insight = ToolInsight::default();
        insight.merge(&patch(json!({ "nested": { "a": 1, "b": 2 } })), now);
        insight.merge(&patch(json!({ "nested": { "c": 3 } })), now);
        assert_eq!(insight.get("nested"), Some(&json!({ "c": 3 })));
    }

    #[test]
    fn merge_ignores_caller_supplied_last_updated() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let mut insight = ToolInsight::default();
        insight.merge(&patch(json!({ "lastUpdated": "1999-01-01T00:00:00.000Z" })), now);
        assert!(insight.get("lastUpdated").is_none());
        assert_eq!(insight.last_updated(), Some(now));
    }

    #[test]
    fn record_decision_counts_and_overwrites() {
        let t1 = Utc.with_ymd_and_hms(2026, 5, 1, 9, 0, 0).unwrap();
        let t2 = Utc.with_ymd_and_hms(2026, 5, 2, 9, 0, 0).unwrap();
        let mut insight = ToolInsight::default();

        insight.record_decision(
            &Decision {
                choice: DecisionChoice::A,
                confidence: 8,
            },
            t1,
        );
        assert_eq!(insight.decisions_count(), 1);

        insight.record_decision(
            &Decision {
                choice: DecisionChoice::Neither,
                confidence: 3,
            },
            t2,
        );
        assert_eq!(insight.decisions_count(), 2);
        let recent = insight.recent_decision().unwrap();
        assert_eq!(recent.choice, DecisionChoice::Neither);
        assert_eq!(recent.confidence, 3);
        assert_eq!(recent.date, t2);
    }

    #[test]
    fn serializes_flat_with_last_updated() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let mut insight = ToolInsight::default();
        insight.merge(&patch(json!({ "realWage": 18.5 })), now);
        let value = serde_json::to_value(&insight).unwrap();
        assert_eq!(
            value,
            json!({ "realWage": 18.5, "lastUpdated": "2026-01-01T00:00:00.000Z" })
        );
        let back: ToolInsight = serde_json::from_value(value).unwrap();
        assert_eq!(back, insight);
    }

    #[test]
    fn decision_choice_parses_case_insensitively() {
        assert_eq!("a".parse::<DecisionChoice>().unwrap(), DecisionChoice::A);
        assert_eq!("Neither".parse::<DecisionChoice>().unwrap(), DecisionChoice::Neither);
        assert!("maybe".parse::<DecisionChoice>().is_err());
    }

    #[test]
    fn decision_defaults_fill_missing_fields() {
        let decision: Decision = serde_json::from_value(json!({})).unwrap();
        assert_eq!(decision, Decision::default());
        assert_eq!(decision.confidence, 5);
    }
}
