//! Journey events reported by tools.
//!
//! The well-known kinds get typed payloads; everything else a tool attaches
//! rides along in [`JourneyEvent::extra`] untouched.

use serde_json::{Map, Value};

use crate::{Decision, DecisionChoice, MilestoneId, ToolId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventPayload {
    ToolUsed { action: Option<String> },
    DecisionMade(Decision),
    MilestoneCompleted,
    PhaseAdvanced,
    AchievementUnlocked,
    /// Any kind this build does not know about.
    Other(String),
}

impl EventPayload {
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Self::ToolUsed { .. } => "tool_used",
            Self::DecisionMade(_) => "decision_made",
            Self::MilestoneCompleted => "milestone_completed",
            Self::PhaseAdvanced => "phase_advanced",
            Self::AchievementUnlocked => "achievement_unlocked",
            Self::Other(kind) => kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct JourneyEvent {
    pub tool_id: ToolId,
    pub milestone_id: Option<MilestoneId>,
    pub payload: EventPayload,
    /// Metadata fields not consumed by the typed payload.
    pub extra: Map<String, Value>,
}

impl JourneyEvent {
    #[must_use]
    pub fn tool_used(tool_id: impl Into<ToolId>, action: Option<&str>) -> Self {
        Self {
            tool_id: tool_id.into(),
            milestone_id: None,
            payload: EventPayload::ToolUsed {
                action: action.map(str::to_owned),
            },
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn decision_made(tool_id: impl Into<ToolId>, decision: Decision) -> Self {
        Self {
            tool_id: tool_id.into(),
            milestone_id: None,
            payload: EventPayload::DecisionMade(decision),
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn with_milestone(mut self, milestone_id: impl Into<MilestoneId>) -> Self {
        self.milestone_id = Some(milestone_id.into());
        self
    }

    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Build an event from its loose form: a kind string, the tool and a metadata bag.
    ///
    /// Typed fields are lifted out of `metadata`; malformed ones fall back to
    /// their defaults, and so does a zero confidence. Whatever is left stays in `extra`.
    #[must_use]
    pub fn from_wire(
        kind: &str,
        tool_id: impl Into<ToolId>,
        mut metadata: Map<String, Value>,
    ) -> Self {
        let payload = match kind {
            "tool_used" => EventPayload::ToolUsed {
                action: metadata
                    .remove("action")
                    .and_then(|v| v.as_str().map(str::to_owned)),
            },
            "decision_made" => {
                let choice = metadata
                    .remove("choice")
                    .and_then(|v| v.as_str().and_then(|s| s.parse::<DecisionChoice>().ok()))
                    .unwrap_or_default();
                let confidence = metadata
                    .remove("confidence")
                    .and_then(|v| v.as_u64())
                    .and_then(|n| u8::try_from(n).ok())
                    .filter(|&n| n > 0)
                    .unwrap_or(Decision::DEFAULT_CONFIDENCE);
                EventPayload::DecisionMade(Decision { choice, confidence })
            }
            "milestone_completed" => EventPayload::MilestoneCompleted,
            "phase_advanced" => EventPayload::PhaseAdvanced,
            "achievement_unlocked" => EventPayload::AchievementUnlocked,
            other => EventPayload::Other(other.to_owned()),
        };
        let milestone_id = metadata
            .remove("milestoneId")
            .and_then(|v| v.as_str().map(MilestoneId::new));
        Self {
            tool_id: tool_id.into(),
            milestone_id,
            payload,
            extra: metadata,
        }
    }

    #[must_use]
    pub fn decision(&self) -> Option<&Decision> {
        match &self.payload {
            EventPayload::DecisionMade(decision) => Some(decision),
            _ => None,
        }
    }
}
