//! The journey store: one owner of [`JourneyState`], snapshotted after every mutation.
//!
//! None of the public operations fail. Storage problems are logged at `warn`
//! and the in-memory state stays authoritative until the next successful save.
//! Two stores sharing one repository are last-writer-wins.

use greenfield_types::{
    InsightPatch, JourneyEvent, JourneyState, MilestoneUpdate, PhasePolicy, ToolId,
};

use crate::{Clock, JourneyRepository, SystemClock};

#[derive(Debug, Clone, Copy, Default)]
pub struct StoreOptions {
    pub phase_policy: PhasePolicy,
}

pub struct JourneyStore<R, C = SystemClock> {
    repo: R,
    clock: C,
    policy: PhasePolicy,
    state: JourneyState,
}

impl<R: JourneyRepository> JourneyStore<R, SystemClock> {
    /// Load the stored journey, or start a fresh one when nothing usable is stored.
    pub fn initialize(repo: R, options: StoreOptions) -> Self {
        Self::with_clock(repo, SystemClock, options)
    }
}

impl<R: JourneyRepository, C: Clock> JourneyStore<R, C> {
    pub fn with_clock(repo: R, clock: C, options: StoreOptions) -> Self {
        let policy = options.phase_policy;
        let now = clock.now();
        let state = load_state(&repo, policy, now).unwrap_or_else(|| JourneyState::new(now));
        tracing::debug!(
            phase = %state.current_phase(),
            score = state.overall_score(),
            "Journey initialized"
        );
        Self {
            repo,
            clock,
            policy,
            state,
        }
    }

    #[must_use]
    pub fn journey_state(&self) -> &JourneyState {
        &self.state
    }

    #[must_use]
    pub fn phase_policy(&self) -> PhasePolicy {
        self.policy
    }

    #[must_use]
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Move a milestone to `progress` (clamped to 0..=100) and persist.
    ///
    /// Unknown ids are ignored and return `None`.
    pub fn update_milestone(
        &mut self,
        id: &str,
        progress: f64,
        metadata: Option<&InsightPatch>,
    ) -> Option<MilestoneUpdate> {
        let now = self.clock.now();
        let Some(update) =
            self.state
                .apply_milestone_progress(id, progress, metadata, now, self.policy)
        else {
            tracing::debug!(milestone = id, "Ignoring update for unknown milestone");
            return None;
        };

        if update.newly_completed {
            tracing::info!(milestone = id, "Milestone completed");
        }
        if let Some(change) = update.phase_change {
            tracing::info!(
                from = %change.from,
                to = %change.to,
                score = self.state.overall_score(),
                "Journey phase changed"
            );
        }
        self.persist();
        Some(update)
    }

    /// Log an event. Decisions are also counted in the tool's insights.
    ///
    /// Events never move milestones; callers decide what an event implies.
    pub fn record_event(&mut self, event: &JourneyEvent) {
        tracing::info!(
            kind = event.payload.kind(),
            tool = %event.tool_id,
            milestone = event.milestone_id.as_ref().map(|id| id.as_str()),
            extra = event.extra.len(),
            "Journey event"
        );

        if let Some(decision) = event.decision() {
            let now = self.clock.now();
            self.state.apply_decision(&event.tool_id, decision, now);
            self.persist();
        }
    }

    /// Shallow-merge `patch` into the insight bag of `tool` and persist.
    pub fn update_tool_insights(&mut self, tool: impl Into<ToolId>, patch: &InsightPatch) {
        let tool = tool.into();
        let now = self.clock.now();
        self.state.merge_tool_insights(&tool, patch, now);
        tracing::debug!(tool = %tool, keys = patch.len(), "Tool insights updated");
        self.persist();
    }

    /// Back to a fresh journey; the stored snapshot is deleted, not overwritten.
    pub fn reset_journey(&mut self) {
        self.state = JourneyState::new(self.clock.now());
        if let Err(e) = self.repo.remove() {
            tracing::warn!("Failed to remove journey snapshot: {e}");
        }
        tracing::info!("Journey reset");
    }

    /// Re-read the repository, picking up another writer's snapshot.
    ///
    /// Returns `false`, keeping the current state, when nothing usable is stored.
    pub fn reload(&mut self) -> bool {
        match load_state(&self.repo, self.policy, self.clock.now()) {
            Some(state) => {
                self.state = state;
                true
            }
            None => false,
        }
    }

    fn persist(&self) {
        match self.state.to_snapshot() {
            Ok(json) => {
                if let Err(e) = self.repo.save(&json) {
                    tracing::warn!("Failed to save journey snapshot: {e}");
                }
            }
            Err(e) => {
                tracing::warn!("Failed to serialize journey state: {e}");
            }
        }
    }
}

fn load_state<R: JourneyRepository>(
    repo: &R,
    policy: PhasePolicy,
    now: chrono::DateTime<chrono::Utc>,
) -> Option<JourneyState> {
    match repo.load() {
        Ok(Some(raw)) => match JourneyState::from_snapshot(&raw, policy, now) {
            Ok(state) => Some(state),
            Err(e) => {
                tracing::warn!("Failed to parse journey snapshot: {e}");
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            tracing::warn!("Failed to read journey snapshot: {e}");
            None
        }
    }
}
