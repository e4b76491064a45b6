//! Liberation co-pilot: turns calculator results into a phased plan.
//!
//! Engines implement [`PlanEngine`]. [`Copilot`] is the service callers hold;
//! it is constructed explicitly, owns one engine, and refuses to answer until
//! [`Copilot::initialize`] has succeeded.
//!
//! ```
//! use greenfield_copilot::{Copilot, LiberationContext, RiskTolerance, TemplateEngine};
//!
//! let mut copilot = Copilot::new(TemplateEngine::new());
//! copilot.initialize().unwrap();
//! let ctx = LiberationContext {
//!     runway_months: 4.0,
//!     risk_tolerance: RiskTolerance::Medium,
//!     ..LiberationContext::default()
//! };
//! let plan = copilot.generate_plan(&ctx).unwrap();
//! assert_eq!(plan.timeline, "3-month Rapid Transition");
//! ```

mod context;
mod plan;
mod template;

pub use context::{LiberationContext, RiskTolerance, RiskToleranceError};
pub use plan::{
    Classification, ContextInsights, EngineMetadata, EngineMode, EngineStatus, LiberationPlan,
    Opportunities, PlanPhase, ReadinessAssessment, ReadinessFactor, ReadinessLevel,
    RecommendationCategory, RecommendationCategoryError, RiskAssessment, RiskRating, Sentiment,
};
pub use template::TemplateEngine;

#[derive(Debug, thiserror::Error)]
pub enum CopilotError {
    #[error("co-pilot engine is not initialized")]
    NotInitialized,
}

/// A source of liberation plans.
///
/// Everything except `initialize` is infallible: an engine that cannot
/// produce an answer should fail at initialization instead.
pub trait PlanEngine {
    fn initialize(&mut self) -> Result<(), CopilotError>;
    fn generate_plan(&self, ctx: &LiberationContext) -> LiberationPlan;
    fn analyze_context(&self, ctx: &LiberationContext) -> ContextInsights;
    fn assess_readiness(&self, ctx: &LiberationContext) -> ReadinessAssessment;
    fn recommendations(
        &self,
        ctx: &LiberationContext,
        category: RecommendationCategory,
    ) -> Vec<String>;
    fn status(&self) -> EngineStatus;
    fn metadata(&self) -> EngineMetadata;
}

pub struct Copilot<E> {
    engine: E,
}

impl<E: PlanEngine> Copilot<E> {
    #[must_use]
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    pub fn initialize(&mut self) -> Result<(), CopilotError> {
        self.engine.initialize()?;
        let meta = self.engine.metadata();
        tracing::info!(engine = meta.name, version = meta.version, "Co-pilot initialized");
        Ok(())
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.engine.status().initialized
    }

    pub fn generate_plan(&self, ctx: &LiberationContext) -> Result<LiberationPlan, CopilotError> {
        self.ready()?;
        let plan = self.engine.generate_plan(ctx);
        tracing::debug!(timeline = %plan.timeline, phases = plan.phases.len(), "Plan generated");
        Ok(plan)
    }

    pub fn analyze_context(
        &self,
        ctx: &LiberationContext,
    ) -> Result<ContextInsights, CopilotError> {
        self.ready()?;
        Ok(self.engine.analyze_context(ctx))
    }

    pub fn assess_readiness(
        &self,
        ctx: &LiberationContext,
    ) -> Result<ReadinessAssessment, CopilotError> {
        self.ready()?;
        Ok(self.engine.assess_readiness(ctx))
    }

    pub fn recommendations(
        &self,
        ctx: &LiberationContext,
        category: RecommendationCategory,
    ) -> Result<Vec<String>, CopilotError> {
        self.ready()?;
        Ok(self.engine.recommendations(ctx, category))
    }

    /// Available before initialization.
    #[must_use]
    pub fn status(&self) -> EngineStatus {
        self.engine.status()
    }

    #[must_use]
    pub fn metadata(&self) -> EngineMetadata {
        self.engine.metadata()
    }

    fn ready(&self) -> Result<(), CopilotError> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(CopilotError::NotInitialized)
        }
    }
}
