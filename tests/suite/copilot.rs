//! Plans built from what the journey has recorded.

use greenfield_copilot::{
    Copilot, CopilotError, LiberationContext, ReadinessLevel, RecommendationCategory,
    RiskRating, RiskTolerance, TemplateEngine,
};
use greenfield_core::InMemoryRepository;
use greenfield_types::{PhasePolicy, ToolId};
use serde_json::{Map, json};

use crate::common::memory_store;

fn insights(pairs: &[(&str, serde_json::Value)]) -> Map<String, serde_json::Value> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), v.clone()))
        .collect()
}

#[test]
fn plan_uses_journey_insights() {
    let repo = InMemoryRepository::new();
    let mut store = memory_store(&repo, PhasePolicy::default());
    store.update_tool_insights(
        ToolId::RUNWAY_CALCULATOR,
        &insights(&[("runwayMonths", json!(3.5))]),
    );
    store.update_tool_insights(ToolId::REAL_HOURLY_WAGE, &insights(&[("realWage", json!(24.1))]));
    store.update_tool_insights(
        ToolId::COGNITIVE_DEBT_ASSESSMENT,
        &insights(&[("debtPercentage", json!(82.0))]),
    );

    let ctx = LiberationContext::from_journey(
        store.journey_state(),
        vec!["Writing".to_owned()],
        "publishing",
        RiskTolerance::Low,
    );
    assert_eq!(ctx.runway_months, 3.5);
    assert_eq!(ctx.real_hourly_wage, 24.1);

    let mut copilot = Copilot::new(TemplateEngine::new());
    copilot.initialize().unwrap();

    let plan = copilot.generate_plan(&ctx).unwrap();
    assert_eq!(plan.timeline, "3-month Rapid Transition");
    assert_eq!(plan.phases.len(), 2);
    assert_eq!(plan.phases[0].duration, "45 days");
    assert!(plan.assessment.contains("Cognitive debt at 82%"));
    assert!(plan.assessment.contains("URGENT: Extreme burnout detected"));
    assert!(plan.resources.iter().any(|r| r.contains("Substack")));

    let insights = copilot.analyze_context(&ctx).unwrap();
    assert_eq!(insights.risk_assessment.level, RiskRating::Critical);
    assert_eq!(insights.classification.category, "needs preparation time");
    assert_eq!(insights.opportunities.primary, "Content creation and newsletter monetization");

    let readiness = copilot.assess_readiness(&ctx).unwrap();
    assert_eq!(readiness.level, ReadinessLevel::Building);
}

#[test]
fn empty_journey_plans_foundation_building() {
    let repo = InMemoryRepository::new();
    let store = memory_store(&repo, PhasePolicy::default());
    let ctx = LiberationContext::from_journey(
        store.journey_state(),
        Vec::new(),
        "",
        RiskTolerance::Medium,
    );

    let mut copilot = Copilot::new(TemplateEngine::new());
    copilot.initialize().unwrap();
    let plan = copilot.generate_plan(&ctx).unwrap();

    assert_eq!(plan.timeline, "90-day Foundation Building");
    assert_eq!(plan.phases.len(), 1);
    assert_eq!(
        copilot
            .recommendations(&ctx, RecommendationCategory::Financial)
            .unwrap()[1],
        "Build 6-month emergency fund"
    );
}

#[test]
fn separate_copilots_do_not_share_lifecycle() {
    let mut first = Copilot::new(TemplateEngine::new());
    let second = Copilot::new(TemplateEngine::new());
    first.initialize().unwrap();

    assert!(first.is_initialized());
    assert!(matches!(
        second.generate_plan(&LiberationContext::default()),
        Err(CopilotError::NotInitialized)
    ));
}
