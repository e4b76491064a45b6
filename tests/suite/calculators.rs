//! Calculators feeding the journey the way the command line wires them.

use greenfield_core::InMemoryRepository;
use greenfield_tools::{
    CoreValue, DebtCategory, DebtResponse, MatchPreferences, QUESTIONS, RealWageInputs,
    RiskLevel, RunwayInputs, RunwaySummary, SmallBet, VALUE_QUESTIONS, ValueAssessmentInputs,
    ValueResponse, WorkCosts, WorkHours, add_expense, assess_cognitive_debt,
    calculate_real_hourly_wage, calculate_runway, calculate_value_profile, default_expenses,
    match_vocations, portfolio_insights, portfolio_progress, update_expense_amount,
};
use greenfield_types::{PhasePolicy, ToolId};
use serde_json::{Map, json};

use crate::common::memory_store;

#[test]
fn default_expense_list_drives_runway() {
    let mut expenses = default_expenses();
    for (id, amount) in [("1", 1_800.0), ("2", 600.0), ("3", 200.0)] {
        assert!(update_expense_amount(&mut expenses, id, amount));
    }
    let hobby = add_expense(&mut expenses, "Hobbies", false).id.clone();
    update_expense_amount(&mut expenses, &hobby, 400.0);

    let calc = calculate_runway(&RunwayInputs {
        expenses,
        savings: 13_000.0,
    })
    .unwrap();

    assert_eq!(calc.total_monthly_expenses, 2_600.0);
    assert_eq!(calc.runway_months, 5.0);
    assert_eq!(calc.runway_display, "5 months");

    let summary = RunwaySummary::from_calculation(&calc).unwrap();
    assert_eq!(summary.savings_band, "10k-25k");
    assert_eq!(summary.expenses_band, "2k-3k");
    assert_eq!(summary.runway_months, 5.0);
}

#[test]
fn real_wage_result_recorded_as_insight() {
    let inputs = RealWageInputs {
        annual_salary: 75_000.0,
        work_hours: WorkHours {
            weekly_hours: 45.0,
            commute_daily_minutes: 50.0,
            work_days_per_week: 5.0,
        },
        work_costs: WorkCosts {
            commute_monthly_cost: 250.0,
            work_lunches_monthly_cost: 200.0,
            work_clothing_monthly_cost: 60.0,
            stress_spending_monthly_cost: 150.0,
        },
    };
    let calc = calculate_real_hourly_wage(&inputs).unwrap();
    assert!(calc.real_hourly_wage < calc.stated_hourly_wage);

    let repo = InMemoryRepository::new();
    let mut store = memory_store(&repo, PhasePolicy::default());
    let mut metadata = Map::new();
    metadata.insert("realWage".to_owned(), json!(calc.real_hourly_wage));
    metadata.insert("efficiency".to_owned(), json!(calc.efficiency().as_str()));
    store.update_milestone("real-wage-calculated", 100.0, Some(&metadata));

    let insight = store.journey_state().tool_insight(ToolId::REAL_HOURLY_WAGE).unwrap();
    assert_eq!(insight.get("realWage"), Some(&json!(calc.real_hourly_wage)));
    assert_eq!(insight.get("efficiency"), Some(&json!("medium")));
    assert_eq!(store.journey_state().overall_score(), 5);
}

#[test]
fn full_debt_assessment_covers_every_question() {
    let responses: Vec<DebtResponse> = QUESTIONS
        .iter()
        .enumerate()
        .map(|(i, q)| DebtResponse {
            question_id: q.id.to_owned(),
            score: (i % 5) as u8,
        })
        .collect();

    let result = assess_cognitive_debt(&responses).unwrap();

    assert_eq!(result.category_scores.len(), 6);
    let total: f64 = result.category_scores.values().map(|s| s.score).sum();
    assert!((total - result.total_score).abs() < 1e-9);
    assert!(result.percentage_score > 0.0 && result.percentage_score < 100.0);
    assert!(matches!(
        result.risk_level,
        RiskLevel::Moderate | RiskLevel::High
    ));
    assert!(!result.recommendations.is_empty());
    for concern in &result.primary_concerns {
        assert!(result.category_scores[concern].percentage > 60.0);
    }
    assert!(DebtCategory::ALL.iter().all(|c| result.category_scores.contains_key(c)));
}

#[test]
fn caring_profile_points_to_coaching_and_identifies_values() {
    let caring = [
        CoreValue::Impact,
        CoreValue::Service,
        CoreValue::Authenticity,
        CoreValue::Connection,
        CoreValue::Balance,
    ];
    let inputs = ValueAssessmentInputs {
        responses: VALUE_QUESTIONS
            .iter()
            .map(|q| ValueResponse {
                question_id: q.id.to_owned(),
                importance: if caring.contains(&q.value) { 5 } else { 2 },
            })
            .collect(),
        current_role: Some("Nurse".to_owned()),
        industry: Some("Healthcare".to_owned()),
    };
    let profile = calculate_value_profile(&inputs).unwrap();
    assert_eq!(profile.authenticity_score, 65);
    assert!(profile.conflicting_values.is_empty());

    let result = match_vocations(&profile, &MatchPreferences::default());
    assert_eq!(result.top_matches[0].vocation.id, "life_coach");
    assert_eq!(result.top_matches[1].vocation.id, "health_practitioner");
    assert!(
        result
            .insights
            .recommendations
            .contains(&"Consider social enterprise or mission-driven organizations".to_owned())
    );

    let repo = InMemoryRepository::new();
    let mut store = memory_store(&repo, PhasePolicy::default());
    let titles: Vec<&str> = result.top_matches.iter().map(|m| m.vocation.title).collect();
    let mut metadata = Map::new();
    metadata.insert("topMatches".to_owned(), json!(titles));
    let progress = titles.len() as f64 / 3.0 * 100.0;
    let update = store
        .update_milestone("values-identified", progress, Some(&metadata))
        .unwrap();

    assert!(update.newly_completed);
    assert_eq!(store.journey_state().overall_score(), 8);
    let insight = store
        .journey_state()
        .tool_insight(ToolId::VALUES_VOCATION_MATCHER)
        .unwrap();
    assert_eq!(
        insight.get("topMatches").and_then(|m| m.get(0)),
        Some(&json!("Life & Career Coach"))
    );
}

#[test]
fn side_income_portfolio_moves_small_bet_milestones() {
    let bets: Vec<SmallBet> = serde_json::from_value(json!([
        {"name": "Bookkeeping", "category": "service", "status": "successful",
         "initialInvestment": 200, "monthlyRevenue": 1500, "monthlyExpenses": 100,
         "totalRevenue": 9000, "totalProfit": 8000, "hoursPerWeek": 12,
         "alignedValues": ["autonomy", "security"], "satisfactionScore": 7},
        {"name": "Templates", "category": "product", "status": "successful",
         "initialInvestment": 300, "monthlyRevenue": 700, "monthlyExpenses": 0,
         "totalRevenue": 2100, "totalProfit": 1800, "hoursPerWeek": 3},
        {"name": "Podcast", "category": "content", "status": "idea"}
    ]))
    .unwrap();

    let insights = portfolio_insights(&bets, &[CoreValue::Autonomy]).unwrap();
    assert!(insights.warnings.is_empty());
    assert_eq!(insights.recommendations[0].title, "Scale Bookkeeping");

    // 2100 net a month against 3000 of expenses and a year of runway
    let progress = portfolio_progress(&bets, Some(12.0), Some(3_000.0)).unwrap();
    assert_eq!(progress.active_bets, 2);
    assert_eq!(progress.multiple_successes, 100);
    assert_eq!(progress.sustainable_income, Some(100));
    assert_eq!(progress.autonomy_achieved, Some(70));

    let repo = InMemoryRepository::new();
    let mut store = memory_store(&repo, PhasePolicy::default());
    for (id, value) in [
        ("action-initiated", progress.action_initiated),
        ("momentum-achieved", progress.momentum_achieved),
        ("multiple-successes", progress.multiple_successes),
    ] {
        store.update_milestone(id, f64::from(value), None);
    }
    let state = store.journey_state();
    assert!(state.milestone("action-initiated").unwrap().is_complete());
    assert!(state.milestone("multiple-successes").unwrap().is_complete());
    // two started bets of the three needed, revenue target met
    let momentum = state.milestone("momentum-achieved").unwrap();
    assert!((momentum.progress - 83.0).abs() < 1e-9);
}
