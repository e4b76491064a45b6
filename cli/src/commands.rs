//! Subcommands. Each one works against an already-initialized journey store
//! and writes its report to `out`.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Subcommand;
use greenfield_copilot::{Copilot, LiberationContext, RiskTolerance, TemplateEngine};
use greenfield_core::{Clock, JourneyRepository, JourneyStore};
use greenfield_tools::{
    CoreValue, DebtResponse, MatchPreferences, RealWageInputs, RunwayInputs, RunwaySummary,
    SmallBet, ValueAssessmentInputs, ValueResponse, WorkArrangement, WorkCosts, WorkHours,
    add_expense, analyze_bet, assess_cognitive_debt, calculate_real_hourly_wage,
    calculate_runway, calculate_time_impact, calculate_value_profile, compare_wages,
    format_hourly_wage, match_vocations, portfolio_insights, portfolio_progress,
    update_expense_amount,
};
use greenfield_types::{
    Decision, DecisionChoice, InsightPatch, JourneyEvent, JourneyState, MilestoneUpdate, ToolId,
};
use serde_json::{Value, json};

use crate::parse::{
    ExpenseArg, parse_expense, parse_key_value, parse_response, parse_value_response,
};

/// Runway that counts as full financial clarity.
const CLARITY_RUNWAY_MONTHS: f64 = 3.0;

/// Vocation matches needed to call values identified.
const VALUES_TOP_MATCHES: f64 = 3.0;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show phase, score, milestones and achievements
    Status {
        /// Print the full journey snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set a milestone's progress (0-100)
    Milestone {
        id: String,
        #[arg(allow_negative_numbers = true)]
        progress: f64,
    },

    /// Record a strategic decision
    Decision {
        #[arg(long, default_value = ToolId::INSIGHT_ENGINE)]
        tool: String,
        /// A, B, neither or custom
        #[arg(long, default_value = "A")]
        choice: DecisionChoice,
        /// 1-10
        #[arg(long, default_value_t = Decision::DEFAULT_CONFIDENCE)]
        confidence: u8,
        #[arg(long)]
        milestone: Option<String>,
    },

    /// Merge key=value pairs into a tool's insights
    Insight {
        tool: String,
        #[arg(value_parser = parse_key_value, required = true)]
        pairs: Vec<(String, Value)>,
    },

    /// Start the journey over
    Reset,

    /// Months of runway from savings and essential expenses
    Runway {
        #[arg(long)]
        savings: f64,
        /// name=amount, or name=amount!optional
        #[arg(long = "expense", value_parser = parse_expense, required = true)]
        expenses: Vec<ExpenseArg>,
    },

    /// Real hourly wage after commute and work costs
    Wage {
        #[arg(long)]
        salary: f64,
        #[arg(long, default_value_t = 40.0)]
        hours: f64,
        /// Round trip, per work day
        #[arg(long, default_value_t = 30.0)]
        commute_minutes: f64,
        #[arg(long, default_value_t = 5.0)]
        days: f64,
        #[arg(long, default_value_t = 0.0)]
        commute_cost: f64,
        #[arg(long, default_value_t = 0.0)]
        lunch_cost: f64,
        #[arg(long, default_value_t = 0.0)]
        clothing_cost: f64,
        #[arg(long, default_value_t = 0.0)]
        stress_cost: f64,
    },

    /// Cognitive debt assessment from question=score answers (0-4)
    Debt {
        #[arg(value_parser = parse_response, required = true)]
        responses: Vec<DebtResponse>,
    },

    /// Values assessment from question=importance answers (1-5), matched to vocations
    Values {
        #[arg(value_parser = parse_value_response, required = true)]
        responses: Vec<ValueResponse>,
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        industry: Option<String>,
        /// Preferred work arrangement, e.g. freelancer (repeatable)
        #[arg(long = "arrangement")]
        arrangements: Vec<WorkArrangement>,
        #[arg(long)]
        prioritize_income: bool,
        #[arg(long)]
        low_risk: bool,
    },

    /// Score a small-bets portfolio read from a JSON array of bets
    Bets {
        file: PathBuf,
        /// Core value to measure alignment against (repeatable); defaults to the
        /// dominant values from the last values assessment
        #[arg(long = "value")]
        values: Vec<CoreValue>,
    },

    /// Liberation plan built from the recorded calculator results
    Plan {
        #[arg(long = "skill")]
        skills: Vec<String>,
        #[arg(long, default_value = "")]
        industry: String,
        #[arg(long, default_value = "medium")]
        risk: RiskTolerance,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Settings {
    /// Print banded summaries after calculations.
    pub analytics: bool,
}

fn patch(value: Value) -> InsightPatch {
    match value {
        Value::Object(map) => map,
        _ => InsightPatch::new(),
    }
}

fn report(out: &mut impl Write, update: Option<MilestoneUpdate>) -> Result<()> {
    let Some(update) = update else {
        return Ok(());
    };
    if update.newly_completed {
        writeln!(out, "Milestone completed: {}", update.milestone)?;
    }
    if let Some(change) = update.phase_change {
        writeln!(out, "Phase changed: {} -> {}", change.from.title(), change.to.title())?;
    }
    Ok(())
}

pub fn run<R: JourneyRepository, C: Clock>(
    command: Command,
    store: &mut JourneyStore<R, C>,
    settings: Settings,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Command::Status { json } => status(store, json, out),
        Command::Milestone { id, progress } => {
            let update = store.update_milestone(&id, progress, None);
            if update.is_none() {
                bail!("unknown milestone: {id}");
            }
            report(out, update)?;
            writeln!(out, "Score: {}/100", store.journey_state().overall_score())?;
            Ok(())
        }
        Command::Decision {
            tool,
            choice,
            confidence,
            milestone,
        } => {
            let mut event =
                JourneyEvent::decision_made(tool.as_str(), Decision { choice, confidence });
            if let Some(milestone) = milestone {
                event = event.with_milestone(milestone.as_str());
            }
            store.record_event(&event);
            let count = store
                .journey_state()
                .tool_insight(&tool)
                .map_or(0, |insight| insight.decisions_count());
            writeln!(
                out,
                "Recorded decision {choice} (confidence {confidence}) for {tool}; {count} so far"
            )?;
            Ok(())
        }
        Command::Insight { tool, pairs } => {
            let patch: InsightPatch = pairs.into_iter().collect();
            store.update_tool_insights(tool.as_str(), &patch);
            writeln!(out, "Updated {} insight(s) for {tool}", patch.len())?;
            Ok(())
        }
        Command::Reset => {
            store.reset_journey();
            writeln!(out, "Journey reset")?;
            Ok(())
        }
        Command::Runway { savings, expenses } => runway(store, settings, savings, &expenses, out),
        Command::Wage {
            salary,
            hours,
            commute_minutes,
            days,
            commute_cost,
            lunch_cost,
            clothing_cost,
            stress_cost,
        } => {
            let inputs = RealWageInputs {
                annual_salary: salary,
                work_hours: WorkHours {
                    weekly_hours: hours,
                    commute_daily_minutes: commute_minutes,
                    work_days_per_week: days,
                },
                work_costs: WorkCosts {
                    commute_monthly_cost: commute_cost,
                    work_lunches_monthly_cost: lunch_cost,
                    work_clothing_monthly_cost: clothing_cost,
                    stress_spending_monthly_cost: stress_cost,
                },
            };
            wage(store, &inputs, out)
        }
        Command::Debt { responses } => debt(store, &responses, out),
        Command::Values {
            responses,
            role,
            industry,
            arrangements,
            prioritize_income,
            low_risk,
        } => {
            let inputs = ValueAssessmentInputs {
                responses,
                current_role: role,
                industry,
            };
            let prefs = MatchPreferences {
                preferred_arrangements: arrangements,
                prioritize_income,
                low_risk_tolerance: low_risk,
            };
            values(store, &inputs, &prefs, out)
        }
        Command::Bets { file, values } => bets(store, &file, values, out),
        Command::Plan {
            skills,
            industry,
            risk,
            json,
        } => plan(store, skills, &industry, risk, json, out),
    }
}

fn status<R: JourneyRepository, C: Clock>(
    store: &JourneyStore<R, C>,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let state = store.journey_state();
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(state)?)?;
        return Ok(());
    }

    let phase = state.current_phase();
    writeln!(out, "Phase: {} ({phase})", phase.title())?;
    writeln!(out, "Score: {}/100", state.overall_score())?;
    writeln!(out)?;
    writeln!(out, "Milestones:")?;
    for m in state.milestones() {
        let mark = if m.is_complete() { "x" } else { " " };
        writeln!(out, "  [{mark}] {:<26} {:>5.1}%  {}", m.id.as_str(), m.progress, m.title)?;
    }

    let open = state.open_phase_milestones();
    if !open.is_empty() {
        writeln!(out)?;
        writeln!(out, "Next up:")?;
        for m in open {
            writeln!(out, "  - {}: {}", m.title, m.description)?;
        }
    }

    if !state.achievements().is_empty() {
        writeln!(out)?;
        writeln!(out, "Achievements:")?;
        for a in state.achievements() {
            writeln!(out, "  - {} ({})", a.title, a.created_at.format("%Y-%m-%d"))?;
        }
    }
    Ok(())
}

fn runway<R: JourneyRepository, C: Clock>(
    store: &mut JourneyStore<R, C>,
    settings: Settings,
    savings: f64,
    args: &[ExpenseArg],
    out: &mut impl Write,
) -> Result<()> {
    let mut expenses = Vec::with_capacity(args.len());
    for arg in args {
        let id = add_expense(&mut expenses, &arg.name, arg.essential).id.clone();
        update_expense_amount(&mut expenses, &id, arg.amount);
    }
    let calc = calculate_runway(&RunwayInputs { expenses, savings })?;

    writeln!(out, "Essential monthly expenses: {:.2}", calc.total_monthly_expenses)?;
    writeln!(out, "Savings: {:.2}", calc.current_savings)?;
    writeln!(out, "Runway: {} ({:.1} months)", calc.runway_display, calc.runway_months)?;

    store.record_event(&JourneyEvent::tool_used(
        ToolId::RUNWAY_CALCULATOR,
        Some("runway_calculated"),
    ));
    report(out, store.update_milestone("first-tool-use", 100.0, None))?;
    if calc.current_savings > 0.0 && calc.total_monthly_expenses > 0.0 {
        report(out, store.update_milestone("basic-data-entry", 100.0, None))?;
    }
    let clarity = calc.runway_months / CLARITY_RUNWAY_MONTHS * 100.0;
    report(
        out,
        store.update_milestone(
            "financial-clarity",
            clarity,
            Some(&patch(json!({ "runwayMonths": calc.runway_months }))),
        ),
    )?;
    store.update_tool_insights(
        ToolId::RUNWAY_CALCULATOR,
        &patch(json!({
            "runwayMonths": calc.runway_months,
            "monthlyExpenses": calc.total_monthly_expenses,
        })),
    );

    if settings.analytics
        && let Some(summary) = RunwaySummary::from_calculation(&calc)
    {
        writeln!(out, "Banded summary: {}", serde_json::to_string(&summary)?)?;
    }
    Ok(())
}

fn wage<R: JourneyRepository, C: Clock>(
    store: &mut JourneyStore<R, C>,
    inputs: &RealWageInputs,
    out: &mut impl Write,
) -> Result<()> {
    let calc = calculate_real_hourly_wage(inputs)?;
    let comparison = compare_wages(calc.stated_hourly_wage, calc.real_hourly_wage);
    let impact = calculate_time_impact(&inputs.work_hours);
    let efficiency = calc.efficiency().as_str();

    writeln!(out, "Stated hourly wage: {}", format_hourly_wage(calc.stated_hourly_wage))?;
    writeln!(out, "Real hourly wage:   {}", format_hourly_wage(calc.real_hourly_wage))?;
    writeln!(out, "Reduction: {:.1}% ({efficiency} efficiency)", comparison.percentage_reduction)?;
    writeln!(out, "{}", comparison.message)?;
    writeln!(
        out,
        "Work and commute take {:.1} hours a week, {:.0} days a year",
        impact.hours_per_week, impact.days_per_year
    )?;

    store.record_event(
        &JourneyEvent::tool_used(ToolId::REAL_HOURLY_WAGE, Some("wage_calculated"))
            .with_extra("realWage", json!(calc.real_hourly_wage)),
    );
    report(out, store.update_milestone("first-tool-use", 100.0, None))?;
    report(
        out,
        store.update_milestone(
            "real-wage-calculated",
            100.0,
            Some(&patch(json!({
                "statedWage": calc.stated_hourly_wage,
                "realWage": calc.real_hourly_wage,
                "efficiency": efficiency,
            }))),
        ),
    )?;
    store.update_tool_insights(
        ToolId::REAL_HOURLY_WAGE,
        &patch(json!({ "realWage": calc.real_hourly_wage, "efficiency": efficiency })),
    );
    Ok(())
}

fn debt<R: JourneyRepository, C: Clock>(
    store: &mut JourneyStore<R, C>,
    responses: &[DebtResponse],
    out: &mut impl Write,
) -> Result<()> {
    let result = assess_cognitive_debt(responses)?;

    writeln!(
        out,
        "Cognitive debt: {:.0}% ({} risk)",
        result.percentage_score,
        result.risk_level.as_str()
    )?;
    for (category, score) in &result.category_scores {
        writeln!(out, "  {:<22} {:>5.1}%", category.display_name(), score.percentage)?;
    }
    writeln!(out)?;
    writeln!(out, "{}", result.message)?;
    writeln!(out)?;
    for recommendation in &result.recommendations {
        writeln!(out, "- {recommendation}")?;
    }

    let concerns: Vec<&str> = result.primary_concerns.iter().map(|c| c.as_str()).collect();
    store.record_event(
        &JourneyEvent::tool_used(ToolId::COGNITIVE_DEBT_ASSESSMENT, Some("assessment_completed"))
            .with_extra("debtPercentage", json!(result.percentage_score))
            .with_extra("riskLevel", json!(result.risk_level)),
    );
    report(
        out,
        store.update_milestone(
            "cognitive-debt-assessed",
            100.0,
            Some(&patch(json!({
                "debtPercentage": result.percentage_score,
                "riskLevel": result.risk_level,
                "primaryConcerns": concerns,
                "score": result.total_score,
            }))),
        ),
    )?;
    store.update_tool_insights(
        ToolId::COGNITIVE_DEBT_ASSESSMENT,
        &patch(json!({
            "debtPercentage": result.percentage_score,
            "riskLevel": result.risk_level,
        })),
    );
    Ok(())
}

fn values<R: JourneyRepository, C: Clock>(
    store: &mut JourneyStore<R, C>,
    inputs: &ValueAssessmentInputs,
    prefs: &MatchPreferences,
    out: &mut impl Write,
) -> Result<()> {
    let profile = calculate_value_profile(inputs)?;
    let result = match_vocations(&profile, prefs);

    writeln!(out, "Top values:")?;
    for ranked in profile.core_values.iter().take(profile.dominant_values.len()) {
        writeln!(
            out,
            "  {}. {:<14} {:>5.1}%",
            ranked.rank,
            ranked.value.as_str(),
            ranked.percentage
        )?;
    }
    for conflict in &profile.conflicting_values {
        writeln!(
            out,
            "Tension: {} vs {} ({}/10)",
            conflict.value1, conflict.value2, conflict.tension_level
        )?;
    }
    writeln!(out)?;
    writeln!(out, "{}", result.insights.value_alignment)?;
    if result.top_matches.is_empty() {
        writeln!(out, "No vocation aligned closely enough to recommend")?;
    }
    for m in &result.top_matches {
        writeln!(
            out,
            "  {:>3.0}%  {} ({}, {})",
            m.alignment_score,
            m.vocation.title,
            m.transition_strategy.timeframe,
            m.vocation.reality_check.average_income
        )?;
    }
    writeln!(out)?;
    for recommendation in &result.insights.recommendations {
        writeln!(out, "- {recommendation}")?;
    }
    for suggestion in &result.exploration_suggestions {
        writeln!(out, "- {} ({})", suggestion.action, suggestion.timeframe)?;
    }

    let titles: Vec<&str> = result.top_matches.iter().map(|m| m.vocation.title).collect();
    let dominant: Vec<&str> = profile.dominant_values.iter().map(|v| v.as_str()).collect();
    store.record_event(
        &JourneyEvent::tool_used(ToolId::VALUES_VOCATION_MATCHER, Some("values_assessed"))
            .with_extra("topMatches", json!(titles.len())),
    );
    report(out, store.update_milestone("first-tool-use", 100.0, None))?;
    report(
        out,
        store.update_milestone(
            "values-identified",
            titles.len() as f64 / VALUES_TOP_MATCHES * 100.0,
            Some(&patch(json!({
                "dominantValues": dominant,
                "authenticityScore": profile.authenticity_score,
            }))),
        ),
    )?;
    store.update_tool_insights(
        ToolId::VALUES_VOCATION_MATCHER,
        &patch(json!({
            "topMatches": titles,
            "topMatchesCount": titles.len(),
            "alignment": result.insights.alignment_band,
        })),
    );
    Ok(())
}

fn recorded_number(state: &JourneyState, tool: &str, key: &str) -> Option<f64> {
    state
        .tool_insight(tool)
        .and_then(|insight| insight.get(key))
        .and_then(Value::as_f64)
}

fn recorded_values(state: &JourneyState) -> Vec<CoreValue> {
    state
        .tool_insight(ToolId::VALUES_VOCATION_MATCHER)
        .and_then(|insight| insight.get("dominantValues"))
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .filter_map(Value::as_str)
                .filter_map(|v| v.parse().ok())
                .collect()
        })
        .unwrap_or_default()
}

fn bets<R: JourneyRepository, C: Clock>(
    store: &mut JourneyStore<R, C>,
    path: &Path,
    values: Vec<CoreValue>,
    out: &mut impl Write,
) -> Result<()> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read bets from {}", path.display()))?;
    let bets: Vec<SmallBet> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse bets in {}", path.display()))?;

    let state = store.journey_state();
    let user_values = if values.is_empty() {
        recorded_values(state)
    } else {
        values
    };
    let runway = recorded_number(state, ToolId::RUNWAY_CALCULATOR, "runwayMonths");
    let expenses = recorded_number(state, ToolId::RUNWAY_CALCULATOR, "monthlyExpenses");

    let insights = portfolio_insights(&bets, &user_values)?;
    let progress = portfolio_progress(&bets, runway, expenses)?;

    for bet in &bets {
        let analysis = analyze_bet(bet)?;
        writeln!(
            out,
            "  {:<24} {:<10} {:<10} ROI {:>7.1}%  risk {:.1}/10  burnout {}/10",
            bet.name,
            bet.category.as_str(),
            bet.status.as_str(),
            analysis.profitability.roi,
            analysis.risk.risk_score,
            analysis.alignment.burnout_risk
        )?;
    }
    writeln!(
        out,
        "Started bets: {}, successful: {}, net monthly income: {:.2}",
        progress.active_bets, progress.successful_bets, progress.monthly_income
    )?;
    writeln!(
        out,
        "Reliability {:.1}/10, diversification {:.1}/10, values alignment {:.1}/10",
        insights.monthly_income_reliability,
        insights.risk_diversification,
        insights.value_alignment
    )?;
    for warning in &insights.warnings {
        writeln!(out, "Warning: {}", warning.description)?;
    }
    for recommendation in &insights.recommendations {
        writeln!(out, "- {}: {}", recommendation.title, recommendation.description)?;
    }
    for opportunity in &insights.opportunities {
        writeln!(
            out,
            "- Try {}: {}",
            opportunity.category.as_str(),
            opportunity.rationale
        )?;
    }

    store.record_event(
        &JourneyEvent::tool_used(ToolId::SMALL_BETS_PORTFOLIO, Some("portfolio_scored"))
            .with_extra("bets", json!(bets.len())),
    );
    report(out, store.update_milestone("first-tool-use", 100.0, None))?;
    let milestones = [
        ("action-initiated", Some(progress.action_initiated)),
        ("momentum-achieved", Some(progress.momentum_achieved)),
        ("multiple-successes", Some(progress.multiple_successes)),
        ("sustainable-income", progress.sustainable_income),
        ("autonomy-achieved", progress.autonomy_achieved),
    ];
    for (id, value) in milestones {
        if let Some(value) = value {
            report(out, store.update_milestone(id, f64::from(value), None))?;
        }
    }
    store.update_tool_insights(
        ToolId::SMALL_BETS_PORTFOLIO,
        &patch(json!({
            "activeBetsCount": progress.active_bets,
            "successfulBets": progress.successful_bets,
            "monthlyIncome": progress.monthly_income,
            "incomeReliability": insights.monthly_income_reliability,
        })),
    );
    Ok(())
}

fn plan<R: JourneyRepository, C: Clock>(
    store: &mut JourneyStore<R, C>,
    skills: Vec<String>,
    industry: &str,
    risk: RiskTolerance,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let ctx = LiberationContext::from_journey(store.journey_state(), skills, industry, risk);
    let mut copilot = Copilot::new(TemplateEngine::new());
    copilot.initialize()?;
    let plan = copilot.generate_plan(&ctx)?;
    let readiness = copilot.assess_readiness(&ctx)?;

    if json {
        let body = json!({ "context": ctx, "plan": plan, "readiness": readiness });
        writeln!(out, "{}", serde_json::to_string_pretty(&body)?)?;
    } else {
        writeln!(out, "{}", plan.assessment)?;
        writeln!(out, "Timeline: {}", plan.timeline)?;
        for phase in &plan.phases {
            writeln!(out)?;
            writeln!(out, "{} ({})", phase.name, phase.duration)?;
            for action in &phase.actions {
                writeln!(out, "  - {action}")?;
            }
        }
        writeln!(out)?;
        writeln!(out, "Contingencies:")?;
        for item in &plan.contingencies {
            writeln!(out, "  - {item}")?;
        }
        writeln!(out)?;
        writeln!(
            out,
            "Readiness: {:.0}/100 ({})",
            readiness.score,
            readiness.level.as_str()
        )?;
        for recommendation in &readiness.recommendations {
            writeln!(out, "  - {recommendation}")?;
        }
    }

    store.record_event(&JourneyEvent::tool_used(ToolId::AI_COPILOT, Some("plan_generated")));
    store.update_tool_insights(
        ToolId::AI_COPILOT,
        &patch(json!({
            "timeline": plan.timeline,
            "readinessScore": readiness.score,
            "readinessLevel": readiness.level,
        })),
    );
    Ok(())
}
