//! Small-bets portfolio scoring.
//!
//! A bet is one side income stream. Each bet is analysed on its own, the
//! portfolio as a whole gets recommendations and warnings, and the journey
//! milestones owned by the portfolio are derived from the started bets.

use serde::{Deserialize, Serialize};

use crate::values::CoreValue;
use crate::{CalculatorError, WEEKS_PER_MONTH, check_amount};

pub const MIN_SATISFACTION: u8 = 1;
pub const MAX_SATISFACTION: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BetCategory {
    Service,
    Product,
    Content,
    Investment,
    Skill,
    Other,
}

impl BetCategory {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Service => "service",
            Self::Product => "product",
            Self::Content => "content",
            Self::Investment => "investment",
            Self::Skill => "skill",
            Self::Other => "other",
        }
    }

    const fn growth_multiplier(self) -> f64 {
        match self {
            Self::Content => 1.2,
            Self::Service => 0.8,
            Self::Product => 1.5,
            Self::Investment => 0.5,
            Self::Skill | Self::Other => 1.0,
        }
    }

    const fn base_scalability(self) -> u8 {
        match self {
            Self::Content => 8,
            Self::Product => 9,
            Self::Service => 4,
            Self::Investment => 7,
            Self::Skill => 6,
            Self::Other => 5,
        }
    }

    const fn base_risk(self) -> f64 {
        match self {
            Self::Investment => 7.0,
            Self::Product => 6.0,
            Self::Service => 3.0,
            Self::Content => 4.0,
            Self::Skill => 2.0,
            Self::Other => 5.0,
        }
    }

    const fn market_dependency(self) -> Level {
        match self {
            Self::Service | Self::Skill => Level::Low,
            Self::Content | Self::Product | Self::Other => Level::Medium,
            Self::Investment => Level::High,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BetStatus {
    Idea,
    Testing,
    Active,
    Paused,
    Successful,
    Failed,
}

impl BetStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idea => "idea",
            Self::Testing => "testing",
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Successful => "successful",
            Self::Failed => "failed",
        }
    }

    /// Past the idea stage and still running.
    #[must_use]
    pub const fn is_started(self) -> bool {
        matches!(self, Self::Testing | Self::Active | Self::Successful)
    }
}

/// Ordered low to high so priorities sort naturally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmallBet {
    pub name: String,
    pub category: BetCategory,
    pub status: BetStatus,
    #[serde(default)]
    pub initial_investment: f64,
    #[serde(default)]
    pub monthly_revenue: f64,
    #[serde(default)]
    pub monthly_expenses: f64,
    #[serde(default)]
    pub total_revenue: f64,
    /// May be negative.
    #[serde(default)]
    pub total_profit: f64,
    #[serde(default)]
    pub hours_per_week: f64,
    #[serde(default)]
    pub total_hours_invested: f64,
    #[serde(default)]
    pub aligned_values: Vec<CoreValue>,
    #[serde(default = "default_satisfaction")]
    pub satisfaction_score: u8,
}

fn default_satisfaction() -> u8 {
    5
}

impl SmallBet {
    pub fn validate(&self) -> Result<(), CalculatorError> {
        check_amount("initialInvestment", self.initial_investment)?;
        check_amount("monthlyRevenue", self.monthly_revenue)?;
        check_amount("monthlyExpenses", self.monthly_expenses)?;
        check_amount("totalRevenue", self.total_revenue)?;
        check_amount("hoursPerWeek", self.hours_per_week)?;
        check_amount("totalHoursInvested", self.total_hours_invested)?;
        if !self.total_profit.is_finite() {
            return Err(CalculatorError::InvalidAmount {
                field: "totalProfit".to_owned(),
                value: self.total_profit,
            });
        }
        if !(MIN_SATISFACTION..=MAX_SATISFACTION).contains(&self.satisfaction_score) {
            return Err(CalculatorError::OutOfRange {
                field: "satisfactionScore".to_owned(),
                value: self.satisfaction_score,
                min: MIN_SATISFACTION,
                max: MAX_SATISFACTION,
            });
        }
        Ok(())
    }

    fn monthly_profit(&self) -> f64 {
        self.monthly_revenue - self.monthly_expenses
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profitability {
    pub roi: f64,
    pub hourly_return: f64,
    /// `None` while the bet loses money every month.
    pub payback_months: Option<f64>,
    pub profit_margin: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Stable,
    Declining,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Growth {
    pub revenue_growth_rate: f64,
    pub scalability_score: u8,
    pub time_commitment_trend: Trend,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Risk {
    /// 1 is safest.
    pub risk_score: f64,
    pub diversification_benefit: f64,
    pub market_dependency: Level,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Alignment {
    pub values_alignment: f64,
    pub satisfaction_trend: Trend,
    pub burnout_risk: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BetAnalysis {
    pub profitability: Profitability,
    pub growth: Growth,
    pub risk: Risk,
    pub alignment: Alignment,
}

pub fn analyze_bet(bet: &SmallBet) -> Result<BetAnalysis, CalculatorError> {
    bet.validate()?;

    let roi = if bet.initial_investment > 0.0 {
        bet.total_profit / bet.initial_investment * 100.0
    } else {
        0.0
    };
    let hourly_return = if bet.total_hours_invested > 0.0 {
        bet.total_revenue / bet.total_hours_invested
    } else {
        0.0
    };
    let monthly_profit = bet.monthly_profit();
    let payback_months = (monthly_profit > 0.0).then(|| bet.initial_investment / monthly_profit);
    let profit_margin = if bet.monthly_revenue > 0.0 {
        monthly_profit / bet.monthly_revenue * 100.0
    } else {
        0.0
    };

    let base_growth = match bet.status {
        BetStatus::Successful => 5.0,
        BetStatus::Active => 2.0,
        _ => 0.0,
    };

    let efficiency = if bet.hours_per_week > 0.0 {
        bet.monthly_revenue / (bet.hours_per_week * WEEKS_PER_MONTH)
    } else {
        0.0
    };
    let mut scalability_score = bet.category.base_scalability();
    if efficiency > 50.0 {
        scalability_score += 1;
    }
    if efficiency > 100.0 {
        scalability_score += 1;
    }

    let winding_down = bet.status == BetStatus::Successful && bet.hours_per_week < 10.0;
    let time_commitment_trend = if winding_down {
        Trend::Declining
    } else {
        Trend::Stable
    };

    let values_alignment = if bet.aligned_values.is_empty() {
        5.0
    } else {
        bet.aligned_values.len() as f64 / 5.0 * 10.0
    };

    Ok(BetAnalysis {
        profitability: Profitability {
            roi,
            hourly_return,
            payback_months,
            profit_margin,
        },
        growth: Growth {
            revenue_growth_rate: base_growth * bet.category.growth_multiplier(),
            scalability_score: scalability_score.min(10),
            time_commitment_trend,
        },
        risk: Risk {
            risk_score: risk_score(bet),
            diversification_benefit: 5.0,
            market_dependency: bet.category.market_dependency(),
        },
        alignment: Alignment {
            values_alignment,
            satisfaction_trend: if bet.satisfaction_score >= 6 {
                Trend::Stable
            } else {
                Trend::Declining
            },
            burnout_risk: burnout_risk(bet),
        },
    })
}

fn risk_score(bet: &SmallBet) -> f64 {
    let mut risk = 5.0;
    if bet.initial_investment > 5000.0 {
        risk += 2.0;
    } else if bet.initial_investment > 1000.0 {
        risk += 1.0;
    }
    if bet.monthly_revenue > bet.monthly_expenses * 2.0 {
        risk -= 1.0;
    }
    if bet.total_revenue > bet.initial_investment * 2.0 {
        risk -= 1.0;
    }
    f64::midpoint(risk, bet.category.base_risk()).clamp(1.0, 10.0)
}

fn burnout_risk(bet: &SmallBet) -> u8 {
    let mut risk: u8 = 5;
    if bet.hours_per_week > 40.0 {
        risk += 3;
    } else if bet.hours_per_week > 20.0 {
        risk += 1;
    }
    if bet.satisfaction_score < 5 {
        risk += 2;
    } else if bet.satisfaction_score < 7 {
        risk += 1;
    }
    if bet.aligned_values.len() < 2 {
        risk += 2;
    }
    risk.clamp(1, 10)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Start,
    Scale,
    Pivot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub priority: Level,
    pub title: String,
    pub description: String,
    pub expected_impact: &'static str,
    pub timeframe: &'static str,
    pub effort: Level,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Opportunity {
    pub category: BetCategory,
    pub rationale: &'static str,
    pub estimated_roi: u32,
    pub risk_level: Level,
}

const OPPORTUNITIES: [Opportunity; 3] = [
    Opportunity {
        category: BetCategory::Content,
        rationale: "High scalability and passive income potential",
        estimated_roi: 150,
        risk_level: Level::Medium,
    },
    Opportunity {
        category: BetCategory::Service,
        rationale: "Lower risk and immediate income generation",
        estimated_roi: 80,
        risk_level: Level::Low,
    },
    Opportunity {
        category: BetCategory::Product,
        rationale: "High scalability but requires upfront investment",
        estimated_roi: 200,
        risk_level: Level::High,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WarningKind {
    Concentration,
    Burnout,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioWarning {
    pub kind: WarningKind,
    pub severity: Level,
    pub description: String,
    pub suggestion: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioInsights {
    /// 0..=10
    pub monthly_income_reliability: f64,
    /// Monthly revenue per monthly hour across every bet.
    pub total_hours_efficiency: f64,
    /// 0..=10
    pub risk_diversification: f64,
    /// 0..=10
    pub value_alignment: f64,
    pub recommendations: Vec<Recommendation>,
    pub opportunities: Vec<Opportunity>,
    pub warnings: Vec<PortfolioWarning>,
}

/// `user_values` are the dominant values from the values assessment, if any.
pub fn portfolio_insights(
    bets: &[SmallBet],
    user_values: &[CoreValue],
) -> Result<PortfolioInsights, CalculatorError> {
    let analyses = bets
        .iter()
        .map(|bet| analyze_bet(bet).map(|analysis| (bet, analysis)))
        .collect::<Result<Vec<_>, _>>()?;

    let revenue: f64 = bets.iter().map(|b| b.monthly_revenue).sum();
    let monthly_hours: f64 = bets.iter().map(|b| b.hours_per_week * WEEKS_PER_MONTH).sum();

    Ok(PortfolioInsights {
        monthly_income_reliability: income_reliability(bets),
        total_hours_efficiency: if monthly_hours > 0.0 {
            revenue / monthly_hours
        } else {
            0.0
        },
        risk_diversification: risk_diversification(bets),
        value_alignment: value_alignment(bets, user_values),
        recommendations: recommendations(&analyses),
        opportunities: OPPORTUNITIES
            .iter()
            .filter(|o| !bets.iter().any(|b| b.category == o.category))
            .cloned()
            .collect(),
        warnings: warnings(bets),
    })
}

fn income_reliability(bets: &[SmallBet]) -> f64 {
    if bets.is_empty() {
        return 0.0;
    }
    let reliable: Vec<&SmallBet> = bets
        .iter()
        .filter(|b| {
            b.status == BetStatus::Successful
                || (b.status == BetStatus::Active && b.monthly_revenue > b.monthly_expenses)
        })
        .collect();
    let ratio = reliable.len() as f64 / bets.len() as f64;
    let stability: f64 = reliable
        .iter()
        .map(|b| {
            if b.monthly_revenue > 0.0 {
                let expenses = if b.monthly_expenses > 0.0 {
                    b.monthly_expenses
                } else {
                    1.0
                };
                (b.monthly_revenue / expenses).min(5.0)
            } else {
                0.0
            }
        })
        .sum::<f64>()
        / reliable.len().max(1) as f64;
    (ratio * 5.0 + stability).min(10.0)
}

fn risk_diversification(bets: &[SmallBet]) -> f64 {
    if bets.is_empty() {
        return 0.0;
    }
    let mut categories: Vec<BetCategory> = bets.iter().map(|b| b.category).collect();
    categories.sort_by_key(|c| c.as_str());
    categories.dedup();
    let mut statuses: Vec<BetStatus> = Vec::new();
    for bet in bets {
        if !statuses.contains(&bet.status) {
            statuses.push(bet.status);
        }
    }
    (categories.len() as f64 / 4.0).min(1.0) * 5.0
        + (statuses.len() as f64 / 3.0).min(1.0) * 3.0
        + (bets.len() as f64 / 5.0).min(1.0) * 2.0
}

fn value_alignment(bets: &[SmallBet], user_values: &[CoreValue]) -> f64 {
    if user_values.is_empty() {
        return 5.0;
    }
    if bets.is_empty() {
        return 0.0;
    }
    let total: f64 = bets
        .iter()
        .map(|b| {
            let shared = b.aligned_values.iter().filter(|v| user_values.contains(v)).count();
            shared as f64 / user_values.len() as f64 * 10.0
        })
        .sum();
    total / bets.len() as f64
}

fn recommendations(analyses: &[(&SmallBet, BetAnalysis)]) -> Vec<Recommendation> {
    let mut out = Vec::new();

    for (bet, analysis) in analyses {
        let roi = analysis.profitability.roi;
        if roi > 100.0 && analysis.risk.risk_score < 5.0 {
            out.push(Recommendation {
                kind: RecommendationKind::Scale,
                priority: Level::High,
                title: format!("Scale {}", bet.name),
                description: format!(
                    "This bet shows strong ROI ({roi:.1}%) with low risk. Consider increasing time investment."
                ),
                expected_impact: "Increase monthly income by 25-50%",
                timeframe: "1-3 months",
                effort: Level::Medium,
            });
        }
    }
    for (bet, analysis) in analyses {
        let roi = analysis.profitability.roi;
        if roi < 10.0 && analysis.alignment.burnout_risk > 7 {
            out.push(Recommendation {
                kind: RecommendationKind::Pivot,
                priority: Level::Medium,
                title: format!("Pivot or stop {}", bet.name),
                description: format!(
                    "Low ROI ({roi:.1}%) and high burnout risk. Consider changing approach or stopping."
                ),
                expected_impact: "Free up time for better opportunities",
                timeframe: "1 month",
                effort: Level::Low,
            });
        }
    }
    if analyses.len() < 3 {
        out.push(Recommendation {
            kind: RecommendationKind::Start,
            priority: Level::Medium,
            title: "Increase portfolio diversity".to_owned(),
            description: "Your portfolio has limited diversity. Consider starting 1-2 small bets in different categories."
                .to_owned(),
            expected_impact: "Reduce risk and increase opportunity",
            timeframe: "2-4 months",
            effort: Level::Medium,
        });
    }

    out.sort_by(|a, b| b.priority.cmp(&a.priority));
    out
}

fn warnings(bets: &[SmallBet]) -> Vec<PortfolioWarning> {
    let mut out = Vec::new();

    // First-seen order.
    let mut counts: Vec<(BetCategory, usize)> = Vec::new();
    for bet in bets {
        match counts.iter_mut().find(|(c, _)| *c == bet.category) {
            Some((_, n)) => *n += 1,
            None => counts.push((bet.category, 1)),
        }
    }
    for (category, count) in counts {
        if count as f64 > bets.len() as f64 * 0.6 {
            out.push(PortfolioWarning {
                kind: WarningKind::Concentration,
                severity: Level::Medium,
                description: format!(
                    "Over 60% of your bets are in {}. This creates concentration risk.",
                    category.as_str()
                ),
                suggestion: "Consider diversifying into other categories to reduce risk.",
            });
        }
    }

    let hours: f64 = bets.iter().map(|b| b.hours_per_week).sum();
    if hours > 60.0 {
        out.push(PortfolioWarning {
            kind: WarningKind::Burnout,
            severity: Level::High,
            description: format!(
                "You're investing {hours} hours per week across all bets. This is unsustainable."
            ),
            suggestion: "Consider reducing time commitment or stopping some bets to prevent burnout.",
        });
    }

    out
}

/// Progress (0..=100) toward each milestone the portfolio owns.
///
/// `None` means the inputs needed to judge that milestone are missing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioProgress {
    pub active_bets: usize,
    pub successful_bets: usize,
    /// Net of expenses across started bets, floored at zero.
    pub monthly_income: f64,
    pub action_initiated: u8,
    pub momentum_achieved: u8,
    pub multiple_successes: u8,
    pub sustainable_income: Option<u8>,
    pub autonomy_achieved: Option<u8>,
}

const MOMENTUM_BETS: f64 = 3.0;
const MOMENTUM_REVENUE: f64 = 100.0;
const SUCCESS_TARGET: f64 = 2.0;
const SUSTAINABLE_INCOME: f64 = 2000.0;
const SUSTAINABLE_RUNWAY_MONTHS: f64 = 12.0;

/// Fraction of `target` reached, clamped to 0..=1.
fn share(value: f64, target: f64) -> f64 {
    if target > 0.0 {
        (value / target).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn percent(fraction: f64) -> u8 {
    (fraction * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Runway and monthly expenses come from the runway calculator, when it has run.
pub fn portfolio_progress(
    bets: &[SmallBet],
    runway_months: Option<f64>,
    monthly_expenses: Option<f64>,
) -> Result<PortfolioProgress, CalculatorError> {
    for bet in bets {
        bet.validate()?;
    }

    let started: Vec<&SmallBet> = bets.iter().filter(|b| b.status.is_started()).collect();
    let active_bets = started.len();
    let successful_bets = bets
        .iter()
        .filter(|b| b.status == BetStatus::Successful)
        .count();
    let revenue: f64 = started.iter().map(|b| b.monthly_revenue).sum();
    let monthly_income = started
        .iter()
        .map(|b| b.monthly_profit())
        .sum::<f64>()
        .max(0.0);

    let bets_started = active_bets as f64;
    let sustainable_income = runway_months.map(|runway| {
        percent(f64::midpoint(
            share(monthly_income, SUSTAINABLE_INCOME),
            share(runway, SUSTAINABLE_RUNWAY_MONTHS),
        ))
    });
    let autonomy_achieved = monthly_expenses
        .filter(|e| *e > 0.0)
        .map(|expenses| percent(share(monthly_income, expenses)));

    Ok(PortfolioProgress {
        active_bets,
        successful_bets,
        monthly_income,
        action_initiated: percent(share(bets_started, 1.0)),
        momentum_achieved: percent(f64::midpoint(
            share(bets_started, MOMENTUM_BETS),
            share(revenue, MOMENTUM_REVENUE),
        )),
        multiple_successes: percent(share(successful_bets as f64, SUCCESS_TARGET)),
        sustainable_income,
        autonomy_achieved,
    })
}
