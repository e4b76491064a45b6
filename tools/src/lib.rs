//! Liberation calculators.
//!
//! Pure functions over plain inputs: runway, real hourly wage, the cognitive
//! debt assessment, values-to-vocation matching, small-bet portfolio scoring
//! and the coarse bands numbers are reduced to before they are shared anywhere.

use thiserror::Error;

pub mod cognitive_debt;
pub mod portfolio;
pub mod privacy;
pub mod real_wage;
pub mod runway;
pub mod values;

pub use cognitive_debt::{
    CategoryScore, DebtAssessment, DebtCategory, DebtQuestion, DebtResponse, MAX_RESPONSE,
    QUESTIONS, RiskLevel, assess_cognitive_debt,
};
pub use portfolio::{
    BetAnalysis, BetCategory, BetStatus, PortfolioInsights, PortfolioProgress, SmallBet,
    analyze_bet, portfolio_insights, portfolio_progress,
};
pub use privacy::{RunwaySummary, expenses_band, savings_band};
pub use real_wage::{
    RealWageCalculation, RealWageInputs, TimeImpact, WageComparison, WageEfficiency, WorkCosts,
    WorkHours, calculate_real_hourly_wage, calculate_time_impact, compare_wages,
    format_hourly_wage,
};
pub use runway::{
    Expense, RunwayCalculation, RunwayInputs, add_expense, calculate_runway, default_expenses,
    format_runway_display, remove_expense, update_expense_amount,
};
pub use values::{
    AlignmentBand, CoreValue, MatchPreferences, VALUE_QUESTIONS, VOCATIONS, ValueAssessmentInputs,
    ValueProfile, ValueResponse, VocationMatch, VocationMatchingResult, WorkArrangement,
    calculate_value_profile, match_vocations, value_insights,
};

/// Average weeks per month used by every monthly conversion.
pub const WEEKS_PER_MONTH: f64 = 4.33;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalculatorError {
    #[error("{field} must be a finite, non-negative amount (got {value})")]
    InvalidAmount { field: String, value: f64 },
    #[error("unknown assessment question: {0}")]
    UnknownQuestion(String),
    #[error("response to {question} must be between 0 and 4 (got {score})")]
    ScoreOutOfRange { question: String, score: u8 },
    #[error("{field} must be between {min} and {max} (got {value})")]
    OutOfRange {
        field: String,
        value: u8,
        min: u8,
        max: u8,
    },
}

pub(crate) fn check_amount(field: &str, value: f64) -> Result<f64, CalculatorError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(CalculatorError::InvalidAmount {
            field: field.to_owned(),
            value,
        })
    }
}
