//! Coarse bands for sharing financial figures without the figures.

use serde::Serialize;

use crate::RunwayCalculation;

#[must_use]
pub fn savings_band(amount: f64) -> &'static str {
    match amount {
        a if a < 1_000.0 => "0-1k",
        a if a < 5_000.0 => "1k-5k",
        a if a < 10_000.0 => "5k-10k",
        a if a < 25_000.0 => "10k-25k",
        a if a < 50_000.0 => "25k-50k",
        a if a < 100_000.0 => "50k-100k",
        a if a < 250_000.0 => "100k-250k",
        _ => "250k+",
    }
}

/// Monthly expenses.
#[must_use]
pub fn expenses_band(amount: f64) -> &'static str {
    match amount {
        a if a < 1_000.0 => "0-1k",
        a if a < 2_000.0 => "1k-2k",
        a if a < 3_000.0 => "2k-3k",
        a if a < 4_000.0 => "3k-4k",
        a if a < 5_000.0 => "4k-5k",
        a if a < 7_500.0 => "5k-7.5k",
        a if a < 10_000.0 => "7.5k-10k",
        _ => "10k+",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunwaySummary {
    /// Rounded to one decimal.
    pub runway_months: f64,
    pub savings_band: &'static str,
    pub expenses_band: &'static str,
}

impl RunwaySummary {
    /// `None` unless runway, savings and expenses are all positive.
    #[must_use]
    pub fn from_calculation(calc: &RunwayCalculation) -> Option<Self> {
        if calc.runway_months <= 0.0
            || calc.current_savings <= 0.0
            || calc.total_monthly_expenses <= 0.0
        {
            return None;
        }
        Some(Self {
            runway_months: (calc.runway_months * 10.0).round() / 10.0,
            savings_band: savings_band(calc.current_savings),
            expenses_band: expenses_band(calc.total_monthly_expenses),
        })
    }
}
