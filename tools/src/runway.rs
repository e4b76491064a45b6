//! How long savings last against essential monthly expenses.

use serde::{Deserialize, Serialize};

use crate::{CalculatorError, WEEKS_PER_MONTH, check_amount};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub name: String,
    pub amount: f64,
    pub is_essential: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunwayInputs {
    pub expenses: Vec<Expense>,
    pub savings: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunwayCalculation {
    /// Essential expenses only.
    pub total_monthly_expenses: f64,
    pub current_savings: f64,
    pub runway_months: f64,
    pub runway_display: String,
}

/// Runway in months. Optional expenses are ignored; no essential spend means a runway of 0.
pub fn calculate_runway(inputs: &RunwayInputs) -> Result<RunwayCalculation, CalculatorError> {
    let savings = check_amount("savings", inputs.savings)?;
    let mut total = 0.0;
    for expense in &inputs.expenses {
        let amount = check_amount(&expense.name, expense.amount)?;
        if expense.is_essential {
            total += amount;
        }
    }

    let runway_months = if total > 0.0 { savings / total } else { 0.0 };
    Ok(RunwayCalculation {
        total_monthly_expenses: total,
        current_savings: savings,
        runway_months,
        runway_display: format_runway_display(runway_months),
    })
}

fn plural(count: u64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit}")
    } else {
        format!("{count} {unit}s")
    }
}

#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_runway_display(months: f64) -> String {
    if months.is_nan() || months < 0.1 {
        return "Less than a week".to_owned();
    }
    if months < 1.0 {
        return plural((months * WEEKS_PER_MONTH).floor() as u64, "week");
    }

    let whole = months.floor();
    let weeks = ((months - whole) * WEEKS_PER_MONTH).floor() as u64;
    let whole = whole as u64;
    if weeks == 0 {
        plural(whole, "month")
    } else {
        format!("{}, {}", plural(whole, "month"), plural(weeks, "week"))
    }
}

/// The starter list: seven essential categories at zero.
#[must_use]
pub fn default_expenses() -> Vec<Expense> {
    [
        "Housing (rent/mortgage)",
        "Food & groceries",
        "Utilities",
        "Insurance (health, auto)",
        "Transportation",
        "Phone & internet",
        "Essential subscriptions",
    ]
    .into_iter()
    .enumerate()
    .map(|(i, name)| Expense {
        id: (i + 1).to_string(),
        name: name.to_owned(),
        amount: 0.0,
        is_essential: true,
    })
    .collect()
}

/// Append a zero-amount expense with the next free numeric id.
pub fn add_expense<'a>(
    expenses: &'a mut Vec<Expense>,
    name: &str,
    is_essential: bool,
) -> &'a Expense {
    let next = expenses
        .iter()
        .filter_map(|e| e.id.parse::<u64>().ok())
        .max()
        .unwrap_or(0)
        + 1;
    expenses.push(Expense {
        id: next.to_string(),
        name: name.to_owned(),
        amount: 0.0,
        is_essential,
    });
    &expenses[expenses.len() - 1]
}

/// Returns `false` when no expense has `id`.
pub fn update_expense_amount(expenses: &mut [Expense], id: &str, amount: f64) -> bool {
    match expenses.iter_mut().find(|e| e.id == id) {
        Some(expense) => {
            expense.amount = amount;
            true
        }
        None => false,
    }
}

/// Returns `false` when no expense has `id`.
pub fn remove_expense(expenses: &mut Vec<Expense>, id: &str) -> bool {
    let before = expenses.len();
    expenses.retain(|e| e.id != id);
    expenses.len() != before
}
