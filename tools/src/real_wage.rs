//! Stated versus real hourly wage once commute time and work costs are counted.

use serde::{Deserialize, Serialize};

use crate::{CalculatorError, WEEKS_PER_MONTH, check_amount};

/// Paid hours in a year at 40 hours a week.
const STATED_HOURS_PER_YEAR: f64 = 40.0 * 52.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkHours {
    pub weekly_hours: f64,
    /// Round trip, per work day.
    pub commute_daily_minutes: f64,
    pub work_days_per_week: f64,
}

impl Default for WorkHours {
    fn default() -> Self {
        Self {
            weekly_hours: 40.0,
            commute_daily_minutes: 30.0,
            work_days_per_week: 5.0,
        }
    }
}

impl WorkHours {
    #[must_use]
    pub fn commute_hours_per_week(&self) -> f64 {
        self.commute_daily_minutes / 60.0 * self.work_days_per_week
    }

    #[must_use]
    pub fn total_weekly_hours(&self) -> f64 {
        self.weekly_hours + self.commute_hours_per_week()
    }
}

/// Monthly spend that exists only because of the job.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkCosts {
    pub commute_monthly_cost: f64,
    pub work_lunches_monthly_cost: f64,
    pub work_clothing_monthly_cost: f64,
    pub stress_spending_monthly_cost: f64,
}

impl WorkCosts {
    #[must_use]
    pub fn total(&self) -> f64 {
        self.commute_monthly_cost
            + self.work_lunches_monthly_cost
            + self.work_clothing_monthly_cost
            + self.stress_spending_monthly_cost
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealWageInputs {
    pub annual_salary: f64,
    pub work_hours: WorkHours,
    pub work_costs: WorkCosts,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RealWageCalculation {
    pub stated_hourly_wage: f64,
    pub real_hourly_wage: f64,
    pub monthly_real_income: f64,
    pub total_monthly_hours: f64,
}

impl RealWageCalculation {
    #[must_use]
    pub fn efficiency(&self) -> WageEfficiency {
        WageEfficiency::classify(self.stated_hourly_wage, self.real_hourly_wage)
    }
}

pub fn calculate_real_hourly_wage(
    inputs: &RealWageInputs,
) -> Result<RealWageCalculation, CalculatorError> {
    let salary = check_amount("annual salary", inputs.annual_salary)?;
    let hours = &inputs.work_hours;
    check_amount("weekly hours", hours.weekly_hours)?;
    check_amount("commute minutes", hours.commute_daily_minutes)?;
    check_amount("work days", hours.work_days_per_week)?;
    let costs = &inputs.work_costs;
    for (field, value) in [
        ("commute cost", costs.commute_monthly_cost),
        ("lunch cost", costs.work_lunches_monthly_cost),
        ("clothing cost", costs.work_clothing_monthly_cost),
        ("stress spending", costs.stress_spending_monthly_cost),
    ] {
        check_amount(field, value)?;
    }

    let total_monthly_hours = hours.total_weekly_hours() * WEEKS_PER_MONTH;
    let monthly_real_income = salary / 12.0 - costs.total();
    let real_hourly_wage = if total_monthly_hours > 0.0 {
        monthly_real_income / total_monthly_hours
    } else {
        0.0
    };

    Ok(RealWageCalculation {
        stated_hourly_wage: salary / STATED_HOURS_PER_YEAR,
        real_hourly_wage,
        monthly_real_income,
        total_monthly_hours,
    })
}

#[must_use]
pub fn format_hourly_wage(wage: f64) -> String {
    format!("${wage:.2}")
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WageComparison {
    pub difference: f64,
    pub percentage_reduction: f64,
    pub message: &'static str,
}

#[must_use]
pub fn compare_wages(stated: f64, real: f64) -> WageComparison {
    let difference = stated - real;
    let percentage_reduction = if stated > 0.0 {
        difference / stated * 100.0
    } else {
        0.0
    };
    let message = if percentage_reduction >= 50.0 {
        "Your real wage is less than half of what you thought. This is the hidden cost of your job."
    } else if percentage_reduction >= 30.0 {
        "You're losing nearly a third of your stated wage to hidden costs. Time to reevaluate."
    } else if percentage_reduction >= 15.0 {
        "The hidden costs are eating into your compensation more than you realized."
    } else if percentage_reduction > 0.0 {
        "Even small hidden costs add up. Every dollar matters on your journey to freedom."
    } else {
        "You're doing well at minimizing work-related costs!"
    };
    WageComparison {
        difference,
        percentage_reduction,
        message,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeImpact {
    pub hours_per_week: f64,
    pub hours_per_month: f64,
    pub hours_per_year: f64,
    /// Whole 24-hour days given to work and commute each year.
    pub days_per_year: f64,
}

#[must_use]
pub fn calculate_time_impact(hours: &WorkHours) -> TimeImpact {
    let hours_per_week = hours.total_weekly_hours();
    let hours_per_year = hours_per_week * 52.0;
    TimeImpact {
        hours_per_week,
        hours_per_month: hours_per_week * WEEKS_PER_MONTH,
        hours_per_year,
        days_per_year: hours_per_year / 24.0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WageEfficiency {
    High,
    Medium,
    Low,
}

impl WageEfficiency {
    /// High keeps at least 80 % of the stated wage, medium at least 60 %.
    #[must_use]
    pub fn classify(stated: f64, real: f64) -> Self {
        if real >= stated * 0.8 {
            Self::High
        } else if real >= stated * 0.6 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        RealWageInputs, WageEfficiency, WorkCosts, WorkHours, calculate_real_hourly_wage,
        calculate_time_impact, compare_wages, format_hourly_wage,
    };

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn stated_wage_uses_2080_hours() {
        let calc = calculate_real_hourly_wage(&RealWageInputs {
            annual_salary: 104_000.0,
            ..RealWageInputs::default()
        })
        .unwrap();
        assert!(close(calc.stated_hourly_wage, 50.0));
    }

    #[test]
    fn commute_and_costs_lower_the_real_wage() {
        let inputs = RealWageInputs {
            annual_salary: 60_000.0,
            work_hours: WorkHours {
                weekly_hours: 45.0,
                commute_daily_minutes: 60.0,
                work_days_per_week: 5.0,
            },
            work_costs: WorkCosts {
                commute_monthly_cost: 200.0,
                work_lunches_monthly_cost: 150.0,
                work_clothing_monthly_cost: 50.0,
                stress_spending_monthly_cost: 100.0,
            },
        };
        let calc = calculate_real_hourly_wage(&inputs).unwrap();
        // (5000 - 500) / (50 * 4.33)
        assert!(close(calc.monthly_real_income, 4_500.0));
        assert!(close(calc.total_monthly_hours, 216.5));
        assert!(close(calc.real_hourly_wage, 4_500.0 / 216.5));
        assert_eq!(calc.efficiency(), WageEfficiency::Low);
    }

    #[test]
    fn zero_hours_yield_zero_real_wage() {
        let inputs = RealWageInputs {
            annual_salary: 50_000.0,
            work_hours: WorkHours {
                weekly_hours: 0.0,
                commute_daily_minutes: 0.0,
                work_days_per_week: 0.0,
            },
            work_costs: WorkCosts::default(),
        };
        assert_eq!(calculate_real_hourly_wage(&inputs).unwrap().real_hourly_wage, 0.0);
    }

    #[test]
    fn negative_salary_is_rejected() {
        let inputs = RealWageInputs {
            annual_salary: -10.0,
            ..RealWageInputs::default()
        };
        assert!(calculate_real_hourly_wage(&inputs).is_err());
    }

    #[test]
    fn comparison_messages_follow_reduction() {
        assert!(compare_wages(30.0, 14.0).message.starts_with("Your real wage is less than half"));
        assert!(compare_wages(30.0, 20.0).message.starts_with("You're losing nearly a third"));
        assert!(compare_wages(30.0, 25.0).message.starts_with("The hidden costs"));
        assert!(compare_wages(30.0, 29.0).message.starts_with("Even small hidden costs"));
        assert!(compare_wages(30.0, 30.0).message.starts_with("You're doing well"));
        assert_eq!(compare_wages(0.0, 5.0).percentage_reduction, 0.0);
    }

    #[test]
    fn time_impact_includes_commute() {
        let impact = calculate_time_impact(&WorkHours::default());
        assert!(close(impact.hours_per_week, 42.5));
        assert!(close(impact.hours_per_year, 2_210.0));
        assert!(close(impact.days_per_year, 2_210.0 / 24.0));
    }

    #[test]
    fn efficiency_bands() {
        assert_eq!(WageEfficiency::classify(20.0, 16.0), WageEfficiency::High);
        assert_eq!(WageEfficiency::classify(20.0, 12.0), WageEfficiency::Medium);
        assert_eq!(WageEfficiency::classify(20.0, 11.99), WageEfficiency::Low);
    }

    #[test]
    fn wage_formats_as_dollars() {
        assert_eq!(format_hourly_wage(18.5), "$18.50");
        assert_eq!(format_hourly_wage(0.0), "$0.00");
    }
}
