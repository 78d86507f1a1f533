use crate::utils::error::Result;
use crate::utils::validation::{
    validate_at_most, validate_non_negative, validate_positive_number, validate_range, Validate,
};
use serde::{Deserialize, Serialize};

pub const DISENGAGEMENT_PRODUCTIVITY_LOSS_FACTOR: f64 = 0.34;
pub const AVG_REPLACEMENT_COST_FACTOR: f64 = 1.25;
pub const WORKING_DAYS_PER_YEAR: f64 = 250.0;
pub const REVENUE_INCREASE_FACTOR_MIN: f64 = 0.02;
pub const REVENUE_INCREASE_FACTOR_MAX: f64 = 0.05;

/// Business figures supplied by the ROI calculator form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiInput {
    pub num_employees: u32,
    pub avg_annual_salary: f64,
    pub annual_revenue: f64,
    pub employees_who_left: f64,
    pub avg_extra_absenteeism_days_per_employee: f64,
    pub engagement_score: f64,
}

/// Derived cost/benefit figures. Never mutated after computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiResult {
    pub total_turnover_cost: f64,
    pub total_disengagement_cost: f64,
    pub total_absenteeism_cost: f64,
    pub total_hidden_loss: f64,
    pub potential_savings_min: f64,
    pub potential_savings_max: f64,
    pub potential_revenue_increase_min: f64,
    pub potential_revenue_increase_max: f64,
}

impl Validate for RoiInput {
    fn validate(&self) -> Result<()> {
        validate_positive_number("numEmployees", self.num_employees, 1)?;
        validate_non_negative("avgAnnualSalary", self.avg_annual_salary)?;
        validate_non_negative("annualRevenue", self.annual_revenue)?;
        validate_non_negative("employeesWhoLeft", self.employees_who_left)?;
        validate_at_most(
            "employeesWhoLeft",
            self.employees_who_left,
            f64::from(self.num_employees),
            "numEmployees",
        )?;
        validate_non_negative(
            "avgExtraAbsenteeismDaysPerEmployee",
            self.avg_extra_absenteeism_days_per_employee,
        )?;
        validate_range("engagementScore", self.engagement_score, 1.0, 10.0)?;
        Ok(())
    }
}

/// Maps validated business inputs to cost/benefit estimates.
///
/// Total and side-effect free; callers are expected to have run
/// [`Validate::validate`] on the input first.
pub fn compute(input: &RoiInput) -> RoiResult {
    let cost_per_replacement = input.avg_annual_salary * AVG_REPLACEMENT_COST_FACTOR;
    let total_turnover_cost = input.employees_who_left * cost_per_replacement;

    let (productivity_loss_cost, absenteeism_cost) =
        disengagement_costs(input, input.engagement_score);
    let total_disengagement_cost = productivity_loss_cost + absenteeism_cost;
    let total_hidden_loss = total_turnover_cost + total_disengagement_cost;

    // Savings cap the improved score at 10; the revenue projections below use
    // the raw bumped score even past 10.
    let potential_savings_min = savings_at(input, total_disengagement_cost, 1.0);
    let potential_savings_max = savings_at(input, total_disengagement_cost, 2.0);

    let potential_revenue_increase_min =
        input.annual_revenue * REVENUE_INCREASE_FACTOR_MIN * (input.engagement_score + 1.0) / 10.0;
    let potential_revenue_increase_max =
        input.annual_revenue * REVENUE_INCREASE_FACTOR_MAX * (input.engagement_score + 2.0) / 10.0;

    RoiResult {
        total_turnover_cost,
        total_disengagement_cost,
        total_absenteeism_cost: absenteeism_cost,
        total_hidden_loss,
        potential_savings_min,
        potential_savings_max,
        potential_revenue_increase_min,
        potential_revenue_increase_max,
    }
}

fn disengagement_costs(input: &RoiInput, engagement_score: f64) -> (f64, f64) {
    let influence_factor = (10.0 - engagement_score) / 10.0;
    let avg_daily_salary = input.avg_annual_salary / WORKING_DAYS_PER_YEAR;

    let productivity_loss = f64::from(input.num_employees)
        * input.avg_annual_salary
        * influence_factor
        * DISENGAGEMENT_PRODUCTIVITY_LOSS_FACTOR;
    let absenteeism = f64::from(input.num_employees)
        * input.avg_extra_absenteeism_days_per_employee
        * avg_daily_salary
        * influence_factor;

    (productivity_loss, absenteeism)
}

fn savings_at(input: &RoiInput, current_disengagement_cost: f64, delta: f64) -> f64 {
    let improved_score = (input.engagement_score + delta).min(10.0);
    let (productivity_loss, absenteeism) = disengagement_costs(input, improved_score);
    (current_disengagement_cost - (productivity_loss + absenteeism)).max(0.0)
}
