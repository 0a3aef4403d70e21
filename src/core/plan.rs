use super::milestones::project_milestones;
use super::solver::solve;
use super::types::{GoalError, GoalPlan, GoalSpec, MonthBalance, ensure_amount};

/// Solves the required contribution and projects milestones with it.
pub fn plan_goal(spec: &GoalSpec) -> Result<GoalPlan, GoalError> {
    let result = solve(spec)?;
    let milestones = project_milestones(spec, result.monthly_savings)?;
    Ok(GoalPlan {
        spec: *spec,
        result,
        total_contributions: result.monthly_savings * spec.total_months as f64
            + spec.current_savings,
        milestones,
    })
}

/// Same as [`plan_goal`], but milestones follow the contribution the saver
/// actually intends to make rather than the solved one.
pub fn plan_with_contribution(
    spec: &GoalSpec,
    monthly_contribution: f64,
) -> Result<GoalPlan, GoalError> {
    let result = solve(spec)?;
    let milestones = project_milestones(spec, monthly_contribution)?;
    Ok(GoalPlan {
        spec: *spec,
        result,
        total_contributions: monthly_contribution * spec.total_months as f64
            + spec.current_savings,
        milestones,
    })
}

pub fn balance_schedule(
    spec: &GoalSpec,
    monthly_savings: f64,
) -> Result<Vec<MonthBalance>, GoalError> {
    spec.validate()?;
    ensure_amount("monthly_savings", monthly_savings)?;

    let model = spec.growth_model();
    let mut balance = spec.current_savings;
    let mut contributed = spec.current_savings;
    let mut schedule = Vec::with_capacity(spec.total_months as usize);
    for month in 1..=spec.total_months {
        balance = model.step(balance, monthly_savings);
        contributed += monthly_savings;
        schedule.push(MonthBalance {
            month,
            contributed,
            balance,
        });
    }
    Ok(schedule)
}
