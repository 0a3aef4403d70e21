use super::types::{GoalError, GoalSpec, MILESTONE_PERCENTAGES, Milestone, ensure_amount};

// Relative slack so a linear split that lands one ulp short still counts.
const REACH_TOLERANCE: f64 = 1e-9;

/// Months until each of the 25/50/75/100% thresholds is first reached when
/// `monthly_savings` is deposited at the start of every month.
pub fn project_milestones(
    spec: &GoalSpec,
    monthly_savings: f64,
) -> Result<Vec<Milestone>, GoalError> {
    spec.validate()?;
    ensure_amount("monthly_savings", monthly_savings)?;

    Ok(MILESTONE_PERCENTAGES
        .iter()
        .map(|&percentage| {
            let target = spec.goal_amount * percentage as f64 / 100.0;
            Milestone {
                percentage,
                months: months_to_reach(spec, monthly_savings, target),
            }
        })
        .collect())
}

pub fn months_to_reach(spec: &GoalSpec, monthly_savings: f64, target: f64) -> Option<u32> {
    if spec.current_savings >= target {
        return Some(0);
    }

    let model = spec.growth_model();
    let mut running = spec.current_savings;
    for month in 1..=spec.total_months {
        running = model.step(running, monthly_savings);
        if reaches(running, target) {
            return Some(month);
        }
    }
    None
}

fn reaches(balance: f64, target: f64) -> bool {
    balance >= target - target.abs() * REACH_TOLERANCE
}
