use super::normalize::monthly_rate_from_annual_percent;
use super::types::{
    GoalError, GrowthInputs, GrowthModel, GrowthProjection, GrowthYear, ensure_amount,
};

/// Year-by-year balance of an investment with monthly compounding and a
/// fixed start-of-month contribution.
pub fn project_growth(inputs: &GrowthInputs) -> Result<GrowthProjection, GoalError> {
    validate_growth_inputs(inputs)?;

    let model = GrowthModel::from_monthly_rate(monthly_rate_from_annual_percent(
        inputs.annual_rate_percent,
    ));
    let mut balance = inputs.initial_investment;
    let mut contributions = inputs.initial_investment;
    let mut years = Vec::with_capacity(inputs.years as usize);

    for year in 1..=inputs.years {
        for _ in 0..12 {
            balance = model.step(balance, inputs.monthly_contribution);
            contributions += inputs.monthly_contribution;
        }
        years.push(GrowthYear {
            year,
            total_contributions: contributions,
            total_interest: balance - contributions,
            balance,
        });
    }

    Ok(GrowthProjection {
        final_balance: balance,
        total_contributions: contributions,
        total_interest: balance - contributions,
        years,
    })
}

fn validate_growth_inputs(inputs: &GrowthInputs) -> Result<(), GoalError> {
    if inputs.years == 0 {
        return Err(GoalError::InvalidHorizon { months: 0 });
    }
    ensure_amount("initial_investment", inputs.initial_investment)?;
    ensure_amount("monthly_contribution", inputs.monthly_contribution)?;
    if !inputs.annual_rate_percent.is_finite() {
        return Err(GoalError::NonFinite {
            field: "annual_rate_percent",
        });
    }
    if inputs.annual_rate_percent < 0.0 {
        return Err(GoalError::NegativeRate {
            rate: monthly_rate_from_annual_percent(inputs.annual_rate_percent),
        });
    }
    Ok(())
}
