use tracing::debug;

use super::types::{GoalError, GoalSpec, GrowthModel, SolverResult};

/// Fixed monthly contribution needed to reach `goal_amount` after
/// `total_months`, treating contributions as an ordinary annuity on top of the
/// compounded existing balance.
pub fn solve(spec: &GoalSpec) -> Result<SolverResult, GoalError> {
    spec.validate()?;

    let result = match spec.growth_model() {
        GrowthModel::Linear => solve_linear(spec),
        GrowthModel::Compounding { monthly_rate } => solve_compounding(spec, monthly_rate),
    };
    debug!(
        goal_amount = spec.goal_amount,
        total_months = spec.total_months,
        monthly_savings = result.monthly_savings,
        "solved monthly contribution"
    );
    Ok(result)
}

fn solve_linear(spec: &GoalSpec) -> SolverResult {
    let remaining = spec.goal_amount - spec.current_savings;
    SolverResult {
        // Savings above the goal need no contribution, not a withdrawal.
        monthly_savings: (remaining / spec.total_months as f64).max(0.0),
        total_interest: 0.0,
    }
}

fn solve_compounding(spec: &GoalSpec, monthly_rate: f64) -> SolverResult {
    let months = spec.total_months as f64;
    let growth = growth_factor(monthly_rate, spec.total_months);
    let future_value_current = spec.current_savings * growth;
    let adjusted_goal = spec.goal_amount - future_value_current;

    if adjusted_goal <= 0.0 {
        return SolverResult {
            monthly_savings: 0.0,
            total_interest: future_value_current - spec.current_savings,
        };
    }

    let monthly_savings = adjusted_goal * monthly_rate / (growth - 1.0);
    SolverResult {
        monthly_savings,
        total_interest: spec.goal_amount - (monthly_savings * months + spec.current_savings),
    }
}

pub(crate) fn growth_factor(monthly_rate: f64, months: u32) -> f64 {
    (1.0 + monthly_rate).powf(months as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, prop_assert_eq, prop_assume, proptest};

    fn assert_close(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual}, tolerance {tol}"
        );
    }

    fn spec(goal_amount: f64, current_savings: f64, total_months: u32, monthly_rate: f64) -> GoalSpec {
        GoalSpec {
            goal_amount,
            current_savings,
            total_months,
            monthly_rate,
        }
    }

    // End-of-month deposits, the convention the annuity formula solves for.
    fn simulate_ordinary_annuity(spec: &GoalSpec, contribution: f64) -> f64 {
        let mut balance = spec.current_savings;
        for _ in 0..spec.total_months {
            balance = balance * (1.0 + spec.monthly_rate) + contribution;
        }
        balance
    }

    #[test]
    fn zero_rate_splits_remaining_goal_evenly() {
        let result = solve(&spec(12_000.0, 0.0, 12, 0.0)).expect("valid spec");
        assert_close(result.monthly_savings, 1_000.0, 1e-12);
        assert_close(result.total_interest, 0.0, 1e-12);
    }

    #[test]
    fn zero_rate_with_savings_above_goal_needs_nothing() {
        let result = solve(&spec(1_000.0, 4_000.0, 6, 0.0)).expect("valid spec");
        assert_eq!(result.monthly_savings, 0.0);
        assert_eq!(result.total_interest, 0.0);
    }

    #[test]
    fn balance_that_outgrows_goal_reports_passive_interest_only() {
        let result = solve(&spec(1_000.0, 2_000.0, 12, 0.01)).expect("valid spec");
        assert_eq!(result.monthly_savings, 0.0);
        assert_close(result.total_interest, 2_000.0 * (1.01f64.powi(12) - 1.0), 1e-9);
        assert_close(result.total_interest, 253.65, 0.01);
    }

    #[test]
    fn standard_annuity_round_trips_to_goal() {
        let goal = spec(10_000.0, 1_000.0, 24, 0.005);
        let result = solve(&goal).expect("valid spec");
        assert!(result.monthly_savings > 0.0);

        let final_balance = simulate_ordinary_annuity(&goal, result.monthly_savings);
        assert_close(final_balance, goal.goal_amount, goal.goal_amount * 1e-6);
        assert_close(
            result.total_interest,
            goal.goal_amount - (result.monthly_savings * 24.0 + goal.current_savings),
            1e-9,
        );
        assert!(result.total_interest > 0.0);
    }

    #[test]
    fn oracle_contribution_matches_hand_calculation() {
        // (1.01)^2 = 1.0201, adjusted goal 2010 - 0 = 2010, 2010 * 0.01 / 0.0201 = 1000
        let result = solve(&spec(2_010.0, 0.0, 2, 0.01)).expect("valid spec");
        assert_close(result.monthly_savings, 1_000.0, 1e-9);
        assert_close(result.total_interest, 10.0, 1e-9);
    }

    #[test]
    fn zero_horizon_is_rejected() {
        let err = solve(&spec(1_000.0, 0.0, 0, 0.01)).expect_err("must reject zero months");
        assert_eq!(err, GoalError::InvalidHorizon { months: 0 });
        assert!(err.to_string().contains("invalid time horizon"));
    }

    #[test]
    fn negative_rate_is_rejected() {
        let err = solve(&spec(1_000.0, 0.0, 12, -0.01)).expect_err("must reject negative rate");
        assert!(matches!(err, GoalError::NegativeRate { .. }));
    }

    #[test]
    fn non_finite_and_negative_amounts_are_rejected() {
        assert!(matches!(
            solve(&spec(f64::NAN, 0.0, 12, 0.0)),
            Err(GoalError::NonFinite { field: "goal_amount" })
        ));
        assert!(matches!(
            solve(&spec(1_000.0, -5.0, 12, 0.0)),
            Err(GoalError::NegativeAmount {
                field: "current_savings",
                ..
            })
        ));
        assert!(matches!(
            solve(&spec(1_000.0, 0.0, 12, f64::INFINITY)),
            Err(GoalError::NonFinite {
                field: "monthly_rate"
            })
        ));
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_zero_rate_split_is_exact(
            goal_cents in 0u32..50_000_000,
            savings_share_bp in 0u32..10_001,
            months in 1u32..600,
        ) {
            let goal_amount = goal_cents as f64 / 100.0;
            let current_savings = goal_amount * savings_share_bp as f64 / 10_000.0;
            let goal = spec(goal_amount, current_savings, months, 0.0);
            let result = solve(&goal).expect("valid spec");

            let reconstructed = result.monthly_savings * months as f64 + current_savings;
            prop_assert!((reconstructed - goal_amount).abs() <= goal_amount.max(1.0) * 1e-9);
            prop_assert_eq!(result.total_interest, 0.0);
        }

        #[test]
        fn prop_positive_rate_round_trips_through_forward_simulation(
            goal_cents in 100_000u32..100_000_000,
            savings_share_bp in 0u32..9_000,
            months in 1u32..600,
            annual_rate_bp in 1u32..2_000,
        ) {
            let goal_amount = goal_cents as f64 / 100.0;
            let current_savings = goal_amount * savings_share_bp as f64 / 10_000.0;
            let monthly_rate = annual_rate_bp as f64 / 10_000.0 / 12.0;
            let goal = spec(goal_amount, current_savings, months, monthly_rate);
            prop_assume!(goal_amount > current_savings * growth_factor(monthly_rate, months));

            let result = solve(&goal).expect("valid spec");
            prop_assert!(result.monthly_savings > 0.0);

            let final_balance = simulate_ordinary_annuity(&goal, result.monthly_savings);
            prop_assert!((final_balance - goal_amount).abs() <= goal_amount * 1e-6);
        }

        #[test]
        fn prop_solver_is_idempotent(
            goal_cents in 0u32..100_000_000,
            savings_cents in 0u32..100_000_000,
            months in 1u32..600,
            annual_rate_bp in 0u32..2_000,
        ) {
            let goal = spec(
                goal_cents as f64 / 100.0,
                savings_cents as f64 / 100.0,
                months,
                annual_rate_bp as f64 / 10_000.0 / 12.0,
            );
            let first = solve(&goal).expect("valid spec");
            let second = solve(&goal).expect("valid spec");
            prop_assert_eq!(first, second);
            prop_assert!(first.monthly_savings >= 0.0);
            prop_assert!(first.monthly_savings.is_finite());
        }
    }
}
