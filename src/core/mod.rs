mod format;
mod growth;
mod milestones;
mod net_worth;
mod normalize;
mod plan;
mod solver;
mod types;

pub use format::{format_currency, format_percentage};
pub use growth::project_growth;
pub use milestones::{months_to_reach, project_milestones};
pub use net_worth::summarize_net_worth;
pub use normalize::{
    clamp_non_negative, horizon_from_dates, monthly_rate_from_annual_percent, months_between,
    parse_amount,
};
pub use plan::{balance_schedule, plan_goal, plan_with_contribution};
pub use solver::solve;
pub use types::{
    GoalError, GoalPlan, GoalSpec, GrowthInputs, GrowthModel, GrowthProjection, GrowthYear,
    LineItem, MILESTONE_PERCENTAGES, Milestone, MonthBalance, NetWorthInputs, NetWorthSummary,
    SolverResult,
};
