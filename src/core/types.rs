use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Completion thresholds reported by the milestone projector, ascending.
pub const MILESTONE_PERCENTAGES: [u32; 4] = [25, 50, 75, 100];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GoalError {
    #[error("invalid time horizon: {months} months (must be >= 1)")]
    InvalidHorizon { months: i64 },

    #[error("monthly rate must be >= 0, got {rate}")]
    NegativeRate { rate: f64 },

    #[error("{field} must be >= 0, got {value}")]
    NegativeAmount { field: &'static str, value: f64 },

    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    #[error("invalid amount: {input:?}")]
    InvalidAmount { input: String },
}

/// Parameters of a single savings goal, already normalized to months and a
/// decimal monthly rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalSpec {
    pub goal_amount: f64,
    pub current_savings: f64,
    pub total_months: u32,
    pub monthly_rate: f64,
}

impl GoalSpec {
    pub fn validate(&self) -> Result<(), GoalError> {
        if self.total_months == 0 {
            return Err(GoalError::InvalidHorizon { months: 0 });
        }
        ensure_amount("goal_amount", self.goal_amount)?;
        ensure_amount("current_savings", self.current_savings)?;
        if !self.monthly_rate.is_finite() {
            return Err(GoalError::NonFinite {
                field: "monthly_rate",
            });
        }
        if self.monthly_rate < 0.0 {
            return Err(GoalError::NegativeRate {
                rate: self.monthly_rate,
            });
        }
        Ok(())
    }

    pub fn growth_model(&self) -> GrowthModel {
        GrowthModel::from_monthly_rate(self.monthly_rate)
    }
}

pub(crate) fn ensure_amount(field: &'static str, value: f64) -> Result<(), GoalError> {
    if !value.is_finite() {
        return Err(GoalError::NonFinite { field });
    }
    if value < 0.0 {
        return Err(GoalError::NegativeAmount { field, value });
    }
    Ok(())
}

/// How a balance evolves from one month to the next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GrowthModel {
    Linear,
    Compounding { monthly_rate: f64 },
}

impl GrowthModel {
    pub fn from_monthly_rate(monthly_rate: f64) -> Self {
        if monthly_rate > 0.0 {
            GrowthModel::Compounding { monthly_rate }
        } else {
            GrowthModel::Linear
        }
    }

    /// Contribution lands before the month's growth is applied.
    pub fn step(self, balance: f64, contribution: f64) -> f64 {
        match self {
            GrowthModel::Linear => balance + contribution,
            GrowthModel::Compounding { monthly_rate } => {
                (balance + contribution) * (1.0 + monthly_rate)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolverResult {
    pub monthly_savings: f64,
    pub total_interest: f64,
}

/// `months` is `Some(0)` when current savings already cover the threshold and
/// `None` when the threshold is not reached within the horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub percentage: u32,
    pub months: Option<u32>,
}

impl Milestone {
    pub fn is_reached(&self) -> bool {
        self.months.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalPlan {
    pub spec: GoalSpec,
    pub result: SolverResult,
    pub total_contributions: f64,
    pub milestones: Vec<Milestone>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthBalance {
    pub month: u32,
    pub contributed: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthInputs {
    pub initial_investment: f64,
    pub monthly_contribution: f64,
    pub annual_rate_percent: f64,
    pub years: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthYear {
    pub year: u32,
    pub total_contributions: f64,
    pub total_interest: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthProjection {
    pub final_balance: f64,
    pub total_contributions: f64,
    pub total_interest: f64,
    pub years: Vec<GrowthYear>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub category: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetWorthInputs {
    pub assets: Vec<LineItem>,
    pub liabilities: Vec<LineItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetWorthSummary {
    pub total_assets: f64,
    pub total_liabilities: f64,
    pub net_worth: f64,
    pub debt_to_asset_ratio: Option<f64>,
    pub asset_categories: Vec<LineItem>,
    pub liability_categories: Vec<LineItem>,
}
