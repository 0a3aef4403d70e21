use std::fmt::Write as _;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use crate::core::{
    GoalSpec, GrowthInputs, LineItem, NetWorthInputs, format_currency, format_percentage,
    horizon_from_dates, monthly_rate_from_annual_percent, parse_amount, project_growth,
    summarize_net_worth,
};

use super::{GoalRequest, GoalResponse, build_goal_response};

#[derive(Parser, Debug)]
#[command(
    name = "nestegg",
    version,
    about = "Savings goal, investment growth and net worth calculators"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the JSON HTTP API
    Serve {
        /// Port to listen on; defaults to NESTEGG_PORT or 8080
        #[arg(long)]
        port: Option<u16>,
    },

    /// Monthly contribution and milestones for a savings goal
    SavingsGoal(GoalArgs),

    /// Year-by-year growth of an investment with monthly contributions
    Investment(GrowthArgs),

    /// Net worth from asset and liability line items
    NetWorth(NetWorthArgs),
}

#[derive(Args, Debug, Clone)]
pub struct GoalArgs {
    #[arg(long, value_parser = parse_amount_arg, help = "Amount to save, e.g. 12000 or $12,000")]
    pub(crate) goal_amount: f64,
    #[arg(long, value_parser = parse_amount_arg, default_value_t = 0.0)]
    pub(crate) current_savings: f64,
    #[arg(long, conflicts_with = "target_date", help = "Months until the goal is due")]
    pub(crate) months: Option<u32>,
    #[arg(long, help = "Date the goal is due (YYYY-MM-DD)")]
    pub(crate) target_date: Option<NaiveDate>,
    #[arg(long, help = "Date saving starts (YYYY-MM-DD); defaults to today")]
    pub(crate) start_date: Option<NaiveDate>,
    #[arg(
        long,
        default_value_t = 0.0,
        help = "Expected annual interest rate in percent, e.g. 4.5"
    )]
    pub(crate) annual_rate: f64,
    #[arg(
        long,
        value_parser = parse_amount_arg,
        help = "Contribution you plan to make; milestones follow it instead of the solved amount"
    )]
    pub(crate) monthly_contribution: Option<f64>,
    #[arg(long, help = "Include the month-by-month balance schedule")]
    pub(crate) schedule: bool,
    #[arg(long, help = "Print JSON instead of a text report")]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct GrowthArgs {
    #[arg(long, value_parser = parse_amount_arg, default_value_t = 0.0)]
    pub(crate) initial: f64,
    #[arg(long, value_parser = parse_amount_arg, default_value_t = 0.0)]
    pub(crate) monthly: f64,
    #[arg(long, help = "Expected annual return in percent, e.g. 7")]
    pub(crate) annual_rate: f64,
    #[arg(long)]
    pub(crate) years: u32,
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct NetWorthArgs {
    #[arg(long = "asset", value_parser = parse_line_item, help = "category=amount, repeatable")]
    pub(crate) assets: Vec<LineItem>,
    #[arg(long = "liability", value_parser = parse_line_item, help = "category=amount, repeatable")]
    pub(crate) liabilities: Vec<LineItem>,
    #[arg(long)]
    pub(crate) json: bool,
}

fn parse_amount_arg(raw: &str) -> Result<f64, String> {
    parse_amount(raw).map_err(|e| e.to_string())
}

fn parse_line_item(raw: &str) -> Result<LineItem, String> {
    let (category, amount) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected category=amount, got {raw:?}"))?;
    let amount = parse_amount_arg(amount)?;
    if amount < 0.0 {
        return Err(format!("amount for {category:?} must be >= 0"));
    }
    Ok(LineItem {
        category: category.trim().to_string(),
        amount,
    })
}

pub(crate) fn build_goal_request(args: GoalArgs, today: NaiveDate) -> Result<GoalRequest, String> {
    if !args.goal_amount.is_finite() || args.goal_amount <= 0.0 {
        return Err("--goal-amount must be > 0".to_string());
    }
    if !args.current_savings.is_finite() || args.current_savings < 0.0 {
        return Err("--current-savings must be >= 0".to_string());
    }
    if !args.annual_rate.is_finite() || args.annual_rate < 0.0 {
        return Err("--annual-rate must be >= 0".to_string());
    }
    if let Some(contribution) = args.monthly_contribution {
        if !contribution.is_finite() || contribution < 0.0 {
            return Err("--monthly-contribution must be >= 0".to_string());
        }
    }

    let total_months = match (args.months, args.target_date) {
        (Some(_), Some(_)) => {
            return Err("use either --months or --target-date, not both".to_string());
        }
        (Some(0), None) => return Err("--months must be >= 1".to_string()),
        (Some(months), None) => months,
        (None, Some(target)) => {
            let start = args.start_date.unwrap_or(today);
            horizon_from_dates(start, target)
                .map_err(|e| format!("--target-date must be in a later month than the start: {e}"))?
        }
        (None, None) => return Err("one of --months or --target-date is required".to_string()),
    };

    Ok(GoalRequest {
        spec: GoalSpec {
            goal_amount: args.goal_amount,
            current_savings: args.current_savings,
            total_months,
            monthly_rate: monthly_rate_from_annual_percent(args.annual_rate),
        },
        annual_rate_percent: args.annual_rate,
        monthly_contribution: args.monthly_contribution,
        include_schedule: args.schedule,
    })
}

pub(crate) fn build_growth_inputs(args: &GrowthArgs) -> Result<GrowthInputs, String> {
    if args.years == 0 {
        return Err("--years must be >= 1".to_string());
    }
    if !args.annual_rate.is_finite() || args.annual_rate < 0.0 {
        return Err("--annual-rate must be >= 0".to_string());
    }
    if !args.initial.is_finite() || args.initial < 0.0 {
        return Err("--initial must be >= 0".to_string());
    }
    if !args.monthly.is_finite() || args.monthly < 0.0 {
        return Err("--monthly must be >= 0".to_string());
    }
    Ok(GrowthInputs {
        initial_investment: args.initial,
        monthly_contribution: args.monthly,
        annual_rate_percent: args.annual_rate,
        years: args.years,
    })
}

/// Runs a calculator subcommand and returns what should be printed.
pub fn run_command(command: Command, today: NaiveDate) -> Result<String, String> {
    match command {
        Command::Serve { .. } => Err("serve is handled by the server entry point".to_string()),
        Command::SavingsGoal(args) => {
            let json = args.json;
            let request = build_goal_request(args, today)?;
            let response = build_goal_response(&request).map_err(|e| e.to_string())?;
            if json {
                to_json(&response)
            } else {
                Ok(render_goal_report(&request, &response))
            }
        }
        Command::Investment(args) => {
            let inputs = build_growth_inputs(&args)?;
            let projection = project_growth(&inputs).map_err(|e| e.to_string())?;
            if args.json {
                return to_json(&projection);
            }
            let mut out = String::new();
            let _ = writeln!(
                out,
                "Investing {} up front and {} a month at {} for {} years",
                format_currency(inputs.initial_investment),
                format_currency(inputs.monthly_contribution),
                format_percentage(inputs.annual_rate_percent, 2),
                inputs.years
            );
            let _ = writeln!(out, "{:>5}  {:>16}  {:>16}  {:>16}", "Year", "Contributed", "Interest", "Balance");
            for year in &projection.years {
                let _ = writeln!(
                    out,
                    "{:>5}  {:>16}  {:>16}  {:>16}",
                    year.year,
                    format_currency(year.total_contributions),
                    format_currency(year.total_interest),
                    format_currency(year.balance)
                );
            }
            let _ = write!(out, "Final balance: {}", format_currency(projection.final_balance));
            Ok(out)
        }
        Command::NetWorth(args) => {
            let inputs = NetWorthInputs {
                assets: args.assets,
                liabilities: args.liabilities,
            };
            let summary = summarize_net_worth(&inputs).map_err(|e| e.to_string())?;
            if args.json {
                return to_json(&summary);
            }
            let mut out = String::new();
            let _ = writeln!(out, "Assets: {}", format_currency(summary.total_assets));
            for item in &summary.asset_categories {
                let _ = writeln!(out, "  {:<20} {:>16}", item.category, format_currency(item.amount));
            }
            let _ = writeln!(out, "Liabilities: {}", format_currency(summary.total_liabilities));
            for item in &summary.liability_categories {
                let _ = writeln!(out, "  {:<20} {:>16}", item.category, format_currency(item.amount));
            }
            if let Some(ratio) = summary.debt_to_asset_ratio {
                let _ = writeln!(out, "Debt to assets: {}", format_percentage(ratio * 100.0, 1));
            }
            let _ = write!(out, "Net worth: {}", format_currency(summary.net_worth));
            Ok(out)
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("Failed to encode JSON: {e}"))
}

pub(crate) fn render_goal_report(request: &GoalRequest, response: &GoalResponse) -> String {
    let spec = &request.spec;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Goal: {} in {} months at {} a year (starting from {})",
        format_currency(spec.goal_amount),
        spec.total_months,
        format_percentage(request.annual_rate_percent, 2),
        format_currency(spec.current_savings)
    );
    let _ = writeln!(
        out,
        "Monthly contribution needed: {}",
        format_currency(response.monthly_savings)
    );
    if let Some(planned) = request.monthly_contribution {
        let _ = writeln!(out, "Planned contribution: {}", format_currency(planned));
    }
    let _ = writeln!(
        out,
        "Total contributions: {}",
        format_currency(response.total_contributions)
    );
    let _ = writeln!(out, "Interest earned: {}", format_currency(response.total_interest));
    let _ = writeln!(out, "Milestones:");
    for milestone in &response.milestones {
        let when = match milestone.months {
            Some(0) => "already reached".to_string(),
            Some(1) => "month 1".to_string(),
            Some(months) => format!("month {months}"),
            None => format!("not reached within {} months", spec.total_months),
        };
        let _ = writeln!(out, "  {:>4}  {when}", format_percentage(milestone.percentage as f64, 0));
    }
    if let Some(schedule) = &response.schedule {
        let _ = writeln!(out, "{:>6}  {:>16}  {:>16}", "Month", "Contributed", "Balance");
        for row in schedule {
            let _ = writeln!(
                out,
                "{:>6}  {:>16}  {:>16}",
                row.month,
                format_currency(row.contributed),
                format_currency(row.balance)
            );
        }
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).expect("valid date")
    }

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("nestegg").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    fn goal_args(args: &[&str]) -> GoalArgs {
        let mut full = vec!["savings-goal"];
        full.extend_from_slice(args);
        match parse(&full).command {
            Command::SavingsGoal(args) => args,
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn savings_goal_accepts_currency_formatted_amounts() {
        let args = goal_args(&["--goal-amount", "$12,000", "--months", "12"]);
        let request = build_goal_request(args, today()).expect("valid request");
        assert_eq!(request.spec.goal_amount, 12_000.0);
        assert_eq!(request.spec.current_savings, 0.0);
        assert_eq!(request.spec.total_months, 12);
        assert_eq!(request.spec.monthly_rate, 0.0);
    }

    #[test]
    fn target_date_is_converted_from_start_or_today() {
        let args = goal_args(&["--goal-amount", "5000", "--target-date", "2027-10-01"]);
        let request = build_goal_request(args, today()).expect("valid request");
        assert_eq!(request.spec.total_months, 12);

        let args = goal_args(&[
            "--goal-amount",
            "5000",
            "--target-date",
            "2027-10-01",
            "--start-date",
            "2027-01-20",
        ]);
        let request = build_goal_request(args, today()).expect("valid request");
        assert_eq!(request.spec.total_months, 9);
    }

    #[test]
    fn months_and_target_date_conflict() {
        let result = Cli::try_parse_from([
            "nestegg",
            "savings-goal",
            "--goal-amount",
            "5000",
            "--months",
            "3",
            "--target-date",
            "2027-10-01",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn build_goal_request_rejects_bad_inputs() {
        let err = build_goal_request(goal_args(&["--goal-amount", "0", "--months", "12"]), today())
            .expect_err("zero goal");
        assert!(err.contains("--goal-amount"));

        let err = build_goal_request(goal_args(&["--goal-amount", "10", "--months", "0"]), today())
            .expect_err("zero months");
        assert!(err.contains("--months"));

        let err = build_goal_request(goal_args(&["--goal-amount", "10"]), today())
            .expect_err("missing horizon");
        assert!(err.contains("--target-date"));

        let err = build_goal_request(
            goal_args(&["--goal-amount", "10", "--target-date", "2026-10-30"]),
            today(),
        )
        .expect_err("same month");
        assert!(err.contains("invalid time horizon"));

        let err = build_goal_request(
            goal_args(&["--goal-amount", "10", "--months", "3", "--annual-rate=-2"]),
            today(),
        )
        .expect_err("negative rate");
        assert!(err.contains("--annual-rate"));
    }

    #[test]
    fn savings_goal_text_report_lists_milestones() {
        let command = parse(&[
            "savings-goal",
            "--goal-amount",
            "12000",
            "--current-savings",
            "3500",
            "--months",
            "12",
        ])
        .command;
        let report = run_command(command, today()).expect("report");
        assert!(report.contains("Monthly contribution needed: $708.33"));
        assert!(report.contains("25%  already reached"));
        assert!(report.contains("100%  month 12"));
    }

    #[test]
    fn savings_goal_json_uses_null_for_unreached_milestones() {
        let command = parse(&[
            "savings-goal",
            "--goal-amount",
            "12000",
            "--months",
            "12",
            "--monthly-contribution",
            "500",
            "--json",
        ])
        .command;
        let output = run_command(command, today()).expect("json");
        let value: serde_json::Value = serde_json::from_str(&output).expect("valid json");
        assert_eq!(value["monthlySavings"], 1000.0);
        assert_eq!(value["milestones"][1]["months"], 12);
        assert!(value["milestones"][3]["months"].is_null());
    }

    #[test]
    fn investment_and_net_worth_commands_render() {
        let command = parse(&[
            "investment",
            "--initial",
            "1000",
            "--monthly",
            "100",
            "--annual-rate",
            "0",
            "--years",
            "2",
        ])
        .command;
        let report = run_command(command, today()).expect("report");
        assert!(report.ends_with("Final balance: $3,400.00"));

        let command = parse(&[
            "net-worth",
            "--asset",
            "Cash=$5,000",
            "--asset",
            "Home=300000",
            "--liability",
            "Mortgage=200000",
        ])
        .command;
        let report = run_command(command, today()).expect("report");
        assert!(report.ends_with("Net worth: $105,000.00"));
    }

    #[test]
    fn line_items_require_category_and_non_negative_amount() {
        assert!(parse_line_item("Cash").is_err());
        assert!(parse_line_item("Cash=-5").is_err());
        assert_eq!(
            parse_line_item(" Car = 8,500 "),
            Ok(LineItem {
                category: "Car".to_string(),
                amount: 8_500.0,
            })
        );
    }
}
