mod cli;

use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::Config;
use crate::core::{
    GoalError, GoalSpec, LineItem, Milestone, MonthBalance, NetWorthInputs, balance_schedule,
    plan_goal, plan_with_contribution, project_growth, summarize_net_worth,
};

pub use cli::{Cli, Command, GoalArgs, GrowthArgs, NetWorthArgs, run_command};
use cli::{build_goal_request, build_growth_inputs};

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct GoalPayload {
    goal_amount: Option<f64>,
    current_savings: Option<f64>,
    months: Option<u32>,
    target_date: Option<NaiveDate>,
    start_date: Option<NaiveDate>,
    annual_rate: Option<f64>,
    monthly_contribution: Option<f64>,
    include_schedule: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct GrowthPayload {
    initial_investment: Option<f64>,
    monthly_contribution: Option<f64>,
    annual_rate: Option<f64>,
    years: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct NetWorthPayload {
    assets: Vec<LineItem>,
    liabilities: Vec<LineItem>,
}

/// A validated savings-goal request, shared by the CLI and the HTTP API.
#[derive(Debug, Clone)]
pub(crate) struct GoalRequest {
    pub(crate) spec: GoalSpec,
    pub(crate) annual_rate_percent: f64,
    pub(crate) monthly_contribution: Option<f64>,
    pub(crate) include_schedule: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GoalResponse {
    pub(crate) total_months: u32,
    pub(crate) monthly_rate: f64,
    pub(crate) monthly_savings: f64,
    pub(crate) total_interest: f64,
    pub(crate) total_contributions: f64,
    pub(crate) milestones: Vec<Milestone>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) schedule: Option<Vec<MonthBalance>>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

pub(crate) fn build_goal_response(request: &GoalRequest) -> Result<GoalResponse, GoalError> {
    let spec = &request.spec;
    let plan = match request.monthly_contribution {
        Some(contribution) => plan_with_contribution(spec, contribution)?,
        None => plan_goal(spec)?,
    };
    let schedule = if request.include_schedule {
        let contribution = request
            .monthly_contribution
            .unwrap_or(plan.result.monthly_savings);
        Some(balance_schedule(spec, contribution)?)
    } else {
        None
    };

    Ok(GoalResponse {
        total_months: spec.total_months,
        monthly_rate: spec.monthly_rate,
        monthly_savings: plan.result.monthly_savings,
        total_interest: plan.result.total_interest,
        total_contributions: plan.total_contributions,
        milestones: plan.milestones,
        schedule,
    })
}

pub fn router() -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/savings-goal",
            get(savings_goal_get_handler).post(savings_goal_post_handler),
        )
        .route(
            "/api/investment-growth",
            get(growth_get_handler).post(growth_post_handler),
        )
        .route("/api/net-worth", post(net_worth_handler))
        .fallback(not_found_handler)
}

pub async fn run_http_server(config: &Config) -> std::io::Result<()> {
    let addr = SocketAddr::new(config.host, config.port);
    let listener = TcpListener::bind(addr).await?;
    info!("nestegg HTTP API listening on http://{addr}");
    info!("Local access: http://127.0.0.1:{}/", config.port);

    axum::serve(listener, router()).await
}

async fn health_handler() -> Response {
    json_response(StatusCode::OK, HealthResponse { status: "ok" })
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn savings_goal_get_handler(Query(payload): Query<GoalPayload>) -> Response {
    savings_goal_handler_impl(payload).await
}

async fn savings_goal_post_handler(Json(payload): Json<GoalPayload>) -> Response {
    savings_goal_handler_impl(payload).await
}

async fn savings_goal_handler_impl(payload: GoalPayload) -> Response {
    let request = match goal_request_from_payload(payload, today()) {
        Ok(request) => request,
        Err(msg) => return bad_request("savings-goal", &msg),
    };

    match build_goal_response(&request) {
        Ok(response) => json_response(StatusCode::OK, response),
        Err(e) => bad_request("savings-goal", &e.to_string()),
    }
}

async fn growth_get_handler(Query(payload): Query<GrowthPayload>) -> Response {
    growth_handler_impl(payload).await
}

async fn growth_post_handler(Json(payload): Json<GrowthPayload>) -> Response {
    growth_handler_impl(payload).await
}

async fn growth_handler_impl(payload: GrowthPayload) -> Response {
    let mut args = default_growth_args_for_api();
    if let Some(v) = payload.initial_investment {
        args.initial = v;
    }
    if let Some(v) = payload.monthly_contribution {
        args.monthly = v;
    }
    if let Some(v) = payload.annual_rate {
        args.annual_rate = v;
    }
    if let Some(v) = payload.years {
        args.years = v;
    }

    let inputs = match build_growth_inputs(&args) {
        Ok(inputs) => inputs,
        Err(msg) => return bad_request("investment-growth", &msg),
    };
    match project_growth(&inputs) {
        Ok(projection) => json_response(StatusCode::OK, projection),
        Err(e) => bad_request("investment-growth", &e.to_string()),
    }
}

async fn net_worth_handler(Json(payload): Json<NetWorthPayload>) -> Response {
    let inputs = NetWorthInputs {
        assets: payload.assets,
        liabilities: payload.liabilities,
    };
    match summarize_net_worth(&inputs) {
        Ok(summary) => json_response(StatusCode::OK, summary),
        Err(e) => bad_request("net-worth", &e.to_string()),
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

fn bad_request(endpoint: &str, msg: &str) -> Response {
    warn!(endpoint, error = msg, "rejected calculator request");
    error_response(StatusCode::BAD_REQUEST, msg)
}

#[cfg(test)]
fn goal_request_from_json(json: &str, today: NaiveDate) -> Result<GoalRequest, String> {
    let payload = serde_json::from_str::<GoalPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    goal_request_from_payload(payload, today)
}

fn goal_request_from_payload(payload: GoalPayload, today: NaiveDate) -> Result<GoalRequest, String> {
    let mut args = default_goal_args_for_api();

    if let Some(v) = payload.goal_amount {
        args.goal_amount = v;
    }
    if let Some(v) = payload.current_savings {
        args.current_savings = v;
    }
    if let Some(v) = payload.target_date {
        args.target_date = Some(v);
        args.months = None;
    }
    if let Some(v) = payload.months {
        args.months = Some(v);
    }
    if let Some(v) = payload.start_date {
        args.start_date = Some(v);
    }
    if let Some(v) = payload.annual_rate {
        args.annual_rate = v;
    }
    if let Some(v) = payload.monthly_contribution {
        args.monthly_contribution = Some(v);
    }
    if let Some(v) = payload.include_schedule {
        args.schedule = v;
    }

    build_goal_request(args, today)
}

fn default_goal_args_for_api() -> GoalArgs {
    GoalArgs {
        goal_amount: 10_000.0,
        current_savings: 0.0,
        months: Some(12),
        target_date: None,
        start_date: None,
        annual_rate: 0.0,
        monthly_contribution: None,
        schedule: false,
        json: true,
    }
}

fn default_growth_args_for_api() -> GrowthArgs {
    GrowthArgs {
        initial: 10_000.0,
        monthly: 500.0,
        annual_rate: 7.0,
        years: 10,
        json: true,
    }
}
