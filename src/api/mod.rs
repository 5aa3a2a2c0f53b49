use axum::{
    Router,
    extract::Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{
    ComparisonResult, DEFAULT_HORIZON_MONTHS, Decision, GoalTag, Horizon, ProjectionResult,
    Recommendation, RiskAssessment, Rng, UserProfile, assess, break_even_month, compare, project,
    recommend,
};

pub const MAX_HORIZON_MONTHS: u32 = 1_200;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliGoal {
    Savings,
    Investment,
    Property,
    Car,
    Travel,
    Retirement,
    Education,
    Business,
}

impl From<CliGoal> for GoalTag {
    fn from(value: CliGoal) -> Self {
        match value {
            CliGoal::Savings => GoalTag::Savings,
            CliGoal::Investment => GoalTag::Investment,
            CliGoal::Property => GoalTag::Property,
            CliGoal::Car => GoalTag::Car,
            CliGoal::Travel => GoalTag::Travel,
            CliGoal::Retirement => GoalTag::Retirement,
            CliGoal::Education => GoalTag::Education,
            CliGoal::Business => GoalTag::Business,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "whatif",
    about = "Simulate the long-term impact of a personal-finance decision on your savings"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the JSON API over HTTP
    Serve {
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
    /// Project one decision and print its impact, risk and recommendations
    Project {
        #[command(flatten)]
        profile: ProfileArgs,
        #[command(flatten)]
        horizon: HorizonArgs,
        #[arg(
            long,
            help = "Decision as JSON, e.g. '{\"name\":\"Trip\",\"type\":\"travel\",\"data\":{\"totalCost\":15000}}'"
        )]
        decision: String,
    },
    /// Project two decisions against the same profile and print the difference
    Compare {
        #[command(flatten)]
        profile: ProfileArgs,
        #[command(flatten)]
        horizon: HorizonArgs,
        #[arg(long, help = "First decision as JSON")]
        decision_a: String,
        #[arg(long, help = "Second decision as JSON")]
        decision_b: String,
    },
}

#[derive(Args, Debug, Clone)]
struct ProfileArgs {
    #[arg(long, allow_negative_numbers = true, help = "Savings available today")]
    current_savings: f64,
    #[arg(long, allow_negative_numbers = true)]
    monthly_income: f64,
    #[arg(
        long,
        allow_negative_numbers = true,
        help = "Baseline monthly expenses before the decision"
    )]
    monthly_expenses: f64,
    #[arg(long = "goal", value_enum, help = "Financial goal; repeat for several")]
    goals: Vec<CliGoal>,
}

#[derive(Args, Debug, Clone)]
struct HorizonArgs {
    #[arg(long, default_value_t = DEFAULT_HORIZON_MONTHS, help = "Months to simulate after month 0")]
    months: u32,
    #[arg(long, help = "Seed for investment volatility; omit for a fresh random stream")]
    seed: Option<u64>,
    #[arg(long, help = "Date of month 0 as YYYY-MM-DD, defaults to today")]
    start_date: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectPayload {
    profile: UserProfile,
    decision: Decision,
    months: Option<u32>,
    seed: Option<u64>,
    start_date: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssessPayload {
    profile: UserProfile,
    decision: Decision,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ComparePayload {
    profile: UserProfile,
    decision_a: Decision,
    decision_b: Decision,
    months: Option<u32>,
    seed: Option<u64>,
    start_date: Option<String>,
}

#[derive(Debug, Clone)]
struct ProjectRequest {
    profile: UserProfile,
    decision: Decision,
    horizon: Horizon,
    seed: Option<u64>,
}

#[derive(Debug, Clone)]
struct CompareRequest {
    profile: UserProfile,
    decision_a: Decision,
    decision_b: Decision,
    horizon: Horizon,
    seed: Option<u64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectResponse {
    projection: ProjectionResult,
    risk: RiskAssessment,
    recommendations: Vec<Recommendation>,
    break_even_month: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub async fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Command::Serve { port } => run_http_server(port)
            .await
            .map_err(|e| format!("Server error: {e}")),
        Command::Project {
            profile,
            horizon,
            decision,
        } => {
            let request = project_request_from_args(profile, horizon, &decision)?;
            print_json(&build_project_response(&request)?)
        }
        Command::Compare {
            profile,
            horizon,
            decision_a,
            decision_b,
        } => {
            let request = compare_request_from_args(profile, horizon, &decision_a, &decision_b)?;
            print_json(&build_compare_response(&request)?)
        }
    }
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("whatif HTTP API listening on http://{addr}");
    tracing::info!("Local access: http://127.0.0.1:{port}/api/project");

    axum::serve(listener, router()).await
}

fn router() -> Router {
    Router::new()
        .route("/api/project", post(project_handler))
        .route("/api/assess", post(assess_handler))
        .route("/api/compare", post(compare_handler))
        .fallback(not_found_handler)
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn project_handler(body: String) -> Response {
    let result =
        project_request_from_json(&body).and_then(|request| build_project_response(&request));
    respond("project", result)
}

async fn assess_handler(body: String) -> Response {
    let result = serde_json::from_str::<AssessPayload>(&body)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))
        .and_then(|payload| {
            assess(&payload.decision, &payload.profile).map_err(|e| e.to_string())
        });
    respond("assess", result)
}

async fn compare_handler(body: String) -> Response {
    let result =
        compare_request_from_json(&body).and_then(|request| build_compare_response(&request));
    respond("compare", result)
}

fn respond<T: Serialize>(route: &str, result: Result<T, String>) -> Response {
    match result {
        Ok(body) => json_response(StatusCode::OK, body),
        Err(msg) => {
            tracing::warn!(route, error = %msg, "rejected request");
            error_response(StatusCode::BAD_REQUEST, &msg)
        }
    }
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

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to encode result: {e}"))?;
    println!("{json}");
    Ok(())
}

fn project_request_from_json(json: &str) -> Result<ProjectRequest, String> {
    let payload = serde_json::from_str::<ProjectPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    Ok(ProjectRequest {
        horizon: build_horizon(payload.months, payload.start_date.as_deref())?,
        profile: payload.profile,
        decision: payload.decision,
        seed: payload.seed,
    })
}

fn compare_request_from_json(json: &str) -> Result<CompareRequest, String> {
    let payload = serde_json::from_str::<ComparePayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    Ok(CompareRequest {
        horizon: build_horizon(payload.months, payload.start_date.as_deref())?,
        profile: payload.profile,
        decision_a: payload.decision_a,
        decision_b: payload.decision_b,
        seed: payload.seed,
    })
}

fn project_request_from_args(
    profile: ProfileArgs,
    horizon: HorizonArgs,
    decision: &str,
) -> Result<ProjectRequest, String> {
    Ok(ProjectRequest {
        decision: parse_decision("--decision", decision)?,
        horizon: build_horizon(Some(horizon.months), horizon.start_date.as_deref())?,
        seed: horizon.seed,
        profile: build_profile(profile),
    })
}

fn compare_request_from_args(
    profile: ProfileArgs,
    horizon: HorizonArgs,
    decision_a: &str,
    decision_b: &str,
) -> Result<CompareRequest, String> {
    Ok(CompareRequest {
        decision_a: parse_decision("--decision-a", decision_a)?,
        decision_b: parse_decision("--decision-b", decision_b)?,
        horizon: build_horizon(Some(horizon.months), horizon.start_date.as_deref())?,
        seed: horizon.seed,
        profile: build_profile(profile),
    })
}

fn build_profile(args: ProfileArgs) -> UserProfile {
    UserProfile {
        current_savings: args.current_savings,
        monthly_income: args.monthly_income,
        monthly_expenses: args.monthly_expenses,
        financial_goals: args.goals.into_iter().map(GoalTag::from).collect::<BTreeSet<_>>(),
    }
}

fn parse_decision(flag: &str, json: &str) -> Result<Decision, String> {
    serde_json::from_str(json).map_err(|e| format!("{flag} is not a valid decision: {e}"))
}

fn build_horizon(months: Option<u32>, start_date: Option<&str>) -> Result<Horizon, String> {
    let months = months.unwrap_or(DEFAULT_HORIZON_MONTHS);
    if months > MAX_HORIZON_MONTHS {
        return Err(format!("months must be <= {MAX_HORIZON_MONTHS}"));
    }

    match start_date {
        Some(raw) => {
            let start = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|e| format!("startDate must be YYYY-MM-DD: {e}"))?;
            Ok(Horizon::new(months, start))
        }
        None => Ok(Horizon::starting_today(months)),
    }
}

fn rng_for(seed: Option<u64>) -> Rng {
    seed.map(Rng::new).unwrap_or_else(Rng::from_entropy)
}

fn build_project_response(request: &ProjectRequest) -> Result<ProjectResponse, String> {
    let mut rng = rng_for(request.seed);
    let projection = project(
        &request.decision,
        &request.profile,
        &request.horizon,
        &mut rng,
    )
    .map_err(|e| e.to_string())?;
    let risk = assess(&request.decision, &request.profile).map_err(|e| e.to_string())?;
    let recommendations = recommend(&request.decision, &request.profile, &projection);

    Ok(ProjectResponse {
        break_even_month: break_even_month(&request.decision),
        projection,
        risk,
        recommendations,
    })
}

fn build_compare_response(request: &CompareRequest) -> Result<ComparisonResult, String> {
    let mut rng = rng_for(request.seed);
    compare(
        &request.decision_a,
        &request.decision_b,
        &request.profile,
        &request.horizon,
        &mut rng,
    )
    .map_err(|e| e.to_string())
}
