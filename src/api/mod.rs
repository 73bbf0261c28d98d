use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{
    BuyInputs, BuyMonthSnapshot, BuyResult, RentInputs, RentMonthSnapshot, RentResult,
    SimulationError, describe_duration, simulate_buy, simulate_rent, spending_crossover_month,
};

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SimulatePayload {
    initial_savings: Option<f64>,
    monthly_income: Option<f64>,
    monthly_expenses: Option<f64>,
    income_growth: Option<f64>,
    inflation: Option<f64>,
    investment_return: Option<f64>,
    house_price_growth: Option<f64>,

    property_price: Option<f64>,
    mortgage_term_years: Option<u32>,
    mortgage_rate: Option<f64>,
    deposit_percent: Option<f64>,
    owner_cost: Option<f64>,
    owner_cost_inflation: Option<f64>,

    monthly_rent: Option<f64>,
    rent_inflation: Option<f64>,

    max_months: Option<u32>,
}

#[derive(Parser, Debug)]
#[command(
    name = "hearth",
    about = "Buy-vs-rent homeownership comparator (mortgage now vs rent and invest toward a cash purchase)"
)]
struct Cli {
    #[arg(long, default_value_t = 73000.0, help = "Initial available savings")]
    initial_savings: f64,
    #[arg(long, default_value_t = 6500.0, help = "Monthly household income")]
    monthly_income: f64,
    #[arg(long, default_value_t = 3000.0, help = "Monthly non-housing expenses")]
    monthly_expenses: f64,
    #[arg(
        long,
        default_value_t = 3.0,
        help = "Annual income growth rate in percent"
    )]
    income_growth_rate: f64,
    #[arg(
        long,
        default_value_t = 2.0,
        help = "Annual inflation rate for non-housing expenses in percent"
    )]
    inflation_rate: f64,
    #[arg(
        long,
        default_value_t = 5.0,
        help = "Annual investment return rate in percent"
    )]
    investment_return_rate: f64,
    #[arg(
        long,
        default_value_t = 2.0,
        help = "Annual house price growth rate in percent"
    )]
    house_price_growth_rate: f64,
    #[arg(long, default_value_t = 430000.0, help = "Current property price")]
    property_price: f64,
    #[arg(
        long,
        default_value_t = 35,
        help = "Mortgage term in years, recorded for reference; the charge model stays interest-only"
    )]
    mortgage_term_years: u32,
    #[arg(
        long,
        default_value_t = 4.5,
        help = "Annual mortgage interest rate in percent"
    )]
    mortgage_interest_rate: f64,
    #[arg(
        long,
        default_value_t = 10.0,
        help = "Deposit as a percent of the property price"
    )]
    deposit_percentage: f64,
    #[arg(
        long,
        default_value_t = 200.0,
        help = "Initial monthly owner occupier housing cost"
    )]
    owner_cost: f64,
    #[arg(
        long,
        default_value_t = 5.0,
        help = "Annual owner occupier housing cost inflation in percent"
    )]
    owner_cost_inflation_rate: f64,
    #[arg(long, default_value_t = 1995.0, help = "Current monthly rent")]
    monthly_rent: f64,
    #[arg(
        long,
        default_value_t = 3.0,
        help = "Annual rent inflation rate in percent"
    )]
    rent_inflation_rate: f64,
    #[arg(
        long,
        default_value_t = 360,
        help = "Simulation horizon in months, e.g. 360 or 480"
    )]
    max_months: u32,
}

#[derive(Debug, Clone)]
struct ScenarioInputs {
    buy: BuyInputs,
    rent: RentInputs,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BuyReport {
    stop_month: Option<u32>,
    homeownership_after: Option<String>,
    final_portfolio: f64,
    months: Vec<BuyMonthSnapshot>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RentReport {
    stop_month: Option<u32>,
    homeownership_after: Option<String>,
    final_portfolio: f64,
    months: Vec<RentMonthSnapshot>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SimulateResponse {
    buy: BuyReport,
    rent: RentReport,
    crossover_month: Option<u32>,
    crossover_after: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn build_inputs(cli: Cli) -> Result<ScenarioInputs, String> {
    for (name, value) in [
        ("--initial-savings", cli.initial_savings),
        ("--monthly-income", cli.monthly_income),
        ("--monthly-expenses", cli.monthly_expenses),
        ("--property-price", cli.property_price),
        ("--owner-cost", cli.owner_cost),
        ("--monthly-rent", cli.monthly_rent),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(format!("{name} must be >= 0"));
        }
    }

    for (name, rate) in [
        ("--income-growth-rate", cli.income_growth_rate),
        ("--inflation-rate", cli.inflation_rate),
        ("--investment-return-rate", cli.investment_return_rate),
        ("--house-price-growth-rate", cli.house_price_growth_rate),
        ("--mortgage-interest-rate", cli.mortgage_interest_rate),
        ("--deposit-percentage", cli.deposit_percentage),
        ("--owner-cost-inflation-rate", cli.owner_cost_inflation_rate),
        ("--rent-inflation-rate", cli.rent_inflation_rate),
    ] {
        if !(0.0..=100.0).contains(&rate) {
            return Err(format!("{name} must be between 0 and 100"));
        }
    }

    if cli.max_months == 0 {
        return Err("--max-months must be > 0".to_string());
    }

    let annual_income_growth = cli.income_growth_rate / 100.0;
    let annual_inflation_rate = cli.inflation_rate / 100.0;
    let annual_invest_return = cli.investment_return_rate / 100.0;
    let annual_house_price_growth = cli.house_price_growth_rate / 100.0;

    Ok(ScenarioInputs {
        buy: BuyInputs {
            initial_savings: cli.initial_savings,
            monthly_income: cli.monthly_income,
            monthly_expenses: cli.monthly_expenses,
            annual_income_growth,
            annual_inflation_rate,
            annual_invest_return,
            property_price: cli.property_price,
            mortgage_term_years: cli.mortgage_term_years,
            mortgage_interest_rate: cli.mortgage_interest_rate / 100.0,
            deposit_fraction: cli.deposit_percentage / 100.0,
            owner_cost_initial: cli.owner_cost,
            annual_owner_cost_inflation: cli.owner_cost_inflation_rate / 100.0,
            annual_house_price_growth,
            max_months: cli.max_months,
        },
        rent: RentInputs {
            initial_savings: cli.initial_savings,
            monthly_income: cli.monthly_income,
            monthly_expenses: cli.monthly_expenses,
            annual_income_growth,
            annual_inflation_rate,
            annual_invest_return,
            property_price: cli.property_price,
            monthly_rent: cli.monthly_rent,
            annual_rent_inflation_rate: cli.rent_inflation_rate / 100.0,
            annual_house_price_growth,
            max_months: cli.max_months,
        },
    })
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route("/", get(index_handler))
        .route(
            "/api/simulate",
            get(simulate_get_handler).post(simulate_post_handler),
        )
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    println!("hearth HTTP API listening on http://{addr}");
    println!("Local access: http://127.0.0.1:{port}/");

    axum::serve(listener, app).await
}

pub fn run_once() -> Result<String, String> {
    let cli = Cli::parse();
    let inputs = build_inputs(cli)?;
    let response = run_simulation(&inputs).map_err(|e| e.to_string())?;
    serde_json::to_string_pretty(&response).map_err(|e| format!("failed to encode report: {e}"))
}

async fn index_handler() -> Response {
    json_response(
        StatusCode::OK,
        serde_json::json!({
            "service": "hearth",
            "endpoints": { "simulate": "/api/simulate" },
        }),
    )
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn simulate_get_handler(Query(payload): Query<SimulatePayload>) -> Response {
    simulate_handler_impl(payload).await
}

async fn simulate_post_handler(Json(payload): Json<SimulatePayload>) -> Response {
    simulate_handler_impl(payload).await
}

async fn simulate_handler_impl(payload: SimulatePayload) -> Response {
    let inputs = match api_request_from_payload(payload) {
        Ok(inputs) => inputs,
        Err(msg) => return error_response(StatusCode::BAD_REQUEST, &msg),
    };

    // A deposit the savings cannot cover means the buy scenario never started,
    // which is distinct from a scenario that ran and found no stop month.
    match run_simulation(&inputs) {
        Ok(response) => json_response(StatusCode::OK, response),
        Err(e) => error_response(StatusCode::UNPROCESSABLE_ENTITY, &e.to_string()),
    }
}

fn run_simulation(inputs: &ScenarioInputs) -> Result<SimulateResponse, SimulationError> {
    let buy = simulate_buy(&inputs.buy)?;
    let rent = simulate_rent(&inputs.rent);
    Ok(build_simulate_response(buy, rent))
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
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

fn api_request_from_payload(payload: SimulatePayload) -> Result<ScenarioInputs, String> {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.initial_savings {
        cli.initial_savings = v;
    }
    if let Some(v) = payload.monthly_income {
        cli.monthly_income = v;
    }
    if let Some(v) = payload.monthly_expenses {
        cli.monthly_expenses = v;
    }
    if let Some(v) = payload.income_growth {
        cli.income_growth_rate = v;
    }
    if let Some(v) = payload.inflation {
        cli.inflation_rate = v;
    }
    if let Some(v) = payload.investment_return {
        cli.investment_return_rate = v;
    }
    if let Some(v) = payload.house_price_growth {
        cli.house_price_growth_rate = v;
    }
    if let Some(v) = payload.property_price {
        cli.property_price = v;
    }
    if let Some(v) = payload.mortgage_term_years {
        cli.mortgage_term_years = v;
    }
    if let Some(v) = payload.mortgage_rate {
        cli.mortgage_interest_rate = v;
    }
    if let Some(v) = payload.deposit_percent {
        cli.deposit_percentage = v;
    }
    if let Some(v) = payload.owner_cost {
        cli.owner_cost = v;
    }
    if let Some(v) = payload.owner_cost_inflation {
        cli.owner_cost_inflation_rate = v;
    }
    if let Some(v) = payload.monthly_rent {
        cli.monthly_rent = v;
    }
    if let Some(v) = payload.rent_inflation {
        cli.rent_inflation_rate = v;
    }
    if let Some(v) = payload.max_months {
        cli.max_months = v;
    }

    build_inputs(cli)
}

fn default_cli_for_api() -> Cli {
    Cli {
        initial_savings: 73_000.0,
        monthly_income: 6_500.0,
        monthly_expenses: 3_000.0,
        income_growth_rate: 3.0,
        inflation_rate: 2.0,
        investment_return_rate: 5.0,
        house_price_growth_rate: 2.0,
        property_price: 430_000.0,
        mortgage_term_years: 35,
        mortgage_interest_rate: 4.5,
        deposit_percentage: 10.0,
        owner_cost: 200.0,
        owner_cost_inflation_rate: 5.0,
        monthly_rent: 1_995.0,
        rent_inflation_rate: 3.0,
        max_months: 360,
    }
}

fn build_simulate_response(buy: BuyResult, rent: RentResult) -> SimulateResponse {
    let crossover_month = spending_crossover_month(&buy.months, &rent.months);

    SimulateResponse {
        buy: BuyReport {
            stop_month: buy.stop_month,
            homeownership_after: buy.stop_month.map(describe_duration),
            final_portfolio: buy.final_portfolio,
            months: buy.months,
        },
        rent: RentReport {
            stop_month: rent.stop_month,
            homeownership_after: rent.stop_month.map(describe_duration),
            final_portfolio: rent.final_portfolio,
            months: rent.months,
        },
        crossover_month,
        crossover_after: crossover_month.map(describe_duration),
    }
}
