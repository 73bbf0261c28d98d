use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct BuyInputs {
    pub initial_savings: f64,
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub annual_income_growth: f64,
    pub annual_inflation_rate: f64,
    pub annual_invest_return: f64,
    pub property_price: f64,
    pub mortgage_term_years: u32,
    pub mortgage_interest_rate: f64,
    pub deposit_fraction: f64,
    pub owner_cost_initial: f64,
    pub annual_owner_cost_inflation: f64,
    pub annual_house_price_growth: f64,
    pub max_months: u32,
}

#[derive(Debug, Clone)]
pub struct RentInputs {
    pub initial_savings: f64,
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub annual_income_growth: f64,
    pub annual_inflation_rate: f64,
    pub annual_invest_return: f64,
    pub property_price: f64,
    pub monthly_rent: f64,
    pub annual_rent_inflation_rate: f64,
    pub annual_house_price_growth: f64,
    pub max_months: u32,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyMonthSnapshot {
    pub month: u32,
    pub house_price: f64,
    pub portfolio: f64,
    pub net_wealth: f64,
    pub cumulative_spent: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentMonthSnapshot {
    pub month: u32,
    pub house_price: f64,
    pub portfolio: f64,
    pub cumulative_spent: f64,
}

#[derive(Debug, Clone)]
pub struct BuyResult {
    pub stop_month: Option<u32>,
    pub final_portfolio: f64,
    pub months: Vec<BuyMonthSnapshot>,
}

#[derive(Debug, Clone)]
pub struct RentResult {
    pub stop_month: Option<u32>,
    pub final_portfolio: f64,
    pub months: Vec<RentMonthSnapshot>,
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SimulationError {
    #[error(
        "initial savings of {initial_savings} cannot cover the required deposit of {deposit_amount}"
    )]
    InsufficientSavingsForDeposit {
        deposit_amount: f64,
        initial_savings: f64,
    },
}
