use super::types::{
    BuyInputs, BuyMonthSnapshot, BuyResult, RentInputs, RentMonthSnapshot, RentResult,
    SimulationError,
};

pub fn monthly_growth_multiplier(annual_rate: f64) -> f64 {
    (1.0 + annual_rate).powf(1.0 / 12.0)
}

pub fn simulate_buy(inputs: &BuyInputs) -> Result<BuyResult, SimulationError> {
    let deposit_amount = inputs.deposit_fraction * inputs.property_price;
    if deposit_amount > inputs.initial_savings {
        return Err(SimulationError::InsufficientSavingsForDeposit {
            deposit_amount,
            initial_savings: inputs.initial_savings,
        });
    }

    let income_growth = monthly_growth_multiplier(inputs.annual_income_growth);
    let expense_growth = monthly_growth_multiplier(inputs.annual_inflation_rate);
    let invest_return = monthly_growth_multiplier(inputs.annual_invest_return);
    let owner_cost_growth = monthly_growth_multiplier(inputs.annual_owner_cost_inflation);
    let house_price_growth = monthly_growth_multiplier(inputs.annual_house_price_growth);
    // The mortgage charge stays simple interest on the original principal;
    // it is the one rate that is divided rather than compounded.
    let monthly_interest_rate = inputs.mortgage_interest_rate / 12.0;

    let outstanding_mortgage = inputs.property_price * (1.0 - inputs.deposit_fraction);
    let mut portfolio = inputs.initial_savings - deposit_amount;
    let mut income = inputs.monthly_income;
    let mut expenses = inputs.monthly_expenses;
    let mut owner_cost = inputs.owner_cost_initial;
    let mut house_price = inputs.property_price;
    let mut cumulative_spent = deposit_amount;

    let mut months = Vec::with_capacity(inputs.max_months as usize);
    let mut stop_month = None;

    for month in 0..inputs.max_months {
        // Snapshot and homeownership check both precede the month's cash flows.
        months.push(BuyMonthSnapshot {
            month,
            house_price,
            portfolio,
            net_wealth: (house_price - outstanding_mortgage) + portfolio,
            cumulative_spent,
        });

        if stop_month.is_none() && portfolio >= outstanding_mortgage {
            stop_month = Some(month);
        }

        let interest_payment = outstanding_mortgage * monthly_interest_rate;
        let disposable = (income - expenses - interest_payment - owner_cost).max(0.0);
        cumulative_spent += interest_payment + owner_cost;
        portfolio = portfolio * invest_return + disposable;

        income *= income_growth;
        expenses *= expense_growth;
        owner_cost *= owner_cost_growth;
        house_price *= house_price_growth;
    }

    Ok(BuyResult {
        stop_month,
        final_portfolio: portfolio,
        months,
    })
}

pub fn simulate_rent(inputs: &RentInputs) -> RentResult {
    let income_growth = monthly_growth_multiplier(inputs.annual_income_growth);
    let expense_growth = monthly_growth_multiplier(inputs.annual_inflation_rate);
    let invest_return = monthly_growth_multiplier(inputs.annual_invest_return);
    let rent_growth = monthly_growth_multiplier(inputs.annual_rent_inflation_rate);
    let house_price_growth = monthly_growth_multiplier(inputs.annual_house_price_growth);

    let mut portfolio = inputs.initial_savings;
    let mut income = inputs.monthly_income;
    let mut expenses = inputs.monthly_expenses;
    let mut rent = inputs.monthly_rent;
    let mut house_price = inputs.property_price;
    let mut cumulative_spent = 0.0;

    let mut months = Vec::with_capacity(inputs.max_months as usize);
    let mut stop_month = None;

    for month in 0..inputs.max_months {
        months.push(RentMonthSnapshot {
            month,
            house_price,
            portfolio,
            cumulative_spent,
        });

        if stop_month.is_none() && portfolio >= house_price {
            stop_month = Some(month);
        }

        let disposable = (income - expenses - rent).max(0.0);
        cumulative_spent += rent;
        portfolio = portfolio * invest_return + disposable;

        income *= income_growth;
        expenses *= expense_growth;
        rent *= rent_growth;
        house_price *= house_price_growth;
    }

    RentResult {
        stop_month,
        final_portfolio: portfolio,
        months,
    }
}
