mod compare;
mod engine;
mod types;

pub use compare::{describe_duration, format_duration, spending_crossover_month};
pub use engine::{monthly_growth_multiplier, simulate_buy, simulate_rent};
pub use types::{
    BuyInputs, BuyMonthSnapshot, BuyResult, RentInputs, RentMonthSnapshot, RentResult,
    SimulationError,
};
