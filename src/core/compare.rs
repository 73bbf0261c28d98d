use super::types::{BuyMonthSnapshot, RentMonthSnapshot};

pub fn spending_crossover_month(
    buy: &[BuyMonthSnapshot],
    rent: &[RentMonthSnapshot],
) -> Option<u32> {
    if buy.len() != rent.len() {
        return None;
    }

    buy.iter()
        .zip(rent.iter())
        .find(|(b, r)| b.cumulative_spent < r.cumulative_spent)
        .map(|(b, _)| b.month)
}

pub fn format_duration(months: u32) -> (u32, u32) {
    (months / 12, months % 12)
}

pub fn describe_duration(months: u32) -> String {
    let (years, remaining_months) = format_duration(months);
    format!("{years} years, {remaining_months} months")
}
