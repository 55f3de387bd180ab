mod request;

pub use request::{parse_amount, BudgetRequest, FormError};

#[cfg(test)]
mod tests;
