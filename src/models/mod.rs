mod budget;
mod expenses;
mod summary;

pub use budget::BudgetModel;
pub use expenses::ExpenseMap;
pub use summary::{BudgetSummary, ExpenseShare, RowKind, TableRow};
