//! Expenses: the record type, its persistence, and the aggregations over it.

mod aggregation;
mod core;
mod repository;
mod store;

pub use aggregation::{
    ALL_CATEGORIES_LABEL, CategoryFilter, category_totals, filter_by_category, filter_options,
    monthly_totals, total,
};
pub use core::{Category, DATE_FORMAT, Expense};
pub use repository::ExpenseRepository;
pub use store::{
    CsvExpenseStore, ExpenseStore, HEADER, InMemoryExpenseStore, SharedExpenseStore,
    read_expenses, write_expenses,
};
