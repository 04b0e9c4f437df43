//! The expense page: the form for adding expenses, the list of expenses with
//! delete buttons, the category filter and its total, and the spending charts.
//!
//! Every action re-renders the page content with htmx instead of reloading
//! the whole page.

mod charts;
mod form;
mod handlers;
mod model;
mod view;

pub use handlers::{
    create_expense_endpoint, delete_expense_endpoint, get_expenses_content, get_expenses_page,
};
pub use model::{ExpensePage, ExpenseRow};
