//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use crate::expense::{ExpenseStore, SharedExpenseStore};

/// The state of the REST server.
#[derive(Clone)]
pub struct AppState {
    /// The store the expenses are loaded from and saved to.
    pub expense_store: SharedExpenseStore,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,

    /// The symbol shown in front of amounts, e.g. "₹".
    pub currency_symbol: String,
}

impl AppState {
    /// Create a new [AppState] that keeps expenses in `expense_store`.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    pub fn new(
        expense_store: impl ExpenseStore + 'static,
        local_timezone: &str,
        currency_symbol: &str,
    ) -> Self {
        Self {
            expense_store: Arc::new(Mutex::new(expense_store)),
            local_timezone: local_timezone.to_owned(),
            currency_symbol: currency_symbol.to_owned(),
        }
    }
}
