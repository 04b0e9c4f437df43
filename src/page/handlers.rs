//! The route handlers for the expense page and the actions on it.

use axum::{
    extract::{FromRef, Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use maud::{Markup, html};
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error,
    alert::Alert,
    expense::{Category, CategoryFilter, Expense, SharedExpenseStore},
    page::view::{expense_content_view, expenses_page_view},
    timezone::local_today,
    tracker::{Command, Tracker},
};

/// The state needed to render the expense page and apply actions to it.
#[derive(Clone)]
pub struct ExpensePageState {
    /// The store the expenses are loaded from and saved to.
    pub expense_store: SharedExpenseStore,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
    /// The symbol shown in front of amounts.
    pub currency_symbol: String,
}

impl FromRef<AppState> for ExpensePageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            expense_store: state.expense_store.clone(),
            local_timezone: state.local_timezone.clone(),
            currency_symbol: state.currency_symbol.clone(),
        }
    }
}

/// The selected category filter, sent along with every action.
#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    /// The filter option, "All" or a category name.
    pub filter: Option<String>,
}

impl FilterQuery {
    fn category_filter(&self) -> CategoryFilter {
        CategoryFilter::from_option(self.filter.as_deref())
    }
}

/// The form data for adding an expense.
#[derive(Debug, Deserialize)]
pub struct ExpenseForm {
    /// The date the money was spent.
    pub date: Date,
    /// What the money was spent on.
    pub category: Category,
    /// How much was spent.
    pub amount: f64,
    /// Notes about the expense.
    #[serde(default)]
    pub description: String,
    /// The selected category filter.
    #[serde(default)]
    pub filter: Option<String>,
}

/// Load the expenses, apply `command` and render the page content.
fn apply_and_render(
    state: &ExpensePageState,
    filter: CategoryFilter,
    command: Option<Command>,
) -> Result<Markup, Error> {
    let mut store = state
        .expense_store
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire expense store lock: {error}"))
        .map_err(|_| Error::StoreLockError)?;

    let mut tracker = Tracker::load(&mut *store, filter)?;

    if let Some(command) = command {
        let outcome = tracker.apply(command)?;
        tracing::debug!("applied command: {outcome:?}");
    }

    Ok(expense_content_view(&tracker.page()?, &state.currency_symbol))
}

/// Display the expense page with the form, list, filter, total and charts.
pub async fn get_expenses_page(
    State(state): State<ExpensePageState>,
    Query(query): Query<FilterQuery>,
) -> Result<Response, Error> {
    let today = local_today(&state.local_timezone)?;

    let mut store = state
        .expense_store
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire expense store lock: {error}"))
        .map_err(|_| Error::StoreLockError)?;

    let tracker = Tracker::load(&mut *store, query.category_filter())?;
    let page = tracker.page()?;

    Ok(Html(expenses_page_view(&page, today, &state.currency_symbol).into_string()).into_response())
}

/// Render the page content for the selected filter.
pub async fn get_expenses_content(
    State(state): State<ExpensePageState>,
    Query(query): Query<FilterQuery>,
) -> Response {
    let command = Command::SetFilter(query.category_filter());

    match apply_and_render(&state, CategoryFilter::All, Some(command)) {
        Ok(content) => Html(content.into_string()).into_response(),
        Err(error) => error.into_alert_response(),
    }
}

/// A route handler for adding an expense, responds with the updated page
/// content and a success alert.
pub async fn create_expense_endpoint(
    State(state): State<ExpensePageState>,
    Form(form): Form<ExpenseForm>,
) -> Response {
    if !form.amount.is_finite() || form.amount < 0.0 {
        tracing::error!("Tried to add an expense with the invalid amount {}", form.amount);
        return Error::InvalidFormAmount(form.amount).into_alert_response();
    }

    let filter = CategoryFilter::from_option(form.filter.as_deref());
    let expense = Expense::new(form.date, form.category, form.amount, &form.description);

    match apply_and_render(&state, filter, Some(Command::AddExpense(expense))) {
        Ok(content) => {
            let alert = Alert::SuccessSimple {
                message: "Expense added successfully!".to_owned(),
            };

            Html(
                html! {
                    (content)
                    (alert.into_oob_html())
                }
                .into_string(),
            )
            .into_response()
        }
        Err(error) => {
            tracing::error!("could not add expense: {error}");
            error.into_alert_response()
        }
    }
}

/// A route handler for deleting the expense at `index`, responds with the
/// updated page content.
///
/// An index that does not refer to an expense leaves the expenses unchanged.
pub async fn delete_expense_endpoint(
    State(state): State<ExpensePageState>,
    Path(index): Path<usize>,
    Query(query): Query<FilterQuery>,
) -> Response {
    match apply_and_render(&state, query.category_filter(), Some(Command::DeleteAt(index))) {
        // The status code has to be 200 OK or htmx will not swap in the content.
        Ok(content) => (StatusCode::OK, Html(content.into_string())).into_response(),
        Err(error) => {
            tracing::error!("could not delete expense {index}: {error}");
            error.into_alert_response()
        }
    }
}
