//! Application router configuration.

use axum::{
    Router,
    routing::{delete, get},
};

use crate::{
    AppState, endpoints,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    page::{
        create_expense_endpoint, delete_expense_endpoint, get_expenses_content, get_expenses_page,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_expenses_page))
        .route(
            endpoints::EXPENSES_API,
            get(get_expenses_content).post(create_expense_endpoint),
        )
        .route(endpoints::DELETE_EXPENSE, delete(delete_expense_endpoint))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .fallback(get_404_not_found)
        .with_state(state)
}
