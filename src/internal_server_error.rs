//! The page shown when the expense page cannot be rendered, such as when the
//! expense file is unreadable or holds an amount that is not a number.
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

/// A 500 error page with a short description of what went wrong and how the
/// user can fix it.
pub struct InternalServerError<'a> {
    /// What went wrong, shown as the page heading.
    pub description: &'a str,
    /// What the user can do about it.
    pub fix: &'a str,
}

impl Default for InternalServerError<'_> {
    fn default() -> Self {
        Self {
            description: "Sorry, something went wrong.",
            fix: "Try reloading the page. If that does not help, check the server logs.",
        }
    }
}

impl IntoResponse for InternalServerError<'_> {
    fn into_response(self) -> Response {
        let view = error_view("Internal Server Error", "500", self.description, self.fix);

        (StatusCode::INTERNAL_SERVER_ERROR, Html(view.into_string())).into_response()
    }
}

/// Route handler for the generic error page.
pub async fn get_internal_server_error_page() -> Response {
    InternalServerError::default().into_response()
}
