//! Expense Tracker is a web app for recording personal expenses and seeing
//! where the money goes.
//!
//! Expenses are kept in a single CSV file. The server renders one HTML page
//! with a form for adding expenses, the list of expenses, a category filter
//! with its total, and charts of the spending per month and per category.
//!
//! This library provides the routes that directly serve the HTML for that page.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod endpoints;
pub mod expense;
mod html;
mod internal_server_error;
mod logging;
mod not_found;
mod page;
mod routing;
mod timezone;
pub mod tracker;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use page::{ExpensePage, ExpenseRow};
pub use routing::build_router;

use crate::{alert::Alert, internal_server_error::InternalServerError};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The expense file could not be read or written.
    #[error("could not access the expense file: {0}")]
    Io(String),

    /// The expense file could not be parsed or written as CSV.
    #[error("could not process the expense CSV: {0}")]
    Csv(String),

    /// An expense amount that is not a number.
    ///
    /// Expenses loaded from a hand-edited file are not validated, so this
    /// error surfaces when the totals are calculated.
    #[error("\"{0}\" is not a valid amount")]
    InvalidAmount(String),

    /// The amount entered for a new expense was negative or not a finite number.
    #[error("{0} is not an amount of zero or more")]
    InvalidFormAmount(f64),

    /// Could not acquire the lock on the expense store.
    #[error("could not acquire the expense store lock")]
    StoreLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        tracing::error!("an unhandled I/O error occurred: {value}");
        Error::Io(value.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        tracing::error!("an unhandled CSV error occurred: {value}");
        Error::Csv(value.to_string())
    }
}

const INVALID_TIMEZONE_FIX: &str = "Check your server settings and ensure the timezone has \
    been set to a valid, canonical timezone string";

const INVALID_AMOUNT_FIX: &str = "Fix or remove the amount in the expense file.";

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!("Could not get local timezone \"{timezone}\". {INVALID_TIMEZONE_FIX}"),
            }
            .into_response(),
            Error::InvalidAmount(amount) => InternalServerError {
                description: "Invalid Expense File",
                fix: &format!("The amount \"{amount}\" is not a number. {INVALID_AMOUNT_FIX}"),
            }
            .into_response(),
            Error::StoreLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        let (status_code, message, details) = match self {
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Invalid Timezone Settings",
                format!("Could not get local timezone \"{timezone}\". {INVALID_TIMEZONE_FIX}"),
            ),
            Error::InvalidFormAmount(amount) => (
                StatusCode::BAD_REQUEST,
                "Invalid expense amount",
                format!("{amount} is not a valid amount. Enter an amount of zero or more."),
            ),
            Error::InvalidAmount(amount) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Invalid expense file",
                format!("The amount \"{amount}\" is not a number. {INVALID_AMOUNT_FIX}"),
            ),
            Error::Io(_) | Error::Csv(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Could not access expenses",
                "The expense file could not be read or saved, \
                check the server logs for more details."
                    .to_owned(),
            ),
            Error::StoreLockError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Something went wrong",
                "An unexpected error occurred, check the server logs for more details.".to_owned(),
            ),
        };

        (
            status_code,
            Alert::Error {
                message: message.to_owned(),
                details,
            },
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{Error, test_utils::parse_html_fragment};

    #[tokio::test]
    async fn invalid_form_amount_alert_is_a_bad_request() {
        let response = Error::InvalidFormAmount(-1.5).into_alert_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let html = parse_html_fragment(response).await;
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("Invalid expense amount"), "got {text:?}");
    }

    #[tokio::test]
    async fn invalid_amount_renders_error_page() {
        let response = Error::InvalidAmount("twelve".to_owned()).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let html = parse_html_fragment(response).await;
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("\"twelve\""), "got {text:?}");
    }

    #[test]
    fn io_errors_keep_their_message() {
        let error: Error = std::io::Error::other("disk on fire").into();

        assert_eq!(error, Error::Io("disk on fire".to_owned()));
    }
}
