//! Alert system for displaying success and error messages to users.
//!
//! Alerts are either returned as the whole response body, for htmx to swap
//! into the alert container via `hx-target-error`, or appended to another
//! response as an out-of-band swap.

use axum::response::{Html, IntoResponse, Response};
use maud::{Markup, html};

use crate::html::alert_container;

/// A dismissable message shown at the bottom of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alert {
    /// An alert for an action that succeeded, without further details.
    SuccessSimple { message: String },
    /// An alert for an action that failed.
    Error { message: String, details: String },
}

impl Alert {
    pub fn into_html(self) -> Markup {
        let (container_style, message, details) = match self {
            Alert::SuccessSimple { message } => (
                "text-green-800 border-green-300 bg-green-50 dark:bg-gray-800 \
                dark:text-green-400 dark:border-green-800",
                message,
                String::new(),
            ),
            Alert::Error { message, details } => (
                "text-red-800 border-red-300 bg-red-50 dark:bg-gray-800 \
                dark:text-red-400 dark:border-red-800",
                message,
                details,
            ),
        };

        html! {
            div
                class={"flex items-start gap-3 p-4 mb-4 text-sm border rounded-lg shadow " (container_style)}
                role="alert"
            {
                div class="flex-1"
                {
                    p class="font-medium" { (message) }

                    @if !details.is_empty() {
                        span { (details) }
                    }
                }

                button
                    type="button"
                    aria-label="Dismiss"
                    class="bg-transparent border-none cursor-pointer"
                    onclick="this.closest('[role=alert]').remove()"
                {
                    "✕"
                }
            }
        }
    }

    /// Render the alert as an out-of-band swap that replaces the alert container.
    pub fn into_oob_html(self) -> Markup {
        alert_container(self.into_html(), true)
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        Html(self.into_html().into_string()).into_response()
    }
}
