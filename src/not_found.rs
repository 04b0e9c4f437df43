use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

pub async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}

pub fn get_404_not_found_response() -> Response {
    let view = error_view(
        "Page Not Found",
        "404",
        "Something's missing.",
        "Sorry, we can't find that page. You'll find your expenses on the home page.",
    );

    (StatusCode::NOT_FOUND, Html(view.into_string())).into_response()
}
