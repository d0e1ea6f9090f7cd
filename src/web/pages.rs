//! Server-rendered HTML pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Shown when a redirect cannot be served.
pub const SERVER_ERROR_MESSAGE: &str =
    "Sorry! There was an error on the server. This has been reported and will be fixed shortly";

/// Error page rendered from `templates/error.html`.
#[derive(Template, WebTemplate)]
#[template(path = "error.html")]
pub struct ErrorPage {
    pub app_name: String,
    pub code: u16,
    pub title: String,
    pub message: String,
}

impl ErrorPage {
    pub fn new(app_name: &str, status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            app_name: app_name.to_string(),
            code: status.as_u16(),
            title: status.canonical_reason().unwrap_or("Uh oh!!").to_string(),
            message: message.into(),
        }
    }

    /// Renders the page with `status` as the response code.
    pub fn respond(app_name: &str, status: StatusCode, message: impl Into<String>) -> Response {
        (status, Self::new(app_name, status, message)).into_response()
    }
}
