//! HTTP boundary for the bike manager
//!
//! Routing, payload validation and the mapping from manager faults to
//! status codes. No business rules live here.

pub mod app;
pub mod handlers;

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;

use crate::core::ManagerError;

pub use app::build_router;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

#[derive(Debug)]
pub enum WebError {
    Manager(ManagerError),
    Input(String),
}

impl From<ManagerError> for WebError {
    fn from(err: ManagerError) -> Self {
        WebError::Manager(err)
    }
}

impl From<JsonRejection> for WebError {
    fn from(rejection: JsonRejection) -> Self {
        WebError::Input(rejection.body_text())
    }
}

impl From<QueryRejection> for WebError {
    fn from(rejection: QueryRejection) -> Self {
        WebError::Input(rejection.body_text())
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, message, code) = match self {
            WebError::Input(msg) => (StatusCode::BAD_REQUEST, msg, "input_error"),
            WebError::Manager(err @ ManagerError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, err.to_string(), "not_found")
            }
            WebError::Manager(err @ ManagerError::EmptyCollection) => {
                (StatusCode::NOT_FOUND, err.to_string(), "empty_collection")
            }
            WebError::Manager(ManagerError::Storage(err)) => {
                error!(error = %err, "storage fault while serving request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    err.to_string(),
                    "storage_error",
                )
            }
        };

        let body = Json(ErrorResponse {
            error: message,
            code: code.to_string(),
        });

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, WebError>;
