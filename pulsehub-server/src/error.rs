// Pulsehub Server - HTTP API for the telemetry store
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! API boundary errors.
//!
//! All request validation happens here, before the core is invoked; the
//! store itself has no error path. Every variant maps to a 400 response
//! with a machine-readable code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pulsehub::TelemetryError;
use serde_json::json;
use thiserror::Error;

/// Errors surfaced to API clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required field is missing from the request body.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A field failed validation against the closed sensor vocabulary.
    #[error(transparent)]
    InvalidField(#[from] TelemetryError),

    /// The control action is not part of the protocol.
    #[error("invalid action: {0:?} (use \"start\" or \"stop\")")]
    InvalidAction(String),
}

impl ApiError {
    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::MissingField(_) | ApiError::InvalidField(_) => "INVALID_INPUT",
            ApiError::InvalidAction(_) => "INVALID_ACTION",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "success": false,
            "code": self.code(),
            "error": self.to_string(),
        }));
        (StatusCode::BAD_REQUEST, body).into_response()
    }
}
