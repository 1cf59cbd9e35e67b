// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Error types for the Webmention receiver.
//!
//! All verification failures are client-facing and non-retryable; each
//! request is independent and a failure never leaves partial state (the
//! only write happens after every check has passed).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Target URL not supported")]
    UnsupportedTarget,

    #[error("Source URL not reachable: {0}")]
    SourceUnreachable(String),

    #[error("Target URL not found on source page")]
    TargetNotLinked,

    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid post ID: {0}")]
    InvalidId(String),

    #[error("Store error: {0}")]
    Store(String),
}

impl AppError {
    /// Stable machine-readable code for the error body.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnsupportedTarget => "UNSUPPORTED_TARGET",
            Self::SourceUnreachable(_) => "SOURCE_UNREACHABLE",
            Self::TargetNotLinked => "TARGET_NOT_LINKED",
            Self::MissingParameter(_) => "MISSING_PARAMETER",
            Self::InvalidId(_) => "INVALID_ID",
            Self::Store(_) => "STORE_ERROR",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: self.to_string(),
            code: self.code(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        Self::Store(err.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, AppError>;
