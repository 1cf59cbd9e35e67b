// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! HTTP handlers for the Webmention receiver service.

use crate::error::{AppError, Result};
use crate::models::MentionView;
use crate::receiver::WebmentionReceiver;
use crate::store::MentionStore;
use axum::{
    extract::{Path, State},
    Form, Json,
};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Shared application state.
pub struct AppState {
    pub receiver: WebmentionReceiver,
    pub store: Arc<dyn MentionStore>,
}

/// Form body of a Webmention submission.
#[derive(Debug, Deserialize)]
pub struct WebmentionForm {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
}

/// Success response body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "webmention-receiver",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `POST /webmention` — accept and verify one (source, target) pair.
pub async fn receive_webmention(
    State(state): State<Arc<AppState>>,
    Form(form): Form<WebmentionForm>,
) -> Result<Json<MessageResponse>> {
    let source = form
        .source
        .filter(|s| !s.trim().is_empty())
        .ok_or(AppError::MissingParameter("source"))?;
    let target = form
        .target
        .filter(|t| !t.trim().is_empty())
        .ok_or(AppError::MissingParameter("target"))?;

    debug!(source = %source, target = %target, "Processing Webmention submission");

    let outcome = state.receiver.receive(&source, &target).await?;
    Ok(Json(MessageResponse {
        message: outcome.message(),
    }))
}

/// `GET /posts/:post_id/webmentions` — list stored mentions for a post.
pub async fn list_webmentions(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<String>,
) -> Result<Json<Vec<MentionView>>> {
    let oid = ObjectId::parse_str(&post_id).map_err(|_| AppError::InvalidId(post_id))?;

    let mentions = state.store.list_mentions_for_post(oid).await?;
    Ok(Json(mentions.into_iter().map(MentionView::from).collect()))
}
