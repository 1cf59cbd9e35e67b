// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Outbound fetch of the claimed source page.
//!
//! One bounded-timeout GET per submission. Any transport failure, timeout
//! or non-200 status is reported as `SourceUnreachable`; the receiver
//! never retries.

use crate::error::{AppError, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::warn;

/// Fetches the body of a claimed source URL.
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// reqwest-backed fetcher with a fixed request timeout.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl SourceFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(url, error = %e, "Source fetch failed");
            AppError::SourceUnreachable(e.to_string())
        })?;

        if response.status() != StatusCode::OK {
            warn!(url, status = %response.status(), "Source returned non-200");
            return Err(AppError::SourceUnreachable(format!(
                "status {}",
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| AppError::SourceUnreachable(e.to_string()))
    }
}
