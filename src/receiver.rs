// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Webmention receipt and verification flow.
//!
//! `receive` is a single request-response unit of work: validate the
//! target, fetch the source once, verify the link, deduplicate, resolve
//! the target to a local post, and persist the receipt. The write only
//! happens after every check has passed, so a failure never leaves
//! partial state.

use crate::error::{AppError, Result};
use crate::fetch::SourceFetcher;
use crate::html;
use crate::models::Mention;
use crate::store::{InsertOutcome, MentionStore};
use mongodb::bson::DateTime;
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

/// Outcome of a successful submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiveOutcome {
    /// A new mention was verified and stored.
    Received,
    /// The (source, target) pair was already on record; nothing written.
    AlreadyReceived,
}

impl ReceiveOutcome {
    /// Client-facing message for the JSON response body.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Received => "Webmention received successfully",
            Self::AlreadyReceived => "Webmention already received",
        }
    }
}

/// Webmention receiver with injected store and fetcher.
pub struct WebmentionReceiver {
    store: Arc<dyn MentionStore>,
    fetcher: Arc<dyn SourceFetcher>,
    target_prefix: String,
}

impl WebmentionReceiver {
    /// Create a receiver recognizing targets under `target_prefix`.
    pub fn new(
        store: Arc<dyn MentionStore>,
        fetcher: Arc<dyn SourceFetcher>,
        target_prefix: impl Into<String>,
    ) -> Self {
        Self {
            store,
            fetcher,
            target_prefix: target_prefix.into(),
        }
    }

    /// Process one claimed (source, target) pair.
    pub async fn receive(&self, source_url: &str, target_url: &str) -> Result<ReceiveOutcome> {
        // Target must point at one of our post pages.
        let Some(slug) = target_url.strip_prefix(&self.target_prefix) else {
            debug!(target = %target_url, prefix = %self.target_prefix, "Target outside local prefix");
            return Err(AppError::UnsupportedTarget);
        };

        // Only http(s) sources can be dereferenced.
        let parsed = Url::parse(source_url)
            .map_err(|_| AppError::SourceUnreachable("invalid source URL".to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(AppError::SourceUnreachable(
                "invalid source URL".to_string(),
            ));
        }

        let body = self.fetcher.fetch(source_url).await?;

        // Exact string match against every anchor href. Relative links and
        // trailing-slash variants of the target do not count.
        let links = html::extract_links(&body);
        if !links.iter().any(|href| href == target_url) {
            debug!(source = %source_url, target = %target_url, "Target not among source anchors");
            return Err(AppError::TargetNotLinked);
        }

        // Fast-path dedup; the store's uniqueness guarantee catches the
        // check-then-act race if two identical submissions get this far.
        if self
            .store
            .find_mention(source_url, target_url)
            .await?
            .is_some()
        {
            info!(source = %source_url, target = %target_url, "Webmention already received");
            return Ok(ReceiveOutcome::AlreadyReceived);
        }

        // Trailing slug -> local post, if we have one. Unresolved is fine.
        let post_id = self
            .store
            .find_post_by_slug(slug)
            .await?
            .map(|post| post.id);
        debug!(slug, resolved = post_id.is_some(), "Resolved target slug");

        let mention = Mention {
            id: None,
            source_url: source_url.to_string(),
            target_url: target_url.to_string(),
            // Verification does not parse author microformats yet.
            author_name: None,
            author_url: None,
            content: html::extract_title(&body),
            published_at: None,
            received_at: DateTime::now(),
            post_id,
        };

        match self.store.insert_mention(mention).await? {
            InsertOutcome::Inserted => {
                info!(source = %source_url, target = %target_url, "Webmention received");
                Ok(ReceiveOutcome::Received)
            }
            InsertOutcome::Duplicate => {
                info!(source = %source_url, target = %target_url, "Webmention already received");
                Ok(ReceiveOutcome::AlreadyReceived)
            }
        }
    }
}
