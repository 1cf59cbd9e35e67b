// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Document models for the `posts` and `webmentions` collections.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// A stored Webmention receipt.
///
/// The pair (`source_url`, `target_url`) is unique among stored mentions;
/// a record is created once on successful verification and never mutated.
/// `author_name`, `author_url` and `published_at` are left unpopulated by
/// the current verification step, which does not parse microformats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mention {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub source_url: String,
    pub target_url: String,
    pub author_name: Option<String>,
    pub author_url: Option<String>,
    /// Best-effort summary: the source page's title text.
    pub content: Option<String>,
    pub published_at: Option<DateTime>,
    pub received_at: DateTime,
    /// Local post the target resolved to, if any.
    pub post_id: Option<ObjectId>,
}

/// A blog post, as far as this service cares: only `_id` and `slug` are
/// read here; everything else belongs to the rest of the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub slug: String,
}

/// JSON projection of a [`Mention`] with stringified ObjectIds.
#[derive(Debug, Serialize)]
pub struct MentionView {
    pub id: Option<String>,
    pub source_url: String,
    pub target_url: String,
    pub author_name: Option<String>,
    pub author_url: Option<String>,
    pub content: Option<String>,
    pub published_at: Option<chrono::DateTime<chrono::Utc>>,
    pub received_at: chrono::DateTime<chrono::Utc>,
    pub post_id: Option<String>,
}

impl From<Mention> for MentionView {
    fn from(m: Mention) -> Self {
        Self {
            id: m.id.map(|oid| oid.to_hex()),
            source_url: m.source_url,
            target_url: m.target_url,
            author_name: m.author_name,
            author_url: m.author_url,
            content: m.content,
            published_at: m.published_at.map(DateTime::to_chrono),
            received_at: m.received_at.to_chrono(),
            post_id: m.post_id.map(|oid| oid.to_hex()),
        }
    }
}
