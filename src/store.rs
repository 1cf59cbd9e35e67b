// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Document store access for posts and webmentions.
//!
//! The store is an injected interface rather than a module-level handle.
//! [`MongoStore`] is the production implementation; [`MemoryStore`] backs
//! the tests and the `memory` URI for local development.

use crate::error::Result;
use crate::models::{Mention, Post};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    error::{ErrorKind, WriteFailure},
    options::IndexOptions,
    Client, Collection, IndexModel,
};
use tokio::sync::RwLock;
use tracing::debug;

/// Result of attempting to insert a mention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// A new record was written.
    Inserted,
    /// The (source_url, target_url) pair already exists; nothing written.
    Duplicate,
}

/// Store interface used by the receiver.
#[async_trait]
pub trait MentionStore: Send + Sync {
    async fn find_post_by_slug(&self, slug: &str) -> Result<Option<Post>>;

    async fn find_mention(&self, source_url: &str, target_url: &str) -> Result<Option<Mention>>;

    /// Insert a mention. The pair (source_url, target_url) is unique; an
    /// insert that collides with an existing record reports `Duplicate`
    /// instead of writing a second copy.
    async fn insert_mention(&self, mention: Mention) -> Result<InsertOutcome>;

    async fn list_mentions_for_post(&self, post_id: ObjectId) -> Result<Vec<Mention>>;
}

/// MongoDB-backed store.
#[derive(Clone)]
pub struct MongoStore {
    posts: Collection<Post>,
    mentions: Collection<Mention>,
}

impl MongoStore {
    /// Connect to MongoDB and ensure the uniqueness index on
    /// (source_url, target_url) exists. The index closes the window where
    /// two concurrent identical submissions both pass the idempotency
    /// check before either writes.
    pub async fn connect(uri: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri).await?;
        let db = client
            .default_database()
            .unwrap_or_else(|| client.database("app_data"));

        let posts = db.collection::<Post>("posts");
        let mentions = db.collection::<Mention>("webmentions");

        let index = IndexModel::builder()
            .keys(doc! { "source_url": 1, "target_url": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        mentions.create_index(index, None).await?;

        Ok(Self { posts, mentions })
    }
}

#[async_trait]
impl MentionStore for MongoStore {
    async fn find_post_by_slug(&self, slug: &str) -> Result<Option<Post>> {
        let post = self.posts.find_one(doc! { "slug": slug }, None).await?;
        Ok(post)
    }

    async fn find_mention(&self, source_url: &str, target_url: &str) -> Result<Option<Mention>> {
        let mention = self
            .mentions
            .find_one(
                doc! { "source_url": source_url, "target_url": target_url },
                None,
            )
            .await?;
        Ok(mention)
    }

    async fn insert_mention(&self, mention: Mention) -> Result<InsertOutcome> {
        match self.mentions.insert_one(&mention, None).await {
            Ok(_) => Ok(InsertOutcome::Inserted),
            Err(e) if is_duplicate_key(&e) => {
                debug!(
                    source = %mention.source_url,
                    target = %mention.target_url,
                    "Duplicate mention insert suppressed by unique index"
                );
                Ok(InsertOutcome::Duplicate)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn list_mentions_for_post(&self, post_id: ObjectId) -> Result<Vec<Mention>> {
        let cursor = self.mentions.find(doc! { "post_id": post_id }, None).await?;
        let mentions = cursor.try_collect().await?;
        Ok(mentions)
    }
}

/// MongoDB duplicate-key write error (code 11000).
fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        *err.kind,
        ErrorKind::Write(WriteFailure::WriteError(ref we)) if we.code == 11000
    )
}

/// In-memory store. Check-and-insert runs under a single write lock, so
/// duplicate submissions cannot race here.
#[derive(Default)]
pub struct MemoryStore {
    posts: RwLock<Vec<Post>>,
    mentions: RwLock<Vec<Mention>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a post and return its id.
    pub async fn add_post(&self, slug: &str) -> ObjectId {
        let id = ObjectId::new();
        self.posts.write().await.push(Post {
            id,
            slug: slug.to_string(),
        });
        id
    }
}

#[async_trait]
impl MentionStore for MemoryStore {
    async fn find_post_by_slug(&self, slug: &str) -> Result<Option<Post>> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.slug == slug).cloned())
    }

    async fn find_mention(&self, source_url: &str, target_url: &str) -> Result<Option<Mention>> {
        let mentions = self.mentions.read().await;
        Ok(mentions
            .iter()
            .find(|m| m.source_url == source_url && m.target_url == target_url)
            .cloned())
    }

    async fn insert_mention(&self, mut mention: Mention) -> Result<InsertOutcome> {
        let mut mentions = self.mentions.write().await;
        if mentions
            .iter()
            .any(|m| m.source_url == mention.source_url && m.target_url == mention.target_url)
        {
            return Ok(InsertOutcome::Duplicate);
        }
        if mention.id.is_none() {
            mention.id = Some(ObjectId::new());
        }
        mentions.push(mention);
        Ok(InsertOutcome::Inserted)
    }

    async fn list_mentions_for_post(&self, post_id: ObjectId) -> Result<Vec<Mention>> {
        let mentions = self.mentions.read().await;
        Ok(mentions
            .iter()
            .filter(|m| m.post_id == Some(post_id))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::DateTime;

    fn mention(source: &str, target: &str) -> Mention {
        Mention {
            id: None,
            source_url: source.to_string(),
            target_url: target.to_string(),
            author_name: None,
            author_url: None,
            content: None,
            published_at: None,
            received_at: DateTime::now(),
            post_id: None,
        }
    }

    #[tokio::test]
    async fn test_memory_insert_then_duplicate() {
        let store = MemoryStore::new();

        let first = store
            .insert_mention(mention("https://a.example/post", "http://site/posts/x"))
            .await
            .unwrap();
        assert_eq!(first, InsertOutcome::Inserted);

        let second = store
            .insert_mention(mention("https://a.example/post", "http://site/posts/x"))
            .await
            .unwrap();
        assert_eq!(second, InsertOutcome::Duplicate);

        let found = store
            .find_mention("https://a.example/post", "http://site/posts/x")
            .await
            .unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn test_memory_post_lookup() {
        let store = MemoryStore::new();
        let id = store.add_post("my-post").await;

        let post = store.find_post_by_slug("my-post").await.unwrap().unwrap();
        assert_eq!(post.id, id);

        assert!(store.find_post_by_slug("other").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_list_by_post() {
        let store = MemoryStore::new();
        let post_id = store.add_post("my-post").await;

        let mut m = mention("https://a.example/1", "http://site/posts/my-post");
        m.post_id = Some(post_id);
        store.insert_mention(m).await.unwrap();

        store
            .insert_mention(mention("https://a.example/2", "http://site/posts/unrelated"))
            .await
            .unwrap();

        let listed = store.list_mentions_for_post(post_id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].source_url, "https://a.example/1");
    }
}
