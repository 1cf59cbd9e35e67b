// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Integration tests for the Webmention receive flow, driven through the
//! public receiver API with the in-memory store and a canned fetcher.

use async_trait::async_trait;
use std::sync::Arc;
use webmention_receiver::{
    error::Result,
    fetch::SourceFetcher,
    store::MentionStore,
    AppError, MemoryStore, ReceiveOutcome, WebmentionReceiver,
};

const PREFIX: &str = "http://site/posts/";

/// Fetcher returning a fixed body, or a fixed failure.
struct CannedFetcher(std::result::Result<String, String>);

impl CannedFetcher {
    fn page(body: &str) -> Arc<Self> {
        Arc::new(Self(Ok(body.to_string())))
    }

    fn down(reason: &str) -> Arc<Self> {
        Arc::new(Self(Err(reason.to_string())))
    }
}

#[async_trait]
impl SourceFetcher for CannedFetcher {
    async fn fetch(&self, _url: &str) -> Result<String> {
        match &self.0 {
            Ok(body) => Ok(body.clone()),
            Err(reason) => Err(AppError::SourceUnreachable(reason.clone())),
        }
    }
}

#[tokio::test]
async fn test_concrete_scenario_resolves_post() {
    let store = Arc::new(MemoryStore::new());
    let post_id = store.add_post("my-post").await;

    let fetcher =
        CannedFetcher::page(r#"<html><a href="http://site/posts/my-post">link</a></html>"#);
    let receiver = WebmentionReceiver::new(store.clone(), fetcher, PREFIX);

    let outcome = receiver
        .receive("https://reply.example/note", "http://site/posts/my-post")
        .await
        .unwrap();
    assert_eq!(outcome, ReceiveOutcome::Received);

    let mention = store
        .find_mention("https://reply.example/note", "http://site/posts/my-post")
        .await
        .unwrap()
        .expect("mention stored");
    assert_eq!(mention.post_id, Some(post_id));
    assert!(mention.author_name.is_none());
    assert!(mention.author_url.is_none());
    assert!(mention.published_at.is_none());
}

#[tokio::test]
async fn test_unknown_slug_leaves_post_unresolved() {
    let store = Arc::new(MemoryStore::new());
    store.add_post("another-post").await;

    let fetcher =
        CannedFetcher::page(r#"<html><a href="http://site/posts/my-post">link</a></html>"#);
    let receiver = WebmentionReceiver::new(store.clone(), fetcher, PREFIX);

    let outcome = receiver
        .receive("https://reply.example/note", "http://site/posts/my-post")
        .await
        .unwrap();
    assert_eq!(outcome, ReceiveOutcome::Received);

    let mention = store
        .find_mention("https://reply.example/note", "http://site/posts/my-post")
        .await
        .unwrap()
        .expect("mention stored even when unresolved");
    assert!(mention.post_id.is_none());
}

#[tokio::test]
async fn test_repeat_submission_stores_one_record() {
    let store = Arc::new(MemoryStore::new());
    let post_id = store.add_post("my-post").await;

    let body = r#"<html><a href="http://site/posts/my-post">link</a></html>"#;
    let receiver = WebmentionReceiver::new(store.clone(), CannedFetcher::page(body), PREFIX);

    let first = receiver
        .receive("https://reply.example/note", "http://site/posts/my-post")
        .await
        .unwrap();
    assert_eq!(first, ReceiveOutcome::Received);

    let second = receiver
        .receive("https://reply.example/note", "http://site/posts/my-post")
        .await
        .unwrap();
    assert_eq!(second, ReceiveOutcome::AlreadyReceived);

    let listed = store.list_mentions_for_post(post_id).await.unwrap();
    assert_eq!(listed.len(), 1, "repeat submission must not duplicate");
}

#[tokio::test]
async fn test_unsupported_target_regardless_of_source() {
    let store = Arc::new(MemoryStore::new());

    // Reachable source linking to the target, but the target is foreign.
    let fetcher =
        CannedFetcher::page(r#"<html><a href="http://elsewhere/page">link</a></html>"#);
    let receiver = WebmentionReceiver::new(store.clone(), fetcher, PREFIX);
    let err = receiver
        .receive("https://reply.example/note", "http://elsewhere/page")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::UnsupportedTarget));

    // Unreachable source: same verdict, target check comes first.
    let receiver =
        WebmentionReceiver::new(store.clone(), CannedFetcher::down("timeout"), PREFIX);
    let err = receiver
        .receive("https://reply.example/note", "http://elsewhere/page")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::UnsupportedTarget));
}

#[tokio::test]
async fn test_variant_links_do_not_verify() {
    let store = Arc::new(MemoryStore::new());

    // The page links a relative path and a trailing-slash variant, but
    // never the verbatim target URL.
    let body = r#"<html>
        <a href="/posts/my-post">relative</a>
        <a href="http://site/posts/my-post/">trailing</a>
    </html>"#;
    let receiver = WebmentionReceiver::new(store.clone(), CannedFetcher::page(body), PREFIX);

    let err = receiver
        .receive("https://reply.example/note", "http://site/posts/my-post")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::TargetNotLinked));

    let stored = store
        .find_mention("https://reply.example/note", "http://site/posts/my-post")
        .await
        .unwrap();
    assert!(stored.is_none());
}

#[tokio::test]
async fn test_unreachable_source_yields_no_record() {
    let store = Arc::new(MemoryStore::new());
    let receiver =
        WebmentionReceiver::new(store.clone(), CannedFetcher::down("status 404"), PREFIX);

    let err = receiver
        .receive("https://reply.example/note", "http://site/posts/my-post")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::SourceUnreachable(_)));

    let stored = store
        .find_mention("https://reply.example/note", "http://site/posts/my-post")
        .await
        .unwrap();
    assert!(stored.is_none());
}

#[tokio::test]
async fn test_title_captured_as_content() {
    let store = Arc::new(MemoryStore::new());
    store.add_post("my-post").await;

    let body = r#"<html><head><title>A thoughtful reply</title></head>
        <body><a href="http://site/posts/my-post">link</a></body></html>"#;
    let receiver = WebmentionReceiver::new(store.clone(), CannedFetcher::page(body), PREFIX);

    receiver
        .receive("https://reply.example/note", "http://site/posts/my-post")
        .await
        .unwrap();

    let mention = store
        .find_mention("https://reply.example/note", "http://site/posts/my-post")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(mention.content.as_deref(), Some("A thoughtful reply"));
}
