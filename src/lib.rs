// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Webmention Receiver
//!
//! This crate implements the Webmention receipt-and-verification endpoint
//! for the chyrp blog backend:
//!
//! - Target validation against the local post-URL prefix
//! - Bounded-timeout fetch of the claimed source page
//! - Exact-match verification that the target is linked from the source
//! - Deduplication of repeated (source, target) submissions
//! - Resolution of the target slug to a locally known post
//! - Persistence of the mention receipt in the document store

pub mod config;
pub mod error;
pub mod fetch;
pub mod handlers;
pub mod html;
pub mod models;
pub mod receiver;
pub mod store;

pub use config::Config;
pub use error::{AppError, Result};
pub use receiver::{ReceiveOutcome, WebmentionReceiver};
pub use store::{MemoryStore, MentionStore, MongoStore};
