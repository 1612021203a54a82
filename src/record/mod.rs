//! Record types and per-record processing
//!
//! This module defines the two worlds a record can live in:
//! - [`RawRecord`]: the loosely-typed shape as fetched from the source
//! - the normalized value types ([`User`], [`Post`], [`Comment`])
//!
//! The validators in [`validate`] are the only conversion path between them.

mod select;
mod validate;

pub use select::select_top_by_id;
pub use validate::{validate_comment, validate_post, validate_user};

use serde::Serialize;

/// Loosely-typed record as fetched from the remote source
///
/// Any field may be missing or carry the wrong type until a validator has
/// looked at it.
pub type RawRecord = serde_json::Map<String, serde_json::Value>;

/// Normalized user record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    /// Non-empty, trimmed
    pub name: String,
}

/// Normalized post record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: u64,
    /// References the owning user
    pub user_id: i64,
    /// Non-empty, trimmed
    pub title: String,
}

/// Normalized comment record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: u64,
    /// References the owning post
    pub post_id: i64,
    /// Non-empty, trimmed, line breaks collapsed to single spaces
    pub body: String,
    /// Non-empty, trimmed, contains `@`
    pub email: String,
}

/// Flat output record combining one user, one post, and one comment
///
/// Field order here is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRow {
    pub user_id: u64,
    pub user_name: String,
    pub post_id: u64,
    pub post_title: String,
    pub comment_id: u64,
    pub comment_body: String,
    pub comment_email: String,
}
