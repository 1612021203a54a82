//! Per-entity validation and normalization
//!
//! Each validator accepts a loosely-typed record and returns either the
//! normalized entity or `None`. Rejections are logged with a reason and
//! counted by the caller; they never abort a stage.
//!
//! Integer fields must be true JSON integers: booleans and fractional
//! numbers are rejected (`Value::as_u64`/`as_i64` return `None` for both).

use crate::record::{Comment, Post, RawRecord, User};
use serde_json::Value;

/// Validates and normalizes one user record
///
/// Requires an integer `id` and a non-empty `name`; the name is trimmed.
pub fn validate_user(raw: &RawRecord) -> Option<User> {
    let Some(id) = raw.get("id").and_then(Value::as_u64) else {
        tracing::warn!(value = ?raw.get("id"), "rejected user: missing or non-integer id");
        return None;
    };

    let Some(name) = nonempty_string(raw, "name") else {
        tracing::warn!(user_id = id, "rejected user: missing or empty name");
        return None;
    };

    Some(User { id, name })
}

/// Validates and normalizes one post record
///
/// Requires integer `id` and `userId` and a non-empty `title`; the title is
/// trimmed.
pub fn validate_post(raw: &RawRecord) -> Option<Post> {
    let Some(id) = raw.get("id").and_then(Value::as_u64) else {
        tracing::warn!(value = ?raw.get("id"), "rejected post: missing or non-integer id");
        return None;
    };

    let Some(user_id) = raw.get("userId").and_then(Value::as_i64) else {
        tracing::warn!(post_id = id, "rejected post: missing or non-integer userId");
        return None;
    };

    let Some(title) = nonempty_string(raw, "title") else {
        tracing::warn!(post_id = id, "rejected post: missing or empty title");
        return None;
    };

    Some(Post { id, user_id, title })
}

/// Validates and normalizes one comment record
///
/// Requires integer `id` and `postId`, a non-empty `body`, and an `email`
/// containing `@`. The body is trimmed and its line breaks collapsed to
/// single spaces; the email is trimmed.
pub fn validate_comment(raw: &RawRecord) -> Option<Comment> {
    let Some(id) = raw.get("id").and_then(Value::as_u64) else {
        tracing::warn!(value = ?raw.get("id"), "rejected comment: missing or non-integer id");
        return None;
    };

    let Some(post_id) = raw.get("postId").and_then(Value::as_i64) else {
        tracing::warn!(comment_id = id, "rejected comment: missing or non-integer postId");
        return None;
    };

    let Some(body) = nonempty_string(raw, "body") else {
        tracing::warn!(comment_id = id, "rejected comment: missing or empty body");
        return None;
    };

    let email = match raw.get("email").and_then(Value::as_str) {
        Some(s) if !s.trim().is_empty() && s.contains('@') => s.trim().to_string(),
        _ => {
            tracing::warn!(comment_id = id, "rejected comment: missing or malformed email");
            return None;
        }
    };

    Some(Comment {
        id,
        post_id,
        body: collapse_line_breaks(&body),
        email,
    })
}

/// Extracts a required string field, trimmed, rejecting empty values
fn nonempty_string(raw: &RawRecord, key: &str) -> Option<String> {
    match raw.get(key).and_then(Value::as_str) {
        Some(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

/// Collapses every `\r\n`, `\n`, and `\r` sequence to a single space
fn collapse_line_breaks(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\n', '\r'], " ")
}
