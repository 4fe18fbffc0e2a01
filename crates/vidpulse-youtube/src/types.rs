//! Wire types for the `commentThreads` endpoint.
//!
//! The API nests a top-level comment's fields two snippet levels deep;
//! [`TopLevelComment`] is the flattened form the rest of the workspace
//! consumes. Raw comments are ephemeral: they live for one analysis run
//! and are never persisted as-is.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A provider-supplied top-level comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopLevelComment {
    pub author: String,
    pub text: String,
    pub published_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentThreadsResponse {
    #[serde(default)]
    pub items: Vec<CommentThread>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentThread {
    pub snippet: ThreadSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ThreadSnippet {
    pub top_level_comment: CommentResource,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentResource {
    pub snippet: CommentSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommentSnippet {
    pub author_display_name: String,
    pub text_display: String,
    pub published_at: DateTime<Utc>,
}

impl From<CommentThread> for TopLevelComment {
    fn from(thread: CommentThread) -> Self {
        let snippet = thread.snippet.top_level_comment.snippet;
        Self {
            author: snippet.author_display_name,
            text: snippet.text_display,
            published_at: snippet.published_at,
        }
    }
}

/// Error envelope returned by Google APIs on non-2xx responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub message: String,
}
