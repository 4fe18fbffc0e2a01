//! YouTube Data API v3 comment source.
//!
//! Parses user-supplied video references into canonical video identifiers
//! and fetches a single page of top-level comments via the `commentThreads`
//! endpoint. Wraps `reqwest` with typed response deserialization; provider
//! rejections (private video, comments disabled, quota) surface as
//! [`YoutubeError::Api`] parsed from the API's error envelope.

mod client;
mod error;
mod types;
mod video_id;

pub use client::{YoutubeClient, COMMENT_PAGE_SIZE};
pub use error::YoutubeError;
pub use types::TopLevelComment;
pub use video_id::extract_video_id;
