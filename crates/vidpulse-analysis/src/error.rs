use thiserror::Error;
use vidpulse_db::DbError;
use vidpulse_youtube::YoutubeError;

/// Failure classes of one analysis run.
///
/// Per-comment classification failures are handled inside the loop (the
/// comment is dropped and the run continues) and never appear here; every
/// variant below unwinds the whole run with nothing persisted.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The reference matched no known video URL shape. User-correctable.
    #[error("unrecognized video reference: {0}")]
    InvalidReference(String),

    /// The comment provider rejected or failed the fetch.
    #[error("comment source unavailable: {0}")]
    SourceUnavailable(#[source] YoutubeError),

    /// The fetch succeeded but returned zero comments.
    #[error("no comments found for video {video_id}; it may be private or have comments disabled")]
    EmptyResult { video_id: String },

    /// The classification service rejected the deployment's credential.
    /// Fatal for the deployment; callers surface a generic message only.
    #[error("classification service rejected the deployment credential")]
    InvalidCredential,

    /// Every fetched comment failed classification, leaving nothing to
    /// aggregate.
    #[error("no comment survived classification")]
    NoClassifiedComments,

    /// The report store failed.
    #[error("report store error: {0}")]
    Store(#[from] DbError),
}
