//! Capability interfaces over the pipeline's external collaborators.
//!
//! The orchestrator is generic over these traits so its control flow can be
//! exercised against deterministic stand-ins instead of live services. The
//! trait methods return `impl Future + Send` rather than using an async
//! trait crate; implementations still write plain `async fn`.

use std::future::Future;

use sqlx::PgPool;
use uuid::Uuid;
use vidpulse_classifier::{ClassifierError, GeminiClient};
use vidpulse_core::Stance;
use vidpulse_db::{DbError, NewAnalysis};
use vidpulse_youtube::{TopLevelComment, YoutubeClient, YoutubeError};

/// Source of one page of top-level comments for a video identifier.
pub trait CommentSource {
    fn fetch_top_level_comments(
        &self,
        video_id: &str,
    ) -> impl Future<Output = Result<Vec<TopLevelComment>, YoutubeError>> + Send;
}

/// Three-way stance judgment for one comment's text.
pub trait StanceClassifier {
    fn classify(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<Stance, ClassifierError>> + Send;
}

/// Append-only report persistence. The store assigns the report id.
pub trait ReportStore {
    fn create(&self, analysis: &NewAnalysis)
        -> impl Future<Output = Result<Uuid, DbError>> + Send;
}

impl CommentSource for YoutubeClient {
    async fn fetch_top_level_comments(
        &self,
        video_id: &str,
    ) -> Result<Vec<TopLevelComment>, YoutubeError> {
        YoutubeClient::fetch_top_level_comments(self, video_id).await
    }
}

impl StanceClassifier for GeminiClient {
    async fn classify(&self, text: &str) -> Result<Stance, ClassifierError> {
        GeminiClient::classify(self, text).await
    }
}

impl ReportStore for PgPool {
    async fn create(&self, analysis: &NewAnalysis) -> Result<Uuid, DbError> {
        vidpulse_db::insert_analysis(self, analysis).await
    }
}
