//! Database operations for the `analyses` table.
//!
//! One row per analysis run. The store assigns the id and creation
//! timestamp; everything else arrives pre-aggregated from the pipeline.
//! There is no update or delete path — rows are immutable once written.

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;
use vidpulse_core::{AnalysisReport, AnalyzedComment, MonthlyBucket, SentimentStats};

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A report ready for insertion. Id and `created_at` are store-assigned.
#[derive(Debug, Clone)]
pub struct NewAnalysis {
    pub video_reference: String,
    pub total_comments: i32,
    pub sentiment_stats: SentimentStats,
    pub monthly_distribution: Vec<MonthlyBucket>,
    pub comments: Vec<AnalyzedComment>,
}

/// A row from the `analyses` table. JSONB columns stay untyped until
/// [`AnalysisRow::into_report`].
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AnalysisRow {
    pub id: Uuid,
    pub video_reference: String,
    pub total_comments: i32,
    pub agree_pct: i32,
    pub disagree_pct: i32,
    pub neutral_pct: i32,
    pub monthly_distribution: Value,
    pub comments: Value,
    pub created_at: DateTime<Utc>,
}

impl AnalysisRow {
    /// Convert the raw row into the typed report aggregate.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Json`] if a JSONB column does not match the
    /// expected shape.
    pub fn into_report(self) -> Result<AnalysisReport, DbError> {
        let monthly_distribution: Vec<MonthlyBucket> =
            serde_json::from_value(self.monthly_distribution).map_err(|e| DbError::Json {
                context: "analyses.monthly_distribution".to_string(),
                source: e,
            })?;
        let comments: Vec<AnalyzedComment> =
            serde_json::from_value(self.comments).map_err(|e| DbError::Json {
                context: "analyses.comments".to_string(),
                source: e,
            })?;

        Ok(AnalysisReport {
            id: self.id,
            video_reference: self.video_reference,
            total_comments: self.total_comments,
            sentiment_stats: SentimentStats {
                agree: self.agree_pct,
                disagree: self.disagree_pct,
                neutral: self.neutral_pct,
            },
            monthly_distribution,
            comments,
            created_at: self.created_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Insert a new analysis report and return its store-assigned id.
///
/// Bucket and comment arrays are stored as JSONB so their insertion order
/// survives the round-trip. Concurrent inserts for the same video reference
/// are independent rows with independent ids.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails, or [`DbError::Json`] if
/// an array fails to serialize.
pub async fn insert_analysis(pool: &PgPool, analysis: &NewAnalysis) -> Result<Uuid, DbError> {
    let monthly_distribution =
        serde_json::to_value(&analysis.monthly_distribution).map_err(|e| DbError::Json {
            context: "analyses.monthly_distribution".to_string(),
            source: e,
        })?;
    let comments = serde_json::to_value(&analysis.comments).map_err(|e| DbError::Json {
        context: "analyses.comments".to_string(),
        source: e,
    })?;

    let id: Uuid = sqlx::query_scalar(
        "INSERT INTO analyses \
             (video_reference, total_comments, agree_pct, disagree_pct, neutral_pct, \
              monthly_distribution, comments) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) \
         RETURNING id",
    )
    .bind(&analysis.video_reference)
    .bind(analysis.total_comments)
    .bind(analysis.sentiment_stats.agree)
    .bind(analysis.sentiment_stats.disagree)
    .bind(analysis.sentiment_stats.neutral)
    .bind(monthly_distribution)
    .bind(comments)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Fetch one analysis report by id, or `None` if no such row exists.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_analysis(pool: &PgPool, id: Uuid) -> Result<Option<AnalysisRow>, DbError> {
    let row = sqlx::query_as::<_, AnalysisRow>(
        "SELECT id, video_reference, total_comments, agree_pct, disagree_pct, neutral_pct, \
                monthly_distribution, comments, created_at \
         FROM analyses \
         WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}
