//! Analysis orchestration: extract → fetch → classify → aggregate → persist.

use chrono::{DateTime, Utc};
use uuid::Uuid;
use vidpulse_classifier::ClassifierError;
use vidpulse_core::{AnalyzedComment, MonthlyBucket, SentimentStats, Stance};
use vidpulse_db::NewAnalysis;
use vidpulse_youtube::extract_video_id;

use crate::error::AnalysisError;
use crate::mask::mask_author;
use crate::providers::{CommentSource, ReportStore, StanceClassifier};

#[derive(Debug, Default, Clone, Copy)]
struct StanceCounts {
    agree: i32,
    disagree: i32,
    neutral: i32,
}

impl StanceCounts {
    fn record(&mut self, stance: Stance) {
        match stance {
            Stance::Agree => self.agree += 1,
            Stance::Disagree => self.disagree += 1,
            Stance::Neutral => self.neutral += 1,
        }
    }

    fn total(self) -> i32 {
        self.agree + self.disagree + self.neutral
    }
}

/// Run one full analysis for a user-supplied video reference.
///
/// 1. Extract the video identifier from the reference.
/// 2. Fetch one page of top-level comments.
/// 3. Classify each comment in provider order, bucketing its publication
///    month BEFORE classification — a comment dropped by a failed
///    classification still counts toward the monthly distribution.
/// 4. Aggregate per-stance percentages over the comments that survived.
/// 5. Persist the report and return the store-assigned id.
///
/// A single classification failure drops that comment and continues; a
/// rejected service credential aborts the whole run. No partial report is
/// ever persisted.
///
/// # Errors
///
/// Returns [`AnalysisError`] for every terminal state: unrecognized
/// reference, provider fetch failure, empty comment page, credential
/// rejection, zero surviving comments, or a store failure.
pub async fn run_analysis<S, C, R>(
    source: &S,
    classifier: &C,
    store: &R,
    reference: &str,
) -> Result<Uuid, AnalysisError>
where
    S: CommentSource,
    C: StanceClassifier,
    R: ReportStore,
{
    let video_id = extract_video_id(reference)
        .ok_or_else(|| AnalysisError::InvalidReference(reference.to_string()))?;

    let comments = source
        .fetch_top_level_comments(video_id)
        .await
        .map_err(AnalysisError::SourceUnavailable)?;

    if comments.is_empty() {
        return Err(AnalysisError::EmptyResult {
            video_id: video_id.to_string(),
        });
    }

    tracing::info!(video_id, fetched = comments.len(), "fetched comment batch");

    let mut buckets: Vec<MonthlyBucket> = Vec::new();
    let mut counts = StanceCounts::default();
    let mut analyzed: Vec<AnalyzedComment> = Vec::new();

    for comment in comments {
        bump_bucket(&mut buckets, month_label(comment.published_at));

        match classifier.classify(&comment.text).await {
            Ok(stance) => {
                counts.record(stance);
                analyzed.push(AnalyzedComment {
                    masked_author: mask_author(&comment.author),
                    text: comment.text,
                    stance,
                    published_at: comment.published_at,
                });
            }
            Err(ClassifierError::InvalidCredential) => {
                // Systemic misconfiguration, not a per-comment problem:
                // unwind the whole run immediately, persist nothing.
                tracing::error!(
                    video_id,
                    "classification service rejected the deployment credential; aborting run"
                );
                return Err(AnalysisError::InvalidCredential);
            }
            Err(e) => {
                tracing::warn!(
                    video_id,
                    error = %e,
                    "comment classification failed; dropping comment"
                );
            }
        }
    }

    let total = counts.total();
    if total == 0 {
        return Err(AnalysisError::NoClassifiedComments);
    }

    let report = NewAnalysis {
        video_reference: reference.to_string(),
        total_comments: total,
        sentiment_stats: SentimentStats {
            agree: percent(counts.agree, total),
            disagree: percent(counts.disagree, total),
            neutral: percent(counts.neutral, total),
        },
        monthly_distribution: buckets,
        comments: analyzed,
    };

    let id = store.create(&report).await?;
    tracing::info!(video_id, report_id = %id, total, "analysis persisted");
    Ok(id)
}

/// Short month name used as the time-bucket key.
fn month_label(published_at: DateTime<Utc>) -> String {
    published_at.format("%b").to_string()
}

/// Increment the bucket for `month`, appending a new one on first sight.
/// Buckets stay in first-observed order, not calendar order.
fn bump_bucket(buckets: &mut Vec<MonthlyBucket>, month: String) {
    match buckets.iter_mut().find(|b| b.month == month) {
        Some(bucket) => bucket.count += 1,
        None => buckets.push(MonthlyBucket { month, count: 1 }),
    }
}

/// Round-half-up percentage of `count` within `total`. Each stance rounds
/// independently, so the three results may not sum to exactly 100.
#[allow(clippy::cast_possible_truncation)]
fn percent(count: i32, total: i32) -> i32 {
    (f64::from(count) * 100.0 / f64::from(total)).round() as i32
}
