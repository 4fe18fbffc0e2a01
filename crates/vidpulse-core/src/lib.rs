//! Shared domain types and application configuration for vidpulse.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub mod app_config;
pub mod config;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};

/// A comment's judged alignment with the video it was posted under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stance {
    Agree,
    Disagree,
    Neutral,
}

impl Stance {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Stance::Agree => "agree",
            Stance::Disagree => "disagree",
            Stance::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for Stance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One successfully classified comment as it appears in a persisted report.
///
/// The author display name is stored only in masked form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzedComment {
    pub masked_author: String,
    pub text: String,
    pub stance: Stance,
    pub published_at: DateTime<Utc>,
}

/// Count of fetched comments published in one calendar month.
///
/// `month` is the short month name (`"Jan"` .. `"Dec"`). Reports keep
/// buckets in first-observed order, not calendar order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyBucket {
    pub month: String,
    pub count: i32,
}

/// Per-stance percentages of classified comments.
///
/// Each value is rounded independently; the three are not guaranteed to
/// sum to exactly 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentStats {
    pub agree: i32,
    pub disagree: i32,
    pub neutral: i32,
}

/// The persisted aggregate produced by one analysis run.
///
/// Created exactly once per run and read-only thereafter; `id` is assigned
/// by the report store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub id: Uuid,
    pub video_reference: String,
    pub total_comments: i32,
    pub sentiment_stats: SentimentStats,
    pub monthly_distribution: Vec<MonthlyBucket>,
    pub comments: Vec<AnalyzedComment>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stance_serializes_lowercase() {
        let json = serde_json::to_string(&Stance::Disagree).expect("serialize");
        assert_eq!(json, "\"disagree\"");
    }

    #[test]
    fn stance_round_trips() {
        let stance: Stance = serde_json::from_str("\"agree\"").expect("deserialize");
        assert_eq!(stance, Stance::Agree);
    }

    #[test]
    fn report_serializes_bucket_order() {
        let report = AnalysisReport {
            id: Uuid::nil(),
            video_reference: "https://youtu.be/abc123".to_string(),
            total_comments: 2,
            sentiment_stats: SentimentStats {
                agree: 50,
                disagree: 0,
                neutral: 50,
            },
            monthly_distribution: vec![
                MonthlyBucket {
                    month: "Dec".to_string(),
                    count: 1,
                },
                MonthlyBucket {
                    month: "Jan".to_string(),
                    count: 1,
                },
            ],
            comments: vec![],
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&report).expect("serialize");
        let months: Vec<&str> = json["monthly_distribution"]
            .as_array()
            .expect("array")
            .iter()
            .map(|b| b["month"].as_str().expect("month"))
            .collect();
        // First-observed order must survive serialization untouched.
        assert_eq!(months, vec!["Dec", "Jan"]);
    }
}
