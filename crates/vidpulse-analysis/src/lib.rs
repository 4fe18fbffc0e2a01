//! Comment-analysis pipeline for vidpulse.
//!
//! Drives one analysis run end to end: parse the video reference, fetch a
//! page of top-level comments, classify each comment's stance with
//! per-comment failure tolerance, aggregate sentiment statistics and the
//! monthly distribution, and persist the resulting report. The external
//! collaborators (comment source, classifier, report store) sit behind
//! capability traits so tests run against deterministic stand-ins.

pub mod error;
pub mod mask;
pub mod pipeline;
pub mod providers;

pub use error::AnalysisError;
pub use mask::mask_author;
pub use pipeline::run_analysis;
pub use providers::{CommentSource, ReportStore, StanceClassifier};
