//! Stance classification via the Gemini generative-language API.
//!
//! Sends one fixed-instruction prompt per comment and maps the model's
//! free-form reply to a three-way [`Stance`](vidpulse_core::Stance) label,
//! defaulting to neutral when the reply carries no recognized keyword.
//! Credential rejection is surfaced as its own error variant so callers can
//! treat it as a deployment-wide failure rather than a per-comment one.

mod client;
mod error;
mod interpret;

pub use client::GeminiClient;
pub use error::ClassifierError;
pub use interpret::stance_from_reply;
