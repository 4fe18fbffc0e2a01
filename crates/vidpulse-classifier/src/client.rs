//! HTTP client for the Gemini `generateContent` endpoint.
//!
//! One request per comment, fixed instruction prompt, free-form text reply.
//! The API key travels as a query parameter; a rejected key is detectable
//! from the error body and mapped to [`ClassifierError::InvalidCredential`]
//! so callers can distinguish a misconfigured deployment from a transient
//! per-comment failure.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use vidpulse_core::Stance;

use crate::error::ClassifierError;
use crate::interpret::stance_from_reply;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/";
const MODEL: &str = "gemini-1.5-flash";

/// Client for the Gemini generative-language API.
///
/// Manages the HTTP client, API key, and endpoint URL. Use
/// [`GeminiClient::new`] for production or [`GeminiClient::with_base_url`]
/// to point at a mock server in tests.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    endpoint: Url,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GenerateContentResponse {
    /// The first candidate's first text part, or `""` when the model
    /// returned no usable candidate. An empty reply interprets as neutral.
    fn first_text(&self) -> &str {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.first())
            .map_or("", |p| p.text.as_str())
    }
}

impl GeminiClient {
    /// Creates a new client pointed at the production Gemini API.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ClassifierError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClassifierError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, ClassifierError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised)
            .and_then(|base| base.join(&format!("models/{MODEL}:generateContent")))
            .map_err(|e| ClassifierError::InvalidBaseUrl {
                base_url: base_url.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            endpoint,
        })
    }

    /// Classify one comment's stance toward the video it was posted under.
    ///
    /// # Errors
    ///
    /// - [`ClassifierError::InvalidCredential`] when the service rejects the
    ///   configured API key — a deployment-wide condition.
    /// - [`ClassifierError::Api`] on any other service rejection.
    /// - [`ClassifierError::Http`] on network failure.
    /// - [`ClassifierError::Deserialize`] if a 2xx body does not match the
    ///   expected shape.
    pub async fn classify(&self, comment_text: &str) -> Result<Stance, ClassifierError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: build_prompt(comment_text),
                }],
            }],
        };

        let response = self
            .client
            .post(self.build_url())
            .json(&request)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            if is_credential_rejection(&body) {
                return Err(ClassifierError::InvalidCredential);
            }
            let message = parse_error_message(&body);
            return Err(ClassifierError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse =
            serde_json::from_str(&body).map_err(|e| ClassifierError::Deserialize {
                context: "generateContent".to_string(),
                source: e,
            })?;

        Ok(stance_from_reply(parsed.first_text()))
    }

    fn build_url(&self) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("key", &self.api_key);
        url
    }
}

/// Fixed instruction prompt asking for exactly one of the three labels.
fn build_prompt(comment_text: &str) -> String {
    format!(
        "Analyze if this YouTube comment agrees, disagrees, or is neutral \
         about the video content. Only respond with one word: AGREE, \
         DISAGREE, or NEUTRAL.\nComment: \"{comment_text}\""
    )
}

/// Whether an error body signals a rejected API key.
///
/// Gemini marks the condition with the `API_KEY_INVALID` reason and an
/// "API key not valid" message; either is sufficient.
fn is_credential_rejection(body: &str) -> bool {
    body.contains("API_KEY_INVALID") || body.contains("API key not valid")
}

/// Pull the human-readable message out of the Google error envelope,
/// falling back to the raw body when the envelope is malformed.
fn parse_error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct Envelope {
        error: EnvelopeBody,
    }

    #[derive(Deserialize)]
    struct EnvelopeBody {
        message: String,
    }

    serde_json::from_str::<Envelope>(body)
        .map_or_else(|_| body.trim().to_string(), |e| e.error.message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_prompt_embeds_the_comment() {
        let prompt = build_prompt("Loved every minute");
        assert!(prompt.contains("Comment: \"Loved every minute\""));
        assert!(prompt.contains("AGREE, DISAGREE, or NEUTRAL"));
    }

    #[test]
    fn build_url_appends_key() {
        let client = GeminiClient::with_base_url("secret", 30, "ua", "https://example.com")
            .expect("client construction should not fail");
        let url = client.build_url();
        assert_eq!(
            url.as_str(),
            "https://example.com/models/gemini-1.5-flash:generateContent?key=secret"
        );
    }

    #[test]
    fn credential_rejection_matches_reason_and_message() {
        assert!(is_credential_rejection(
            r#"{"error":{"details":[{"reason":"API_KEY_INVALID"}]}}"#
        ));
        assert!(is_credential_rejection(
            r#"{"error":{"message":"API key not valid. Please pass a valid API key."}}"#
        ));
        assert!(!is_credential_rejection(
            r#"{"error":{"message":"Resource has been exhausted"}}"#
        ));
    }

    #[test]
    fn parse_error_message_reads_envelope() {
        let body = r#"{"error":{"code":429,"message":"Resource has been exhausted"}}"#;
        assert_eq!(parse_error_message(body), "Resource has been exhausted");
    }

    #[test]
    fn parse_error_message_falls_back_to_raw_body() {
        assert_eq!(parse_error_message(" oops "), "oops");
    }

    #[test]
    fn first_text_handles_missing_candidates() {
        let parsed: GenerateContentResponse = serde_json::from_str("{}").expect("parse");
        assert_eq!(parsed.first_text(), "");
    }
}
