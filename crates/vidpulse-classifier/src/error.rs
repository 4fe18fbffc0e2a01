use thiserror::Error;

/// Errors returned by the Gemini classification client.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service rejected the deployment's access credential.
    ///
    /// Fatal for the deployment, not for a single comment: callers must
    /// abort the whole run instead of dropping the comment.
    #[error("classification service rejected the configured API credential")]
    InvalidCredential,

    /// Any other non-2xx reply from the service. Comment-scoped.
    #[error("classification service error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configured base URL could not be parsed.
    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
