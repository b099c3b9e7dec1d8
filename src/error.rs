//! Unified error type for collage.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why the object list came out empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyInput {
    /// The raw input was empty or whitespace-only.
    Blank,
    /// The raw input had content, but no object survived splitting and trimming.
    NoValidObjects,
}

impl EmptyInput {
    fn message(self) -> &'static str {
        match self {
            Self::Blank => "Please enter some objects for your collage.",
            Self::NoValidObjects => "Please enter valid objects separated by commas.",
        }
    }
}

/// Errors that can occur while building or generating a collage.
#[derive(Debug, Error)]
pub enum CollageError {
    /// No API key was supplied.
    #[error(
        "Please provide your OpenAI API key (--api-key, OPENAI_API_KEY, or the config file)."
    )]
    MissingCredential,

    /// The object input produced no usable objects.
    #[error("{}", .0.message())]
    EmptyObjectList(EmptyInput),

    /// The image service rejected the credential.
    #[error("Invalid API key. Please check your OpenAI API key.")]
    AuthenticationFailure(String),

    /// The image service throttled the request.
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited(String),

    /// The image service rejected the prompt or parameters.
    #[error("Request error: {0}")]
    InvalidRequest(String),

    /// Any other network, decode, or response-shape failure.
    #[error("An error occurred: {0}")]
    UnclassifiedFailure(String),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Flat tag for each [`CollageError`] variant, used in cassettes and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// See [`CollageError::MissingCredential`].
    MissingCredential,
    /// See [`CollageError::EmptyObjectList`].
    EmptyObjectList,
    /// See [`CollageError::AuthenticationFailure`].
    AuthenticationFailure,
    /// See [`CollageError::RateLimited`].
    RateLimited,
    /// See [`CollageError::InvalidRequest`].
    InvalidRequest,
    /// See [`CollageError::UnclassifiedFailure`].
    UnclassifiedFailure,
    /// See [`CollageError::Config`].
    Config,
    /// See [`CollageError::Io`].
    Io,
}

impl CollageError {
    /// The flat kind of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingCredential => ErrorKind::MissingCredential,
            Self::EmptyObjectList(_) => ErrorKind::EmptyObjectList,
            Self::AuthenticationFailure(_) => ErrorKind::AuthenticationFailure,
            Self::RateLimited(_) => ErrorKind::RateLimited,
            Self::InvalidRequest(_) => ErrorKind::InvalidRequest,
            Self::UnclassifiedFailure(_) => ErrorKind::UnclassifiedFailure,
            Self::Config(_) => ErrorKind::Config,
            Self::Io(_) => ErrorKind::Io,
        }
    }

    /// Service-provided or raw detail carried by the error, if any.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::AuthenticationFailure(d)
            | Self::RateLimited(d)
            | Self::InvalidRequest(d)
            | Self::UnclassifiedFailure(d)
            | Self::Config(d) => d.clone(),
            Self::Io(e) => e.to_string(),
            Self::MissingCredential | Self::EmptyObjectList(_) => self.to_string(),
        }
    }

    /// Rebuild an error from a recorded kind and detail.
    ///
    /// Validation kinds never reach a cassette; they fall back to
    /// [`CollageError::UnclassifiedFailure`].
    #[must_use]
    pub fn from_recorded(kind: ErrorKind, detail: String) -> Self {
        match kind {
            ErrorKind::AuthenticationFailure => Self::AuthenticationFailure(detail),
            ErrorKind::RateLimited => Self::RateLimited(detail),
            ErrorKind::InvalidRequest => Self::InvalidRequest(detail),
            ErrorKind::Config => Self::Config(detail),
            _ => Self::UnclassifiedFailure(detail),
        }
    }
}

impl From<reqwest::Error> for CollageError {
    fn from(e: reqwest::Error) -> Self {
        Self::UnclassifiedFailure(format!("Network error: {e}"))
    }
}

/// Classify a non-success response from the image service.
///
/// The detail is the service's `error.message` when the body carries one,
/// otherwise the raw body.
#[must_use]
pub fn classify_api_error(status: u16, body: &str) -> CollageError {
    let detail = service_message(body).unwrap_or_else(|| body.trim().to_string());
    match status {
        401 => CollageError::AuthenticationFailure(detail),
        429 => CollageError::RateLimited(detail),
        400 => CollageError::InvalidRequest(detail),
        _ => CollageError::UnclassifiedFailure(format!("API error ({status}): {detail}")),
    }
}

fn service_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("error")?.get("message")?.as_str().map(str::to_string)
}
