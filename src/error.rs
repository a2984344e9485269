// SPDX-License-Identifier: MIT

//! Typed error handling for text2bpmn
//!
//! Nothing in the extraction engine itself fails: empty or inconsistent input
//! degrades to an empty or partial element list. Errors only arise at the
//! edges, when talking to the annotation collaborator or loading configuration.

use thiserror::Error;

/// Top-level error type for text2bpmn
#[derive(Debug, Error)]
pub enum Text2BpmnError {
    /// The annotation collaborator failed or returned malformed data
    #[error("Annotation error: {0}")]
    Annotation(#[from] AnnotationError),

    /// Configuration errors (missing env vars, invalid marker tables)
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// YAML parsing errors
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP client errors
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors raised while obtaining or validating an annotated document
#[derive(Debug, Error)]
pub enum AnnotationError {
    /// The collaborator returned no tokens
    #[error("Annotated document is empty")]
    EmptyDocument,

    /// A token points at a head outside the document or its sentence
    #[error("Token {token} has invalid head {head}")]
    InvalidHead { token: usize, head: usize },

    /// Following heads from a token leads back to it
    #[error("Dependency cycle through token {token}")]
    Cycle { token: usize },

    /// Character offsets do not fit the document text
    #[error("Token {token} has invalid character offsets {start}..{end}")]
    InvalidOffset {
        token: usize,
        start: usize,
        end: usize,
    },

    /// Sentence spans overlap, are out of order or leave tokens uncovered
    #[error("Invalid sentence segmentation: {0}")]
    InvalidSentences(String),

    /// The annotation service answered with an error status
    #[error("Annotation service returned {status}: {message}")]
    Service { status: u16, message: String },

    /// The annotation service could not be reached
    #[error("Annotation service unreachable: {0}")]
    Transport(String),

    /// The annotation payload could not be decoded
    #[error("Could not decode annotation: {0}")]
    Decode(String),
}

impl Text2BpmnError {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

impl From<reqwest::Error> for AnnotationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AnnotationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
