// Error types shared by every layer of the client. Nothing below `main`
// exits the process; each failure is returned as an `HvzError` and the
// binary decides what to print and which exit code to use.

use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Message printed when the service answers 404.
pub const NOT_FOUND_MESSAGE: &str = "404 Not Found!";

#[derive(Debug, Error)]
pub enum HvzError {
    /// HTTP 400 with a structured `errors` array, one entry per line.
    #[error("{}", .0.join("\n"))]
    Validation(Vec<String>),

    #[error("{}", NOT_FOUND_MESSAGE)]
    NotFound,

    /// Any other non-success status.
    #[error("service returned {status}: {body}")]
    Service { status: StatusCode, body: String },

    #[error("could not reach the HvZ service: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("unexpected response from the HvZ service: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("no API key stored at {}; run `hvz api-key` first", .0.display())]
    MissingCredential(PathBuf),

    #[error("could not access credential file {}: {source}", .path.display())]
    Credential {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A required argument was neither passed nor promptable.
    #[error("missing required input: {0}")]
    MissingInput(String),

    #[error("could not write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("prompt failed: {0}")]
    Prompt(#[source] std::io::Error),
}

impl HvzError {
    /// Whether the message came from the service itself rather than from
    /// the client, in which case it is printed to stdout without an
    /// `error:` prefix.
    pub fn is_service_message(&self) -> bool {
        matches!(self, HvzError::Validation(_) | HvzError::NotFound)
    }
}

pub type Result<T> = std::result::Result<T, HvzError>;
