//! Error type shared by every client operation.

use std::time::Duration;

use thiserror::Error;

/// Alias for results returned by this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong between building a plan and reading a schedule.
///
/// Nothing is retried on the caller's behalf. The only repeated request is
/// the bounded job-status poll, and a failure inside it ends the call.
#[derive(Debug, Error)]
pub enum Error {
    /// The plan could not be encoded as JSON.
    #[error("failed to encode request body: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    /// Connection-level failure: DNS, refused connection, timeout.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a status other than 200 or 202.
    #[error("Status Code {status} from {url}")]
    Status { url: String, status: u16 },

    /// The response body did not match the expected shape.
    #[error("failed to decode response from {url}: {source}")]
    Deserialize {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// A long job was accepted but the service returned an empty job id.
    #[error("no job id in response from {url}")]
    MissingJobId { url: String },

    /// The full terminal body disagreed with the status read from it.
    #[error("job at {url} reported `{found}` where `{expected}` was expected")]
    UnexpectedJobState {
        url: String,
        expected: String,
        found: String,
    },

    /// The remote optimizer finished the job with an error message.
    #[error("{0}")]
    Remote(String),

    /// The job was still running when the poll budget ran out.
    #[error("Timed out after {max_retry} x {interval_secs} seconds")]
    TimedOut { max_retry: u8, interval_secs: u16 },
}

impl Error {
    /// HTTP status carried by a [`Error::Status`] failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Total polling bound for a [`Error::TimedOut`] failure.
    pub fn deadline(&self) -> Option<Duration> {
        match self {
            Self::TimedOut {
                max_retry,
                interval_secs,
            } => Some(Duration::from_secs(
                u64::from(*max_retry) * u64::from(*interval_secs),
            )),
            _ => None,
        }
    }

    pub(crate) fn deserialize(url: &str, source: serde_json::Error) -> Self {
        Self::Deserialize {
            url: url.to_string(),
            source,
        }
    }
}
