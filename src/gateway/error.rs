//! Error taxonomy exposed across the trust boundary.
//!
//! Every failure a fetch can produce is normalized into [`GatewayError`],
//! which always carries an HTTP-style status and a human-readable message.
//! No transport-internal error object ever crosses the boundary
//! unclassified.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An error raised by an admission check itself, as opposed to a check
/// deciding "not allowed".
///
/// The message is surfaced to the end caller verbatim; the optional status
/// passes through unclassified (defaults to 500 at the boundary).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidatorError {
    message: String,
    status: Option<StatusCode>,
}

impl ValidatorError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }
}

/// Classified outcome of a failed fetch.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// The URL failed the scheme check before any network access.
    #[error("{0}")]
    InvalidInput(String),

    /// One or more admission checks returned false. Deliberately generic:
    /// the message never reveals which check blocked the request.
    #[error("URL not allowed")]
    Rejected,

    /// An admission check errored; its own message passes through.
    #[error(transparent)]
    Validator(#[from] ValidatorError),

    /// Our timeout fired and the in-flight request was aborted.
    #[error("timed out waiting for the remote server to respond")]
    GatewayTimeout,

    /// The remote server is unreachable or failed (5xx, socket error).
    #[error("{0}")]
    BadGateway(String),

    /// The remote server rejected the request; passed through verbatim.
    #[error("{message}")]
    RemoteClient { status: StatusCode, message: String },

    /// A failure with no discernible status; unanticipated.
    #[error("{0}")]
    Internal(String),
}

impl GatewayError {
    /// HTTP-style status for this error, per the classification table.
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::InvalidInput(_) | GatewayError::Rejected => StatusCode::BAD_REQUEST,
            GatewayError::Validator(v) => v.status().unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            GatewayError::GatewayTimeout => StatusCode::GATEWAY_TIMEOUT,
            GatewayError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            GatewayError::RemoteClient { status, .. } => *status,
            GatewayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Serializable payload for callers on the far side of the boundary.
    pub fn to_classified(&self) -> ClassifiedError {
        ClassifiedError {
            http_status: self.status().as_u16(),
            message: self.to_string(),
        }
    }
}

/// Wire-friendly form of a [`GatewayError`]: a machine-readable status plus
/// a human-readable message, independent of the originating failure's
/// internal representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedError {
    pub http_status: u16,
    pub message: String,
}
