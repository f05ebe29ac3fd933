//! Failure classification.
//!
//! Distinguishes "we gave up waiting" (504) from "the remote server is
//! unreachable or broken" (502) from "the remote server rejected something"
//! (4xx passthrough) from "something we didn't anticipate" (500). The
//! decision core is a pure function over decomposed failure parts plus the
//! per-call aborted flag; precedence matters because a reset caused by our
//! own abort must not be misclassified as a remote failure.

use reqwest::StatusCode;

use crate::gateway::error::GatewayError;
use crate::gateway::executor::RequestState;

/// Decomposed view of a transport failure.
#[derive(Debug, Clone)]
pub(crate) struct FailureParts {
    pub connection_reset: bool,
    pub timed_out: bool,
    pub status: Option<StatusCode>,
    pub detail: String,
}

/// Apply the classification table, in precedence order.
pub(crate) fn classify_parts(parts: FailureParts, aborted: bool) -> GatewayError {
    if parts.connection_reset && aborted {
        return GatewayError::GatewayTimeout;
    }

    if parts.timed_out {
        return GatewayError::BadGateway("socket error trying to reach remote server".into());
    }

    let Some(status) = parts.status else {
        return GatewayError::Internal(parts.detail);
    };

    status_error(status)
}

/// Classify a transport-level error from the HTTP client.
pub(crate) fn transport_error(err: &reqwest::Error, state: &RequestState) -> GatewayError {
    classify_parts(
        FailureParts {
            connection_reset: connection_reset(err),
            timed_out: err.is_timeout(),
            status: err.status(),
            detail: err.to_string(),
        },
        state.aborted,
    )
}

/// Classify a connection we cancelled ourselves. Called by the executor
/// after it has marked the state aborted, so the cancellation is
/// attributed to our timeout rather than to the remote end.
pub(crate) fn aborted_connection(state: &RequestState) -> GatewayError {
    classify_parts(
        FailureParts {
            connection_reset: true,
            timed_out: false,
            status: None,
            detail: "connection aborted".into(),
        },
        state.aborted,
    )
}

/// Classify a response that arrived with a failure status.
pub(crate) fn status_error(status: StatusCode) -> GatewayError {
    let message = status.canonical_reason().unwrap_or("Unknown Error").to_string();

    if status.is_server_error() {
        GatewayError::BadGateway(message)
    } else {
        GatewayError::RemoteClient { status, message }
    }
}

/// Walk the error source chain looking for a connection reset.
fn connection_reset(err: &(dyn std::error::Error + 'static)) -> bool {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(current) = source {
        if let Some(io) = current.downcast_ref::<std::io::Error>() {
            if io.kind() == std::io::ErrorKind::ConnectionReset {
                return true;
            }
        }
        source = current.source();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(connection_reset: bool, timed_out: bool, status: Option<StatusCode>) -> FailureParts {
        FailureParts {
            connection_reset,
            timed_out,
            status,
            detail: "detail".into(),
        }
    }

    #[test]
    fn reset_after_abort_is_gateway_timeout() {
        let err = classify_parts(parts(true, false, None), true);
        assert!(matches!(err, GatewayError::GatewayTimeout));
        assert_eq!(err.status().as_u16(), 504);
    }

    #[test]
    fn abort_takes_precedence_over_status() {
        let err = classify_parts(parts(true, false, Some(StatusCode::INTERNAL_SERVER_ERROR)), true);
        assert!(matches!(err, GatewayError::GatewayTimeout));
    }

    #[test]
    fn reset_without_abort_is_not_a_timeout() {
        let err = classify_parts(parts(true, false, None), false);
        assert!(matches!(err, GatewayError::Internal(_)));
        assert_eq!(err.status().as_u16(), 500);
    }

    #[test]
    fn socket_timeout_is_bad_gateway() {
        let err = classify_parts(parts(false, true, None), false);
        assert!(matches!(err, GatewayError::BadGateway(_)));
        assert!(err.to_string().contains("socket error"));
    }

    #[test]
    fn statusless_error_is_internal() {
        let err = classify_parts(parts(false, false, None), false);
        assert!(matches!(err, GatewayError::Internal(_)));
    }

    #[test]
    fn remote_5xx_becomes_bad_gateway() {
        let err = status_error(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.status().as_u16(), 502);
        assert_eq!(err.to_string(), "Internal Server Error");

        let err = status_error(StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.status().as_u16(), 502);
    }

    #[test]
    fn remote_4xx_passes_through() {
        let err = status_error(StatusCode::UNAUTHORIZED);
        assert_eq!(err.status().as_u16(), 401);
        assert_eq!(err.to_string(), "Unauthorized");

        let err = status_error(StatusCode::NOT_FOUND);
        assert_eq!(err.status().as_u16(), 404);
    }

    #[test]
    fn reset_detected_through_source_chain() {
        let reset = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset by peer");
        assert!(connection_reset(&reset));

        let refused = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert!(!connection_reset(&refused));
    }
}
