//! Fetch execution.
//!
//! Issues the outbound GET only after admission has succeeded, racing the
//! in-flight request against the configured timeout. Per call the state
//! machine is `Idle -> Requesting -> {TimedOut, Responding}`, then
//! `Responding -> Success | Failed`; whichever of the timer and the
//! response settles first determines the terminal state and the loser is
//! dropped. No retries happen here; retry policy belongs to the transport
//! layer.

use std::time::Duration;

use reqwest::Client;

use crate::gateway::classify;
use crate::gateway::error::GatewayError;
use crate::gateway::stream::RemoteStream;

/// Mutable race state for one in-flight fetch. Owned exclusively by a
/// single executor invocation; destroyed when the fetch settles.
#[derive(Debug, Default)]
pub(crate) struct RequestState {
    /// Set before the in-flight request is cancelled, so the resulting
    /// connection teardown is attributed to our timeout.
    pub aborted: bool,
}

/// Perform the HTTP GET, enforcing the connection-phase timeout.
pub(crate) async fn execute(
    client: &Client,
    url: &str,
    timeout: Duration,
) -> Result<RemoteStream, GatewayError> {
    let mut state = RequestState::default();

    tracing::debug!(
        url = %url,
        timeout_ms = timeout.as_millis() as u64,
        "performing HTTP request with connection timeout"
    );

    let mut request = Box::pin(client.get(url).send());

    let raced = tokio::select! {
        res = &mut request => Some(res),
        _ = tokio::time::sleep(timeout) => None,
    };

    let response = match raced {
        None => {
            // Mark aborted first: the teardown below must read as a
            // caller-caused timeout, not a remote reset.
            state.aborted = true;
            drop(request);
            tracing::debug!(url = %url, "timeout reached while opening connection, aborting request");
            return Err(classify::aborted_connection(&state));
        }
        Some(Err(err)) => {
            let classified = classify::transport_error(&err, &state);
            if matches!(classified, GatewayError::Internal(_)) {
                tracing::error!(url = %url, error = %err, "unclassifiable transport error");
            } else {
                tracing::debug!(url = %url, error = %err, "request failed");
            }
            return Err(classified);
        }
        Some(Ok(response)) => response,
    };

    // Timer is gone as soon as the response arrives, success or not.
    let status = response.status();
    if status.as_u16() >= 400 {
        tracing::debug!(url = %url, status = status.as_u16(), "response status was an error, rejecting");
        return Err(classify::status_error(status));
    }

    Ok(RemoteStream::new(response))
}
