//! Remote-fetch gateway subsystem.
//!
//! # Data Flow
//! ```text
//! Caller-supplied URL (untrusted)
//!     → admission.rs (scheme short-circuit, then concurrent checks)
//!     → executor.rs (GET with timeout race, abort on timer fire)
//!     → stream.rs (live body handle, status < 400)
//!     or
//!     → classify.rs (normalize every failure)
//!     → error.rs (status + message across the trust boundary)
//! ```
//!
//! # Design Decisions
//! - Admission latency is bounded by the slowest single check, not the sum
//! - One generic rejection message; which check failed is never revealed
//! - The timer and the response race; the loser's effect is suppressed
//! - Exactly one of stream or error is delivered per fetch call
//! - No internal retries and no external cancellation hook

pub mod admission;
pub mod classify;
pub mod error;
pub mod executor;
pub mod stream;

use std::time::Duration;

use reqwest::redirect::Policy;
use reqwest::Client;

use crate::config::loader::ConfigError;
use crate::config::schema::GatewayConfig;
use crate::config::validation::validate_config;
use crate::gateway::error::GatewayError;
use crate::gateway::executor::RequestState;
use crate::gateway::stream::RemoteStream;

/// Identifying header sent with every outbound request.
const USER_AGENT: &str = concat!(
    env!("CARGO_PKG_NAME"),
    "/",
    env!("CARGO_PKG_VERSION")
);

/// Validated remote-fetch gateway.
///
/// Construct once and reuse: the configuration and the HTTP client are
/// shared read-only across concurrent fetch calls.
#[derive(Debug, Clone)]
pub struct ProxyGateway {
    config: GatewayConfig,
    client: Client,
}

impl ProxyGateway {
    /// Build a gateway from a validated configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, ConfigError> {
        validate_config(&config).map_err(ConfigError::Validation)?;

        let redirects = if config.max_redirects == 0 {
            Policy::none()
        } else {
            Policy::limited(config.max_redirects as usize)
        };

        // Connections go straight to the origin; no egress proxy.
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(redirects)
            .no_proxy()
            .build()
            .map_err(ConfigError::Client)?;

        Ok(Self { config, client })
    }

    /// Callers must only invoke this gateway with URLs that passed an
    /// upstream signature check; enforcement lives in that collaborator.
    pub fn requires_signed_urls(&self) -> bool {
        true
    }

    /// Fetch a remote URL, yielding a live byte stream or a classified
    /// error. Exactly one of the two per call.
    pub async fn fetch(&self, url: &str) -> Result<RemoteStream, GatewayError> {
        tracing::debug!(url = %url, "request for URL");

        admission::validate(url, &self.config).await?;

        executor::execute(
            &self.client,
            url,
            Duration::from_millis(self.config.timeout_ms),
        )
        .await
    }

    /// Classify an error raised while consuming a returned stream.
    pub fn classify_stream_error(&self, err: &reqwest::Error) -> GatewayError {
        classify::transport_error(err, &RequestState::default())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::validation::ValidationError;

    #[test]
    fn requires_signed_urls_by_default() {
        let gateway = ProxyGateway::new(GatewayConfig::default()).unwrap();
        assert!(gateway.requires_signed_urls());
    }

    #[test]
    fn rejects_invalid_config() {
        let config = GatewayConfig {
            timeout_ms: 0,
            ..Default::default()
        };
        match ProxyGateway::new(config) {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors, vec![ValidationError::ZeroTimeout]);
            }
            other => panic!("expected validation failure, got {:?}", other.map(|_| ())),
        }
    }
}
