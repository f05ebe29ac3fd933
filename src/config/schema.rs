//! Configuration schema definitions.
//!
//! This module defines the configuration structure for the gateway. All
//! data-bearing fields derive Serde traits for deserialization from config
//! files; the pluggable admission predicate is installed programmatically.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::gateway::error::ValidatorError;

/// Outcome of a single admission check: allowed or not, or a failure of
/// the check itself.
pub type ValidationResult = Result<bool, ValidatorError>;

/// Pluggable admission predicate over a candidate URL.
///
/// Held as a plain function value in configuration rather than a trait
/// object hierarchy; any `Fn(String) -> Future` closure satisfies it via
/// [`GatewayConfig::with_allow_request`].
pub type AllowRequestFn =
    Arc<dyn Fn(String) -> Pin<Box<dyn Future<Output = ValidationResult> + Send>> + Send + Sync>;

/// Configuration for a gateway instance.
///
/// Immutable once the gateway is constructed; shared read-only across
/// concurrent fetch calls.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Admit URLs whose host resolves to a private/loopback address.
    /// Off by default to prevent internal-network probing via the proxy.
    pub allow_private_hosts: bool,

    /// Timeout in milliseconds for the connection phase (opening the
    /// connection and receiving a response).
    pub timeout_ms: u64,

    /// Maximum number of redirects followed automatically.
    pub max_redirects: u32,

    /// Optional caller-supplied admission predicate.
    #[serde(skip)]
    pub allow_request: Option<AllowRequestFn>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            allow_private_hosts: false,
            timeout_ms: 7500,
            max_redirects: 3,
            allow_request: None,
        }
    }
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("allow_private_hosts", &self.allow_private_hosts)
            .field("timeout_ms", &self.timeout_ms)
            .field("max_redirects", &self.max_redirects)
            .field(
                "allow_request",
                &self.allow_request.as_ref().map(|_| "<fn>"),
            )
            .finish()
    }
}

impl GatewayConfig {
    /// Install a custom admission predicate.
    pub fn with_allow_request<F, Fut>(mut self, predicate: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ValidationResult> + Send + 'static,
    {
        self.allow_request = Some(Arc::new(move |url| Box::pin(predicate(url))));
        self
    }
}
