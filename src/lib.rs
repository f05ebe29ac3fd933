//! Validated remote-fetch gateway for proxying third-party origins.
//!
//! Given an externally supplied URL, the gateway decides whether the URL
//! is permitted to be fetched (scheme check, private-network block,
//! pluggable custom predicate), performs the fetch under timeout and
//! redirect constraints, and maps every failure into a classified error
//! carrying an HTTP-style status and message.

pub mod config;
pub mod gateway;
pub mod net;
pub mod observability;

pub use config::loader::ConfigError;
pub use config::schema::{AllowRequestFn, GatewayConfig, ValidationResult};
pub use gateway::error::{ClassifiedError, GatewayError, ValidatorError};
pub use gateway::stream::RemoteStream;
pub use gateway::ProxyGateway;
