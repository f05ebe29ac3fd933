//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → shared read-only by all fetch calls on a gateway instance
//! ```
//!
//! # Design Decisions
//! - Config is immutable once a gateway is built; no per-call mutation
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - The admission predicate is a function value, not file-loadable

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{AllowRequestFn, GatewayConfig, ValidationResult};
