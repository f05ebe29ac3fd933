//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeout > 0, redirect cap)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into a gateway instance

use crate::config::schema::GatewayConfig;

/// Upper bound on the configurable redirect limit.
pub const MAX_REDIRECT_LIMIT: u32 = 20;

/// A single semantic validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    ZeroTimeout,
    RedirectLimitTooHigh { configured: u32 },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::ZeroTimeout => {
                write!(f, "timeout_ms must be greater than zero")
            }
            ValidationError::RedirectLimitTooHigh { configured } => {
                write!(
                    f,
                    "max_redirects {} exceeds the supported limit of {}",
                    configured, MAX_REDIRECT_LIMIT
                )
            }
        }
    }
}

/// Validate a configuration, collecting every violation.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.timeout_ms == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.max_redirects > MAX_REDIRECT_LIMIT {
        errors.push(ValidationError::RedirectLimitTooHigh {
            configured: config.max_redirects,
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
