//! Observability subsystem.
//!
//! Structured logging only. Rejections and remote failures are expected,
//! caller-facing outcomes and are logged at debug level; an unclassifiable
//! transport error is the one condition worth operational attention.

pub mod logging;
