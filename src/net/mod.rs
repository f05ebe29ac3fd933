//! Network-facing helpers.
//!
//! # Design Decisions
//! - Private-address detection is a standalone predicate so the admission
//!   layer can treat it as one capability among several
//! - No trust in client input: unresolvable hosts are failures, not passes

pub mod private_addr;

pub use private_addr::{is_private_ip, is_private_url};
