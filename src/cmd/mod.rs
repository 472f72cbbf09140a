//! CLI command implementations for frame-lock.
//!
//! Each module corresponds to one subcommand of the binary.

pub mod fix;
pub mod ping;
