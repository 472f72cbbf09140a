//! Locks image elements on a design frame stored behind the Supabase REST API.
//!
//! The flow is fetch, scan-and-fix, persist: see [`cmd::fix::run`].

pub mod cmd;
pub mod config;
pub mod error;
pub mod patch;
pub mod store;
pub mod types;

pub use error::{Error, Result};
