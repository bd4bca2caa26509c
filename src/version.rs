// src/version.rs
//! Version of this tool, not of the firmware it manages.

/// Tool version derived from Cargo.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
