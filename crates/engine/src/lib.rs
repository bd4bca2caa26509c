//! # ecm_version_engine
//!
//! Single source of truth for the ECM firmware and protocol versions.
//!
//! - [`version`]: `MAJOR.MINOR.PATCH` parsing, formatting and bumping
//! - [`record`]: the canonical `VERSION` file
//! - [`targets`]: the `#define` markers each firmware header carries
//! - [`rewriter`]: staged, atomic marker substitution across headers
//! - [`sync`]: load → change → rewrite → save

pub mod config;
pub mod error;
pub mod persistence;
pub mod record;
pub mod rewriter;
pub mod sync;
pub mod targets;
pub mod version;

pub use config::{SyncConfig, SyncConfigBuilder};
pub use error::{Result, VersionError};
pub use record::{RecordStore, VersionRecord};
pub use rewriter::{Rewriter, TargetUpdate, UpdateReporter};
pub use sync::{Applied, Changes, Synchronizer, plan};
pub use version::{BumpKind, FirmwareVersion, bump_version, format_version, parse_version};
