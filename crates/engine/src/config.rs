use derive_builder::Builder;
use std::path::PathBuf;

use crate::error::{Result, VersionError};
use crate::targets::{TargetFile, default_targets};

pub const DEFAULT_VERSION_FILE: &str = "VERSION";

#[derive(Debug, Clone, Builder)]
#[builder(setter(into), build_fn(error = "VersionError"))]
pub struct SyncConfig {
    /// Base for every relative path below.
    #[builder(default = "PathBuf::from(\".\")")]
    pub project_root: PathBuf,
    #[builder(default = "PathBuf::from(DEFAULT_VERSION_FILE)")]
    pub version_file: PathBuf,
    #[builder(default = "default_targets()")]
    pub targets: Vec<TargetFile>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("."),
            version_file: PathBuf::from(DEFAULT_VERSION_FILE),
            targets: default_targets(),
        }
    }
}

impl SyncConfig {
    /// Default layout under `root`.
    ///
    /// # Errors
    /// Never fails for the default layout; kept fallible to match the builder.
    pub fn for_root(root: impl Into<PathBuf>) -> Result<Self> {
        SyncConfigBuilder::default().project_root(root).build()
    }

    #[must_use]
    pub fn version_path(&self) -> PathBuf {
        self.project_root.join(&self.version_file)
    }
}

impl From<derive_builder::UninitializedFieldError> for VersionError {
    fn from(err: derive_builder::UninitializedFieldError) -> Self {
        Self::Config(err.to_string())
    }
}
