use crate::args::Args;
pub use ecm_version_engine::config::{SyncConfig, SyncConfigBuilder};
use ecm_version_engine::{Changes, Result};

impl TryFrom<&Args> for SyncConfig {
    type Error = ecm_version_engine::VersionError;

    fn try_from(args: &Args) -> Result<Self> {
        SyncConfigBuilder::default()
            .project_root(args.root.clone())
            .build()
    }
}

/// Mutations requested on the command line.
#[must_use]
pub fn changes_from_args(args: &Args) -> Changes {
    Changes {
        set: args.set.clone(),
        bump: args.bump.map(Into::into),
        protocol: args.protocol,
    }
}
