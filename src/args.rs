use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::options::{BumpKind, OutputFormat};

const EXAMPLES: &str = "\
Examples:
  ecm_version                     Show current version
  ecm_version --bump patch        Bump patch version
  ecm_version --bump minor        Bump minor version
  ecm_version --bump major        Bump major version
  ecm_version --set 1.2.3         Set specific version
  ecm_version --protocol 2        Set protocol version";

#[derive(Parser, Debug)]
#[command(
    name = "ecm_version",
    version = crate::VERSION,
    about = "ECM Version Management",
    long_about = "Manages firmware and protocol versions from a single source of truth \
                  and updates the version definitions in all firmware projects.",
    after_help = EXAMPLES
)]
pub struct Args {
    /// Bump version (major, minor, or patch)
    #[arg(long, value_enum)]
    pub bump: Option<BumpKind>,

    /// Set specific version (e.g., 1.2.3)
    #[arg(long, value_name = "VERSION")]
    pub set: Option<String>,

    /// Set protocol version
    #[arg(long, value_name = "N")]
    pub protocol: Option<u64>,

    /// Show current versions (default)
    #[arg(long)]
    pub show: bool,

    /// Project root holding VERSION and src/
    #[arg(long, env = "ECM_PROJECT_ROOT", default_value = ".", value_name = "DIR")]
    pub root: PathBuf,

    /// Output format for --show
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
