use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::error::{Result, VersionError};

/// Firmware semantic version (`MAJOR.MINOR.PATCH`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct FirmwareVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

/// Which component a bump increments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BumpKind {
    Major,
    Minor,
    Patch,
}

impl FirmwareVersion {
    #[must_use]
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Increment one component and reset the lower-order ones.
    ///
    /// Components saturate at `u64::MAX`.
    #[must_use]
    pub const fn bump(self, kind: BumpKind) -> Self {
        match kind {
            BumpKind::Major => Self::new(self.major.saturating_add(1), 0, 0),
            BumpKind::Minor => Self::new(self.major, self.minor.saturating_add(1), 0),
            BumpKind::Patch => Self::new(self.major, self.minor, self.patch.saturating_add(1)),
        }
    }
}

impl fmt::Display for FirmwareVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for FirmwareVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self> {
        parse_version(s)
    }
}

fn version_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([0-9]+)\.([0-9]+)\.([0-9]+)$").expect("version pattern is valid")
    })
}

/// Parse `MAJOR.MINOR.PATCH`. Anything else is a [`VersionError::Format`].
///
/// # Errors
/// Returns `Format` if `text` is not three dot-separated runs of ASCII digits,
/// or if a component does not fit in a `u64`.
pub fn parse_version(text: &str) -> Result<FirmwareVersion> {
    let format_err = || VersionError::Format {
        input: text.to_string(),
    };
    let caps = version_regex().captures(text).ok_or_else(format_err)?;
    let component = |i: usize| caps[i].parse::<u64>().map_err(|_| format_err());

    Ok(FirmwareVersion::new(component(1)?, component(2)?, component(3)?))
}

#[must_use]
pub fn format_version(major: u64, minor: u64, patch: u64) -> String {
    FirmwareVersion::new(major, minor, patch).to_string()
}

/// String-level bump: `bump_version("1.2.3", "minor") == "1.3.0"`.
///
/// # Errors
/// Returns `Format` for a malformed version and `InvalidKind` for an unknown kind.
pub fn bump_version(version: &str, kind: &str) -> Result<String> {
    let version = parse_version(version)?;
    let kind: BumpKind = kind.parse()?;
    Ok(version.bump(kind).to_string())
}

impl BumpKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Major => "major",
            Self::Minor => "minor",
            Self::Patch => "patch",
        }
    }
}

impl fmt::Display for BumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BumpKind {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "major" => Ok(Self::Major),
            "minor" => Ok(Self::Minor),
            "patch" => Ok(Self::Patch),
            _ => Err(VersionError::InvalidKind(s.to_string())),
        }
    }
}
