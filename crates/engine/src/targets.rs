use std::path::PathBuf;

use regex::Regex;
use serde::Serialize;

use crate::error::Result;
use crate::record::VersionRecord;

/// Which record value a marker carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValueKind {
    Major,
    Minor,
    Patch,
    /// Quoted `"M.N.P"` string.
    VersionString,
    Protocol,
}

impl ValueKind {
    /// Value text as it appears after the `#define` name.
    #[must_use]
    pub fn render(self, record: &VersionRecord) -> String {
        let fw = record.firmware;
        match self {
            Self::Major => fw.major.to_string(),
            Self::Minor => fw.minor.to_string(),
            Self::Patch => fw.patch.to_string(),
            Self::VersionString => format!("\"{fw}\""),
            Self::Protocol => record.protocol.to_string(),
        }
    }

    const fn value_pattern(self) -> &'static str {
        match self {
            Self::VersionString => r#""[^"\n]*""#,
            _ => r"[0-9]+",
        }
    }
}

/// One `#define NAME <value>` line to keep in sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkerRule {
    pub name: String,
    pub kind: ValueKind,
}

impl MarkerRule {
    pub fn new(name: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Regex matching this marker.
    ///
    /// Group 1 is `#define NAME`, group 2 the whitespace before the value. The
    /// name must be followed by horizontal whitespace, so `ESP32_VERSION` never
    /// matches `ESP32_VERSION_MAJOR`.
    ///
    /// # Errors
    /// Returns `Regex` if the pattern cannot be compiled.
    pub fn regex(&self) -> Result<Regex> {
        let pattern = format!(
            r"(#[ \t]*define[ \t]+{})([ \t]+){}",
            regex::escape(&self.name),
            self.kind.value_pattern()
        );
        Ok(Regex::new(&pattern)?)
    }
}

/// A header file whose markers mirror the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetFile {
    pub name: String,
    /// Relative to the project root.
    pub path: PathBuf,
    pub rules: Vec<MarkerRule>,
}

impl TargetFile {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, rules: Vec<MarkerRule>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            rules,
        }
    }

    /// True if any marker depends on the firmware version.
    #[must_use]
    pub fn tracks_firmware(&self) -> bool {
        self.rules.iter().any(|r| r.kind != ValueKind::Protocol)
    }
}

pub const PICO_CONFIG: &str = "src/pico/include/config.h";
pub const ESP32_CONFIG: &str = "src/esp32/include/config.h";
pub const PROTOCOL_DEFS: &str = "src/shared/protocol_defs.h";

/// Pico config, ESP32 config and the shared protocol header.
#[must_use]
pub fn default_targets() -> Vec<TargetFile> {
    use ValueKind::{Major, Minor, Patch, Protocol, VersionString};

    vec![
        TargetFile::new(
            "Pico",
            PICO_CONFIG,
            vec![
                MarkerRule::new("FIRMWARE_VERSION_MAJOR", Major),
                MarkerRule::new("FIRMWARE_VERSION_PATCH", Patch),
                MarkerRule::new("FIRMWARE_VERSION_MINOR", Minor),
            ],
        ),
        TargetFile::new(
            "ESP32",
            ESP32_CONFIG,
            vec![
                MarkerRule::new("ESP32_VERSION_MAJOR", Major),
                MarkerRule::new("ESP32_VERSION_MINOR", Minor),
                MarkerRule::new("ESP32_VERSION_PATCH", Patch),
                MarkerRule::new("ESP32_VERSION", VersionString),
            ],
        ),
        TargetFile::new(
            "Protocol",
            PROTOCOL_DEFS,
            vec![MarkerRule::new("ECM_PROTOCOL_VERSION", Protocol)],
        ),
    ]
}
