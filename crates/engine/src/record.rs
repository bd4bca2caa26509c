//! The canonical `VERSION` file.
//!
//! Line oriented: `#` comments and blank lines are ignored, the two keys are
//! matched by literal prefix, and a save always rewrites the whole file from
//! a fixed template.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Result, VersionError};
use crate::persistence::{FileReader, FileWriter};
use crate::version::{FirmwareVersion, parse_version};

pub const FIRMWARE_KEY: &str = "FIRMWARE_VERSION";
pub const PROTOCOL_KEY: &str = "PROTOCOL_VERSION";

/// Firmware version plus the independent wire-protocol version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VersionRecord {
    pub firmware: FirmwareVersion,
    pub protocol: u64,
}

impl VersionRecord {
    #[must_use]
    pub const fn new(firmware: FirmwareVersion, protocol: u64) -> Self {
        Self { firmware, protocol }
    }

    #[must_use]
    pub const fn with_firmware(self, firmware: FirmwareVersion) -> Self {
        Self { firmware, ..self }
    }

    #[must_use]
    pub const fn with_protocol(self, protocol: u64) -> Self {
        Self { protocol, ..self }
    }
}

impl Default for VersionRecord {
    /// `0.1.0` / protocol `1`, written when no VERSION file exists yet.
    fn default() -> Self {
        Self::new(FirmwareVersion::new(0, 1, 0), 1)
    }
}

/// Loads and saves the canonical record at a fixed path.
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and validate the record.
    ///
    /// # Errors
    /// `NotFound` if the file is absent, `MissingField`/`Format`/`InvalidProtocol`
    /// if its content is incomplete or malformed, `FileRead` for other I/O failures.
    pub fn load(&self) -> Result<VersionRecord> {
        if !self.path.exists() {
            return Err(VersionError::NotFound(self.path.clone()));
        }
        let text = FileReader::read_to_string(&self.path)?;
        parse_record(&text, &self.path)
    }

    /// Load, creating the default record first if the file does not exist.
    ///
    /// The retry happens once; the flag reports whether the file was created.
    ///
    /// # Errors
    /// Anything [`RecordStore::load`] or [`RecordStore::save`] can return, except
    /// a first `NotFound`.
    pub fn load_or_init(&self) -> Result<(VersionRecord, bool)> {
        match self.load() {
            Ok(record) => Ok((record, false)),
            Err(VersionError::NotFound(path)) => {
                log::info!("no VERSION file at {}, writing defaults", path.display());
                self.save(&VersionRecord::default())?;
                self.load().map(|record| (record, true))
            }
            Err(e) => Err(e),
        }
    }

    /// Overwrite the file with the fixed template.
    ///
    /// # Errors
    /// `FileWrite` if the file cannot be replaced.
    pub fn save(&self, record: &VersionRecord) -> Result<()> {
        FileWriter::atomic_write(&self.path, render(record).as_bytes())
    }
}

/// Full file content for `record`.
#[must_use]
pub fn render(record: &VersionRecord) -> String {
    format!(
        "\
# ECM Firmware Version
# Format: MAJOR.MINOR.PATCH
# Follow semantic versioning: https://semver.org/
#
# MAJOR: Breaking changes (protocol version changes, incompatible API)
# MINOR: New features (backward compatible)
# PATCH: Bug fixes (backward compatible)
#
# Protocol version is tracked separately in src/shared/protocol_defs.h
# Increment ECM_PROTOCOL_VERSION for breaking protocol changes

{FIRMWARE_KEY}={}
{PROTOCOL_KEY}={}
",
        record.firmware, record.protocol
    )
}

fn parse_record(text: &str, path: &Path) -> Result<VersionRecord> {
    let mut firmware = None;
    let mut protocol = None;

    for line in text.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(value) = value_for(line, FIRMWARE_KEY) {
            firmware = Some(value);
        } else if let Some(value) = value_for(line, PROTOCOL_KEY) {
            protocol = Some(value);
        }
    }

    let missing = |key| VersionError::MissingField {
        path: path.to_path_buf(),
        key,
    };
    let firmware = firmware
        .filter(|v| !v.is_empty())
        .ok_or_else(|| missing(FIRMWARE_KEY))?;
    let protocol = protocol
        .filter(|v| !v.is_empty())
        .ok_or_else(|| missing(PROTOCOL_KEY))?;

    let firmware = parse_version(firmware)?;
    let protocol = protocol
        .parse::<u64>()
        .map_err(|_| VersionError::InvalidProtocol {
            path: path.to_path_buf(),
            value: protocol.to_string(),
        })?;

    Ok(VersionRecord::new(firmware, protocol))
}

fn value_for<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    line.strip_prefix(key)?.strip_prefix('=').map(str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn store_in(dir: &tempfile::TempDir) -> RecordStore {
        RecordStore::new(dir.path().join("VERSION"))
    }

    #[test]
    fn parses_keys_and_ignores_comments() {
        let text = "# header\n\n  FIRMWARE_VERSION=2.4.1 \n# PROTOCOL_VERSION=9\nPROTOCOL_VERSION=3\n";
        let record = parse_record(text, Path::new("VERSION")).unwrap();
        assert_eq!(record, VersionRecord::new(FirmwareVersion::new(2, 4, 1), 3));
    }

    #[test]
    fn later_key_wins() {
        let text = "FIRMWARE_VERSION=1.0.0\nFIRMWARE_VERSION=1.0.1\nPROTOCOL_VERSION=1\n";
        let record = parse_record(text, Path::new("VERSION")).unwrap();
        assert_eq!(record.firmware, FirmwareVersion::new(1, 0, 1));
    }

    #[test]
    fn missing_protocol_is_format_error() {
        let err = parse_record("FIRMWARE_VERSION=1.0.0\n", Path::new("VERSION")).unwrap_err();
        assert!(matches!(err, VersionError::MissingField { key: PROTOCOL_KEY, .. }));
        assert!(err.is_format());
    }

    #[test]
    fn empty_firmware_value_counts_as_missing() {
        let err = parse_record("FIRMWARE_VERSION=\nPROTOCOL_VERSION=1\n", Path::new("VERSION"))
            .unwrap_err();
        assert!(matches!(err, VersionError::MissingField { key: FIRMWARE_KEY, .. }));
    }

    #[test]
    fn bad_values_are_rejected() {
        let err = parse_record("FIRMWARE_VERSION=1.0\nPROTOCOL_VERSION=1\n", Path::new("VERSION"))
            .unwrap_err();
        assert!(matches!(err, VersionError::Format { .. }));

        let text = "FIRMWARE_VERSION=1.0.0\nPROTOCOL_VERSION=-2\n";
        let err = parse_record(text, Path::new("VERSION")).unwrap_err();
        assert!(matches!(err, VersionError::InvalidProtocol { ref value, .. } if value == "-2"));
    }

    #[test]
    fn prefix_lookalike_keys_are_not_matched() {
        let text = "FIRMWARE_VERSION_OLD=9.9.9\nFIRMWARE_VERSION=1.0.0\nPROTOCOL_VERSION=1\n";
        let record = parse_record(text, Path::new("VERSION")).unwrap();
        assert_eq!(record.firmware, FirmwareVersion::new(1, 0, 0));
    }

    #[test]
    fn load_absent_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(store_in(&dir).load(), Err(VersionError::NotFound(_))));
    }

    #[test]
    fn load_or_init_writes_defaults_once() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let (record, created) = store.load_or_init().unwrap();
        assert!(created);
        assert_eq!(record, VersionRecord::default());

        let (again, created) = store.load_or_init().unwrap();
        assert!(!created);
        assert_eq!(again, record);
    }

    #[test]
    fn load_or_init_does_not_mask_format_errors() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "# nothing useful\n").unwrap();

        assert!(store.load_or_init().unwrap_err().is_format());
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "# nothing useful\n");
    }

    #[test]
    fn save_replaces_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(
            store.path(),
            "# my notes\nFIRMWARE_VERSION=0.0.1\nPROTOCOL_VERSION=1\n",
        )
        .unwrap();

        let record = VersionRecord::new(FirmwareVersion::new(3, 1, 4), 7);
        store.save(&record).unwrap();

        let text = fs::read_to_string(store.path()).unwrap();
        assert_eq!(text, render(&record));
        assert!(!text.contains("my notes"));
        assert!(text.ends_with("FIRMWARE_VERSION=3.1.4\nPROTOCOL_VERSION=7\n"));
        assert_eq!(store.load().unwrap(), record);
    }
}
