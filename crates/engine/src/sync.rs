//! Load → change → rewrite targets → save.

use serde::Serialize;

use crate::config::SyncConfig;
use crate::error::Result;
use crate::record::{RecordStore, VersionRecord};
use crate::rewriter::{Rewriter, TargetUpdate, UpdateReporter};
use crate::version::{BumpKind, FirmwareVersion, parse_version};

/// Requested modifications, in the order they are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Changes {
    /// Unvalidated `--set` text.
    pub set: Option<String>,
    pub bump: Option<BumpKind>,
    pub protocol: Option<u64>,
}

impl Changes {
    #[must_use]
    pub const fn is_mutating(&self) -> bool {
        self.set.is_some() || self.bump.is_some() || self.protocol.is_some()
    }
}

/// One modification that was applied to the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Set(FirmwareVersion),
    Bumped { kind: BumpKind, to: FirmwareVersion },
    Protocol(u64),
}

/// Validate and apply `changes` to `current`: set, then bump, then protocol.
///
/// Pure; nothing is read or written.
///
/// # Errors
/// Returns `Format` if `changes.set` is not a valid version.
pub fn plan(current: VersionRecord, changes: &Changes) -> Result<(VersionRecord, Vec<Applied>)> {
    let set = changes.set.as_deref().map(parse_version).transpose()?;

    let mut record = current;
    let mut applied = Vec::new();

    if let Some(version) = set {
        record = record.with_firmware(version);
        applied.push(Applied::Set(version));
    }
    if let Some(kind) = changes.bump {
        let to = record.firmware.bump(kind);
        record = record.with_firmware(to);
        applied.push(Applied::Bumped { kind, to });
    }
    if let Some(protocol) = changes.protocol {
        record = record.with_protocol(protocol);
        applied.push(Applied::Protocol(protocol));
    }

    Ok((record, applied))
}

/// Value a target is expected to carry, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Expected {
    pub target: String,
    pub value: String,
}

pub struct Synchronizer {
    store: RecordStore,
    rewriter: Rewriter,
}

impl Synchronizer {
    #[must_use]
    pub fn new(config: SyncConfig) -> Self {
        let store = RecordStore::new(config.version_path());
        let rewriter = Rewriter::new(config.project_root, config.targets);
        Self { store, rewriter }
    }

    /// Load the record, writing defaults if the VERSION file is absent.
    ///
    /// # Errors
    /// See [`RecordStore::load_or_init`].
    pub fn load(&self) -> Result<(VersionRecord, bool)> {
        self.store.load_or_init()
    }

    /// Rewrite every target, then persist the record.
    ///
    /// The VERSION file is only saved once all targets are committed.
    ///
    /// # Errors
    /// Whatever [`Rewriter::rewrite_targets`] or [`RecordStore::save`] returns.
    pub fn apply(
        &self,
        record: &VersionRecord,
        reporter: &mut dyn UpdateReporter,
    ) -> Result<Vec<TargetUpdate>> {
        log::info!(
            "applying firmware={} protocol={}",
            record.firmware,
            record.protocol
        );
        let updates = self.rewriter.rewrite_targets(record, reporter)?;
        self.store.save(record)?;
        Ok(updates)
    }

    /// Per-target values implied by `record`, without touching any file.
    #[must_use]
    pub fn expected(&self, record: &VersionRecord) -> Vec<Expected> {
        self.rewriter
            .targets()
            .iter()
            .map(|target| Expected {
                target: target.name.clone(),
                value: if target.tracks_firmware() {
                    record.firmware.to_string()
                } else {
                    record.protocol.to_string()
                },
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VersionError;

    fn current() -> VersionRecord {
        VersionRecord::new(FirmwareVersion::new(1, 2, 3), 4)
    }

    #[test]
    fn no_changes_keeps_record() {
        let (record, applied) = plan(current(), &Changes::default()).unwrap();
        assert_eq!(record, current());
        assert!(applied.is_empty());
        assert!(!Changes::default().is_mutating());
    }

    #[test]
    fn set_then_bump_then_protocol() {
        let changes = Changes {
            set: Some("2.0.0".into()),
            bump: Some(BumpKind::Patch),
            protocol: Some(5),
        };
        let (record, applied) = plan(current(), &changes).unwrap();

        assert_eq!(record, VersionRecord::new(FirmwareVersion::new(2, 0, 1), 5));
        assert_eq!(
            applied,
            [
                Applied::Set(FirmwareVersion::new(2, 0, 0)),
                Applied::Bumped {
                    kind: BumpKind::Patch,
                    to: FirmwareVersion::new(2, 0, 1)
                },
                Applied::Protocol(5),
            ]
        );
    }

    #[test]
    fn protocol_only_keeps_firmware() {
        let changes = Changes {
            protocol: Some(0),
            ..Changes::default()
        };
        let (record, _) = plan(current(), &changes).unwrap();
        assert_eq!(record.firmware, current().firmware);
        assert_eq!(record.protocol, 0);
    }

    #[test]
    fn invalid_set_fails_before_other_changes() {
        let changes = Changes {
            set: Some("2.0".into()),
            bump: Some(BumpKind::Major),
            protocol: None,
        };
        let err = plan(current(), &changes).unwrap_err();
        assert!(matches!(err, VersionError::Format { ref input } if input == "2.0"));
    }

    #[test]
    fn expected_values_follow_target_kind() {
        let sync = Synchronizer::new(SyncConfig::default());
        let expected = sync.expected(&current());
        let pairs: Vec<_> = expected
            .iter()
            .map(|e| (e.target.as_str(), e.value.as_str()))
            .collect();
        assert_eq!(
            pairs,
            [("Pico", "1.2.3"), ("ESP32", "1.2.3"), ("Protocol", "4")]
        );
    }
}
