//! Marker substitution across the target headers.
//!
//! Rewriting runs in two phases. Every target is read and transformed in
//! memory first (stage), then written one by one (commit). A missing or
//! unreadable target aborts during staging, before any file changes. A write
//! failure during commit leaves earlier targets updated.

use std::path::{Path, PathBuf};

use regex::Captures;

use crate::error::Result;
use crate::persistence::{FileReader, FileWriter};
use crate::record::VersionRecord;
use crate::targets::{MarkerRule, TargetFile};

/// Result of applying a rule list to one text blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub content: String,
    /// Number of marker occurrences replaced.
    pub replaced: usize,
    /// Markers that matched nothing.
    pub missing: Vec<String>,
}

/// What happened to one target during commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetUpdate {
    pub name: String,
    pub path: PathBuf,
    pub replaced: usize,
    pub missing: Vec<String>,
}

/// Receives a notification after each target is written.
pub trait UpdateReporter {
    fn target_updated(&mut self, update: &TargetUpdate);
}

/// Discards notifications.
pub struct SilentReporter;

impl UpdateReporter for SilentReporter {
    fn target_updated(&mut self, _update: &TargetUpdate) {}
}

/// Replace every marker value in `text`, leaving label and spacing intact.
///
/// # Errors
/// Returns `Regex` if a marker pattern cannot be compiled.
pub fn rewrite_text(text: &str, rules: &[MarkerRule], record: &VersionRecord) -> Result<Rewrite> {
    let mut content = text.to_string();
    let mut replaced = 0;
    let mut missing = Vec::new();

    for rule in rules {
        let re = rule.regex()?;
        let value = rule.kind.render(record);
        let hits = re.find_iter(&content).count();
        if hits == 0 {
            missing.push(rule.name.clone());
            continue;
        }
        replaced += hits;
        content = re
            .replace_all(&content, |caps: &Captures| format!("{}{}{value}", &caps[1], &caps[2]))
            .into_owned();
    }

    Ok(Rewrite {
        content,
        replaced,
        missing,
    })
}

struct Staged<'a> {
    target: &'a TargetFile,
    path: PathBuf,
    rewrite: Rewrite,
}

/// Applies a record to a set of targets under one project root.
#[derive(Debug, Clone)]
pub struct Rewriter {
    root: PathBuf,
    targets: Vec<TargetFile>,
}

impl Rewriter {
    pub fn new(root: impl Into<PathBuf>, targets: Vec<TargetFile>) -> Self {
        Self {
            root: root.into(),
            targets,
        }
    }

    #[must_use]
    pub fn targets(&self) -> &[TargetFile] {
        &self.targets
    }

    #[must_use]
    pub fn resolve(&self, target: &TargetFile) -> PathBuf {
        self.root.join(&target.path)
    }

    /// Write `record` into every target.
    ///
    /// # Errors
    /// `FileRead` (nothing written) if any target cannot be read, `FileWrite`
    /// if a commit fails, `Regex` for an uncompilable marker.
    pub fn rewrite_targets(
        &self,
        record: &VersionRecord,
        reporter: &mut dyn UpdateReporter,
    ) -> Result<Vec<TargetUpdate>> {
        let staged = self.stage(record)?;
        let mut updates = Vec::with_capacity(staged.len());

        for Staged {
            target,
            path,
            rewrite,
        } in staged
        {
            FileWriter::atomic_write(&path, rewrite.content.as_bytes())?;
            let update = TargetUpdate {
                name: target.name.clone(),
                path,
                replaced: rewrite.replaced,
                missing: rewrite.missing,
            };
            reporter.target_updated(&update);
            updates.push(update);
        }

        Ok(updates)
    }

    fn stage(&self, record: &VersionRecord) -> Result<Vec<Staged<'_>>> {
        self.targets
            .iter()
            .map(|target| {
                let path = self.resolve(target);
                let rewrite = stage_one(&path, target, record)?;
                Ok(Staged {
                    target,
                    path,
                    rewrite,
                })
            })
            .collect()
    }
}

fn stage_one(path: &Path, target: &TargetFile, record: &VersionRecord) -> Result<Rewrite> {
    let text = FileReader::read_to_string(path)?;
    let rewrite = rewrite_text(&text, &target.rules, record)?;
    for name in &rewrite.missing {
        log::warn!("{}: no `#define {name}` found in {}", target.name, path.display());
    }
    log::debug!(
        "staged {} ({} markers replaced)",
        path.display(),
        rewrite.replaced
    );
    Ok(rewrite)
}
