use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};

use crate::error::{Result, VersionError};

/// Reads whole text files, tagging failures with the offending path.
pub struct FileReader;

impl FileReader {
    /// Read the entire file into a `String`.
    pub fn read_to_string(path: &Path) -> Result<String> {
        log::debug!("reading {}", path.display());
        fs::read_to_string(path).map_err(|source| VersionError::FileRead {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Helper utilities for writing files.
pub struct FileWriter;

impl FileWriter {
    /// Atomically replace the contents of `path` with `data` via a temp file and rename.
    ///
    /// Symlinks are followed, so the file they point at is the one replaced,
    /// and an existing file keeps its permission bits. The handle is dropped
    /// before the rename, so nothing stays open on any exit path.
    pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
        let write_err = |source: std::io::Error| VersionError::FileWrite {
            path: path.to_path_buf(),
            source,
        };
        // A file that does not exist yet is created at `path` itself.
        let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        let permissions = fs::metadata(&target).ok().map(|m| m.permissions());
        let parent = match target.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        // PID + nanos keeps the name unique within the directory without a retry loop.
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let tmp = parent.join(format!(".{}.{}.tmp", std::process::id(), nanos));

        let staged = (|| -> std::io::Result<()> {
            let mut w = BufWriter::new(File::create(&tmp)?);
            w.write_all(data)?;
            w.flush()?;
            if let Some(permissions) = permissions {
                w.get_ref().set_permissions(permissions)?;
            }
            let _ = w.get_ref().sync_all();
            Ok(())
        })();
        if let Err(source) = staged {
            let _ = fs::remove_file(&tmp);
            return Err(write_err(source));
        }

        if let Err(source) = fs::rename(&tmp, &target) {
            let _ = fs::remove_file(&tmp);
            return Err(write_err(source));
        }

        // Make the rename durable on Unix.
        #[cfg(unix)]
        {
            if let Ok(dir) = File::open(parent) {
                let _ = dir.sync_all();
            }
        }

        log::debug!("wrote {} ({} bytes)", target.display(), data.len());
        Ok(())
    }
}
