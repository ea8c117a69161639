//! Crash-safe file replacement with backup and rollback
//!
//! Every write goes to a temporary file in the target's directory and is then
//! renamed over the target, so readers only ever observe the old or the new
//! content. When the target already exists its bytes are first copied to a
//! `<filename>.bak` sibling, which is removed once the rename has succeeded.

use crate::error::{PromptMatterError, Result};
use log::{debug, error, warn};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Configuration for the safe writer
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Copy the current content aside before replacing a file
    pub backup_enabled: bool,
    /// Backup file suffix, appended to the full file name
    pub backup_suffix: String,
    /// Give the new file the permissions of the file it replaces
    pub preserve_permissions: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            backup_enabled: true,
            backup_suffix: ".bak".to_string(),
            preserve_permissions: true,
        }
    }
}

/// Result of a write operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteResult {
    /// Path the content was written to
    pub output_path: PathBuf,
    /// Whether the file did not exist before
    pub created: bool,
    /// Number of bytes written
    pub bytes_written: usize,
}

/// Writes files through temp-file-and-rename with backup/rollback
#[derive(Debug, Clone, Default)]
pub struct SafeWriter {
    config: WriterConfig,
}

impl SafeWriter {
    /// Create a new writer with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new writer with custom configuration
    pub fn with_config(config: WriterConfig) -> Self {
        Self { config }
    }

    /// Get writer configuration
    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    /// Where the backup of `path` lives while a write is in flight
    pub fn backup_path(&self, path: &Path) -> PathBuf {
        let mut name = path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(&self.config.backup_suffix);
        path.with_file_name(name)
    }

    /// Atomically replace (or create) `path` with `content`
    pub fn write_file(&self, path: &Path, content: &str) -> Result<WriteResult> {
        self.write_file_with(path, content, persist_temp)
    }

    /// [`write_file`](Self::write_file) with the final rename step supplied
    /// by the caller
    pub(crate) fn write_file_with<F>(
        &self,
        path: &Path,
        content: &str,
        persist: F,
    ) -> Result<WriteResult>
    where
        F: FnOnce(NamedTempFile, &Path) -> io::Result<()>,
    {
        let parent_dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent_dir).map_err(|e| PromptMatterError::io(parent_dir, e))?;

        let existing = match fs::metadata(path) {
            Ok(metadata) => Some(metadata),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => return Err(PromptMatterError::io(path, e)),
        };

        let backup = match existing {
            Some(_) if self.config.backup_enabled => Some(self.create_backup(path)?),
            _ => None,
        };

        let permissions = existing
            .as_ref()
            .filter(|_| self.config.preserve_permissions)
            .map(|metadata| metadata.permissions());

        let temp_file = match write_temp(parent_dir, content, permissions) {
            Ok(temp_file) => temp_file,
            Err(e) => {
                // The target was never touched, so the backup has nothing to protect
                if let Some(backup) = &backup {
                    self.remove_backup(backup);
                }
                return Err(e);
            }
        };

        if let Err(e) = persist(temp_file, path) {
            if let Some(backup) = &backup {
                self.restore_backup(backup, path);
            }
            return Err(PromptMatterError::io(path, e));
        }

        if let Some(backup) = &backup {
            self.remove_backup(backup);
        }

        debug!("Wrote {} bytes to {}", content.len(), path.display());
        Ok(WriteResult {
            output_path: path.to_path_buf(),
            created: existing.is_none(),
            bytes_written: content.len(),
        })
    }

    fn create_backup(&self, path: &Path) -> Result<PathBuf> {
        let backup_path = self.backup_path(path);
        fs::copy(path, &backup_path).map_err(|e| PromptMatterError::io(&backup_path, e))?;
        debug!("Backed up {} to {}", path.display(), backup_path.display());
        Ok(backup_path)
    }

    fn restore_backup(&self, backup: &Path, path: &Path) {
        match fs::copy(backup, path) {
            Ok(_) => warn!(
                "Write to {} failed, restored previous content; backup kept at {}",
                path.display(),
                backup.display()
            ),
            Err(e) => error!(
                "Write to {} failed and restoring from {} also failed: {}",
                path.display(),
                backup.display(),
                e
            ),
        }
    }

    fn remove_backup(&self, backup: &Path) {
        if let Err(e) = fs::remove_file(backup) {
            warn!("Could not remove backup {}: {}", backup.display(), e);
        }
    }
}

/// Write content to a temporary file next to the target
fn write_temp(
    dir: &Path,
    content: &str,
    permissions: Option<fs::Permissions>,
) -> Result<NamedTempFile> {
    let mut temp_file = NamedTempFile::new_in(dir).map_err(|e| PromptMatterError::io(dir, e))?;
    let temp_path = temp_file.path().to_path_buf();

    let fill = |file: &mut NamedTempFile| -> io::Result<()> {
        file.write_all(content.as_bytes())?;
        file.flush()?;
        file.as_file().sync_all()
    };
    fill(&mut temp_file).map_err(|e| PromptMatterError::io(&temp_path, e))?;

    if let Some(permissions) = permissions {
        temp_file
            .as_file()
            .set_permissions(permissions)
            .map_err(|e| PromptMatterError::io(&temp_path, e))?;
    }

    Ok(temp_file)
}

fn persist_temp(temp_file: NamedTempFile, path: &Path) -> io::Result<()> {
    temp_file.persist(path).map(|_| ()).map_err(|e| e.error)
}
