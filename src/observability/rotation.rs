//! Size-rotated append-only file.
//!
//! When the live file grows past the size limit it is shifted to `<name>.1`,
//! existing backups move up by one, and anything beyond the backup limit is
//! removed:
//!
//! ```text
//! apidex-otlp.json      live file
//! apidex-otlp.json.1    most recent backup
//! apidex-otlp.json.2
//! apidex-otlp.json.3    oldest backup kept
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Rotation thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationLimits {
    pub max_bytes: u64,
    pub max_backups: usize,
}

impl Default for RotationLimits {
    /// 10 MB with 3 backups.
    fn default() -> Self {
        Self {
            max_bytes: 10 * 1024 * 1024,
            max_backups: 3,
        }
    }
}

#[derive(Debug)]
pub struct RotatingFile {
    path: PathBuf,
    limits: RotationLimits,
    /// Opened lazily so construction never touches the filesystem.
    file: Option<File>,
}

impl RotatingFile {
    pub const fn new(path: PathBuf, limits: RotationLimits) -> Self {
        Self {
            path,
            limits,
            file: None,
        }
    }

    /// Appends `line` followed by a newline, rotating first if the live file
    /// is over the size limit.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from rotating, opening or writing the file.
    pub fn append_line(&mut self, line: &str) -> io::Result<()> {
        if self.needs_rotation() {
            self.file = None;
            self.rotate()?;
        }

        let file = match self.file.take() {
            Some(file) => file,
            None => OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)?,
        };
        let file = self.file.insert(file);

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn needs_rotation(&self) -> bool {
        fs::metadata(&self.path).is_ok_and(|meta| meta.len() > self.limits.max_bytes)
    }

    fn rotate(&self) -> io::Result<()> {
        let max = self.limits.max_backups;
        if max == 0 {
            return fs::remove_file(&self.path);
        }

        let oldest = backup_path(&self.path, max);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (1..max).rev() {
            let from = backup_path(&self.path, index);
            if from.exists() {
                fs::rename(&from, backup_path(&self.path, index + 1))?;
            }
        }
        fs::rename(&self.path, backup_path(&self.path, 1))
    }
}

fn backup_path(path: &Path, index: usize) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(format!(".{index}"));
    PathBuf::from(name)
}
