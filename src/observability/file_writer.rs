//! Size-rotated log file.
//!
//! [`RotatingFile`] is an [`io::Write`] sink that moves the active file aside
//! once it grows past a size threshold. Rotated files are numbered:
//! `app.log.1` is the most recent, `app.log.N` the oldest kept. Older ones are
//! deleted.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

/// Rotation threshold (10 MB).
pub const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Rotated files kept next to the active one.
pub const MAX_BACKUP_FILES: usize = 3;

/// Cloneable handle to a rotating log file.
///
/// Clones share the same file handle and lock, so one instance can be handed
/// to `tracing_subscriber` as `move || writer.clone()`.
#[derive(Clone)]
pub struct RotatingFile {
    inner: Arc<Inner>,
}

struct Inner {
    path: PathBuf,
    max_bytes: u64,
    max_backups: usize,
    file: Mutex<Option<File>>,
}

impl RotatingFile {
    /// Writer for `path` with the default limits.
    ///
    /// Nothing is opened until the first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_limits(path, MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES)
    }

    /// Writer with explicit limits.
    pub fn with_limits(path: impl Into<PathBuf>, max_bytes: u64, max_backups: usize) -> Self {
        Self {
            inner: Arc::new(Inner {
                path: path.into(),
                max_bytes,
                max_backups,
                file: Mutex::new(None),
            }),
        }
    }

    /// Path of the active file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    /// Path of the `n`th most recent rotated file.
    #[must_use]
    pub fn backup_path(&self, n: usize) -> PathBuf {
        let mut name = self.inner.path.as_os_str().to_owned();
        name.push(format!(".{n}"));
        PathBuf::from(name)
    }

    fn lock(&self) -> io::Result<MutexGuard<'_, Option<File>>> {
        self.inner
            .file
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("Mutex poisoned: {e}")))
    }

    fn check_and_rotate(&self, file: &mut Option<File>) -> io::Result<()> {
        if let Ok(metadata) = fs::metadata(&self.inner.path) {
            if metadata.len() >= self.inner.max_bytes {
                *file = None;
                self.rotate()?;
            }
        }
        Ok(())
    }

    fn rotate(&self) -> io::Result<()> {
        if self.inner.max_backups == 0 {
            return fs::remove_file(&self.inner.path);
        }

        let oldest = self.backup_path(self.inner.max_backups);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for n in (1..self.inner.max_backups).rev() {
            let from = self.backup_path(n);
            if from.exists() {
                fs::rename(&from, self.backup_path(n + 1))?;
            }
        }
        fs::rename(&self.inner.path, self.backup_path(1))
    }
}

impl Write for RotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self.lock()?;
        self.check_and_rotate(&mut guard)?;

        if guard.is_none() {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.inner.path)?;
            *guard = Some(file);
        }

        let file = guard
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No file available"))?;
        file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.lock()?.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFile")
            .field("path", &self.inner.path)
            .field("max_bytes", &self.inner.max_bytes)
            .field("max_backups", &self.inner.max_backups)
            .finish_non_exhaustive()
    }
}
