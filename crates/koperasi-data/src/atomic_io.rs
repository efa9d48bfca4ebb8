//! Atomic replacement of stored collection files.
//!
//! A collection is written to a hidden temporary sibling, synced, then
//! renamed over the target so readers see either the old list or the new
//! one, never a partial write.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};

use camino::{Utf8Component, Utf8Path};
use cap_std::fs::{Dir, OpenOptions};

use crate::error::AtomicWriteError;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Replaces `path` inside `dir` with `contents` atomically.
///
/// `path` must be a bare file name; nested paths are rejected so a store
/// never writes outside its own directory.
///
/// # Errors
///
/// Returns [`AtomicWriteError::InvalidPath`] for nested paths and
/// [`AtomicWriteError::Io`] if the temp file cannot be written or renamed.
///
/// # Example
///
/// ```no_run
/// use camino::Utf8Path;
/// use cap_std::{ambient_authority, fs::Dir};
/// use koperasi_data::write_atomic;
///
/// let dir = Dir::open_ambient_dir("koperasi-data", ambient_authority()).expect("open dir");
/// write_atomic(&dir, Utf8Path::new("koperasi_users.json"), "[]").expect("write");
/// ```
pub fn write_atomic(dir: &Dir, path: &Utf8Path, contents: &str) -> Result<(), AtomicWriteError> {
    let file_name = bare_file_name(path).ok_or_else(|| AtomicWriteError::InvalidPath {
        path: path.to_path_buf(),
    })?;

    let staged = StagedFile::create(dir, file_name).map_err(|err| io_failure(path, &err))?;
    staged
        .fill(contents)
        .and_then(|staged| staged.commit(file_name))
        .map_err(|err| io_failure(path, &err))?;

    // Directory sync is best-effort.
    drop(dir.open(".").and_then(|handle| handle.sync_all()));
    Ok(())
}

fn bare_file_name(path: &Utf8Path) -> Option<&str> {
    let mut components = path.components();
    match (components.next(), components.next()) {
        (Some(Utf8Component::Normal(name)), None) => Some(name),
        _ => None,
    }
}

fn io_failure(path: &Utf8Path, err: &io::Error) -> AtomicWriteError {
    AtomicWriteError::Io {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

/// Temporary sibling that removes itself unless committed.
struct StagedFile<'dir> {
    dir: &'dir Dir,
    name: String,
    committed: bool,
}

impl<'dir> StagedFile<'dir> {
    fn create(dir: &'dir Dir, target: &str) -> io::Result<Self> {
        let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let name = format!(".{target}.{}.{counter}.tmp", std::process::id());
        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        drop(dir.open_with(&name, &options)?);
        Ok(Self {
            dir,
            name,
            committed: false,
        })
    }

    fn fill(self, contents: &str) -> io::Result<Self> {
        let mut options = OpenOptions::new();
        options.write(true).truncate(true);
        let mut file = self.dir.open_with(&self.name, &options)?;
        file.write_all(contents.as_bytes())?;
        file.sync_all()?;
        Ok(self)
    }

    fn commit(mut self, target: &str) -> io::Result<()> {
        #[cfg(windows)]
        match self.dir.remove_file(target) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(err),
        }
        self.dir.rename(&self.name, self.dir, target)?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for StagedFile<'_> {
    fn drop(&mut self) {
        if !self.committed {
            drop(self.dir.remove_file(&self.name));
        }
    }
}
