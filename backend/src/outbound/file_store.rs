//! Key-value store persisted as JSON files in a directory.
//!
//! Each key maps to `<key>.json` inside a capability directory opened through
//! `cap_std`, so the adapter cannot touch files outside it. Writes go through
//! [`write_atomic`] and never leave a half-written collection behind.

use std::io;
use std::path::Path;

use camino::Utf8Path;
use cap_std::{ambient_authority, fs::Dir};
use koperasi_data::write_atomic;
use tracing::debug;

use crate::domain::ports::{KeyValueStore, KeyValueStoreError};

/// Key-value store writing one file per key.
///
/// # Examples
/// ```no_run
/// use koperasi::domain::RecordStore;
/// use koperasi::outbound::file_store::FileKeyValueStore;
///
/// let store = FileKeyValueStore::open("koperasi-data").expect("open data dir");
/// let records = RecordStore::new(store);
/// records.initialize().expect("seed store");
/// ```
#[derive(Debug)]
pub struct FileKeyValueStore {
    dir: Dir,
}

impl FileKeyValueStore {
    /// Open `path`, creating the directory when it does not exist.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        Dir::create_ambient_dir_all(path, ambient_authority())?;
        let dir = Dir::open_ambient_dir(path, ambient_authority())?;
        debug!(path = %path.display(), "opened file-backed record storage");
        Ok(Self::from_dir(dir))
    }

    /// Use an already opened directory.
    pub const fn from_dir(dir: Dir) -> Self {
        Self { dir }
    }
}

fn file_name(key: &str) -> Option<String> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    valid.then(|| format!("{key}.json"))
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, KeyValueStoreError> {
        let name = file_name(key).ok_or_else(|| KeyValueStoreError::read(key, "invalid key"))?;
        match self.dir.read_to_string(&name) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(KeyValueStoreError::read(key, err.to_string())),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError> {
        let name = file_name(key).ok_or_else(|| KeyValueStoreError::write(key, "invalid key"))?;
        write_atomic(&self.dir, Utf8Path::new(&name), value)
            .map_err(|err| KeyValueStoreError::write(key, err.to_string()))
    }
}
