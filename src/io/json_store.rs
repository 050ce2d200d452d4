use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tempfile::NamedTempFile;

use crate::io::kv::{KvStore, StoreError};

/// The durable key-value store, backed by a single JSON object file.
///
/// The whole map is held in memory and written through on every `set` or
/// `remove`. A corrupt file on open is backed up as `planner.json.bak` and
/// replaced with an empty store rather than failing the session.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: IndexMap<String, String>,
}

impl JsonFileStore {
    /// Open the store at `path`, creating an empty one if the file is missing.
    pub fn open(path: &Path) -> Result<Self, io::Error> {
        let entries = if path.exists() {
            let content = fs::read_to_string(path)?;
            match serde_json::from_str::<IndexMap<String, String>>(&content) {
                Ok(map) => map,
                Err(e) => {
                    let bak = path.with_extension("json.bak");
                    let _ = fs::copy(path, &bak);
                    tracing::warn!(
                        path = %path.display(),
                        backup = %bak.display(),
                        error = %e,
                        "store file is corrupt, starting empty"
                    );
                    IndexMap::new()
                }
            }
        } else {
            IndexMap::new()
        };
        Ok(JsonFileStore {
            path: path.to_path_buf(),
            entries,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-read the file, replacing the in-memory map. Used when another
    /// process wrote the store while we were running.
    pub fn reload(&mut self) -> Result<(), io::Error> {
        let fresh = JsonFileStore::open(&self.path)?;
        self.entries = fresh.entries;
        Ok(())
    }

    fn flush(&self) -> Result<(), io::Error> {
        let content = serde_json::to_string_pretty(&self.entries)?;
        atomic_write(&self.path, content.as_bytes())
    }
}

impl KvStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if self.entries.shift_remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// Write `content` to `path` atomically using a temp file + rename.
fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
