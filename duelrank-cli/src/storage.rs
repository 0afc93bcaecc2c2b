/// File-backed storage for the session state.
use std::fs;
use std::io;
use std::path::PathBuf;

use duelrank_core::Storage;

use crate::bail;

pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: PathBuf) -> Self {
        FileStorage { path }
    }
}

impl Storage for FileStorage {
    /// A missing file means no prior state. Other read failures are
    /// reported but also treated as absent — the core substitutes a fresh
    /// state either way.
    fn read(&self) -> Option<Vec<u8>> {
        match fs::read(&self.path) {
            Ok(raw) => Some(raw),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                eprintln!("Warning: failed to read state file {}: {e}", self.path.display());
                None
            }
        }
    }

    fn write(&self, raw: &[u8]) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, raw)
    }
}

/// Returns the default state path: ~/.local/share/duelrank/state.json
pub fn default_state_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| bail("HOME environment variable not set"));
    PathBuf::from(home)
        .join(".local")
        .join("share")
        .join("duelrank")
        .join("state.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reads_absent() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("state.json"));
        assert!(storage.read().is_none());
    }

    #[test]
    fn test_write_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested").join("state.json"));

        storage.write(b"{\"buckets\":[],\"votes\":[]}").unwrap();
        assert_eq!(storage.read().unwrap(), b"{\"buckets\":[],\"votes\":[]}");

        // Overwrite replaces, not appends.
        storage.write(b"{}").unwrap();
        assert_eq!(storage.read().unwrap(), b"{}");
    }
}
