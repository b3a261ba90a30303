//! Data directory handling for the JSON store.

use anyhow::Result;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Storage name of the single persisted blob. Must stay stable: earlier
/// releases wrote their data under this name.
const STORE_FILE_NAME: &str = "meeting-store.json";

/// JsonConnection manages the data directory and the path of the store blob.
#[derive(Clone)]
pub struct JsonConnection {
    base_directory: PathBuf,
}

impl JsonConnection {
    /// Create a connection rooted at the given base directory, creating the
    /// directory if needed.
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Create a connection in the default data directory:
    /// `Documents/Minutes Taker`, falling back to the home directory when no
    /// Documents folder is available.
    pub fn new_default() -> Result<Self> {
        let documents_dir = dirs::document_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;

        let data_dir = documents_dir.join("Minutes Taker");
        info!("Using data directory: {}", data_dir.display());

        Self::new(data_dir)
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Path of the persisted store blob.
    pub fn store_path(&self) -> PathBuf {
        self.base_directory.join(STORE_FILE_NAME)
    }

    /// Read the whole store blob. Returns `None` when nothing has been
    /// persisted yet.
    pub fn read_store(&self) -> Result<Option<String>> {
        let path = self.store_path();

        if !path.exists() {
            return Ok(None);
        }

        Ok(Some(fs::read_to_string(&path)?))
    }

    /// Write the whole store blob atomically via a temp file.
    pub fn write_store(&self, content: &str) -> Result<()> {
        let path = self.store_path();

        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, content)?;
        fs::rename(&temp_path, &path)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_creates_base_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("data").join("minutes");

        let connection = JsonConnection::new(&nested).unwrap();

        assert!(nested.exists());
        assert_eq!(connection.base_directory(), nested.as_path());
        assert_eq!(
            connection.store_path().file_name().unwrap(),
            "meeting-store.json"
        );
    }

    #[test]
    fn test_read_missing_store_returns_none() {
        let temp_dir = TempDir::new().unwrap();
        let connection = JsonConnection::new(temp_dir.path()).unwrap();

        assert!(connection.read_store().unwrap().is_none());
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let connection = JsonConnection::new(temp_dir.path()).unwrap();

        connection.write_store("{\"meetings\":[],\"templates\":[]}").unwrap();

        let content = connection.read_store().unwrap().unwrap();
        assert_eq!(content, "{\"meetings\":[],\"templates\":[]}");

        // The temp file must not survive the atomic write.
        assert!(!connection.store_path().with_extension("tmp").exists());
    }
}
