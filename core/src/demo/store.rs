//! Demo storage backends
//!
//! - [`DirectoryStore`] loads and exports recordings in a directory
//! - [`MemoryStore`] keeps them in memory (browser hosts, tests, tooling)

use std::path::{Path, PathBuf};

use hashbrown::HashMap;

use demostream_shared::{MAX_DEMO_BYTES, read_file_with_limit, write_file};

use super::error::DemoError;
use super::host::{DemoExporter, DemoLoader};

/// Recordings stored as files under a root directory
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
    max_bytes: u64,
}

impl DirectoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            max_bytes: MAX_DEMO_BYTES,
        }
    }

    /// Cap on the size of recordings loaded into memory
    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path a recording name resolves to
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl DemoLoader for DirectoryStore {
    fn find_file(&self, name: &str) -> Result<Vec<u8>, DemoError> {
        let path = self.path_for(name);
        read_file_with_limit(&path, self.max_bytes).map_err(|e| {
            tracing::warn!(error = %format!("{e:#}"), "Failed to load demo");
            DemoError::NotFound(name.to_string())
        })
    }
}

impl DemoExporter for DirectoryStore {
    fn export_bytes(&mut self, name: &str, bytes: &[u8]) -> Result<(), DemoError> {
        let path = self.path_for(name);
        write_file(&path, bytes).map_err(|e| DemoError::Export {
            name: name.to_string(),
            reason: format!("{e:#}"),
        })?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "Demo exported");
        Ok(())
    }
}

/// Recordings kept in memory, keyed by name
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    files: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a recording
    pub fn insert(&mut self, name: impl Into<String>, bytes: Vec<u8>) {
        self.files.insert(name.into(), bytes);
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.files.get(name).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl DemoLoader for MemoryStore {
    fn find_file(&self, name: &str) -> Result<Vec<u8>, DemoError> {
        self.files
            .get(name)
            .cloned()
            .ok_or_else(|| DemoError::NotFound(name.to_string()))
    }
}

impl DemoExporter for MemoryStore {
    fn export_bytes(&mut self, name: &str, bytes: &[u8]) -> Result<(), DemoError> {
        self.insert(name, bytes.to_vec());
        Ok(())
    }
}
