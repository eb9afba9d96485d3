//! Filesystem helpers shared across demostream tools and runtimes.

use std::path::Path;

use anyhow::{Context, Result};

/// Read a file into memory with a size cap.
pub fn read_file_with_limit(path: &Path, max_bytes: u64) -> Result<Vec<u8>> {
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("Failed to read file metadata: {}", path.display()))?;
    let len = metadata.len();
    if len > max_bytes {
        anyhow::bail!(
            "File too large: {} ({} bytes, max {} bytes)",
            path.display(),
            len,
            max_bytes
        );
    }
    std::fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

/// Write `bytes` to `path`, creating parent directories as needed.
pub fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("Failed to write file: {}", path.display()))
}

/// Append `extension` to `name` unless its last path component already has one.
///
/// Only the final component is inspected, so `maps.v2/intro` still gets the
/// extension while `intro.dem` is returned unchanged.
pub fn default_extension(name: &str, extension: &str) -> String {
    let file_name = name.rsplit(['/', '\\']).next().unwrap_or(name);
    if file_name.contains('.') {
        name.to_string()
    } else {
        format!("{name}{extension}")
    }
}
