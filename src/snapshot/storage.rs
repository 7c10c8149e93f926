use super::types::{Snapshot, SNAPSHOT_VERSION};
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::{self, File};
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};

/// Get the default snapshot file path (~/.config/tadoku-stats/snapshot.json)
pub fn get_snapshot_path() -> Result<PathBuf> {
    Ok(crate::config::get_config_dir()?.join("snapshot.json"))
}

/// Deserialize a snapshot from any reader.
///
/// Every entry is re-validated on the way in; an unsupported version is an error.
pub fn read_snapshot<R: Read>(reader: R) -> Result<Snapshot> {
    let snapshot: Snapshot =
        serde_json::from_reader(reader).context("Failed to parse snapshot JSON")?;

    if snapshot.version != SNAPSHOT_VERSION {
        anyhow::bail!("Unsupported snapshot version: {}", snapshot.version);
    }

    Ok(snapshot)
}

/// Serialize a snapshot to any writer
pub fn write_snapshot<W: Write>(writer: W, snapshot: &Snapshot) -> Result<()> {
    serde_json::to_writer_pretty(writer, snapshot).context("Failed to serialize snapshot")?;
    Ok(())
}

/// Load a snapshot from a JSON file
pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open snapshot file at {}", path.display()))?;

    let snapshot = read_snapshot(BufReader::new(file))
        .with_context(|| format!("Failed to load snapshot from {}", path.display()))?;

    tracing::debug!(
        entries = snapshot.entries.len(),
        "loaded snapshot from {}",
        path.display()
    );
    Ok(snapshot)
}

/// Save a snapshot to a JSON file atomically
///
/// Uses atomic-write-file so an interrupted write never leaves a truncated
/// snapshot behind. Creates the parent directory if it doesn't exist.
pub fn save_snapshot(path: &Path, snapshot: &Snapshot) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    write_snapshot(&mut file, snapshot)?;

    file.commit().context("Failed to save snapshot")?;

    tracing::debug!(
        entries = snapshot.entries.len(),
        "saved snapshot to {}",
        path.display()
    );
    Ok(())
}
