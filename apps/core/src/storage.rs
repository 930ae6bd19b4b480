//! JSON file persistence shared by the state and feedback stores.
//!
//! Files are optional on read (absence means default state) and are
//! replaced atomically on write: the full record is serialized to a
//! sibling temp file which is then renamed over the target.

use crate::error::Result;
use crate::fs_manager::PortablePathManager;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads `path` as JSON, or returns `T::default()` when the file is absent.
pub fn load_or_default<T>(path: &Path) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    if !path.exists() {
        debug!("No file at {:?}, starting from defaults", path);
        return Ok(T::default());
    }

    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Writes `value` as 4-space indented JSON, creating parent directories.
pub fn save_atomic<T>(path: &Path, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
{
    PortablePathManager::ensure_parent(path)?;

    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;

    let tmp = temp_path(path);
    fs::write(&tmp, &buf)?;
    fs::rename(&tmp, path)?;
    debug!("Saved {} bytes to {:?}", buf.len(), path);
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
