use crate::error::ExportError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Writes `value` as pretty-printed JSON, replacing `path` atomically.
///
/// The content goes to a temporary file in the target directory first, so a
/// failed write never leaves a truncated artifact behind.
pub fn write_json<T, P>(value: &T, path: P) -> Result<(), ExportError>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let path_ref = path.as_ref();
    let json = serde_json::to_string_pretty(value)?;

    let dir = match path_ref.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(|source| ExportError::FileCreate {
        path: path_ref.to_path_buf(),
        source,
    })?;

    file.write_all(json.as_bytes())
        .map_err(|e| ExportError::WriteError {
            path: path_ref.to_path_buf(),
            message: e.to_string(),
        })?;

    file.persist(path_ref).map_err(|e| ExportError::WriteError {
        path: path_ref.to_path_buf(),
        message: e.error.to_string(),
    })?;

    Ok(())
}

/// Reads a JSON artifact previously written by [`write_json`].
pub fn read_json<T, P>(path: P) -> Result<T, ExportError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path_ref = path.as_ref();
    let content = std::fs::read_to_string(path_ref).map_err(|source| ExportError::ArtifactRead {
        path: path_ref.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ExportError::ArtifactParse {
        path: path_ref.to_path_buf(),
        source,
    })
}
