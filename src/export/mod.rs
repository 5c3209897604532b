pub mod csv;
pub mod json;

pub use crate::error::ExportError;
pub use csv::export_entity_csv;
pub use json::{read_json, write_json};

use std::path::{Path, PathBuf};

pub const INDEX_FILE: &str = "schema-index.json";

/// The directory all artifacts of a run are written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDir {
    root: PathBuf,
}

impl OutputDir {
    /// Creates the directory (and parents) if needed.
    pub fn create<P: AsRef<Path>>(root: P) -> Result<Self, ExportError> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(&root).map_err(|source| ExportError::DirCreate {
            path: root.clone(),
            source,
        })?;
        Ok(Self { root })
    }

    /// Refers to an existing directory without touching the file system.
    pub fn existing<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn entities_path(&self, version: &str) -> PathBuf {
        self.root
            .join(format!("entities-{}.json", version.to_lowercase()))
    }

    #[must_use]
    pub fn property_sets_path(&self, version: &str) -> PathBuf {
        self.root
            .join(format!("property-sets-{}.json", version.to_lowercase()))
    }

    #[must_use]
    pub fn index_path(&self) -> PathBuf {
        self.root.join(INDEX_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_names_use_lowercase_version() {
        let out = OutputDir::existing("/tmp/schema");
        assert_eq!(
            out.entities_path("IFC4X3_ADD2"),
            PathBuf::from("/tmp/schema/entities-ifc4x3_add2.json")
        );
        assert_eq!(
            out.property_sets_path("IFC2X3"),
            PathBuf::from("/tmp/schema/property-sets-ifc2x3.json")
        );
        assert_eq!(out.index_path(), PathBuf::from("/tmp/schema/schema-index.json"));
    }

    #[test]
    fn create_makes_nested_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("lib").join("generated");
        let out = OutputDir::create(&nested).unwrap();
        assert!(out.root().is_dir());
    }
}
