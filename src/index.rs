//! Cross-version schema index built from the artifacts actually on disk.

use crate::export::{read_json, write_json, ExportError, OutputDir};
use crate::model::{CategoryTable, SchemaIndex, VersionCounts};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::IgnoredAny;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Builds the index for `versions` by counting the artifacts present in `output`.
///
/// A version without an artifact gets no count key at all. An artifact that
/// exists but cannot be read as a JSON array is treated like a missing one.
/// Count keys follow the order of `versions`.
#[must_use]
pub fn build_index(output: &OutputDir, versions: &[String], generated_at: DateTime<Utc>) -> SchemaIndex {
    let mut entity_counts = VersionCounts::new();
    let mut property_set_counts = VersionCounts::new();

    for version in versions {
        if let Some(count) = count_artifact(&output.entities_path(version)) {
            entity_counts.insert(version, count);
        }
        if let Some(count) = count_artifact(&output.property_sets_path(version)) {
            property_set_counts.insert(version, count);
        }
    }

    SchemaIndex {
        versions: versions.to_vec(),
        last_generated: format_timestamp(generated_at),
        entity_counts,
        property_set_counts,
        categories: CategoryTable,
    }
}

/// Number of records in a JSON array artifact, `None` if there is none.
#[must_use]
pub fn count_artifact(path: &Path) -> Option<usize> {
    if !path.is_file() {
        return None;
    }
    match read_json::<Vec<IgnoredAny>, _>(path) {
        Ok(items) => Some(items.len()),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring unreadable artifact");
            None
        }
    }
}

pub fn write_index(output: &OutputDir, index: &SchemaIndex) -> Result<PathBuf, ExportError> {
    let path = output.index_path();
    write_json(index, &path)?;
    Ok(path)
}

/// ISO 8601 UTC with milliseconds, e.g. `2025-01-13T00:00:00.000Z`.
#[must_use]
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn versions() -> Vec<String> {
        vec!["IFC2X3".to_string(), "IFC4".to_string(), "IFC4X3_ADD2".to_string()]
    }

    #[test]
    fn counts_only_present_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let output = OutputDir::existing(dir.path());
        std::fs::write(output.entities_path("IFC4"), "[{}, {}, {}]").unwrap();
        std::fs::write(output.entities_path("IFC2X3"), "[]").unwrap();
        std::fs::write(output.property_sets_path("IFC4"), "[{}]").unwrap();
        std::fs::write(output.property_sets_path("IFC4X3_ADD2"), "{ not an array").unwrap();

        let at = Utc.with_ymd_and_hms(2025, 1, 13, 0, 0, 0).unwrap();
        let index = build_index(&output, &versions(), at);

        assert_eq!(
            index.entity_counts,
            VersionCounts::from_iter([("IFC2X3", 0), ("IFC4", 3)])
        );
        assert_eq!(
            index.property_set_counts,
            VersionCounts::from_iter([("IFC4", 1)])
        );
        assert_eq!(index.last_generated, "2025-01-13T00:00:00.000Z");
    }

    #[test]
    fn count_keys_follow_configured_version_order() {
        let dir = tempfile::tempdir().unwrap();
        let output = OutputDir::existing(dir.path());
        std::fs::write(output.entities_path("IFC2X3"), "[{}]").unwrap();
        std::fs::write(output.entities_path("IFC4"), "[{}, {}]").unwrap();

        let versions = vec!["IFC4".to_string(), "IFC2X3".to_string()];
        let at = Utc.with_ymd_and_hms(2025, 1, 13, 0, 0, 0).unwrap();
        let index = build_index(&output, &versions, at);

        let keys: Vec<&str> = index.entity_counts.iter().map(|(v, _)| v).collect();
        assert_eq!(keys, vec!["IFC4", "IFC2X3"]);

        let text = serde_json::to_string(&index.entity_counts).unwrap();
        assert_eq!(text, r#"{"IFC4":2,"IFC2X3":1}"#);
    }

    #[test]
    fn serializes_in_documented_shape() {
        let dir = tempfile::tempdir().unwrap();
        let output = OutputDir::existing(dir.path());
        let at = Utc.with_ymd_and_hms(2025, 1, 13, 0, 0, 0).unwrap();

        let index = build_index(&output, &versions(), at);
        let value = serde_json::to_value(&index).unwrap();

        assert_eq!(
            value,
            json!({
                "versions": ["IFC2X3", "IFC4", "IFC4X3_ADD2"],
                "lastGenerated": "2025-01-13T00:00:00.000Z",
                "entityCounts": {},
                "propertySetCounts": {},
                "categories": {
                    "Building Element": "Structural building components",
                    "Spatial Structure": "Spatial organization elements",
                    "MEP Element": "Mechanical, electrical, plumbing",
                    "Structural Element": "Structural engineering elements",
                    "Material & Property": "Materials and properties",
                    "Geometry & Representation": "Geometric representations",
                    "Process & Control": "Process control systems",
                    "Documentation": "Documentation and references",
                    "Other": "Other IFC entities"
                }
            })
        );

        let text = serde_json::to_string(&index).unwrap();
        let keys = ["\"versions\"", "\"lastGenerated\"", "\"entityCounts\"", "\"propertySetCounts\"", "\"categories\""];
        let positions: Vec<usize> = keys.iter().map(|k| text.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(text.find("Building Element").unwrap() < text.find("\"Other\"").unwrap());
    }
}
