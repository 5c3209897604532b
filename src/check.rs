//! Consistency check between a version's property sets and its entities.

use crate::export::{read_json, ExportError, OutputDir};
use crate::model::{EntityRecord, PropertySetRecord};
use crate::schema::{DeclarationSource, SourceError};
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, info, warn};

/// How many entities the declaration source lists for a version.
#[derive(Debug)]
pub struct SchemaAvailability {
    pub version: String,
    pub entities: Result<usize, SourceError>,
}

impl fmt::Display for SchemaAvailability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.entities {
            Ok(count) => write!(f, "{}: {count} entities available", self.version),
            Err(e) => write!(f, "{}: unavailable ({e})", self.version),
        }
    }
}

/// Lists every version with the entity count its declaration source reports.
pub fn schema_availability<S: DeclarationSource + ?Sized>(
    source: &S,
    versions: &[String],
) -> Vec<SchemaAvailability> {
    versions
        .iter()
        .map(|version| {
            let entities = source.list_entities(version).map(|names| names.len());
            if let Err(e) = &entities {
                warn!(version = %version, error = %e, "schema version not available");
            }
            SchemaAvailability {
                version: version.clone(),
                entities,
            }
        })
        .collect()
}

/// A property set naming an entity the version does not define.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingReference {
    pub version: String,
    pub property_set: String,
    pub entity: String,
}

impl fmt::Display for DanglingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} applies to unknown entity {}",
            self.version, self.property_set, self.entity
        )
    }
}

/// Dangling `applicableEntities` references within one version.
#[must_use]
pub fn find_dangling(
    version: &str,
    entities: &[EntityRecord],
    property_sets: &[PropertySetRecord],
) -> Vec<DanglingReference> {
    let known: HashSet<&str> = entities.iter().map(|e| e.name.as_str()).collect();
    let mut dangling = Vec::new();

    for pset in property_sets {
        for entity in &pset.applicable_entities {
            if !known.contains(entity.as_str()) {
                dangling.push(DanglingReference {
                    version: version.to_string(),
                    property_set: pset.name.clone(),
                    entity: entity.clone(),
                });
            }
        }
    }

    dangling
}

/// Checks every version that has both artifacts on disk.
pub fn check_output(output: &OutputDir, versions: &[String]) -> Result<Vec<DanglingReference>, ExportError> {
    let mut issues = Vec::new();

    for version in versions {
        let entities_path = output.entities_path(version);
        let psets_path = output.property_sets_path(version);
        if !entities_path.is_file() || !psets_path.is_file() {
            debug!(version = %version, "skipping check, artifacts missing");
            continue;
        }

        let entities: Vec<EntityRecord> = read_json(&entities_path)?;
        let property_sets: Vec<PropertySetRecord> = read_json(&psets_path)?;
        let found = find_dangling(version, &entities, &property_sets);
        info!(version = %version, dangling = found.len(), "checked property-set references");
        issues.extend(found);
    }

    Ok(issues)
}
