//! Authoritative property-set sources: local catalog files and remote catalogs.

use crate::error::PropertySetError;
use crate::model::property_set::{DEFAULT_DATA_TYPE, TYPE_DRIVEN_OVERRIDE};
use crate::model::{Property, PropertySetRecord};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDefinition {
    pub name: String,
    #[serde(default)]
    pub data_type: Option<String>,
}

/// A property-set definition as delivered by an authoritative catalog.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySetDefinition {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub applicable_entities: Vec<String>,
    #[serde(default)]
    pub properties: Vec<PropertyDefinition>,
    #[serde(default)]
    pub template_type: Option<String>,
    #[serde(default)]
    pub applicable_versions: Option<Vec<String>>,
}

impl PropertySetDefinition {
    fn applies_to(&self, version: &str) -> bool {
        self.applicable_versions
            .as_ref()
            .is_none_or(|versions| versions.iter().any(|v| v == version || v == "ALL"))
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    List(Vec<PropertySetDefinition>),
    Wrapped {
        #[serde(rename = "propertySets")]
        property_sets: Vec<PropertySetDefinition>,
    },
}

/// Parses a catalog body: either a bare array or `{"propertySets": [...]}`.
pub fn parse_catalog(origin: &str, body: &str) -> Result<Vec<PropertySetDefinition>, PropertySetError> {
    let document: CatalogDocument =
        serde_json::from_str(body).map_err(|source| PropertySetError::InvalidCatalog {
            origin: origin.to_string(),
            source,
        })?;
    Ok(match document {
        CatalogDocument::List(defs) | CatalogDocument::Wrapped { property_sets: defs } => defs,
    })
}

/// Validates definitions into records for `version`.
///
/// Drops unnamed definitions and definitions scoped to other versions, keeps
/// the first of duplicate names, and sorts applicable entities.
#[must_use]
pub fn normalize(version: &str, definitions: Vec<PropertySetDefinition>) -> Vec<PropertySetRecord> {
    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(definitions.len());

    for def in definitions {
        if def.name.trim().is_empty() {
            warn!(version, "dropping property set without a name");
            continue;
        }
        if !def.applies_to(version) {
            debug!(version, pset = %def.name, "not applicable to version");
            continue;
        }
        if !seen.insert(def.name.clone()) {
            warn!(version, pset = %def.name, "duplicate property set, keeping first");
            continue;
        }

        let applicable_entities: BTreeSet<String> = def.applicable_entities.into_iter().collect();

        records.push(PropertySetRecord {
            name: def.name,
            applicable_entities: applicable_entities.into_iter().collect(),
            properties: def
                .properties
                .into_iter()
                .map(|p| Property {
                    name: p.name,
                    data_type: p.data_type.unwrap_or_else(|| DEFAULT_DATA_TYPE.to_string()),
                })
                .collect(),
            ifc_version: vec![version.to_string()],
            template_type: def
                .template_type
                .unwrap_or_else(|| TYPE_DRIVEN_OVERRIDE.to_string()),
        });
    }

    records
}

#[must_use]
pub fn catalog_file_name(version: &str) -> String {
    format!("property-sets-{}.json", version.to_lowercase())
}

/// Pre-resolved catalog files, one per version, in a directory.
#[derive(Debug, Clone)]
pub struct LocalCatalog {
    dir: PathBuf,
}

impl LocalCatalog {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Reads the catalog file for `version`, returning its definitions and path.
    pub fn load(&self, version: &str) -> Result<(Vec<PropertySetDefinition>, PathBuf), PropertySetError> {
        let path = self.dir.join(catalog_file_name(version));
        if !path.is_file() {
            return Err(PropertySetError::SourceMissing {
                version: version.to_string(),
            });
        }
        let body = std::fs::read_to_string(&path).map_err(|source| PropertySetError::FileRead {
            path: path.clone(),
            source,
        })?;
        let definitions = parse_catalog(&path.display().to_string(), &body)?;
        Ok((definitions, path))
    }
}

/// Remote catalogs reached over HTTP, one URL per version.
///
/// Consecutive requests are spaced by a fixed delay.
#[derive(Debug)]
pub struct RemoteCatalog {
    client: reqwest::blocking::Client,
    urls: BTreeMap<String, String>,
    delay: Duration,
    last_request: Option<Instant>,
}

impl RemoteCatalog {
    pub fn new(
        urls: BTreeMap<String, String>,
        timeout: Duration,
        delay: Duration,
    ) -> Result<Self, PropertySetError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| PropertySetError::ClientBuild { source })?;
        Ok(Self {
            client,
            urls,
            delay,
            last_request: None,
        })
    }

    /// Fetches the catalog for `version`, returning its definitions and URL.
    pub fn fetch(&mut self, version: &str) -> Result<(Vec<PropertySetDefinition>, String), PropertySetError> {
        let url = self
            .urls
            .get(version)
            .cloned()
            .ok_or_else(|| PropertySetError::SourceMissing {
                version: version.to_string(),
            })?;

        if let Some(last) = self.last_request {
            let wait = self.delay.saturating_sub(last.elapsed());
            if !wait.is_zero() {
                debug!(wait_ms = wait.as_millis(), "rate limiting catalog request");
                std::thread::sleep(wait);
            }
        }
        self.last_request = Some(Instant::now());

        debug!(version, url = %url, "fetching property-set catalog");
        let body = self
            .client
            .get(&url)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .and_then(reqwest::blocking::Response::text)
            .map_err(|source| PropertySetError::Retrieval {
                url: url.clone(),
                source,
            })?;

        let definitions = parse_catalog(&url, &body)?;
        Ok((definitions, url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CATALOG: &str = r#"{
        "propertySets": [
            {
                "name": "Pset_CoveringCommon",
                "applicableEntities": ["IFCCOVERING", "IFCCEILING", "IFCCOVERING"],
                "properties": [{ "name": "Reference" }, { "name": "Finish", "dataType": "IFCTEXT" }],
                "templateType": "PSET_OCCURRENCEDRIVEN"
            },
            { "name": "", "applicableEntities": ["IFCWALL"] },
            { "name": "Pset_RoadCommon", "applicableVersions": ["IFC4X3_ADD2"] },
            { "name": "Pset_Everywhere", "applicableVersions": ["ALL"] },
            { "name": "Pset_CoveringCommon", "applicableEntities": ["IFCSLAB"] }
        ]
    }"#;

    #[test]
    fn normalizes_wrapped_catalog() {
        let defs = parse_catalog("test", CATALOG).unwrap();
        let records = normalize("IFC4", defs);

        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Pset_CoveringCommon", "Pset_Everywhere"]);

        let covering = &records[0];
        assert_eq!(
            covering.applicable_entities,
            vec!["IFCCEILING".to_string(), "IFCCOVERING".to_string()]
        );
        assert_eq!(
            covering.properties,
            vec![
                Property {
                    name: "Reference".to_string(),
                    data_type: "IFCLABEL".to_string(),
                },
                Property {
                    name: "Finish".to_string(),
                    data_type: "IFCTEXT".to_string(),
                },
            ]
        );
        assert_eq!(covering.template_type, "PSET_OCCURRENCEDRIVEN");
        assert_eq!(covering.ifc_version, vec!["IFC4".to_string()]);
        assert_eq!(records[1].template_type, "PSET_TYPEDRIVENOVERRIDE");
    }

    #[test]
    fn accepts_bare_array() {
        let defs = parse_catalog("test", r#"[{ "name": "Pset_A" }]"#).unwrap();
        assert_eq!(defs.len(), 1);
    }

    #[test]
    fn rejects_malformed_catalog() {
        assert!(matches!(
            parse_catalog("test", r#"{"sets": 3}"#),
            Err(PropertySetError::InvalidCatalog { .. })
        ));
    }

    #[test]
    fn local_catalog_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let local = LocalCatalog::new(dir.path());
        assert!(matches!(
            local.load("IFC4"),
            Err(PropertySetError::SourceMissing { .. })
        ));

        std::fs::write(dir.path().join("property-sets-ifc4.json"), "[]").unwrap();
        let (defs, path) = local.load("IFC4").unwrap();
        assert!(defs.is_empty());
        assert_eq!(path, dir.path().join("property-sets-ifc4.json"));
    }

    #[test]
    fn remote_catalog_without_url_is_missing() {
        let mut remote =
            RemoteCatalog::new(BTreeMap::new(), Duration::from_secs(1), Duration::ZERO).unwrap();
        assert!(matches!(
            remote.fetch("IFC2X3"),
            Err(PropertySetError::SourceMissing { .. })
        ));
    }
}
