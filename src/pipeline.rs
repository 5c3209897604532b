//! Regeneration of all per-version artifacts and the index.
//!
//! Versions run strictly one after another against a shared declaration
//! source. Each artifact is replaced atomically and failures stay local to the
//! artifact they hit; the index is rebuilt from whatever ends up on disk.

use crate::export::{write_json, OutputDir};
use crate::index::{build_index, write_index};
use crate::model::SchemaIndex;
use crate::psets::{CatalogSource, PropertySetCatalog};
use crate::schema::{extract_entities, DeclarationSource};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use tracing::{error, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityStatus {
    /// Artifact written; `degraded` entities fell back to defaults.
    Written { count: usize, degraded: usize },
    /// The declaration source could not serve the version.
    Skipped { reason: String },
    WriteFailed { path: PathBuf, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertySetStatus {
    Written { count: usize, source: CatalogSource },
    WriteFailed {
        path: PathBuf,
        source: CatalogSource,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionReport {
    pub version: String,
    pub entities: EntityStatus,
    pub property_sets: PropertySetStatus,
}

impl VersionReport {
    /// Fully built from the declaration source and an authoritative catalog.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self.entities, EntityStatus::Written { degraded: 0, .. })
            && matches!(
                &self.property_sets,
                PropertySetStatus::Written { source, .. } if source.is_authoritative()
            )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub versions: Vec<VersionReport>,
    pub index: SchemaIndex,
    /// Where the index was written, or why it was not.
    pub index_written: Result<PathBuf, String>,
}

pub struct Pipeline<'a, S: DeclarationSource + ?Sized> {
    source: &'a S,
    catalog: PropertySetCatalog,
    output: OutputDir,
    versions: Vec<String>,
}

impl<'a, S: DeclarationSource + ?Sized> Pipeline<'a, S> {
    pub fn new(
        source: &'a S,
        catalog: PropertySetCatalog,
        output: OutputDir,
        versions: Vec<String>,
    ) -> Self {
        Self {
            source,
            catalog,
            output,
            versions,
        }
    }

    pub fn run(&mut self) -> RunReport {
        self.run_at(Utc::now())
    }

    /// Runs every version, then rebuilds the index stamped with `generated_at`.
    pub fn run_at(&mut self, generated_at: DateTime<Utc>) -> RunReport {
        let versions = self.versions.clone();
        let mut reports = Vec::with_capacity(versions.len());

        for version in &versions {
            info!(version = %version, "processing schema version");
            let entities = self.export_entities(version);
            let property_sets = self.export_property_sets(version);
            reports.push(VersionReport {
                version: version.clone(),
                entities,
                property_sets,
            });
        }

        let index = build_index(&self.output, &versions, generated_at);
        let index_written = match write_index(&self.output, &index) {
            Ok(path) => {
                info!(
                    path = %path.display(),
                    entities = ?index.entity_counts,
                    property_sets = ?index.property_set_counts,
                    "schema index written"
                );
                Ok(path)
            }
            Err(e) => {
                error!(error = %e, "failed to write schema index");
                Err(e.to_string())
            }
        };

        RunReport {
            versions: reports,
            index,
            index_written,
        }
    }

    fn export_entities(&self, version: &str) -> EntityStatus {
        let extraction = match extract_entities(self.source, version) {
            Ok(extraction) => extraction,
            Err(e) => {
                warn!(version, error = %e, "skipping entity export");
                return EntityStatus::Skipped {
                    reason: e.to_string(),
                };
            }
        };

        let path = self.output.entities_path(version);
        let count = extraction.entities.len();
        let degraded = extraction.degraded.len();

        match write_json(&extraction.entities, &path) {
            Ok(()) => {
                if degraded == 0 {
                    info!(version, count, path = %path.display(), "exported entities");
                } else {
                    warn!(
                        version,
                        count,
                        degraded,
                        path = %path.display(),
                        "exported entities with degraded records"
                    );
                }
                EntityStatus::Written { count, degraded }
            }
            Err(e) => {
                error!(version, path = %path.display(), error = %e, "failed to write entities");
                EntityStatus::WriteFailed {
                    path,
                    reason: e.to_string(),
                }
            }
        }
    }

    fn export_property_sets(&mut self, version: &str) -> PropertySetStatus {
        let outcome = self.catalog.build(version);
        let path = self.output.property_sets_path(version);
        let count = outcome.records.len();

        match write_json(&outcome.records, &path) {
            Ok(()) => {
                info!(version, count, source = %outcome.source, "exported property sets");
                PropertySetStatus::Written {
                    count,
                    source: outcome.source,
                }
            }
            Err(e) => {
                error!(version, path = %path.display(), error = %e, "failed to write property sets");
                PropertySetStatus::WriteFailed {
                    path,
                    source: outcome.source,
                    reason: e.to_string(),
                }
            }
        }
    }
}
