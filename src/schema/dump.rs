//! Declaration source backed by JSON declaration dumps.
//!
//! One file per version, `declarations-<version-lowercase>.json`:
//!
//! ```json
//! {
//!   "entities": [
//!     {
//!       "name": "IFCWALL",
//!       "enumerationItems": ["STANDARD", "SHEAR"],
//!       "attributes": [{ "name": "GlobalId", "optional": false, "type": "IFCGLOBALLYUNIQUEID" }],
//!       "supertype": "IFCBUILDINGELEMENT",
//!       "subtypes": ["IFCWALLSTANDARDCASE"]
//!     }
//!   ]
//! }
//! ```
//!
//! An omitted key means the capability is not exposed for that entity; an
//! attribute without `type` has an unresolvable declared type.

use super::declaration::{Declaration, DeclarationSource, RawAttribute};
use crate::error::{DumpError, SourceError};
use serde::{Deserialize, Deserializer};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DumpAttribute {
    pub name: String,
    #[serde(default)]
    pub optional: bool,
    #[serde(default, rename = "type")]
    pub type_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEntity {
    pub name: String,
    #[serde(default)]
    pub enumeration_items: Option<Vec<String>>,
    #[serde(default)]
    pub attributes: Option<Vec<DumpAttribute>>,
    // Outer None: key omitted. Some(None): explicit null, a root entity.
    #[serde(default, deserialize_with = "present")]
    pub supertype: Option<Option<String>>,
    #[serde(default)]
    pub subtypes: Option<Vec<String>>,
}

impl RawEntity {
    /// An entity exposing no capabilities at all.
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            enumeration_items: None,
            attributes: None,
            supertype: None,
            subtypes: None,
        }
    }
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize)]
struct DumpFile {
    entities: Vec<RawEntity>,
}

#[derive(Debug)]
struct VersionDump {
    entities: Vec<RawEntity>,
    by_name: HashMap<String, usize>,
}

impl VersionDump {
    fn new(entities: Vec<RawEntity>) -> Self {
        let by_name = entities
            .iter()
            .enumerate()
            .map(|(i, e)| (e.name.clone(), i))
            .collect();
        Self { entities, by_name }
    }
}

/// Declaration dumps keyed by version tag.
///
/// Versions that failed to load are kept with the failure reason so that
/// [`DeclarationSource::list_entities`] can report it.
#[derive(Debug, Default)]
pub struct DumpSource {
    versions: BTreeMap<String, Result<VersionDump, Arc<DumpError>>>,
}

#[must_use]
pub fn dump_file_name(version: &str) -> String {
    format!("declarations-{}.json", version.to_lowercase())
}

impl DumpSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the dump of every listed version from `dir`.
    ///
    /// Never fails as a whole; a missing or malformed file makes only that
    /// version unavailable.
    pub fn from_dir<P: AsRef<Path>>(dir: P, versions: &[String]) -> Self {
        let mut source = Self::new();
        for version in versions {
            let path = dir.as_ref().join(dump_file_name(version));
            let loaded = read_dump(&path).map(VersionDump::new).map_err(Arc::new);
            if let Ok(dump) = &loaded {
                debug!(version = %version, path = %path.display(), count = dump.entities.len(), "loaded declarations");
            }
            source.versions.insert(version.clone(), loaded);
        }
        source
    }

    /// Registers in-memory declarations for `version`, replacing any previous ones.
    pub fn insert_version(&mut self, version: &str, entities: Vec<RawEntity>) {
        self.versions
            .insert(version.to_string(), Ok(VersionDump::new(entities)));
    }

    #[must_use]
    pub fn with_version(mut self, version: &str, entities: Vec<RawEntity>) -> Self {
        self.insert_version(version, entities);
        self
    }

    fn version(&self, version: &str) -> Result<&VersionDump, SourceError> {
        match self.versions.get(version) {
            Some(Ok(dump)) => Ok(dump),
            Some(Err(e)) => Err(SourceError::DumpLoad {
                version: version.to_string(),
                source: Arc::clone(e),
            }),
            None => Err(SourceError::SourceUnavailable {
                version: version.to_string(),
                reason: "no declarations registered".to_string(),
            }),
        }
    }
}

fn read_dump(path: &Path) -> Result<Vec<RawEntity>, DumpError> {
    let content = std::fs::read_to_string(path).map_err(|source| DumpError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let dump: DumpFile = serde_json::from_str(&content).map_err(|source| DumpError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(dump.entities)
}

impl DeclarationSource for DumpSource {
    fn list_entities(&self, version: &str) -> Result<Vec<String>, SourceError> {
        let dump = self.version(version)?;
        Ok(dump.entities.iter().map(|e| e.name.clone()).collect())
    }

    fn resolve(
        &self,
        version: &str,
        name: &str,
    ) -> Result<Box<dyn Declaration + '_>, SourceError> {
        let dump = self.version(version)?;
        let entity = dump
            .by_name
            .get(name)
            .and_then(|&i| dump.entities.get(i))
            .ok_or_else(|| SourceError::UnresolvedEntity {
                version: version.to_string(),
                name: name.to_string(),
            })?;
        Ok(Box::new(DumpDeclaration(entity)))
    }
}

struct DumpDeclaration<'a>(&'a RawEntity);

impl Declaration for DumpDeclaration<'_> {
    fn enumeration_items(&self) -> Option<Result<Vec<String>, SourceError>> {
        self.0.enumeration_items.clone().map(Ok)
    }

    fn attributes(&self) -> Option<Result<Vec<RawAttribute>, SourceError>> {
        self.0.attributes.as_ref().map(|attrs| {
            Ok(attrs
                .iter()
                .map(|a| RawAttribute {
                    name: a.name.clone(),
                    optional: a.optional,
                    declared_type: a.type_name.clone(),
                })
                .collect())
        })
    }

    fn supertype(&self) -> Option<Result<Option<String>, SourceError>> {
        self.0.supertype.clone().map(Ok)
    }

    fn subtypes(&self) -> Option<Result<Vec<String>, SourceError>> {
        self.0.subtypes.clone().map(Ok)
    }
}
