use super::Category;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Cross-version summary written next to the per-version artifacts.
///
/// Counts only hold versions with an artifact on disk; a missing key means
/// "never built", a zero means "built but empty".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaIndex {
    pub versions: Vec<String>,
    pub last_generated: String,
    pub entity_counts: VersionCounts,
    pub property_set_counts: VersionCounts,
    pub categories: CategoryTable,
}

/// Static category description table, serialized as a map in rule order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryTable;

impl Serialize for CategoryTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Category::ALL.len()))?;
        for category in Category::ALL {
            map.serialize_entry(category.as_str(), category.description())?;
        }
        map.end()
    }
}

/// Record counts keyed by version, kept and serialized in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionCounts(Vec<(String, usize)>);

impl VersionCounts {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the count for `version`, keeping its position if already present.
    pub fn insert(&mut self, version: &str, count: usize) {
        match self.0.iter_mut().find(|(v, _)| v == version) {
            Some(entry) => entry.1 = count,
            None => self.0.push((version.to_string(), count)),
        }
    }

    #[must_use]
    pub fn get(&self, version: &str) -> Option<&usize> {
        self.0.iter().find(|(v, _)| v == version).map(|(_, count)| count)
    }

    #[must_use]
    pub fn contains_key(&self, version: &str) -> bool {
        self.get(version).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(v, count)| (v.as_str(), *count))
    }
}

impl<'a> FromIterator<(&'a str, usize)> for VersionCounts {
    fn from_iter<I: IntoIterator<Item = (&'a str, usize)>>(iter: I) -> Self {
        let mut counts = Self::new();
        for (version, count) in iter {
            counts.insert(version, count);
        }
        counts
    }
}

impl Serialize for VersionCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (version, count) in &self.0 {
            map.serialize_entry(version, count)?;
        }
        map.end()
    }
}
