use super::Category;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Placeholder for an attribute whose declared type could not be resolved.
pub const UNKNOWN_TYPE: &str = "UNKNOWN";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub optional: bool,
    #[serde(rename = "type")]
    pub type_name: String,
}

/// One entity type of one schema version.
///
/// `supertype` and `subtypes` hold entity names only; resolving them into a
/// tree is left to consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityRecord {
    pub name: String,
    pub category: Category,
    pub predefined_types: Vec<String>,
    pub attributes: Vec<Attribute>,
    pub supertype: Option<String>,
    pub subtypes: Vec<String>,
    pub description: String,
    pub ifc_version: Vec<String>,
}

impl EntityRecord {
    /// A record carrying only the name, its category and version metadata.
    #[must_use]
    pub fn minimal(version: &str, name: &str) -> Self {
        Self {
            name: name.to_string(),
            category: Category::classify(name),
            predefined_types: Vec::new(),
            attributes: Vec::new(),
            supertype: None,
            subtypes: Vec::new(),
            description: describe(version, name),
            ifc_version: vec![version.to_string()],
        }
    }

    /// Artifact order: category tag, then name.
    #[must_use]
    pub fn sort_cmp(&self, other: &Self) -> Ordering {
        self.category
            .as_str()
            .cmp(other.category.as_str())
            .then_with(|| self.name.cmp(&other.name))
    }
}

#[must_use]
pub fn describe(version: &str, name: &str) -> String {
    format!("IFC {version} entity: {name}")
}
