use serde::{Deserialize, Serialize};

/// Binding style of the baseline templates.
pub const TYPE_DRIVEN_OVERRIDE: &str = "PSET_TYPEDRIVENOVERRIDE";

/// Data type assumed for properties that do not declare one.
pub const DEFAULT_DATA_TYPE: &str = "IFCLABEL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub name: String,
    pub data_type: String,
}

/// A named property-set template of one schema version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySetRecord {
    pub name: String,
    pub applicable_entities: Vec<String>,
    pub properties: Vec<Property>,
    pub ifc_version: Vec<String>,
    pub template_type: String,
}
