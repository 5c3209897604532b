use serde::{Deserialize, Serialize};

/// Functional category derived from an entity name.
///
/// The serialized form is the human-readable tag (e.g. `"Building Element"`),
/// which is also the primary sort key of an entity artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Building Element")]
    BuildingElement,
    #[serde(rename = "Spatial Structure")]
    SpatialStructure,
    #[serde(rename = "MEP Element")]
    MepElement,
    #[serde(rename = "Structural Element")]
    StructuralElement,
    #[serde(rename = "Material & Property")]
    MaterialProperty,
    #[serde(rename = "Geometry & Representation")]
    GeometryRepresentation,
    #[serde(rename = "Process & Control")]
    ProcessControl,
    #[serde(rename = "Documentation")]
    Documentation,
    #[serde(rename = "Other")]
    Other,
}

// Evaluated top to bottom, first hit wins. Compound names can collide
// (IFCFLOWCONTROLLER is MEP, not Process & Control); keep the order as is.
const RULES: &[(Category, &[&str])] = &[
    (
        Category::BuildingElement,
        &[
            "WALL", "SLAB", "COLUMN", "BEAM", "DOOR", "WINDOW", "ROOF", "STAIR", "RAILING",
        ],
    ),
    (
        Category::SpatialStructure,
        &["SITE", "BUILDING", "BUILDINGSTOREY", "SPACE", "ZONE"],
    ),
    (
        Category::MepElement,
        &[
            "DUCT", "PIPE", "CABLE", "FITTING", "FLOW", "VALVE", "PUMP", "FAN", "COIL",
        ],
    ),
    (
        Category::StructuralElement,
        &["FOOTING", "PILE", "FOUNDATION", "CONNECTION", "JOINT", "REBAR"],
    ),
    (
        Category::MaterialProperty,
        &["MATERIAL", "PROPERTY", "PROFILE", "SECTION"],
    ),
    (
        Category::GeometryRepresentation,
        &["GEOMETRY", "REPRESENTATION", "SHAPE", "CURVE", "SURFACE", "SOLID"],
    ),
    (
        Category::ProcessControl,
        &["PROCESS", "CONTROL", "ACTUATOR", "SENSOR", "CONTROLLER"],
    ),
    (
        Category::Documentation,
        &["DOCUMENT", "REFERENCE", "LIBRARY", "CLASSIFICATION"],
    ),
];

impl Category {
    /// All categories in rule order, `Other` last.
    pub const ALL: [Category; 9] = [
        Category::BuildingElement,
        Category::SpatialStructure,
        Category::MepElement,
        Category::StructuralElement,
        Category::MaterialProperty,
        Category::GeometryRepresentation,
        Category::ProcessControl,
        Category::Documentation,
        Category::Other,
    ];

    /// Classifies an entity by case-insensitive substring match on its name.
    ///
    /// Total and deterministic: every name maps to exactly one category.
    #[must_use]
    pub fn classify(entity_name: &str) -> Self {
        let upper = entity_name.to_uppercase();
        RULES
            .iter()
            .find(|(_, patterns)| patterns.iter().any(|p| upper.contains(p)))
            .map_or(Category::Other, |(category, _)| *category)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::BuildingElement => "Building Element",
            Category::SpatialStructure => "Spatial Structure",
            Category::MepElement => "MEP Element",
            Category::StructuralElement => "Structural Element",
            Category::MaterialProperty => "Material & Property",
            Category::GeometryRepresentation => "Geometry & Representation",
            Category::ProcessControl => "Process & Control",
            Category::Documentation => "Documentation",
            Category::Other => "Other",
        }
    }

    /// Reference description emitted in the schema index.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Category::BuildingElement => "Structural building components",
            Category::SpatialStructure => "Spatial organization elements",
            Category::MepElement => "Mechanical, electrical, plumbing",
            Category::StructuralElement => "Structural engineering elements",
            Category::MaterialProperty => "Materials and properties",
            Category::GeometryRepresentation => "Geometric representations",
            Category::ProcessControl => "Process control systems",
            Category::Documentation => "Documentation and references",
            Category::Other => "Other IFC entities",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
