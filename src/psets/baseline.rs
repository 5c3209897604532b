//! Curated seed catalog used when no authoritative property-set source exists.
//!
//! Covers one `*Common` template per common building element, transcribed from
//! the published buildingSMART definitions. It is deliberately incomplete.

use crate::model::property_set::TYPE_DRIVEN_OVERRIDE;
use crate::model::{Property, PropertySetRecord};

type Template = (&'static str, &'static str, &'static [(&'static str, &'static str)]);

const BASELINE: &[Template] = &[
    (
        "Pset_WallCommon",
        "IFCWALL",
        &[
            ("Reference", "IFCLABEL"),
            ("AcousticRating", "IFCLABEL"),
            ("FireRating", "IFCLABEL"),
            ("Combustible", "IFCBOOLEAN"),
            ("SurfaceSpreadOfFlame", "IFCLABEL"),
            ("ThermalTransmittance", "IFCTHERMALTRANSMITTANCEMEASURE"),
            ("IsExternal", "IFCBOOLEAN"),
            ("ExtendToStructure", "IFCBOOLEAN"),
            ("LoadBearing", "IFCBOOLEAN"),
            ("Compartmentation", "IFCBOOLEAN"),
        ],
    ),
    (
        "Pset_SlabCommon",
        "IFCSLAB",
        &[
            ("Reference", "IFCLABEL"),
            ("AcousticRating", "IFCLABEL"),
            ("FireRating", "IFCLABEL"),
            ("Combustible", "IFCBOOLEAN"),
            ("SurfaceSpreadOfFlame", "IFCLABEL"),
            ("ThermalTransmittance", "IFCTHERMALTRANSMITTANCEMEASURE"),
            ("IsExternal", "IFCBOOLEAN"),
            ("LoadBearing", "IFCBOOLEAN"),
            ("PitchAngle", "IFCPLANEANGLEMEASURE"),
        ],
    ),
    (
        "Pset_ColumnCommon",
        "IFCCOLUMN",
        &[
            ("Reference", "IFCLABEL"),
            ("FireRating", "IFCLABEL"),
            ("IsExternal", "IFCBOOLEAN"),
            ("LoadBearing", "IFCBOOLEAN"),
            ("Status", "IFCLABEL"),
        ],
    ),
    (
        "Pset_BeamCommon",
        "IFCBEAM",
        &[
            ("Reference", "IFCLABEL"),
            ("FireRating", "IFCLABEL"),
            ("IsExternal", "IFCBOOLEAN"),
            ("LoadBearing", "IFCBOOLEAN"),
            ("Span", "IFCLENGTHMEASURE"),
            ("Slope", "IFCPLANEANGLEMEASURE"),
        ],
    ),
    (
        "Pset_DoorCommon",
        "IFCDOOR",
        &[
            ("Reference", "IFCLABEL"),
            ("FireRating", "IFCLABEL"),
            ("AcousticRating", "IFCLABEL"),
            ("SecurityRating", "IFCLABEL"),
            ("IsExternal", "IFCBOOLEAN"),
            ("Infiltration", "IFCVOLUMETRICFLOWRATEMEASURE"),
            ("ThermalTransmittance", "IFCTHERMALTRANSMITTANCEMEASURE"),
            ("GlazingAreaFraction", "IFCREAL"),
            ("HandicapAccessible", "IFCBOOLEAN"),
            ("FireExit", "IFCBOOLEAN"),
            ("SelfClosing", "IFCBOOLEAN"),
        ],
    ),
    (
        "Pset_WindowCommon",
        "IFCWINDOW",
        &[
            ("Reference", "IFCLABEL"),
            ("FireRating", "IFCLABEL"),
            ("AcousticRating", "IFCLABEL"),
            ("SecurityRating", "IFCLABEL"),
            ("IsExternal", "IFCBOOLEAN"),
            ("Infiltration", "IFCVOLUMETRICFLOWRATEMEASURE"),
            ("ThermalTransmittance", "IFCTHERMALTRANSMITTANCEMEASURE"),
            ("GlazingAreaFraction", "IFCREAL"),
            ("SmokeStop", "IFCBOOLEAN"),
        ],
    ),
    (
        "Pset_SpaceCommon",
        "IFCSPACE",
        &[
            ("Reference", "IFCLABEL"),
            ("Category", "IFCLABEL"),
            ("FloorCovering", "IFCLABEL"),
            ("WallCovering", "IFCLABEL"),
            ("CeilingCovering", "IFCLABEL"),
            ("SkirtingBoard", "IFCLABEL"),
            ("GrossPlannedArea", "IFCAREAMEASURE"),
            ("NetPlannedArea", "IFCAREAMEASURE"),
            ("PubliclyAccessible", "IFCBOOLEAN"),
            ("HandicapAccessible", "IFCBOOLEAN"),
        ],
    ),
    (
        "Pset_RoofCommon",
        "IFCROOF",
        &[
            ("Reference", "IFCLABEL"),
            ("FireRating", "IFCLABEL"),
            ("ThermalTransmittance", "IFCTHERMALTRANSMITTANCEMEASURE"),
            ("IsExternal", "IFCBOOLEAN"),
            ("PitchAngle", "IFCPLANEANGLEMEASURE"),
            ("LoadBearing", "IFCBOOLEAN"),
        ],
    ),
    (
        "Pset_StairCommon",
        "IFCSTAIR",
        &[
            ("Reference", "IFCLABEL"),
            ("FireRating", "IFCLABEL"),
            ("HandicapAccessible", "IFCBOOLEAN"),
            ("IsExternal", "IFCBOOLEAN"),
            ("LoadBearing", "IFCBOOLEAN"),
        ],
    ),
    (
        "Pset_RailingCommon",
        "IFCRAILING",
        &[
            ("Reference", "IFCLABEL"),
            ("FireRating", "IFCLABEL"),
            ("IsExternal", "IFCBOOLEAN"),
            ("LoadBearing", "IFCBOOLEAN"),
        ],
    ),
];

/// The baseline catalog tagged with `version`.
#[must_use]
pub fn baseline_catalog(version: &str) -> Vec<PropertySetRecord> {
    BASELINE
        .iter()
        .map(|(name, entity, properties)| PropertySetRecord {
            name: (*name).to_string(),
            applicable_entities: vec![(*entity).to_string()],
            properties: properties
                .iter()
                .map(|(name, data_type)| Property {
                    name: (*name).to_string(),
                    data_type: (*data_type).to_string(),
                })
                .collect(),
            ifc_version: vec![version.to_string()],
            template_type: TYPE_DRIVEN_OVERRIDE.to_string(),
        })
        .collect()
}
