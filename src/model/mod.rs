pub mod category;
pub mod entity;
pub mod index;
pub mod property_set;

pub use category::Category;
pub use entity::{Attribute, EntityRecord, UNKNOWN_TYPE};
pub use index::{CategoryTable, SchemaIndex, VersionCounts};
pub use property_set::{Property, PropertySetRecord};

/// Schema versions exported when the configuration does not say otherwise.
pub const DEFAULT_VERSIONS: &[&str] = &["IFC2X3", "IFC4", "IFC4X3_ADD2"];
