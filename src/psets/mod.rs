pub mod baseline;
pub mod catalog;
pub mod source;

pub use crate::error::PropertySetError;
pub use baseline::baseline_catalog;
pub use catalog::{CatalogOutcome, CatalogSource, PropertySetCatalog};
pub use source::{LocalCatalog, PropertySetDefinition, RemoteCatalog};
