//! # IFC Schema Export
//!
//! Extracts a normalized description of the IFC schema across versions and
//! writes indexed JSON artifacts for BIM viewers and editors.
//!
//! ## Artifacts
//!
//! - `entities-<version>.json` - entity records sorted by category, then name
//! - `property-sets-<version>.json` - property-set templates
//! - `schema-index.json` - per-version counts and category descriptions
//!
//! ## Example
//!
//! ```no_run
//! use ifc_schema_export::export::OutputDir;
//! use ifc_schema_export::pipeline::Pipeline;
//! use ifc_schema_export::psets::PropertySetCatalog;
//! use ifc_schema_export::schema::DumpSource;
//!
//! let versions = vec!["IFC4".to_string()];
//! let source = DumpSource::from_dir("schema/declarations", &versions);
//! let output = OutputDir::create("lib/generated/ifc-schema")?;
//! let report = Pipeline::new(&source, PropertySetCatalog::baseline_only(), output, versions).run();
//! println!("Entities: {:?}", report.index.entity_counts);
//! # Ok::<(), ifc_schema_export::error::ExportError>(())
//! ```

pub mod check;
pub mod config;
pub mod error;
pub mod export;
pub mod index;
pub mod model;
pub mod pipeline;
pub mod psets;
pub mod schema;
