use crate::error::ExportError;
use crate::model::EntityRecord;
use std::fs::File;
use std::path::Path;

/// Writes a flat one-row-per-entity summary of the given versions.
pub fn export_entity_csv<P: AsRef<Path>>(
    versions: &[(String, Vec<EntityRecord>)],
    path: P,
) -> Result<(), ExportError> {
    let path_ref = path.as_ref();
    let file = File::create(path_ref).map_err(|source| ExportError::FileCreate {
        path: path_ref.to_path_buf(),
        source,
    })?;

    let mut writer = csv::Writer::from_writer(file);

    writer.write_record([
        "Version",
        "Category",
        "Name",
        "Supertype",
        "Attributes",
        "Subtypes",
        "PredefinedTypes",
    ])?;

    for (version, entities) in versions {
        for entity in entities {
            let attributes = entity.attributes.len().to_string();
            let subtypes = entity.subtypes.len().to_string();
            let predefined = entity.predefined_types.join(";");

            writer.write_record([
                version.as_str(),
                entity.category.as_str(),
                entity.name.as_str(),
                entity.supertype.as_deref().unwrap_or(""),
                attributes.as_str(),
                subtypes.as_str(),
                predefined.as_str(),
            ])?;
        }
    }

    writer.flush().map_err(|e| ExportError::WriteError {
        path: path_ref.to_path_buf(),
        message: e.to_string(),
    })?;

    Ok(())
}
