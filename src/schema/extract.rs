use super::declaration::{Declaration, DeclarationSource};
use crate::error::SourceError;
use crate::model::entity::describe;
use crate::model::{Attribute, Category, EntityRecord, UNKNOWN_TYPE};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Entity records of one version plus the names that had to be degraded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub version: String,
    /// Sorted by category tag, then name.
    pub entities: Vec<EntityRecord>,
    /// Entities emitted with defaults for at least one failed piece.
    pub degraded: Vec<String>,
}

/// Extracts one canonical record per entity name the source lists for `version`.
///
/// Only a failure to list the version is returned as an error. A failing
/// capability degrades that piece to its empty default; an entity that cannot
/// be resolved at all is emitted as a minimal record.
///
/// # Errors
///
/// Returns [`SourceError::SourceUnavailable`] (or whatever the source reports)
/// when the version's entity list cannot be obtained.
pub fn extract_entities<S>(source: &S, version: &str) -> Result<Extraction, SourceError>
where
    S: DeclarationSource + ?Sized,
{
    let names = source.list_entities(version)?;
    debug!(version, count = names.len(), "listed entities");

    let mut seen = HashSet::with_capacity(names.len());
    let mut entities = Vec::with_capacity(names.len());
    let mut degraded = Vec::new();

    for name in names {
        if !seen.insert(name.clone()) {
            warn!(version, entity = %name, "duplicate entity name in source, keeping first");
            continue;
        }

        match source.resolve(version, &name) {
            Ok(declaration) => {
                let (record, partial) = extract_entity(version, &name, declaration.as_ref());
                if partial {
                    degraded.push(name);
                }
                entities.push(record);
            }
            Err(e) => {
                warn!(version, entity = %name, error = %e, "falling back to minimal record");
                entities.push(EntityRecord::minimal(version, &name));
                degraded.push(name);
            }
        }
    }

    entities.sort_by(EntityRecord::sort_cmp);
    degraded.sort();

    Ok(Extraction {
        version: version.to_string(),
        entities,
        degraded,
    })
}

/// Builds the record for one resolved declaration; the flag is set when any
/// piece fell back to its default.
fn extract_entity(version: &str, name: &str, declaration: &dyn Declaration) -> (EntityRecord, bool) {
    let mut partial = false;

    let predefined_types = or_default(
        name,
        "enumeration items",
        declaration.enumeration_items(),
        &mut partial,
    );

    let attributes = or_default(name, "attributes", declaration.attributes(), &mut partial)
        .into_iter()
        .map(|raw| Attribute {
            name: raw.name,
            optional: raw.optional,
            type_name: raw
                .declared_type
                .unwrap_or_else(|| UNKNOWN_TYPE.to_string()),
        })
        .collect();

    let supertype = or_default(name, "supertype", declaration.supertype(), &mut partial);
    let subtypes = or_default(name, "subtypes", declaration.subtypes(), &mut partial);

    let record = EntityRecord {
        name: name.to_string(),
        category: Category::classify(name),
        predefined_types,
        attributes,
        supertype,
        subtypes,
        description: describe(version, name),
        ifc_version: vec![version.to_string()],
    };

    (record, partial)
}

/// Unsupported capabilities are silently empty; failed ones are logged and
/// flag the entity as degraded.
fn or_default<T: Default>(
    name: &str,
    capability: &str,
    value: Option<Result<T, SourceError>>,
    partial: &mut bool,
) -> T {
    match value {
        None => T::default(),
        Some(Ok(v)) => v,
        Some(Err(e)) => {
            warn!(entity = name, capability, error = %e, "using empty default");
            *partial = true;
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::declaration::RawAttribute;
    use crate::schema::dump::{DumpAttribute, DumpSource, RawEntity};
    use pretty_assertions::assert_eq;

    fn wall() -> RawEntity {
        RawEntity {
            name: "IFCWALL".to_string(),
            enumeration_items: Some(vec!["STANDARD".to_string(), "SHEAR".to_string()]),
            attributes: Some(vec![
                DumpAttribute {
                    name: "GlobalId".to_string(),
                    optional: false,
                    type_name: Some("IFCGLOBALLYUNIQUEID".to_string()),
                },
                DumpAttribute {
                    name: "PredefinedType".to_string(),
                    optional: true,
                    type_name: None,
                },
            ]),
            supertype: Some(Some("IFCBUILDINGELEMENT".to_string())),
            subtypes: Some(vec!["IFCWALLSTANDARDCASE".to_string()]),
        }
    }

    #[test]
    fn extracts_full_record() {
        let source = DumpSource::new().with_version("IFC4", vec![wall()]);
        let extraction = extract_entities(&source, "IFC4").unwrap();

        assert!(extraction.degraded.is_empty());
        assert_eq!(
            extraction.entities,
            vec![EntityRecord {
                name: "IFCWALL".to_string(),
                category: Category::BuildingElement,
                predefined_types: vec!["STANDARD".to_string(), "SHEAR".to_string()],
                attributes: vec![
                    Attribute {
                        name: "GlobalId".to_string(),
                        optional: false,
                        type_name: "IFCGLOBALLYUNIQUEID".to_string(),
                    },
                    Attribute {
                        name: "PredefinedType".to_string(),
                        optional: true,
                        type_name: "UNKNOWN".to_string(),
                    },
                ],
                supertype: Some("IFCBUILDINGELEMENT".to_string()),
                subtypes: vec!["IFCWALLSTANDARDCASE".to_string()],
                description: "IFC IFC4 entity: IFCWALL".to_string(),
                ifc_version: vec!["IFC4".to_string()],
            }]
        );
    }

    #[test]
    fn sorts_by_category_then_name() {
        let names = ["IFCPERSON", "IFCSITE", "IFCSLAB", "IFCACTOR", "IFCBEAM", "IFCPIPESEGMENT"];
        let source = DumpSource::new().with_version(
            "IFC2X3",
            names.iter().map(|n| RawEntity::named(n)).collect(),
        );

        let extraction = extract_entities(&source, "IFC2X3").unwrap();
        let order: Vec<&str> = extraction.entities.iter().map(|e| e.name.as_str()).collect();

        assert_eq!(
            order,
            vec!["IFCBEAM", "IFCSLAB", "IFCPIPESEGMENT", "IFCACTOR", "IFCPERSON", "IFCSITE"]
        );
    }

    #[test]
    fn duplicate_names_are_emitted_once() {
        let source = DumpSource::new().with_version(
            "IFC4",
            vec![RawEntity::named("IFCDOOR"), RawEntity::named("IFCDOOR")],
        );
        let extraction = extract_entities(&source, "IFC4").unwrap();
        assert_eq!(extraction.entities.len(), 1);
    }

    #[test]
    fn unavailable_version_is_an_error() {
        let source = DumpSource::new();
        assert!(matches!(
            extract_entities(&source, "IFC4"),
            Err(SourceError::SourceUnavailable { .. })
        ));
    }

    struct Flaky;

    impl Declaration for Flaky {
        fn attributes(&self) -> Option<Result<Vec<RawAttribute>, SourceError>> {
            Some(Err(SourceError::Capability {
                name: "IFCFLAKY".to_string(),
                capability: "attributes",
                message: "type table corrupted".to_string(),
            }))
        }

        fn subtypes(&self) -> Option<Result<Vec<String>, SourceError>> {
            Some(Ok(vec!["IFCFLAKYCHILD".to_string()]))
        }
    }

    #[test]
    fn failed_capability_degrades_only_that_piece() {
        let (record, partial) = extract_entity("IFC4", "IFCFLAKY", &Flaky);
        assert!(partial);
        assert!(record.attributes.is_empty());
        assert_eq!(record.subtypes, vec!["IFCFLAKYCHILD".to_string()]);
        assert_eq!(record.supertype, None);
    }
}
