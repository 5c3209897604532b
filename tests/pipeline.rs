use chrono::{TimeZone, Utc};
use ifc_schema_export::error::SourceError;
use ifc_schema_export::export::{read_json, OutputDir};
use ifc_schema_export::model::{Category, EntityRecord, PropertySetRecord};
use ifc_schema_export::pipeline::{EntityStatus, Pipeline, PropertySetStatus, RunReport};
use ifc_schema_export::psets::{baseline_catalog, CatalogSource, LocalCatalog, PropertySetCatalog};
use ifc_schema_export::schema::dump::DumpAttribute;
use ifc_schema_export::schema::{Declaration, DeclarationSource, DumpSource, RawAttribute, RawEntity};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::path::Path;

fn versions(tags: &[&str]) -> Vec<String> {
    tags.iter().map(ToString::to_string).collect()
}

fn run<S: DeclarationSource + ?Sized>(
    source: &S,
    catalog: PropertySetCatalog,
    dir: &Path,
    tags: &[&str],
    hour: u32,
) -> RunReport {
    let output = OutputDir::create(dir).unwrap();
    let at = Utc.with_ymd_and_hms(2025, 1, 13, hour, 0, 0).unwrap();
    Pipeline::new(source, catalog, output, versions(tags)).run_at(at)
}

fn ifcwall() -> RawEntity {
    RawEntity {
        name: "IFCWALL".to_string(),
        enumeration_items: None,
        attributes: Some(vec![
            DumpAttribute {
                name: "Name".to_string(),
                optional: true,
                type_name: None,
            },
            DumpAttribute {
                name: "GlobalId".to_string(),
                optional: false,
                type_name: None,
            },
        ]),
        supertype: Some(None),
        subtypes: Some(Vec::new()),
    }
}

#[test]
fn single_wall_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let source = DumpSource::new().with_version("IFC4", vec![ifcwall()]);

    run(&source, PropertySetCatalog::baseline_only(), dir.path(), &["IFC4"], 0);

    let text = std::fs::read_to_string(dir.path().join("entities-ifc4.json")).unwrap();
    assert!(text.starts_with("[\n  {\n    \"name\": \"IFCWALL\","));

    let value: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        value,
        json!([{
            "name": "IFCWALL",
            "category": "Building Element",
            "predefinedTypes": [],
            "attributes": [
                { "name": "Name", "optional": true, "type": "UNKNOWN" },
                { "name": "GlobalId", "optional": false, "type": "UNKNOWN" }
            ],
            "supertype": null,
            "subtypes": [],
            "description": "IFC IFC4 entity: IFCWALL",
            "ifcVersion": ["IFC4"]
        }])
    );
}

#[test]
fn rerun_is_byte_identical_apart_from_timestamp() {
    let dir = tempfile::tempdir().unwrap();
    let source = DumpSource::new()
        .with_version("IFC2X3", vec![ifcwall(), RawEntity::named("IFCSITE")])
        .with_version("IFC4", vec![RawEntity::named("IFCPIPESEGMENT"), ifcwall()]);
    let tags = ["IFC2X3", "IFC4", "IFC4X3_ADD2"];

    run(&source, PropertySetCatalog::baseline_only(), dir.path(), &tags, 1);
    let read_all = || -> Vec<String> {
        let mut files: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect();
        files.sort();
        files
            .iter()
            .map(|p| std::fs::read_to_string(p).unwrap())
            .collect()
    };
    let first = read_all();

    run(&source, PropertySetCatalog::baseline_only(), dir.path(), &tags, 2);
    let second = read_all();

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        let a = a.replace("2025-01-13T01:00:00.000Z", "<ts>");
        let b = b.replace("2025-01-13T02:00:00.000Z", "<ts>");
        assert_eq!(a, b);
    }
}

#[test]
fn entity_artifact_is_sorted_by_category_then_name() {
    let dir = tempfile::tempdir().unwrap();
    let names = [
        "IFCWINDOW",
        "IFCZONE",
        "IFCVALVE",
        "IFCCURTAINWALL",
        "IFCSENSOR",
        "IFCPILE",
        "IFCPROPERTYSET",
        "IFCBSPLINECURVE",
        "IFCLIBRARYINFORMATION",
        "IFCACTOR",
        "IFCBUILDING",
        "IFCBEAM",
    ];
    let source = DumpSource::new().with_version(
        "IFC4X3_ADD2",
        names.iter().map(|n| RawEntity::named(n)).collect(),
    );

    run(&source, PropertySetCatalog::baseline_only(), dir.path(), &["IFC4X3_ADD2"], 0);

    let entities: Vec<EntityRecord> = read_json(dir.path().join("entities-ifc4x3_add2.json")).unwrap();
    assert_eq!(entities.len(), names.len());
    assert!(entities.windows(2).all(|w| {
        (w[0].category.as_str(), w[0].name.as_str()) <= (w[1].category.as_str(), w[1].name.as_str())
    }));
    for entity in &entities {
        assert_eq!(entity.category, Category::classify(&entity.name));
    }
}

/// Serves everything from a dump, except that `BAD_ENTITY` fails on attributes.
struct FlakySource {
    inner: DumpSource,
}

struct BadAttributes;

impl Declaration for BadAttributes {
    fn attributes(&self) -> Option<Result<Vec<RawAttribute>, SourceError>> {
        Some(Err(SourceError::Capability {
            name: "BAD_ENTITY".to_string(),
            capability: "attributes",
            message: "declared type lookup raised".to_string(),
        }))
    }

    fn supertype(&self) -> Option<Result<Option<String>, SourceError>> {
        Some(Ok(Some("IFCROOT".to_string())))
    }
}

impl DeclarationSource for FlakySource {
    fn list_entities(&self, version: &str) -> Result<Vec<String>, SourceError> {
        let mut names = self.inner.list_entities(version)?;
        names.push("BAD_ENTITY".to_string());
        names.push("GHOST_ENTITY".to_string());
        Ok(names)
    }

    fn resolve(
        &self,
        version: &str,
        name: &str,
    ) -> Result<Box<dyn Declaration + '_>, SourceError> {
        if name == "BAD_ENTITY" {
            return Ok(Box::new(BadAttributes));
        }
        // GHOST_ENTITY is listed but never resolvable
        self.inner.resolve(version, name)
    }
}

#[test]
fn failing_entity_is_degraded_not_dropped() {
    let dir = tempfile::tempdir().unwrap();
    let source = FlakySource {
        inner: DumpSource::new().with_version("IFC4", vec![ifcwall()]),
    };

    let report = run(&source, PropertySetCatalog::baseline_only(), dir.path(), &["IFC4"], 0);
    assert_eq!(
        report.versions[0].entities,
        EntityStatus::Written {
            count: 3,
            degraded: 2
        }
    );

    let entities: Vec<EntityRecord> = read_json(dir.path().join("entities-ifc4.json")).unwrap();
    let bad = entities.iter().find(|e| e.name == "BAD_ENTITY").unwrap();
    assert!(bad.attributes.is_empty());
    assert_eq!(bad.category, Category::Other);
    assert_eq!(bad.supertype.as_deref(), Some("IFCROOT"));

    let ghost = entities.iter().find(|e| e.name == "GHOST_ENTITY").unwrap();
    assert_eq!(ghost, &EntityRecord::minimal("IFC4", "GHOST_ENTITY"));

    let wall = entities.iter().find(|e| e.name == "IFCWALL").unwrap();
    assert_eq!(wall.attributes.len(), 2);
}

#[test]
fn missing_catalog_yields_baseline_for_version() {
    let dir = tempfile::tempdir().unwrap();
    let source = DumpSource::new();

    let report = run(&source, PropertySetCatalog::baseline_only(), dir.path(), &["IFC4"], 0);
    assert!(matches!(
        &report.versions[0].property_sets,
        PropertySetStatus::Written { count: 10, source: CatalogSource::Baseline(_) }
    ));

    let psets: Vec<PropertySetRecord> = read_json(dir.path().join("property-sets-ifc4.json")).unwrap();
    assert_eq!(psets, baseline_catalog("IFC4"));
    assert!(psets.iter().all(|p| p.ifc_version == vec!["IFC4".to_string()]));
}

#[test]
fn authoritative_catalog_is_used_where_present() {
    let dir = tempfile::tempdir().unwrap();
    let catalogs = tempfile::tempdir().unwrap();
    std::fs::write(
        catalogs.path().join("property-sets-ifc2x3.json"),
        r#"[{ "name": "Pset_ZoneCommon", "applicableEntities": ["IFCZONE"], "properties": [] }]"#,
    )
    .unwrap();
    let catalog = PropertySetCatalog::baseline_only().with_local(LocalCatalog::new(catalogs.path()));

    let report = run(&DumpSource::new(), catalog, dir.path(), &["IFC2X3", "IFC4"], 0);

    assert!(matches!(
        &report.versions[0].property_sets,
        PropertySetStatus::Written { count: 1, source: CatalogSource::Local(_) }
    ));
    assert!(matches!(
        &report.versions[1].property_sets,
        PropertySetStatus::Written { count: 10, source: CatalogSource::Baseline(_) }
    ));
}

#[test]
fn index_reflects_artifacts_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let source = DumpSource::new()
        .with_version("IFC4", vec![ifcwall(), RawEntity::named("IFCSLAB")])
        .with_version("IFC4X3_ADD2", Vec::new());

    run(
        &source,
        PropertySetCatalog::baseline_only(),
        dir.path(),
        &["IFC2X3", "IFC4", "IFC4X3_ADD2"],
        0,
    );

    let index: Value = read_json(dir.path().join("schema-index.json")).unwrap();
    assert_eq!(index["entityCounts"], json!({ "IFC4": 2, "IFC4X3_ADD2": 0 }));
    assert_eq!(
        index["propertySetCounts"],
        json!({ "IFC2X3": 10, "IFC4": 10, "IFC4X3_ADD2": 10 })
    );
    assert_eq!(index["lastGenerated"], json!("2025-01-13T00:00:00.000Z"));
    assert_eq!(index["categories"].as_object().unwrap().len(), 9);

    for (version, count) in index["entityCounts"].as_object().unwrap() {
        let path = dir
            .path()
            .join(format!("entities-{}.json", version.to_lowercase()));
        let entities: Vec<Value> = read_json(path).unwrap();
        assert_eq!(Some(entities.len() as u64), count.as_u64());
    }
}

#[test]
fn skipped_version_keeps_previous_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let full = DumpSource::new().with_version("IFC2X3", vec![ifcwall()]);
    run(&full, PropertySetCatalog::baseline_only(), dir.path(), &["IFC2X3"], 0);

    let empty = DumpSource::new();
    let report = run(&empty, PropertySetCatalog::baseline_only(), dir.path(), &["IFC2X3"], 1);

    assert!(matches!(
        report.versions[0].entities,
        EntityStatus::Skipped { .. }
    ));
    assert_eq!(report.index.entity_counts.get("IFC2X3"), Some(&1));
}

#[test]
fn write_failure_is_isolated_to_its_artifact() {
    let dir = tempfile::tempdir().unwrap();
    // a directory where the IFC4 entity artifact should go blocks the replace
    std::fs::create_dir(dir.path().join("entities-ifc4.json")).unwrap();
    let source = DumpSource::new()
        .with_version("IFC2X3", vec![ifcwall()])
        .with_version("IFC4", vec![ifcwall()]);

    let report = run(
        &source,
        PropertySetCatalog::baseline_only(),
        dir.path(),
        &["IFC2X3", "IFC4"],
        0,
    );

    assert!(matches!(
        report.versions[1].entities,
        EntityStatus::WriteFailed { .. }
    ));
    assert!(matches!(
        report.versions[1].property_sets,
        PropertySetStatus::Written { .. }
    ));
    assert_eq!(
        report.versions[0].entities,
        EntityStatus::Written {
            count: 1,
            degraded: 0
        }
    );
    assert!(report.index_written.is_ok());
    assert!(!report.index.entity_counts.contains_key("IFC4"));
    assert_eq!(report.index.entity_counts.get("IFC2X3"), Some(&1));
}
