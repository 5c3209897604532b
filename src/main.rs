use clap::{Parser, Subcommand};
use color_eyre::eyre::{bail, WrapErr};
use color_eyre::Result;
use std::path::PathBuf;
use std::path::Path;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use ifc_schema_export::check::{check_output, schema_availability};
use ifc_schema_export::config::{load_config, Config};
use ifc_schema_export::export::{export_entity_csv, read_json, OutputDir};
use ifc_schema_export::model::EntityRecord;
use ifc_schema_export::pipeline::{EntityStatus, Pipeline, PropertySetStatus, RunReport};
use ifc_schema_export::psets::{LocalCatalog, PropertySetCatalog, RemoteCatalog};
use ifc_schema_export::schema::DumpSource;

#[derive(Parser, Debug)]
#[command(name = "ifc-schema-export")]
#[command(about = "IFC Schema Export - normalized entity and property-set artifacts per IFC version")]
#[command(version)]
struct Args {
    /// Configuration file (TOML); the embedded default is used when omitted
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Regenerate entity, property-set and index artifacts (default)
    Run(RunArgs),

    /// List available schema versions and report property sets that
    /// reference entities missing from their version
    Check {
        /// Directory with generated artifacts
        #[arg(long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Directory with declarations-<version>.json dumps
        #[arg(long, value_name = "DIR")]
        declarations: Option<PathBuf>,

        /// Exit with an error when any dangling reference is found
        #[arg(long)]
        strict: bool,
    },
}

#[derive(clap::Args, Debug, Default)]
struct RunArgs {
    /// Output directory for generated artifacts
    #[arg(long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Directory with declarations-<version>.json dumps
    #[arg(long, value_name = "DIR")]
    declarations: Option<PathBuf>,

    /// Directory with authoritative property-sets-<version>.json catalogs
    #[arg(long, value_name = "DIR")]
    property_sets: Option<PathBuf>,

    /// Never contact remote property-set catalogs
    #[arg(long)]
    offline: bool,

    /// Also export an entity summary to CSV
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut config = load_config(args.config.as_deref())?;

    match args.command.unwrap_or_else(|| Command::Run(RunArgs::default())) {
        Command::Run(run_args) => run(&mut config, run_args),
        Command::Check {
            output,
            declarations,
            strict,
        } => {
            if let Some(dir) = output {
                config.output.dir = dir;
            }
            if let Some(dir) = declarations {
                config.declarations.dir = dir;
            }
            check(&config, strict)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn run(config: &mut Config, args: RunArgs) -> Result<()> {
    if let Some(dir) = args.output {
        config.output.dir = dir;
    }
    if let Some(dir) = args.declarations {
        config.declarations.dir = dir;
    }
    if let Some(dir) = args.property_sets {
        config.property_sets.local_dir = Some(dir);
    }

    // The only fatal failure: nowhere to write.
    let output = OutputDir::create(&config.output.dir)
        .wrap_err("cannot prepare output directory")?;

    let source = DumpSource::from_dir(&config.declarations.dir, &config.versions);
    let catalog = build_catalog(config, args.offline);

    let mut pipeline = Pipeline::new(&source, catalog, output.clone(), config.versions.clone());
    let report = pipeline.run();
    print_summary(&report);

    if let Some(csv_path) = &args.csv {
        export_csv(&output, &config.versions, csv_path);
    }

    Ok(())
}

/// Writes the CSV summary from the entity artifacts on disk. A failure is
/// logged and does not affect the exit status.
fn export_csv(output: &OutputDir, versions: &[String], csv_path: &Path) {
    let versions: Vec<(String, Vec<EntityRecord>)> = versions
        .iter()
        .filter_map(|version| {
            let path = output.entities_path(version);
            if !path.is_file() {
                return None;
            }
            match read_json::<Vec<EntityRecord>, _>(&path) {
                Ok(entities) => Some((version.clone(), entities)),
                Err(e) => {
                    warn!(version = %version, error = %e, "leaving version out of CSV");
                    None
                }
            }
        })
        .collect();

    match export_entity_csv(&versions, csv_path) {
        Ok(()) => println!("Exported to CSV: {}", csv_path.display()),
        Err(e) => error!(path = %csv_path.display(), error = %e, "failed to export CSV"),
    }
}

fn build_catalog(config: &Config, offline: bool) -> PropertySetCatalog {
    let settings = &config.property_sets;
    let mut catalog = PropertySetCatalog::baseline_only();

    if let Some(dir) = &settings.local_dir {
        catalog = catalog.with_local(LocalCatalog::new(dir));
    }

    if !offline && !settings.remote.is_empty() {
        match RemoteCatalog::new(
            settings.remote.clone(),
            settings.timeout(),
            settings.request_delay(),
        ) {
            Ok(remote) => catalog = catalog.with_remote(remote),
            Err(e) => warn!(error = %e, "remote property-set catalogs disabled"),
        }
    }

    catalog
}

fn print_summary(report: &RunReport) {
    println!();
    println!("{:<14} {:<9} {:<34} Property sets", "Version", "Status", "Entities");
    for version in &report.versions {
        let entities = match &version.entities {
            EntityStatus::Written { count, degraded: 0 } => format!("{count}"),
            EntityStatus::Written { count, degraded } => format!("{count} ({degraded} degraded)"),
            EntityStatus::Skipped { .. } => "skipped".to_string(),
            EntityStatus::WriteFailed { .. } => "write failed".to_string(),
        };
        let property_sets = match &version.property_sets {
            PropertySetStatus::Written { count, source } => format!("{count} from {source}"),
            PropertySetStatus::WriteFailed { .. } => "write failed".to_string(),
        };
        let status = if version.is_complete() { "complete" } else { "partial" };
        println!("{:<14} {status:<9} {entities:<34} {property_sets}", version.version);
    }

    match &report.index_written {
        Ok(path) => println!("Index: {}", path.display()),
        Err(reason) => println!("Index not written: {reason}"),
    }
}

fn check(config: &Config, strict: bool) -> Result<()> {
    let source = DumpSource::from_dir(&config.declarations.dir, &config.versions);
    for availability in schema_availability(&source, &config.versions) {
        println!("{availability}");
    }
    println!();

    let output = OutputDir::existing(&config.output.dir);
    let issues = check_output(&output, &config.versions)?;

    for issue in &issues {
        println!("{issue}");
    }
    info!(count = issues.len(), "consistency check finished");

    if strict && !issues.is_empty() {
        bail!("{} dangling property-set reference(s)", issues.len());
    }
    Ok(())
}
