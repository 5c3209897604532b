//! Error types for the IFC schema exporter.

use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised by a declaration source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source cannot serve the requested schema version at all.
    #[error("schema version '{version}' is not available: {reason}")]
    SourceUnavailable { version: String, reason: String },

    /// The declaration dump for the version could not be loaded.
    #[error("schema version '{version}' is not available: {source}")]
    DumpLoad {
        version: String,
        source: Arc<DumpError>,
    },

    /// A single entity name could not be resolved to a declaration.
    #[error("entity '{name}' could not be resolved in {version}")]
    UnresolvedEntity { version: String, name: String },

    /// A declaration capability exists but failed while being read.
    #[error("entity '{name}': {capability} failed: {message}")]
    Capability {
        name: String,
        capability: &'static str,
        message: String,
    },
}

/// Errors raised while loading a declaration dump file.
#[derive(Debug, Error)]
pub enum DumpError {
    /// Failed to read the dump file.
    #[error("failed to read '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The dump is not valid declaration JSON.
    #[error("malformed dump '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Errors raised while acquiring an authoritative property-set catalog.
///
/// None of these are fatal: the catalog builder degrades to the next supply
/// mode and finally to the baseline.
#[derive(Debug, Error)]
pub enum PropertySetError {
    /// No authoritative catalog is configured or present for the version.
    #[error("no authoritative property-set source for {version}")]
    SourceMissing { version: String },

    /// Failed to read a local catalog file.
    #[error("failed to read '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Catalog content is not valid property-set JSON.
    #[error("invalid property-set catalog '{origin}': {source}")]
    InvalidCatalog {
        origin: String,
        source: serde_json::Error,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {source}")]
    ClientBuild { source: reqwest::Error },

    /// Network retrieval failed.
    #[error("retrieval of '{url}' failed: {source}")]
    Retrieval { url: String, source: reqwest::Error },
}

/// Errors that can occur when persisting or reading artifacts.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Failed to create the output directory.
    #[error("failed to create directory '{path}': {source}")]
    DirCreate {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to create the output file.
    #[error("failed to create file '{path}': {source}")]
    FileCreate {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write data to the file.
    #[error("failed to write '{path}': {message}")]
    WriteError { path: PathBuf, message: String },

    /// Failed to read a previously written artifact.
    #[error("failed to read artifact '{path}': {source}")]
    ArtifactRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// An artifact on disk is not valid JSON of the expected shape.
    #[error("malformed artifact '{path}': {source}")]
    ArtifactParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Failed to serialize data to JSON.
    #[error("JSON serialization failed: {source}")]
    JsonSerialize {
        #[from]
        source: serde_json::Error,
    },

    /// Failed to write CSV data.
    #[error("CSV write failed: {source}")]
    CsvWrite {
        #[from]
        source: csv::Error,
    },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The configuration is not valid TOML for this tool.
    #[error("invalid config: {source}")]
    Parse {
        #[from]
        source: toml::de::Error,
    },

    /// The configuration names no schema versions.
    #[error("config lists no schema versions")]
    NoVersions,
}
