use super::baseline::baseline_catalog;
use super::source::{normalize, LocalCatalog, RemoteCatalog};
use crate::error::PropertySetError;
use crate::model::PropertySetRecord;
use std::fmt;
use std::path::PathBuf;
use tracing::{info, warn};

/// Where a version's property-set records came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Local(PathBuf),
    Remote(String),
    /// No authoritative catalog could be used; the reason is the last failure.
    Baseline(String),
}

impl CatalogSource {
    #[must_use]
    pub fn is_authoritative(&self) -> bool {
        !matches!(self, CatalogSource::Baseline(_))
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::Local(path) => write!(f, "local file {}", path.display()),
            CatalogSource::Remote(url) => write!(f, "remote catalog {url}"),
            CatalogSource::Baseline(reason) => write!(f, "baseline ({reason})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogOutcome {
    pub version: String,
    pub records: Vec<PropertySetRecord>,
    pub source: CatalogSource,
}

/// Chooses a supply mode per version: local file, then remote, then baseline.
#[derive(Debug, Default)]
pub struct PropertySetCatalog {
    local: Option<LocalCatalog>,
    remote: Option<RemoteCatalog>,
}

impl PropertySetCatalog {
    /// A catalog with no authoritative sources; every version gets the baseline.
    #[must_use]
    pub fn baseline_only() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_local(mut self, local: LocalCatalog) -> Self {
        self.local = Some(local);
        self
    }

    #[must_use]
    pub fn with_remote(mut self, remote: RemoteCatalog) -> Self {
        self.remote = Some(remote);
        self
    }

    /// Builds the records for `version`. Never fails: any problem with an
    /// authoritative source degrades to the next one and finally the baseline.
    pub fn build(&mut self, version: &str) -> CatalogOutcome {
        let mut last_failure = PropertySetError::SourceMissing {
            version: version.to_string(),
        };

        if let Some(local) = &self.local {
            match local.load(version) {
                Ok((definitions, path)) => {
                    info!(version, path = %path.display(), "using local property-set catalog");
                    return CatalogOutcome {
                        version: version.to_string(),
                        records: normalize(version, definitions),
                        source: CatalogSource::Local(path),
                    };
                }
                Err(e) => {
                    log_failure(version, &e);
                    last_failure = e;
                }
            }
        }

        if let Some(remote) = &mut self.remote {
            match remote.fetch(version) {
                Ok((definitions, url)) => {
                    info!(version, url = %url, "using remote property-set catalog");
                    return CatalogOutcome {
                        version: version.to_string(),
                        records: normalize(version, definitions),
                        source: CatalogSource::Remote(url),
                    };
                }
                Err(e) => {
                    log_failure(version, &e);
                    last_failure = e;
                }
            }
        }

        info!(version, reason = %last_failure, "falling back to baseline property sets");
        CatalogOutcome {
            version: version.to_string(),
            records: baseline_catalog(version),
            source: CatalogSource::Baseline(last_failure.to_string()),
        }
    }
}

fn log_failure(version: &str, error: &PropertySetError) {
    if matches!(error, PropertySetError::SourceMissing { .. }) {
        info!(version, "{error}");
    } else {
        warn!(version, error = %error, "authoritative property-set source failed");
    }
}
