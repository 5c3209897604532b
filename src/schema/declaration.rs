use crate::error::SourceError;

/// An attribute as exposed by a declaration.
///
/// `declared_type` is `None` when the type reference cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAttribute {
    pub name: String,
    pub optional: bool,
    pub declared_type: Option<String>,
}

/// A resolved entity declaration with optional capabilities.
///
/// Each accessor returns `None` when the declaration does not support the
/// capability and `Some(Err(_))` when it does but reading it failed.
pub trait Declaration {
    fn enumeration_items(&self) -> Option<Result<Vec<String>, SourceError>> {
        None
    }

    fn attributes(&self) -> Option<Result<Vec<RawAttribute>, SourceError>> {
        None
    }

    fn supertype(&self) -> Option<Result<Option<String>, SourceError>> {
        None
    }

    fn subtypes(&self) -> Option<Result<Vec<String>, SourceError>> {
        None
    }
}

/// Schema introspection service for a set of named versions.
pub trait DeclarationSource {
    /// Lists every entity name defined in `version`.
    ///
    /// Fails with [`SourceError::SourceUnavailable`] when the version is unknown.
    fn list_entities(&self, version: &str) -> Result<Vec<String>, SourceError>;

    /// Resolves one entity name to its declaration.
    fn resolve(&self, version: &str, name: &str)
        -> Result<Box<dyn Declaration + '_>, SourceError>;
}
