pub mod declaration;
pub mod dump;
pub mod extract;

pub use crate::error::{DumpError, SourceError};
pub use declaration::{Declaration, DeclarationSource, RawAttribute};
pub use dump::{DumpSource, RawEntity};
pub use extract::{extract_entities, Extraction};
