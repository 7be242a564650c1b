//! Port traits abstracting all I/O away from the pipeline.

use buildergen_types::{FieldDeclaration, SourceClass};
use camino::Utf8Path;

/// Source of the class a builder is generated for.
pub trait ClassSource {
    fn load_class(&self) -> anyhow::Result<SourceClass>;
}

/// Chooses, and orders, the fields a builder covers.
pub trait FieldSelector {
    fn select(&self, class: &SourceClass) -> anyhow::Result<Vec<FieldDeclaration>>;
}

/// File-system write operations.
pub trait WritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()>;
    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()>;
}
