//! Default filesystem-backed and in-memory port implementations.

use crate::ports::{ClassSource, FieldSelector, WritePort};
use anyhow::{Context, bail};
use buildergen_types::schema::BUILDERGEN_SOURCE_V1;
use buildergen_types::{FieldDeclaration, SourceClass};
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use std::cell::RefCell;
use std::collections::BTreeMap;
use tracing::debug;

/// Loads a `buildergen.source.v1` JSON description from disk.
#[derive(Debug, Clone)]
pub struct JsonClassSource {
    pub path: Utf8PathBuf,
}

impl JsonClassSource {
    pub fn new(path: Utf8PathBuf) -> Self {
        Self { path }
    }
}

impl ClassSource for JsonClassSource {
    fn load_class(&self) -> anyhow::Result<SourceClass> {
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("read source class {}", self.path))?;
        let class = parse_source_class(&text).with_context(|| format!("parse {}", self.path))?;
        debug!(
            path = self.path.as_str(),
            class = class.name.as_str(),
            fields = class.fields.len(),
            "loaded source class"
        );
        Ok(class)
    }
}

/// Parse and schema-check a source class description.
pub fn parse_source_class(text: &str) -> anyhow::Result<SourceClass> {
    let class: SourceClass = serde_json::from_str(text).context("deserialize source class")?;
    if class.schema != BUILDERGEN_SOURCE_V1 {
        bail!(
            "unsupported schema `{}` (expected `{}`)",
            class.schema,
            BUILDERGEN_SOURCE_V1
        );
    }
    Ok(class)
}

/// In-memory class source for embedding and testing.
#[derive(Debug, Clone)]
pub struct InMemoryClassSource {
    class: SourceClass,
}

impl InMemoryClassSource {
    pub fn new(class: SourceClass) -> Self {
        Self { class }
    }
}

impl ClassSource for InMemoryClassSource {
    fn load_class(&self) -> anyhow::Result<SourceClass> {
        Ok(self.class.clone())
    }
}

/// Selects every field, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct AllFieldsSelector;

impl FieldSelector for AllFieldsSelector {
    fn select(&self, class: &SourceClass) -> anyhow::Result<Vec<FieldDeclaration>> {
        Ok(class.fields.clone())
    }
}

/// Selects fields by name, in the order the names are given.
#[derive(Debug, Clone)]
pub struct NamedFieldSelector {
    names: Vec<String>,
}

impl NamedFieldSelector {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

impl FieldSelector for NamedFieldSelector {
    fn select(&self, class: &SourceClass) -> anyhow::Result<Vec<FieldDeclaration>> {
        self.names
            .iter()
            .map(|name| match class.field(name) {
                Some(field) => Ok(field.clone()),
                None => bail!("class `{}` has no field named `{}`", class.name, name),
            })
            .collect()
    }
}

/// Filesystem write operations.
#[derive(Debug, Clone, Default)]
pub struct FsWritePort;

impl WritePort for FsWritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create parent dir for {}", path))?;
        }
        fs::write(path, contents).with_context(|| format!("write {}", path))
    }

    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()> {
        fs::create_dir_all(path).with_context(|| format!("create_dir_all {}", path))
    }
}

/// Collects writes in memory; used by embedders that persist through their own model.
#[derive(Debug, Default)]
pub struct InMemoryWritePort {
    files: RefCell<BTreeMap<Utf8PathBuf, Vec<u8>>>,
}

impl InMemoryWritePort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(&self, path: &Utf8Path) -> Option<String> {
        self.files
            .borrow()
            .get(path)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    pub fn paths(&self) -> Vec<Utf8PathBuf> {
        self.files.borrow().keys().cloned().collect()
    }
}

impl WritePort for InMemoryWritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
        self.files
            .borrow_mut()
            .insert(path.to_owned(), contents.to_vec());
        Ok(())
    }

    fn create_dir_all(&self, _path: &Utf8Path) -> anyhow::Result<()> {
        Ok(())
    }
}
