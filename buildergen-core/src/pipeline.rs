//! Core generate pipeline, extracted from the CLI.
//!
//! The entry points are I/O-agnostic: the source class, the field selection and all
//! file writes go through the port traits, and the program model is supplied by the caller.

use crate::ports::{ClassSource, FieldSelector, WritePort};
use crate::settings::GenerateSettings;
use anyhow::Context;
use buildergen_domain::{
    BuilderClassSynthesizer, FieldMaterializer, SynthesisError, TargetLocation,
};
use buildergen_edit::{EditError, ProgramModel};
use buildergen_render::render_class_with_imports;
use buildergen_types::GeneratedClass;
use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, info};

/// Error type for pipeline results. Exit code 2 = class could not be created, 1 = tool error.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error(transparent)]
    Creation(#[from] SynthesisError),
    #[error(transparent)]
    Edit(#[from] EditError),
    #[error("{0:#}")]
    Internal(#[from] anyhow::Error),
}

impl ToolError {
    pub fn exit_code(&self) -> u8 {
        match self {
            ToolError::Creation(_) => 2,
            ToolError::Edit(_) | ToolError::Internal(_) => 1,
        }
    }
}

/// Outcome of `run_generate`.
#[derive(Debug, Clone)]
pub struct GenerateOutcome {
    pub source_class: String,
    pub class: GeneratedClass,
    pub java: String,
}

impl GenerateOutcome {
    pub fn file_name(&self) -> String {
        format!("{}.java", self.class.name)
    }
}

/// Run the generate pipeline: load, select, synthesize under a write session, render.
///
/// On a creation failure the model may hold a partially filled class; nothing is rolled back.
pub fn run_generate<L: TargetLocation>(
    settings: &GenerateSettings,
    source: &dyn ClassSource,
    selector: &dyn FieldSelector,
    model: &ProgramModel<L>,
) -> Result<GenerateOutcome, ToolError> {
    let source_class = source.load_class().context("load source class")?;
    let fields = selector
        .select(&source_class)
        .with_context(|| format!("select fields of {}", source_class.name))?;
    let builder_name = settings.builder_name_for(&source_class.name);

    let synthesizer = if settings.embed_fields {
        BuilderClassSynthesizer::with_materializer(FieldMaterializer::new(settings.default_style))
    } else {
        BuilderClassSynthesizer::new()
    };
    info!(
        source = source_class.name.as_str(),
        builder = builder_name.as_str(),
        fields = fields.len(),
        model = model.name(),
        "generating builder"
    );

    let mut class = model.write(&format!("generate {builder_name}"), |location| {
        synthesizer
            .synthesize(&source_class.name, &builder_name, &fields, location)
            .map_err(ToolError::from)
    })?;

    if class.package.is_none() {
        class.package = settings
            .package
            .clone()
            .or_else(|| source_class.package.clone());
    }
    let source_import = source_class
        .package
        .as_deref()
        .filter(|pkg| class.package.as_deref() != Some(*pkg))
        .map(|pkg| format!("{pkg}.{}", source_class.name));
    let java = render_class_with_imports(&class, source_import);
    debug!(
        builder = class.name.as_str(),
        bytes = java.len(),
        "rendered builder"
    );

    Ok(GenerateOutcome {
        source_class: source_class.name,
        class,
        java,
    })
}

/// Write `<Builder>.java` into `out_dir`. Returns the written path.
pub fn write_generated(
    outcome: &GenerateOutcome,
    out_dir: &Utf8Path,
    writer: &dyn WritePort,
) -> anyhow::Result<Utf8PathBuf> {
    writer.create_dir_all(out_dir)?;
    let path = out_dir.join(outcome.file_name());
    writer.write_file(&path, outcome.java.as_bytes())?;
    info!(path = path.as_str(), "wrote builder");
    Ok(path)
}

/// Serialize the generated class as pretty JSON (`buildergen.class.v1`).
pub fn class_json(outcome: &GenerateOutcome) -> anyhow::Result<String> {
    serde_json::to_string_pretty(&outcome.class).context("serialize generated class")
}
