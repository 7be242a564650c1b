//! Clap-free settings for the generate pipeline.

use buildergen_domain::DefaultValueStyle;
use buildergen_domain::naming::default_builder_name;
use camino::Utf8PathBuf;

/// Settings for the generate pipeline.
#[derive(Debug, Clone)]
pub struct GenerateSettings {
    /// Explicit builder class name; derived from the source name and suffix when unset.
    pub builder_name: Option<String>,
    pub builder_suffix: String,
    pub out_dir: Utf8PathBuf,

    /// Package of the generated class; defaults to the source class's package.
    pub package: Option<String>,

    /// Embed materialized copies (`true`) or the source declarations as-is (`false`).
    pub embed_fields: bool,
    pub default_style: DefaultValueStyle,

    /// Replace an existing `<Builder>.java` instead of treating it as a collision.
    pub overwrite: bool,
}

impl Default for GenerateSettings {
    fn default() -> Self {
        Self {
            builder_name: None,
            builder_suffix: "Builder".to_string(),
            out_dir: Utf8PathBuf::from("."),
            package: None,
            embed_fields: true,
            default_style: DefaultValueStyle::default(),
            overwrite: false,
        }
    }
}

impl GenerateSettings {
    pub fn builder_name_for(&self, source_class: &str) -> String {
        self.builder_name
            .clone()
            .unwrap_or_else(|| default_builder_name(source_class, &self.builder_suffix))
    }
}
