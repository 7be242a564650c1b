//! Configuration file loading for buildergen.
//!
//! Discovers and loads `buildergen.toml` from the working directory.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use buildergen_core::DefaultValueStyle;
use buildergen_core::settings::GenerateSettings;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "buildergen.toml";

/// Top-level configuration from buildergen.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BuildergenConfig {
    pub generate: GenerateConfig,
}

/// `[generate]` section. Unset keys fall back to the built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerateConfig {
    pub builder_suffix: Option<String>,
    pub embed_fields: Option<bool>,
    pub default_style: Option<DefaultValueStyle>,

    /// Relative paths are resolved against the directory holding the config file.
    pub out_dir: Option<Utf8PathBuf>,
    pub package: Option<String>,
    pub overwrite: Option<bool>,
}

pub fn discover_config(dir: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

pub fn load_config(path: &Utf8Path) -> anyhow::Result<BuildergenConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

pub fn parse_config(contents: &str) -> anyhow::Result<BuildergenConfig> {
    let config: BuildergenConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from `dir`, or return default if not found.
pub fn load_or_default(dir: &Utf8Path) -> anyhow::Result<BuildergenConfig> {
    match discover_config(dir) {
        Some(path) => load_config(&path),
        None => Ok(BuildergenConfig::default()),
    }
}

/// Generate options given on the command line; `None`/`false` means "not given".
#[derive(Debug, Clone, Default)]
pub struct GenerateOverrides {
    pub builder_name: Option<String>,
    pub builder_suffix: Option<String>,
    pub out_dir: Option<Utf8PathBuf>,
    pub package: Option<String>,
    pub raw_fields: bool,
    pub default_style: Option<DefaultValueStyle>,
    pub overwrite: bool,
}

/// Merges a loaded config with CLI overrides into pipeline settings.
pub struct ConfigMerger {
    config: BuildergenConfig,
    base_dir: Utf8PathBuf,
}

impl ConfigMerger {
    pub fn new(config: BuildergenConfig, base_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            config,
            base_dir: base_dir.into(),
        }
    }

    pub fn merge_generate_args(self, cli: GenerateOverrides) -> GenerateSettings {
        let file = self.config.generate;
        let defaults = GenerateSettings::default();

        let out_dir = match (cli.out_dir, file.out_dir) {
            (Some(dir), _) => dir,
            (None, Some(dir)) if dir.is_relative() => self.base_dir.join(dir),
            (None, Some(dir)) => dir,
            (None, None) => self.base_dir.clone(),
        };

        GenerateSettings {
            builder_name: cli.builder_name,
            builder_suffix: cli
                .builder_suffix
                .or(file.builder_suffix)
                .unwrap_or(defaults.builder_suffix),
            out_dir,
            package: cli.package.or(file.package),
            embed_fields: !cli.raw_fields && file.embed_fields.unwrap_or(defaults.embed_fields),
            default_style: cli
                .default_style
                .or(file.default_style)
                .unwrap_or(defaults.default_style),
            overwrite: cli.overwrite || file.overwrite.unwrap_or(defaults.overwrite),
        }
    }
}
