mod config;
mod explain;

use anyhow::Context;
use buildergen_core::adapters::{
    AllFieldsSelector, FsWritePort, InMemoryClassSource, JsonClassSource, NamedFieldSelector,
};
use buildergen_core::pipeline::{ToolError, class_json, run_generate, write_generated};
use buildergen_core::ports::{ClassSource, FieldSelector};
use buildergen_core::settings::GenerateSettings;
use buildergen_core::{DefaultValueStyle, InMemoryLocation, ProgramModel};
use buildergen_domain::TypeCategory;
use buildergen_render::render_summary_md;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use config::{ConfigMerger, GenerateOverrides};
use fs_err as fs;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "buildergen",
    version,
    about = "Generate fluent Java builder classes from class descriptions."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a builder class for a source class description.
    Generate(GenerateArgs),
    /// Show the category and default initializer chosen for a Java type.
    Classify(ClassifyArgs),
    /// List type categories in match order.
    ListCategories(ListCategoriesArgs),
}

#[derive(Debug, Parser)]
struct GenerateArgs {
    /// Source class description (buildergen.source.v1 JSON).
    #[arg(long)]
    source: Utf8PathBuf,

    /// Directory searched for buildergen.toml (default: current directory).
    #[arg(long, default_value = ".")]
    config_dir: Utf8PathBuf,

    /// Builder class name (default: <Source><suffix>).
    #[arg(long)]
    builder_name: Option<String>,

    /// Suffix for derived builder names (default: Builder).
    #[arg(long)]
    builder_suffix: Option<String>,

    /// Fields to include, in setter order (default: all fields).
    #[arg(long, value_delimiter = ',')]
    fields: Vec<String>,

    /// Directory the builder is written to; existing `*.java` files count as taken names.
    #[arg(long)]
    out_dir: Option<Utf8PathBuf>,

    /// Package of the generated builder (default: the source class's package).
    #[arg(long)]
    package: Option<String>,

    /// Embed the source field declarations unchanged instead of sanitized copies.
    #[arg(long, default_value_t = false)]
    raw_fields: bool,

    /// How random defaults are written.
    #[arg(long, value_enum)]
    default_style: Option<StyleArg>,

    /// Replace an existing builder file of the same name.
    #[arg(long, default_value_t = false)]
    overwrite: bool,

    /// Print the result instead of writing a file.
    #[arg(long, default_value_t = false)]
    stdout: bool,

    /// Output format for --stdout.
    #[arg(long, value_enum, default_value = "java")]
    format: GenerateFormat,
}

#[derive(Debug, Parser)]
struct ClassifyArgs {
    /// Java type text, e.g. "java.util.Map<String, Integer>".
    #[arg(long = "type")]
    type_text: String,

    #[arg(long, value_enum, default_value = "expression")]
    default_style: StyleArg,

    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Parser)]
struct ListCategoriesArgs {
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum StyleArg {
    Expression,
    Literal,
}

impl From<StyleArg> for DefaultValueStyle {
    fn from(s: StyleArg) -> Self {
        match s {
            StyleArg::Expression => DefaultValueStyle::Expression,
            StyleArg::Literal => DefaultValueStyle::Literal,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum GenerateFormat {
    Java,
    Json,
    Md,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        error!("{:#}", e);
        let code = e.downcast_ref::<ToolError>().map_or(1, ToolError::exit_code);
        return ExitCode::from(code);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Classify(args) => cmd_classify(args),
        Command::ListCategories(args) => cmd_list_categories(args),
    }
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let file_config =
        config::load_or_default(&args.config_dir).context("load buildergen.toml config")?;
    let settings = ConfigMerger::new(file_config, args.config_dir.clone()).merge_generate_args(
        GenerateOverrides {
            builder_name: args.builder_name,
            builder_suffix: args.builder_suffix,
            out_dir: args.out_dir,
            package: args.package,
            raw_fields: args.raw_fields,
            default_style: args.default_style.map(Into::into),
            overwrite: args.overwrite,
        },
    );
    debug!("merged settings: {:?}", settings);

    let source_class = JsonClassSource::new(args.source).load_class()?;
    let builder_name = settings.builder_name_for(&source_class.name);

    // Printing never touches the output directory, so nothing there can collide.
    let location = if args.stdout {
        InMemoryLocation::new("stdout")
    } else {
        target_location(&settings, &builder_name)?
    };
    let location = match &settings.package {
        Some(package) => location.with_package(package.clone()),
        None => location,
    };
    let model = ProgramModel::new(location);

    let selector: Box<dyn FieldSelector> = if args.fields.is_empty() {
        Box::new(AllFieldsSelector)
    } else {
        Box::new(NamedFieldSelector::new(args.fields))
    };
    let outcome = run_generate(
        &settings,
        &InMemoryClassSource::new(source_class),
        selector.as_ref(),
        &model,
    )?;

    if args.stdout {
        match args.format {
            GenerateFormat::Java => print!("{}", outcome.java),
            GenerateFormat::Json => println!("{}", class_json(&outcome)?),
            GenerateFormat::Md => print!("{}", render_summary_md(&outcome.class)),
        }
        return Ok(());
    }

    let path = write_generated(&outcome, &settings.out_dir, &FsWritePort)?;
    println!("wrote {}", path);
    Ok(())
}

/// The output directory as a target location: existing `*.java` stems are taken names and a
/// read-only directory refuses new classes.
fn target_location(
    settings: &GenerateSettings,
    builder_name: &str,
) -> anyhow::Result<InMemoryLocation> {
    let out_dir = &settings.out_dir;
    let mut location = InMemoryLocation::new(out_dir.as_str());
    if !out_dir.exists() {
        return Ok(location);
    }

    let existing = existing_class_names(out_dir)?
        .into_iter()
        .filter(|name| !(settings.overwrite && name == builder_name));
    location = location.with_existing(existing);

    let read_only = fs::metadata(out_dir)
        .with_context(|| format!("stat {}", out_dir))?
        .permissions()
        .readonly();
    if read_only {
        location = location.read_only();
    }
    Ok(location)
}

fn existing_class_names(dir: &Utf8Path) -> anyhow::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read {}", dir))? {
        let path = entry.with_context(|| format!("read entry in {}", dir))?.path();
        if path.extension().is_some_and(|ext| ext == "java")
            && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
        {
            names.push(stem.to_string());
        }
    }
    names.sort();
    debug!(dir = dir.as_str(), count = names.len(), "existing classes");
    Ok(names)
}

fn cmd_classify(args: ClassifyArgs) -> anyhow::Result<()> {
    let e = explain::explain_type(&args.type_text, args.default_style.into())?;
    match args.format {
        OutputFormat::Text => {
            println!("Type:        {}", e.type_text);
            println!("Category:    {}", e.category);
            println!("Rule:        {}", e.rule);
            println!(
                "Initializer: {}",
                e.initializer.as_deref().unwrap_or("(none)")
            );
            if !e.imports.is_empty() {
                println!("Imports:     {}", e.imports.join(", "));
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&e)?),
    }
    Ok(())
}

fn cmd_list_categories(args: ListCategoriesArgs) -> anyhow::Result<()> {
    let table = explain::category_table(DefaultValueStyle::Expression);
    match args.format {
        OutputFormat::Text => {
            println!("Type categories (first match wins):\n");
            println!("  {:<14} {:<38} INITIALIZER", "CATEGORY", "MATCHES");
            println!("  {:<14} {:<38} -----------", "--------", "-------");
            for row in &table {
                println!(
                    "  {:<14} {:<38} {}",
                    row.category,
                    row.rule,
                    row.initializer.as_deref().unwrap_or("-")
                );
            }
            println!();
            println!("Use 'buildergen classify --type <T>' for a specific type.");
        }
        OutputFormat::Json => {
            let categories: Vec<_> = TypeCategory::ALL
                .iter()
                .zip(&table)
                .map(|(category, row)| {
                    serde_json::json!({
                        "category": category.label(),
                        "rule": category.rule(),
                        "example": row.type_text,
                        "initializer": row.initializer,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&categories)?);
        }
    }
    Ok(())
}
