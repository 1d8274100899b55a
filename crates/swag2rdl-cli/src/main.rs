use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use log::info;

use swag2rdl_core::config::{self, CONFIG_FILE_NAME, ImportConfig};
use swag2rdl_core::parse::{self, spec::SwaggerDoc};
use swag2rdl_core::schema::Schema;
use swag2rdl_core::transform::{self, Conversion};

#[derive(Parser)]
#[command(name = "swag2rdl", about = "Swagger 2.0 to RDL schema importer", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a Swagger document into an RDL schema (JSON)
    Convert {
        /// Path to the Swagger document (JSON or YAML)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Schema name, overriding the title or file name
        #[arg(long)]
        name: Option<String>,

        /// Spaces per indentation level
        #[arg(long)]
        indent: Option<usize>,
    },

    /// Check that a Swagger document converts cleanly
    Validate {
        /// Path to the Swagger document
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Summarize the types and resources a document converts to
    Inspect {
        /// Path to the Swagger document
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Initialize a new swag2rdl configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output,
            name,
            indent,
        } => cmd_convert(input, output, name, indent),

        Commands::Validate { input } => cmd_validate(input),

        Commands::Inspect { input, format } => cmd_inspect(input, format),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "swag2rdl", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<ImportConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))
}

/// Read and parse a document; `.yaml` and `.yml` files are YAML, anything
/// else JSON.
fn load_document(path: &Path) -> Result<SwaggerDoc> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    let parsed = match ext {
        "yaml" | "yml" => parse::from_yaml(&content)?,
        _ => parse::from_json(&content)?,
    };
    Ok(parsed)
}

fn convert_file(path: &Path, cfg: &ImportConfig) -> Result<Conversion> {
    let doc = load_document(path)?;
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("schema");
    let conversion = transform::convert_with_options(&doc, stem, &cfg.transform_options())
        .with_context(|| format!("failed to convert {}", path.display()))?;
    Ok(conversion)
}

fn cmd_convert(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    name: Option<String>,
    indent: Option<usize>,
) -> Result<()> {
    let mut cfg = try_load_config()?.unwrap_or_default();
    if name.is_some() {
        cfg.name = name;
    }
    if let Some(indent) = indent {
        cfg.indent = indent;
    }
    let input = input.unwrap_or_else(|| PathBuf::from(&cfg.input));
    let output = output.or_else(|| cfg.output.as_ref().map(PathBuf::from));

    let conversion = convert_file(&input, &cfg)?;
    let json = conversion.schema.to_json_pretty(cfg.indent)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create directory {}", parent.display()))?;
            }
            fs::write(&path, format!("{json}\n"))
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }

    if !conversion.diagnostics.is_empty() {
        eprintln!(
            "{} construct(s) could not be expressed, see warnings above",
            conversion.diagnostics.len()
        );
    }
    Ok(())
}

fn cmd_validate(input: PathBuf) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let conversion = convert_file(&input, &cfg)?;
    let schema = &conversion.schema;

    eprintln!("Valid Swagger 2.0 document: {}", schema.name);
    if let Some(version) = schema.version {
        eprintln!("  Version: {version}");
    }
    eprintln!("  Types: {}", schema.types.len());
    eprintln!("  Resources: {}", schema.resources.len());
    eprintln!("  Diagnostics: {}", conversion.diagnostics.len());

    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_inspect(input: PathBuf, format: InspectFormat) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let conversion = convert_file(&input, &cfg)?;

    let summary = build_inspect_summary(&conversion);

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&summary)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn build_inspect_summary(conversion: &Conversion) -> serde_json::Value {
    let schema: &Schema = &conversion.schema;

    let types: Vec<serde_json::Value> = schema
        .types
        .iter()
        .map(|t| {
            serde_json::json!({
                "name": t.name(),
                "kind": t.kind(),
                "comment": t.comment(),
            })
        })
        .collect();

    let resources: Vec<serde_json::Value> = schema
        .resources
        .iter()
        .map(|r| {
            serde_json::json!({
                "name": r.name,
                "method": r.method.as_str(),
                "path": r.path,
                "type": r.result_type,
                "exceptions": r.exceptions.keys().collect::<Vec<_>>(),
            })
        })
        .collect();

    let diagnostics: Vec<String> = conversion
        .diagnostics
        .iter()
        .map(ToString::to_string)
        .collect();

    serde_json::json!({
        "name": schema.name,
        "version": schema.version,
        "base": schema.base,
        "types": types,
        "resources": resources,
        "diagnostics": diagnostics,
    })
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
