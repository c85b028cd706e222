use std::fs;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use object_schema_core::{
    DECLARATION_SUFFIX, ModuleEmitter, SchemaDocument, emit_module, safe_identifier,
};
use object_schema_store::{
    ArtifactReport, ArtifactWriter, GeneratorConfig, SchemaSource, SourceChain, load_dir,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "schema-codegen", version)]
#[command(about = "Compile platform object-type schemas into a zod validator module")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compile the schema document and write the validator module.
    Generate(GenerateArgs),
    /// Compile the schema document without writing anything.
    Validate(ValidateArgs),
    /// List object types and the identifiers they compile to.
    List(ListArgs),
    /// Merge a directory of per-type JSON files into one bundle file.
    Bundle(BundleArgs),
}

#[derive(Debug, Args)]
struct InputArgs {
    /// Single JSON file mapping object-type names to their descriptions.
    #[arg(long)]
    bundle: Option<PathBuf>,
    /// Directory of `<object-type>.json` files (tried before --bundle).
    #[arg(long)]
    dir: Option<PathBuf>,
    /// Generator configuration YAML.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Comma-separated object types to compile (default: all).
    #[arg(long)]
    include: Option<String>,
    /// Comma-separated object types to skip.
    #[arg(long)]
    exclude: Option<String>,
    /// Maximum descriptor nesting depth.
    #[arg(long)]
    max_depth: Option<usize>,
    /// Name of the emitted union type.
    #[arg(long)]
    union_name: Option<String>,
}

#[derive(Debug, Args)]
struct GenerateArgs {
    #[command(flatten)]
    input: InputArgs,
    /// Output path for the generated module (overrides config).
    #[arg(long)]
    output: Option<PathBuf>,
    /// Fail if the module on disk differs from a fresh compile; write nothing.
    #[arg(long)]
    check: bool,
    /// Print the generation report as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    #[command(flatten)]
    input: InputArgs,
}

#[derive(Debug, Args)]
struct ListArgs {
    #[command(flatten)]
    input: InputArgs,
}

#[derive(Debug, Args)]
struct BundleArgs {
    /// Directory of `<object-type>.json` files.
    input: PathBuf,
    /// Output JSON bundle path.
    #[arg(long)]
    output: PathBuf,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Validate(args) => run_validate(args),
        Command::List(args) => run_list(args),
        Command::Bundle(args) => run_bundle(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run_generate(args: GenerateArgs) -> Result<(), String> {
    let mut config = load_config(&args.input)?;
    if let Some(output) = args.output {
        config.output = output;
    }

    let document = load_document(&args.input, &config)?;
    let module = ModuleEmitter::new(config.emit_options())
        .emit(&document)
        .map_err(|err| err.to_string())?;
    let writer = ArtifactWriter::new(&config.output);

    if args.check {
        let up_to_date = writer.is_up_to_date(&module).map_err(|err| {
            format!("Failed to read '{}': {err}", config.output.display())
        })?;
        if !up_to_date {
            return Err(format!(
                "'{}' is out of date; run `schema-codegen generate` to refresh it",
                config.output.display()
            ));
        }
        println!(
            "'{}' is up to date ({} object type(s)).",
            config.output.display(),
            module.type_names().len()
        );
        return Ok(());
    }

    let report = writer
        .write(&module)
        .map_err(|err| format!("Failed to write '{}': {err}", config.output.display()))?;
    print_report(&report, args.json)
}

fn run_validate(args: ValidateArgs) -> Result<(), String> {
    let config = load_config(&args.input)?;
    let document = load_document(&args.input, &config)?;
    let module = ModuleEmitter::new(config.emit_options())
        .emit(&document)
        .map_err(|err| err.to_string())?;

    println!(
        "Compiled {} object type(s): {}",
        module.type_names().len(),
        module.type_names().join(", ")
    );
    Ok(())
}

fn run_list(args: ListArgs) -> Result<(), String> {
    let config = load_config(&args.input)?;
    let document = load_document(&args.input, &config)?;

    for name in document.names() {
        println!("{name}\t{}{DECLARATION_SUFFIX}", safe_identifier(name));
    }
    Ok(())
}

fn run_bundle(args: BundleArgs) -> Result<(), String> {
    let document = load_dir(&args.input)
        .map_err(|err| format!("Failed to load '{}': {err}", args.input.display()))?;
    // Reject anything that would not compile before producing the bundle.
    emit_module(&document).map_err(|err| err.to_string())?;

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|err| {
                format!(
                    "Failed to create output directory '{}': {err}",
                    parent.display()
                )
            })?;
        }
    }

    let raw = serde_json::to_string_pretty(&document)
        .map_err(|err| format!("Failed to serialize schema bundle: {err}"))?;
    fs::write(&args.output, raw)
        .map_err(|err| format!("Failed to write '{}': {err}", args.output.display()))?;

    println!(
        "Bundled {} object type(s) into '{}'.",
        document.len(),
        args.output.display()
    );
    Ok(())
}

fn load_config(input: &InputArgs) -> Result<GeneratorConfig, String> {
    let mut config = match &input.config {
        Some(path) => GeneratorConfig::load(path)
            .map_err(|err| format!("Failed to load config '{}': {err}", path.display()))?,
        None => GeneratorConfig::default(),
    };

    let include = parse_csv_list(input.include.clone());
    if !include.is_empty() {
        config.include = include;
    }
    config.exclude.extend(parse_csv_list(input.exclude.clone()));
    if let Some(max_depth) = input.max_depth {
        config.max_depth = max_depth;
    }
    if let Some(union_name) = &input.union_name {
        config.union_name = union_name.clone();
    }

    config.check().map_err(|err| err.to_string())?;
    Ok(config)
}

fn load_document(input: &InputArgs, config: &GeneratorConfig) -> Result<SchemaDocument, String> {
    let mut chain = SourceChain::new();
    if let Some(dir) = &input.dir {
        chain = chain.from_dir(dir);
    }
    if let Some(bundle) = &input.bundle {
        chain = chain.from_bundle(bundle);
    }
    if chain.sources().is_empty() {
        return Err("Specify a schema source: --dir, --bundle, or both".to_string());
    }

    // With a single source, a missing path reads better than the chain's error.
    let loaded = match chain.sources() {
        [only] => only.load().map_err(|err| err.to_string())?,
        _ => chain.load().map_err(|err| err.to_string())?.document,
    };

    Ok(config.select(&loaded))
}

fn print_report(report: &ArtifactReport, json: bool) -> Result<(), String> {
    if json {
        let raw = serde_json::to_string_pretty(report)
            .map_err(|err| format!("Failed to serialize report: {err}"))?;
        println!("{raw}");
    } else {
        println!(
            "Wrote '{}' ({} bytes, sha256 {}).",
            report.output.display(),
            report.bytes,
            report.sha256
        );
        println!(
            "Generated validators for: {}",
            report.object_types.join(", ")
        );
    }
    Ok(())
}

fn parse_csv_list(raw: Option<String>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(String::from)
            .collect()
    })
    .unwrap_or_default()
}
