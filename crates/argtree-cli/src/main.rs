use anyhow::{Context, Result, bail};
use argtree_manifest::{CommandDef, Manifest, load_manifest};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "argtree")]
#[command(version, about = "Parse argument vectors against a JSON declaration", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse tokens and print the result as JSON
    Parse(ParseArgs),
    /// Validate a manifest and print its command tree
    Check(CheckArgs),
}

#[derive(Parser)]
struct ParseArgs {
    /// Path to the declaration manifest
    #[arg(short, long, default_value = "argtree.json")]
    manifest: PathBuf,

    /// Print single-line JSON
    #[arg(long)]
    compact: bool,

    /// Print parse errors as JSON on stdout
    #[arg(long)]
    json_errors: bool,

    /// Tokens to parse (put them after `--`)
    #[arg(value_name = "TOKENS", trailing_var_arg = true, allow_hyphen_values = true)]
    tokens: Vec<String>,
}

#[derive(Parser)]
struct CheckArgs {
    /// Path to the declaration manifest
    #[arg(short, long, default_value = "argtree.json")]
    manifest: PathBuf,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse(args) => parse(args),
        Commands::Check(args) => check(args),
    }
}

fn parse(args: ParseArgs) -> Result<()> {
    let parser = load_manifest(&args.manifest)?.into_parser()?;
    tracing::debug!(parser = parser.name(), tokens = args.tokens.len(), "executing parse command");

    let result = match parser.parse(&args.tokens) {
        Ok(result) => result,
        Err(err) if args.json_errors => {
            println!("{}", to_json(&err, args.compact)?);
            bail!("failed to parse arguments");
        }
        Err(err) => return Err(err).context("failed to parse arguments"),
    };

    println!("{}", to_json(&result, args.compact)?);
    Ok(())
}

fn check(args: CheckArgs) -> Result<()> {
    tracing::debug!("executing check command");

    let manifest: Manifest = load_manifest(&args.manifest)?;
    let parser = manifest.clone().into_parser()?;

    println!("{}", parser.name());
    for command in &manifest.commands {
        print_command(command, 1);
    }

    eprintln!();
    eprintln!(
        "OK: {} argument(s), {} command(s) at top level",
        manifest.arguments.len(),
        manifest.commands.len()
    );
    Ok(())
}

fn print_command(command: &CommandDef, depth: usize) {
    let aliases: Vec<&str> = command.alias.iter().collect();
    if aliases.is_empty() {
        println!("{}{}", "  ".repeat(depth), command.name);
    } else {
        println!("{}{} ({})", "  ".repeat(depth), command.name, aliases.join(", "));
    }
    for nested in &command.commands {
        print_command(nested, depth + 1);
    }
}

fn to_json<T: serde::Serialize>(value: &T, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    };
    json.context("failed to serialize output")
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
