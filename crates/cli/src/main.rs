//! argform binary: load a build spec, render it as a terminal form, and
//! print each submission in the model's argument convention.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use argform_engine::{ConventionArgs, run_spec};
use argform_tui::TuiBackend;
use argform_types::{BuildSpec, Convention};
use clap::Parser;

#[derive(Parser)]
#[command(
    name = "argform",
    version,
    about = "Render a parameter model as a terminal form"
)]
struct Cli {
    /// Path to the build spec (JSON)
    spec: PathBuf,

    /// Override the spec's argument convention
    /// (argparse, dephell_argparse, optparse, docopt, getopt, click)
    #[arg(long)]
    convention: Option<String>,

    /// Use the built-in dark palette
    #[arg(long, conflicts_with = "light")]
    dark: bool,

    /// Use the built-in light palette
    #[arg(long)]
    light: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let spec = load_spec(&cli)?;

    let mut backend = TuiBackend::new();
    run_spec(&mut backend, &spec, |args| print_submission(&args))
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Loads and validates the build spec; every failure here is fatal at
/// startup, before any terminal state is touched.
fn load_spec(cli: &Cli) -> Result<BuildSpec> {
    let raw = fs::read_to_string(&cli.spec)
        .with_context(|| format!("reading build spec {}", cli.spec.display()))?;
    let mut spec: BuildSpec = serde_json::from_str(&raw)
        .with_context(|| format!("parsing build spec {}", cli.spec.display()))?;

    if let Some(name) = &cli.convention {
        spec.parser = name
            .parse::<Convention>()
            .with_context(|| format!("invalid --convention '{name}'"))?;
    }
    if cli.dark {
        spec.dark_theme = true;
        spec.theme = None;
    }
    if cli.light {
        spec.dark_theme = false;
        spec.theme = None;
    }
    tracing::debug!(parser = spec.parser.as_str(), "build spec loaded");
    Ok(spec)
}

/// One submission, printed as lines a shell consumer can read back.
fn print_submission(args: &ConventionArgs) {
    match args {
        ConventionArgs::Namespace(record) | ConventionArgs::Mapping(record) => {
            for (name, value) in record {
                println!("{name} = {value}");
            }
        }
        ConventionArgs::Values { values, rest } => {
            for (name, value) in values {
                println!("{name} = {value}");
            }
            if !rest.is_empty() {
                println!("rest = {rest:?}");
            }
        }
        ConventionArgs::Pairs { pairs, rest } => {
            for (name, value) in pairs {
                println!("{name} = {value}");
            }
            if !rest.is_empty() {
                println!("rest = {rest:?}");
            }
        }
        ConventionArgs::Tokens(tokens) => {
            let rendered: Vec<String> = tokens.iter().map(ToString::to_string).collect();
            println!("{}", rendered.join(" "));
        }
    }
    println!();
}
