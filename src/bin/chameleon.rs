//! chameleon: the DDL transpiler CLI
//!
//! # Usage
//!
//! ```bash
//! # Oracle script to Postgres, on stdout
//! chameleon -s postgres schema.sql
//!
//! # Fold alters, normalize constraints, one output file per input
//! chameleon -O best -s postgres -o out/ tables.sql indexes.sql
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use chameleon::config::Config;
use chameleon::optimizer::{Level, Optimizer};
use chameleon::parser::parse_with_diagnostics;
use chameleon::transpiler::{Dialect, Renderer};

#[derive(Parser)]
#[command(name = "chameleon")]
#[command(version)]
#[command(about = "Schema DDL transpiler (oracle | postgres)", long_about = None)]
#[command(after_help = "EXAMPLES:
    chameleon -s postgres schema.sql
    chameleon -O best -S -s postgres -o out/ tables.sql indexes.sql
    chameleon --dump-ast schema.sql

The exit code is the number of inputs that failed.")]
struct Cli {
    /// DDL scripts to transpile
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output dialect (oracle|postgres) [default: oracle]
    #[arg(short, long)]
    style: Option<Dialect>,

    /// Optimizer level (none|basic|best) [default: none]
    #[arg(short = 'O', long)]
    optimizer: Option<Level>,

    /// Output file, or a directory to write one file per input
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Order statements by kind instead of script order
    #[arg(short = 'S', long)]
    sort: bool,

    /// Mark foreign keys DEFERRABLE (postgres)
    #[arg(short = 'D', long)]
    deferrable: bool,

    /// File prepended to every output
    #[arg(short = 'H', long)]
    header: Option<PathBuf>,

    /// Verbose output: optimizer report and info logs
    #[arg(short, long)]
    verbose: bool,

    /// Configuration file [default: ./chameleon.toml]
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the (optimized) syntax tree as JSON instead of rendering
    #[arg(long)]
    dump_ast: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let failed = match run(&cli) {
        Ok(failed) => failed,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            cli.inputs.len()
        }
    };
    std::process::exit(i32::try_from(failed).unwrap_or(i32::MAX));
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "chameleon=info" } else { "chameleon=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Configuration file values, overridden by flags.
fn settings(cli: &Cli) -> Result<Config> {
    let mut config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(style) = cli.style {
        config.dialect = style;
    }
    if let Some(level) = cli.optimizer {
        config.optimizer = level;
    }
    config.sort |= cli.sort;
    config.deferrable |= cli.deferrable;
    if let Some(header) = &cli.header {
        config.header = Some(header.clone());
    }
    Ok(config)
}

/// Process every input; returns the number that failed.
fn run(cli: &Cli) -> Result<usize> {
    let config = settings(cli)?;
    let header = config.header_text().context("reading header")?;
    let renderer = Renderer::new(config.dialect, config.render_options())?;
    let mut optimizer = Optimizer::new(config.optimizer);
    debug!(dialect = %config.dialect, optimizer = %config.optimizer, "settings");

    let out_dir = cli.output.as_deref().filter(|p| p.is_dir());
    let mut combined = String::new();
    let mut succeeded = 0;
    let mut failed = Vec::new();

    for input in &cli.inputs {
        let result = process(input, &mut optimizer, &renderer, cli.dump_ast).and_then(|text| {
            let text = format!("{}{}", header, text);
            match out_dir {
                Some(dir) => write_into(dir, input, &text),
                None => {
                    combined.push_str(&text);
                    Ok(())
                }
            }
        });
        match result {
            Ok(()) => succeeded += 1,
            Err(e) => {
                eprintln!("{} {}: {:#}", "✗".red(), input.display(), e);
                failed.push(input);
            }
        }
    }

    if out_dir.is_none() {
        match &cli.output {
            Some(path) => fs::write(path, &combined)
                .with_context(|| format!("writing {}", path.display()))?,
            None => print!("{}", combined),
        }
    }

    eprintln!(
        "({}: {}, {}: {}, {}: {})",
        "succeeded".green(),
        succeeded,
        "failed".red(),
        failed.len(),
        "warnings".yellow(),
        optimizer.warnings().len()
    );
    if !failed.is_empty() {
        eprintln!("{}", "Failed:".red().bold());
        for input in &failed {
            eprintln!("  {}", input.display());
        }
    }
    if cli.verbose && !optimizer.warnings().is_empty() {
        eprintln!("{}", "Optimizer report:".cyan());
        eprint!("{}", optimizer.report());
    }

    Ok(failed.len())
}

fn process(
    path: &Path,
    optimizer: &mut Optimizer,
    renderer: &Renderer,
    dump_ast: bool,
) -> Result<String> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let (script, skipped) = parse_with_diagnostics(&text)?;
    debug!(
        file = %path.display(),
        statements = script.len(),
        skipped = skipped.len(),
        "parsed"
    );
    let script = optimizer.process(script);
    if dump_ast {
        let json = serde_json::to_string_pretty(&script).context("serializing syntax tree")?;
        return Ok(format!("{}\n", json));
    }
    Ok(renderer.render_script(&script)?)
}

/// Write `text` to `<dir>/<basename of input>`.
fn write_into(dir: &Path, input: &Path, text: &str) -> Result<()> {
    let name = input
        .file_name()
        .with_context(|| format!("{} has no file name", input.display()))?;
    let path = dir.join(name);
    fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
    debug!(path = %path.display(), "written");
    Ok(())
}
