//! polycons Command Line Interface
//!
//! Usage:
//!   polycons [OPTIONS] [FILE]
//!   polycons --help
//!
//! Examples:
//!   polycons triangle.cons                      # Print the constraint system
//!   polycons -e 'x0 >= 0' -e 'x0 + x1 <= 4'     # Statements from the command line
//!   polycons --vars i,j,n --emit=pretty nest.cons
//!   polycons --emit=json --classify triangle.cons

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{debug, info};
use polycons::{EmitFormat, SessionConfig};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

/// polycons - exact linear constraints over integer variables
#[derive(Parser, Debug)]
#[command(name = "polycons")]
#[command(version)]
#[command(about = "Normalize and classify linear constraints", long_about = None)]
struct Cli {
    /// Input file with one statement per line (stdin if omitted and no -e)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Statement to evaluate, after the file contents (repeatable)
    #[arg(short = 'e', long = "expr", value_name = "STMT")]
    exprs: Vec<String>,

    /// Names for variables 0, 1, ... (comma-separated)
    #[arg(long, value_delimiter = ',')]
    vars: Vec<String>,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// What to emit
    #[arg(long, default_value = "text")]
    emit: EmitKind,

    /// Line width for --emit=pretty
    #[arg(long, default_value_t = polycons::utils::pretty::DEFAULT_WIDTH)]
    width: usize,

    /// Append the kind and status of every constraint
    #[arg(long)]
    classify: bool,

    /// Verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (suppress warnings)
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EmitKind {
    /// Single-line system
    Text,
    /// Width-limited multi-line layout
    Pretty,
    /// JSON wire form
    Json,
}

impl From<EmitKind> for EmitFormat {
    fn from(kind: EmitKind) -> Self {
        match kind {
            EmitKind::Text => EmitFormat::Text,
            EmitKind::Pretty => EmitFormat::Pretty,
            EmitKind::Json => EmitFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.quiet {
        log::LevelFilter::Error
    } else {
        match cli.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();

    info!("polycons v{}", polycons::VERSION);

    let source = read_source(&cli)?;
    let config = build_config(&cli);
    debug!("Session config: {:?}", config);

    let session = polycons::process(&source, &config)?;
    for (stmt, truth) in &session.truths {
        info!("`{}` is {}", stmt, truth);
    }
    for (stmt, value) in &session.values {
        info!("`{}` = {}", stmt, value);
    }

    let output = session.render(&config)?;
    write_output(&cli.output, &output)
}

fn read_source(cli: &Cli) -> Result<String> {
    let mut source = match &cli.input {
        Some(path) => {
            debug!("Input file: {:?}", path);
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read input file: {:?}", path))?
        }
        None if cli.exprs.is_empty() => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read standard input")?;
            buf
        }
        None => String::new(),
    };
    for expr in &cli.exprs {
        source.push('\n');
        source.push_str(expr);
    }
    Ok(source)
}

fn build_config(cli: &Cli) -> SessionConfig {
    SessionConfig {
        variable_names: cli.vars.clone(),
        emit: cli.emit.into(),
        classify: cli.classify,
        width: cli.width,
    }
}

fn write_output(path: &Option<PathBuf>, content: &str) -> Result<()> {
    match path {
        Some(p) => {
            fs::write(p, content)
                .with_context(|| format!("Failed to write output file: {:?}", p))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
