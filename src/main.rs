//! lingo — command-line harness for the front end.
//!
//! `lingo tokens` dumps the token stream, `lingo parse` prints the AST or
//! the first syntax error.

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{info, LevelFilter};

use lingo::config::{default_config_path, load_config, OutputFormat};
use lingo::dsl::{dump, FrontEnd, TokenKind};

#[derive(Parser)]
#[command(name = "lingo")]
#[command(about = "Lexer and parser for a small Logo-family dialect", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to ~/.lingo/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Dump every token until the first unmatched one
    Tokens {
        /// Source file, or `-` for stdin
        file: Option<PathBuf>,
        /// Print the tokens as YAML instead of a table
        #[arg(long)]
        yaml: bool,
        /// Print the raw texts rejoined as source
        #[arg(long, conflicts_with = "yaml")]
        rejoin: bool,
    },

    /// Parse a program and print its syntax tree
    Parse {
        /// Source file, or `-` for stdin
        file: Option<PathBuf>,
        /// Output format (overrides the config file)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let config = load_config(&config_path)?;
    let level = raise(config.level_filter()?, cli.verbose);
    lingo::logging::init(level)
        .map_err(|e| anyhow::anyhow!("failed to install logger: {e}"))?;
    info!("config: {}", config_path.display());

    match cli.command {
        Commands::Tokens { file, yaml, rejoin } => {
            let source = read_source(file.as_ref())?;
            let tokens = FrontEnd::tokenize(&source);
            if yaml {
                print!("{}", dump::to_yaml(&tokens)?);
            } else if rejoin {
                println!("{}", dump::join_raw(&tokens));
            } else {
                print!("{}", dump::render(&tokens));
            }
            let clean = tokens.last().is_some_and(|t| t.kind == TokenKind::NoMore);
            Ok(if clean {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::Parse { file, format } => {
            let source = read_source(file.as_ref())?;
            let program = match FrontEnd::parse(&source) {
                Ok(program) => program,
                Err(e) => {
                    eprintln!("syntax error: {e}");
                    return Ok(ExitCode::FAILURE);
                }
            };
            match format.unwrap_or(config.format) {
                OutputFormat::Debug => println!("{program:#?}"),
                OutputFormat::Yaml => print!("{}", dump::to_yaml(&program)?),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&program)?),
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Raise a level filter by `steps` notches, capped at trace.
fn raise(level: LevelFilter, steps: u8) -> LevelFilter {
    const ORDER: [LevelFilter; 6] = [
        LevelFilter::Off,
        LevelFilter::Error,
        LevelFilter::Warn,
        LevelFilter::Info,
        LevelFilter::Debug,
        LevelFilter::Trace,
    ];
    let current = ORDER.iter().position(|&l| l == level).unwrap_or(2);
    ORDER[(current + steps as usize).min(ORDER.len() - 1)]
}

fn read_source(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .context("failed to read stdin")?;
            Ok(source)
        }
    }
}
