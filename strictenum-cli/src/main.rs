//! strictenum CLI - strict enum conformance checker for Go projects.
//!
//! Features:
//! - Go package patterns (`./...`, `dir`, `file.go`)
//! - Rayon-powered parallel unit analysis
//! - Optional strictenum.toml configuration
//! - Plain `file:line:col: message` or JSON output
//! - CI-friendly exit codes

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

use strictenum_core::{
    init_structured_logging, load_config, print_json, print_plain, AnalysisResult, Pattern,
    StrictEnum, StrictEnumConfig, StrictEnumLinter,
};

/// Exit code when no violations are found.
const EXIT_CLEAN: i32 = 0;
/// Exit code when at least one violation is reported.
const EXIT_VIOLATIONS: i32 = 1;
/// Exit code when a unit fails to load or the run cannot start.
const EXIT_FAILURE: i32 = 2;

#[derive(Parser, Debug)]
#[command(author, version, about = "Strict enum conformance checker for Go")]
pub struct Cli {
    /// Go package patterns to analyze
    #[arg(default_value = "./...")]
    patterns: Vec<String>,

    /// Output in JSON format
    #[arg(long)]
    json: bool,

    /// Directory names to skip during recursive scans
    #[arg(long, num_args = 1..)]
    exclude: Vec<String>,

    /// Skip `_test.go` files
    #[arg(long)]
    no_tests: bool,

    /// Checker settings as a JSON document
    #[arg(long, value_name = "JSON")]
    settings: Option<String>,

    /// Print the analyzer name and description, then exit
    #[arg(long)]
    describe: bool,
}

/// Directory whose strictenum.toml applies to this run.
fn config_root(patterns: &[String]) -> PathBuf {
    match patterns.first().map(|p| Pattern::parse(p)) {
        Some(Pattern::Package(dir)) | Some(Pattern::Recursive(dir)) => dir,
        Some(Pattern::File(file)) => file
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
        None => PathBuf::from("."),
    }
}

fn parse_settings(raw: &str) -> Result<serde_json::Value> {
    serde_json::from_str(raw).context("--settings must be a JSON document")
}

fn exit_code(result: &AnalysisResult) -> i32 {
    if result.has_failures() {
        EXIT_FAILURE
    } else if result.has_violations() {
        EXIT_VIOLATIONS
    } else {
        EXIT_CLEAN
    }
}

/// Builds the analysis from config file and flags. Flags win.
fn build(cli: &Cli, config: Option<&StrictEnumConfig>) -> Result<StrictEnum> {
    let (first, rest) = cli
        .patterns
        .split_first()
        .map(|(first, rest)| (first.clone(), rest.to_vec()))
        .unwrap_or_else(|| ("./...".to_string(), Vec::new()));

    let mut builder = StrictEnum::new(first).patterns(rest);
    if let Some(config) = config {
        builder = builder.with_config(config)?;
    }
    builder = builder.exclude_dirs(cli.exclude.iter().cloned());
    if cli.no_tests {
        builder = builder.include_tests(false);
    }
    if let Some(raw) = &cli.settings {
        builder = builder.settings(Some(parse_settings(raw)?));
    }
    Ok(builder)
}

fn run(cli: &Cli) -> Result<i32> {
    if cli.describe {
        let analyzer = StrictEnumLinter::analyzer();
        println!("{}: {}", analyzer.name, analyzer.doc);
        return Ok(EXIT_CLEAN);
    }

    let root = config_root(&cli.patterns);
    let config = load_config(&root)
        .with_context(|| format!("Failed to load config from {}", root.display()))?;

    let result = build(cli, config.as_ref())?.analyze()?;

    let json = cli.json || config.as_ref().is_some_and(StrictEnumConfig::wants_json);
    if json {
        print_json(&result);
    } else {
        print_plain(&result);
    }

    Ok(exit_code(&result))
}

fn main() {
    // Initialize structured logging (JSON to stderr, respects RUST_LOG)
    init_structured_logging();

    let cli = Cli::parse();
    let code = match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("[ERROR] {:#}", e);
            EXIT_FAILURE
        }
    };
    std::process::exit(code);
}
