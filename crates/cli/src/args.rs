use clap::{Args as ClapArgs, Parser, Subcommand};
use regex::Regex;
use std::path::PathBuf;

use loader::{RuleLevel, Severity};

use crate::output::Format;

fn parse_severity(s: &str) -> Result<Severity, String> {
    s.parse()
}

fn default_threads() -> usize {
    std::thread::available_parallelism().map_or(1, |n| n.get())
}

fn parse_threads(s: &str) -> Result<usize, String> {
    let v: usize = s
        .parse()
        .map_err(|e: std::num::ParseIntError| e.to_string())?;
    if v == 0 {
        Err("threads must be greater than 0".into())
    } else {
        Ok(v)
    }
}

/// `NUnit2005=error` style override.
fn parse_rule_override(s: &str) -> Result<(String, RuleLevel), String> {
    let (id, level) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ID=LEVEL, got '{s}'"))?;
    let level = match level.trim().to_lowercase().as_str() {
        "none" | "off" => RuleLevel::None,
        "hidden" => RuleLevel::Hidden,
        "info" => RuleLevel::Info,
        "warning" | "warn" => RuleLevel::Warning,
        "error" => RuleLevel::Error,
        other => return Err(format!("unknown level '{other}'")),
    };
    Ok((id.trim().to_string(), level))
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "nunitlint - checks NUnit assertions and constraint expressions",
    long_about = "nunitlint analyses compilation documents (resolved operation trees exported from a .NET \
build) and reports misuse of NUnit assertions: classic asserts that have a constraint-model equivalent, \
swapped actual/expected values, incompatible types in EqualTo/SameAs/Contains and comparison constraints, \
misplaced modifiers and more.

Examples:
  nunitlint scan build/nunitlint/                 # Analyse every document under a directory
  nunitlint scan units.json --format sarif        # SARIF output for code scanning
  nunitlint scan . --apply-fixes                  # Rewrite documents with the suggested fixes
  nunitlint rules show NUnit2005                  # Describe one diagnostic",
    subcommand_required = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// Show version information
    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version)]
    pub version: Option<bool>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyse compilation documents
    Scan(ScanArgs),
    /// Describe the available diagnostics
    #[command(subcommand, alias = "rule")]
    Rules(RulesCmd),
}

#[derive(ClapArgs)]
pub struct ScanArgs {
    /// Document or directory of documents to analyse
    pub path: PathBuf,
    /// Settings file (YAML or JSON) with per-rule severities
    #[arg(long)]
    pub settings: Option<PathBuf>,
    /// Output format; defaults to the configured format or text
    #[arg(long, value_enum)]
    pub format: Option<Format>,
    /// Exit with error code if diagnostics of this severity or higher are reported
    #[arg(long = "fail-on", value_parser = parse_severity)]
    pub fail_on: Option<Severity>,
    /// Number of parallel threads
    #[arg(long, default_value_t = default_threads(), value_parser = parse_threads)]
    pub threads: usize,
    /// Exclude paths matching these glob patterns
    #[arg(long, value_parser = crate::parse_exclude, value_delimiter = ',')]
    pub exclude: Vec<Regex>,
    /// Don't use default exclusion patterns
    #[arg(long)]
    pub no_default_exclude: bool,
    /// Override a rule severity, e.g. `--rule NUnit2005=error`
    #[arg(long = "rule", value_parser = parse_rule_override)]
    pub rules: Vec<(String, RuleLevel)>,
    /// Rewrite documents with the suggested fixes
    #[arg(long = "apply-fixes")]
    pub apply_fixes: bool,
    /// Directory to store cache files
    #[arg(long = "cache-dir")]
    pub cache_dir: Option<PathBuf>,
    /// Write engine metrics to a file (`-` for stderr)
    #[arg(long)]
    pub metrics: Option<PathBuf>,
    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
    /// Suppress non-essential output
    #[arg(long)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum RulesCmd {
    /// List every diagnostic id with its default severity
    List,
    /// Show the description of one diagnostic
    Show {
        /// Diagnostic id, e.g. NUnit2005
        id: String,
    },
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}
