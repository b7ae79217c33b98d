//! Formatters for diagnostics in text, JSON and SARIF.
//! Provide human and tool-friendly output.

use engine::Diagnostic;
use loader::Severity;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{self, Write};

mod sarif;

pub use sarif::to_sarif;

/// Returns the severity colored with simple ANSI codes.
fn color_severity(sev: Severity) -> String {
    let code = match sev {
        Severity::Hidden => "\x1b[90m",
        Severity::Info => "\x1b[32m",
        Severity::Warning => "\x1b[33m",
        Severity::Error => "\x1b[31m",
    };
    format!("{code}{sev}\x1b[0m")
}

fn simple_box(title: &str) -> String {
    let width = title.chars().count() + 2;
    format!(
        "╭{}╮\n│ {} │\n╰{}╯\n",
        "─".repeat(width),
        title,
        "─".repeat(width)
    )
}

const RULE: &str =
    "    ──────────────────────────────────────────────────────────────────────────────\n";

fn create_stats(info: &ScanInfo, diagnostics: &[Diagnostic]) -> String {
    let mut output = simple_box("Analysis Status");
    output.push('\n');
    output.push_str(&format!(
        "    Analyzing {} units with {} rules:\n\n",
        info.units_analyzed, info.rules_loaded
    ));

    let mut by_rule: BTreeMap<&str, usize> = BTreeMap::new();
    for d in diagnostics {
        *by_rule.entry(d.rule_id.as_str()).or_default() += 1;
    }
    if !by_rule.is_empty() {
        output.push_str("    RULES\n");
        output.push_str(RULE);
        output.push('\n');
        output.push_str("    Rule           Hits\n");
        output.push_str(RULE);
        for (rule, hits) in &by_rule {
            output.push_str(&format!("    {rule:<14} {hits}\n"));
        }
        output.push('\n');
    }

    output.push_str("    PERFORMANCE\n");
    output.push_str(RULE);
    output.push('\n');
    output.push_str("    Metric                    Value\n");
    output.push_str(RULE);
    output.push_str(&format!(
        "    Duration                  {}ms\n",
        info.duration_ms
    ));
    output.push_str(&format!(
        "    Cached units              {}\n",
        info.cache_hits
    ));
    output.push_str(&format!(
        "    Cache hit rate            {:.1}%\n",
        if info.units_analyzed > 0 {
            (info.cache_hits as f64 / info.units_analyzed as f64) * 100.0
        } else {
            0.0
        }
    ));
    if info.fixes_applied > 0 {
        output.push_str(&format!(
            "    Fixes applied             {}\n",
            info.fixes_applied
        ));
    }
    output
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Supported formats for printing diagnostics.
pub enum Format {
    /// Human-readable output in plain text.
    Text,
    /// JSON structure for integrations.
    Json,
    /// Report conforming to the SARIF specification.
    Sarif,
}

#[derive(Serialize)]
struct DiagnosticOut<'a> {
    #[serde(flatten)]
    diagnostic: &'a Diagnostic,
    #[serde(skip_serializing_if = "Option::is_none")]
    properties: Option<BTreeMap<&'static str, String>>,
}

#[derive(Serialize)]
struct DiagnosticsOut<'a> {
    diagnostics: Vec<DiagnosticOut<'a>>,
    total: usize,
}

/// Additional information to display in statistics.
#[derive(Debug, Clone, Default)]
pub struct ScanInfo {
    pub rules_loaded: usize,
    pub units_analyzed: usize,
    pub duration_ms: u64,
    pub cache_hits: usize,
    pub fixes_applied: usize,
}

/// Prints diagnostics in the selected format.
///
/// # Example
/// ```
/// use reporters::{print_diagnostics, Format, ScanInfo};
/// let info = ScanInfo {
///     rules_loaded: 30,
///     units_analyzed: 5,
///     duration_ms: 12,
///     ..Default::default()
/// };
/// print_diagnostics(&[], Format::Text, Some(&info)).unwrap();
/// ```
pub fn print_diagnostics(
    diagnostics: &[Diagnostic],
    fmt: Format,
    scan_info: Option<&ScanInfo>,
) -> io::Result<()> {
    let mut out = io::stdout();
    write_diagnostics(&mut out, diagnostics, fmt, scan_info)
}

/// Writes diagnostics to a generic `Write`.
pub fn write_diagnostics<W: Write>(
    out: &mut W,
    diagnostics: &[Diagnostic],
    fmt: Format,
    scan_info: Option<&ScanInfo>,
) -> io::Result<()> {
    match fmt {
        Format::Text => {
            if let Some(info) = scan_info {
                writeln!(out, "{}", create_stats(info, diagnostics))?;
            }

            writeln!(out, "{}", simple_box("Results"))?;
            if diagnostics.is_empty() {
                writeln!(out, "✔ No issues found.")?;
            } else {
                writeln!(out, "⚠ Found {} issue(s):\n", diagnostics.len())?;
                for d in diagnostics {
                    writeln!(
                        out,
                        "{} {}:{}:{} {}",
                        color_severity(d.severity),
                        d.file.display(),
                        d.line,
                        d.column,
                        d.rule_id
                    )?;
                    writeln!(out, "    {}", d.message)?;
                    writeln!(out, "    ↳  {}", d.excerpt.trim())?;
                    if let Some(fx) = &d.fix {
                        writeln!(out, "    • Fix: {fx}")?;
                    }
                    writeln!(out)?;
                }
                writeln!(out, "Total: {}", diagnostics.len())?;
            }
        }
        Format::Json => {
            let json = DiagnosticsOut {
                diagnostics: diagnostics
                    .iter()
                    .map(|d| DiagnosticOut {
                        diagnostic: d,
                        properties: d.facts.as_ref().map(|f| f.properties()),
                    })
                    .collect(),
                total: diagnostics.len(),
            };
            serde_json::to_writer_pretty(&mut *out, &json)?;
            writeln!(out)?;
        }
        Format::Sarif => {
            let sarif = sarif::to_sarif(diagnostics);
            serde_json::to_writer_pretty(&mut *out, &sarif)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests;
