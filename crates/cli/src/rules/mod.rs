//! `rules` subcommands: browse the diagnostic descriptors.

use anyhow::{bail, Result};
use colored::*;
use engine::{descriptor_by_id, descriptors, Descriptor};
use loader::Severity;
use std::env;
use std::io::{self, Write};

fn use_colored_output() -> bool {
    // NO_COLOR is the standard opt-out.
    if env::var("NO_COLOR").is_ok() {
        return false;
    }
    if let Ok(term) = env::var("TERM") {
        if term == "dumb" || term == "unknown" {
            return false;
        }
    }
    !(env::var("CI").is_ok() || env::var("CONTINUOUS_INTEGRATION").is_ok())
}

fn severity_label(sev: Severity, color: bool) -> String {
    let text = format!("{:<7}", sev.to_string());
    if !color {
        return text;
    }
    match sev {
        Severity::Hidden => text.dimmed().to_string(),
        Severity::Info => text.green().to_string(),
        Severity::Warning => text.yellow().to_string(),
        Severity::Error => text.red().bold().to_string(),
    }
}

/// One line per descriptor, grouped by category.
pub fn write_rule_list<W: Write>(out: &mut W, color: bool) -> io::Result<()> {
    let mut all = descriptors();
    all.sort_by(|a, b| a.category.cmp(b.category).then(a.id.cmp(b.id)));
    let mut category = "";
    for d in &all {
        if d.category != category {
            category = d.category;
            writeln!(out)?;
            if color {
                writeln!(out, "{}", category.bright_white().bold())?;
            } else {
                writeln!(out, "{category}")?;
            }
        }
        writeln!(
            out,
            "  {}  {}  {}",
            d.id,
            severity_label(d.default_severity, color),
            d.title
        )?;
    }
    writeln!(out)?;
    writeln!(out, "{} diagnostics", all.len())
}

pub fn write_rule_details<W: Write>(out: &mut W, d: &Descriptor, color: bool) -> io::Result<()> {
    if color {
        writeln!(out, "{} {}", d.id.bright_white().bold(), d.title)?;
    } else {
        writeln!(out, "{} {}", d.id, d.title)?;
    }
    writeln!(out)?;
    writeln!(out, "  Category:  {}", d.category)?;
    writeln!(
        out,
        "  Severity:  {}",
        severity_label(d.default_severity, color).trim_end()
    )?;
    writeln!(out, "  Message:   {}", d.message)?;
    writeln!(out, "  Help:      {}", d.help_uri())?;
    writeln!(out)?;
    writeln!(out, "{}", d.description)
}

pub fn list_rules() -> Result<()> {
    let mut out = io::stdout().lock();
    write_rule_list(&mut out, use_colored_output())?;
    Ok(())
}

pub fn show_rule(id: &str) -> Result<()> {
    let Some(d) = descriptor_by_id(id) else {
        bail!("unknown diagnostic id '{id}'; run `nunitlint rules list`");
    };
    let mut out = io::stdout().lock();
    write_rule_details(&mut out, d, use_colored_output())?;
    Ok(())
}
