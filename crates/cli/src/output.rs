use clap::ValueEnum;
use engine::Diagnostic;
use reporters::{self, ScanInfo};
use serde::Deserialize;

/// Supported output formats for scan results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Text,
    Json,
    Sarif,
}

impl From<Format> for reporters::Format {
    fn from(fmt: Format) -> Self {
        match fmt {
            Format::Text => reporters::Format::Text,
            Format::Json => reporters::Format::Json,
            Format::Sarif => reporters::Format::Sarif,
        }
    }
}

/// Statistics are only part of the text report.
pub fn print_diagnostics(
    diagnostics: &[Diagnostic],
    fmt: Format,
    info: &ScanInfo,
) -> anyhow::Result<()> {
    let info = (fmt == Format::Text).then_some(info);
    reporters::print_diagnostics(diagnostics, fmt.into(), info)?;
    Ok(())
}
