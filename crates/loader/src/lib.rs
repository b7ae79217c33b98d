//! Loads analyzer settings and compilation documents from YAML or JSON.

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

mod document;
mod walk;
pub use document::{
    load_document, load_workspace, parse_document_str, CompilationDocument, DocumentFormat,
    LoadedDocument, Workspace,
};
pub use walk::{collect_documents, visit};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
/// Severity associated with a diagnostic.
pub enum Severity {
    Hidden,
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Hidden => "HIDDEN",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        };
        write!(f, "{s}")
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hidden" => Ok(Severity::Hidden),
            "info" => Ok(Severity::Info),
            "warning" | "warn" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            other => Err(format!("unknown severity '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
/// Severity override in settings files; `none` turns the rule off.
pub enum RuleLevel {
    None,
    Hidden,
    Info,
    Warning,
    Error,
}

impl RuleLevel {
    pub fn severity(self) -> Option<Severity> {
        match self {
            RuleLevel::None => None,
            RuleLevel::Hidden => Some(Severity::Hidden),
            RuleLevel::Info => Some(Severity::Info),
            RuleLevel::Warning => Some(Severity::Warning),
            RuleLevel::Error => Some(Severity::Error),
        }
    }
}

fn enabled_by_default() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RuleSetting {
    #[serde(default)]
    pub severity: Option<RuleLevel>,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

impl Default for RuleSetting {
    fn default() -> Self {
        Self {
            severity: None,
            enabled: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
/// Per-rule configuration keyed by diagnostic id (`NUnit2005`).
pub struct Settings {
    #[serde(default)]
    pub rules: BTreeMap<String, RuleSetting>,
}

impl Settings {
    /// Severity a diagnostic is reported with, or `None` when it is disabled.
    pub fn effective_severity(&self, id: &str, default: Severity) -> Option<Severity> {
        match self.rules.get(id) {
            None => Some(default),
            Some(setting) if !setting.enabled => None,
            Some(RuleSetting {
                severity: Some(level),
                ..
            }) => level.severity(),
            Some(_) => Some(default),
        }
    }

    pub fn is_enabled(&self, id: &str) -> bool {
        self.rules
            .get(id)
            .is_none_or(|s| s.enabled && s.severity != Some(RuleLevel::None))
    }

    /// Applies `id=severity` overrides on top of the loaded settings.
    pub fn override_with(&mut self, id: &str, level: RuleLevel) {
        self.rules.entry(id.to_string()).or_default().severity = Some(level);
    }
}

/// Loads settings from a `.yaml`, `.yml` or `.json` file.
pub fn load_settings(path: &Path) -> anyhow::Result<Settings> {
    debug!(file = %path.display(), "Loading settings");
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
    let settings: Settings = match DocumentFormat::from_path(path) {
        Some(DocumentFormat::Json) => serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))?,
        Some(DocumentFormat::Yaml) => serde_yaml::from_str(&data)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))?,
        None => bail!("unsupported settings format: {}", path.display()),
    };
    for id in settings.rules.keys() {
        if !id.starts_with("NUnit") {
            bail!("unknown rule id '{id}' in {}", path.display());
        }
    }
    Ok(settings)
}
