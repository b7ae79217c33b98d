//! Diagnostics of previously analyzed units, keyed by a hash of the unit.
//!
//! Analysis is a pure function of the unit's operation tree, the type
//! registry and the settings. The unit hash covers the first; the context
//! hash covers the other two and invalidates every entry when it changes.

use blake3::Hasher;
use ir::{Compilation, CompilationUnit};
use loader::Settings;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use crate::Diagnostic;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AnalysisCache {
    entries: HashMap<String, Vec<Diagnostic>>,
    #[serde(default)]
    context: Option<String>,
}

impl AnalysisCache {
    /// Loads the cache from disk; a missing or corrupted file yields an
    /// empty cache.
    pub fn load(path: &Path) -> Self {
        fs::read_to_string(path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    pub fn save(&self, path: &Path) -> io::Result<()> {
        let text = serde_json::to_string(self)?;
        fs::create_dir_all(path.parent().unwrap_or_else(|| Path::new(".")))?;
        fs::write(path, text)
    }

    pub fn get(&self, key: &str) -> Option<&Vec<Diagnostic>> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: String, diagnostics: Vec<Diagnostic>) {
        self.entries.insert(key, diagnostics);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// Drops every entry if they were produced under another context.
    pub fn validate(&mut self, context: &str) {
        if self.context.as_deref() != Some(context) {
            self.entries.clear();
            self.context = Some(context.to_owned());
        }
    }
}

pub fn hash_unit(unit: &CompilationUnit) -> String {
    let mut hasher = Hasher::new();
    hasher.update(unit.path.as_bytes());
    hasher.update(b"\0");
    let bytes = serde_json::to_vec(&unit.operations).unwrap_or_default();
    hasher.update(&bytes);
    hasher.finalize().to_hex().to_string()
}

/// Hash of everything besides the unit itself that analysis depends on.
pub fn context_hash(compilation: &Compilation, settings: &Settings) -> String {
    let mut hasher = Hasher::new();
    hasher.update(env!("CARGO_PKG_VERSION").as_bytes());
    hasher.update(b"\0");
    for definition in compilation.definitions() {
        let bytes = serde_json::to_vec(definition).unwrap_or_default();
        hasher.update(&bytes);
        hasher.update(b"\0");
    }
    let bytes = serde_json::to_vec(settings).unwrap_or_default();
    hasher.update(&bytes);
    hasher.finalize().to_hex().to_string()
}
