//! Compilation documents: serialized type definitions and operation trees
//! produced by the host compiler.

use anyhow::{bail, Context};
use ir::{Compilation, CompilationUnit, TypeDefinition};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::walk::collect_documents;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Some(DocumentFormat::Json),
            Some("yaml") | Some("yml") => Some(DocumentFormat::Yaml),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompilationDocument {
    #[serde(default)]
    pub types: Vec<TypeDefinition>,
    /// Required so unrelated JSON/YAML files are not mistaken for documents.
    pub units: Vec<CompilationUnit>,
}

pub fn parse_document_str(
    text: &str,
    format: DocumentFormat,
) -> anyhow::Result<CompilationDocument> {
    let doc = match format {
        DocumentFormat::Json => serde_json::from_str(text)?,
        DocumentFormat::Yaml => serde_yaml::from_str(text)?,
    };
    Ok(doc)
}

pub fn load_document(path: &Path) -> anyhow::Result<CompilationDocument> {
    let Some(format) = DocumentFormat::from_path(path) else {
        bail!("unsupported document format: {}", path.display());
    };
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read document: {}", path.display()))?;
    parse_document_str(&data, format)
        .with_context(|| format!("Failed to parse document: {}", path.display()))
}

#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub path: PathBuf,
    pub format: DocumentFormat,
    pub document: CompilationDocument,
}

#[derive(Debug, Clone, Default)]
/// All documents found under a scan root.
pub struct Workspace {
    pub documents: Vec<LoadedDocument>,
}

impl Workspace {
    /// Merges every document into one compilation; units keep document order.
    pub fn compilation(&self) -> Compilation {
        let types = self
            .documents
            .iter()
            .flat_map(|d| d.document.types.iter().cloned())
            .collect();
        let units = self
            .documents
            .iter()
            .flat_map(|d| d.document.units.iter().cloned())
            .collect();
        Compilation::from_parts(types, units)
    }

    /// Writes units of `compilation` back into the documents they came from.
    ///
    /// Returns the number of documents rewritten.
    pub fn write_back(&mut self, compilation: &Compilation) -> anyhow::Result<usize> {
        let mut units = compilation.units.iter();
        let mut written = 0;
        for loaded in &mut self.documents {
            let count = loaded.document.units.len();
            let updated: Vec<CompilationUnit> = units.by_ref().take(count).cloned().collect();
            if updated.len() != count {
                bail!("compilation does not match workspace documents");
            }
            if updated == loaded.document.units {
                continue;
            }
            loaded.document.units = updated;
            let text = match loaded.format {
                DocumentFormat::Json => serde_json::to_string_pretty(&loaded.document)?,
                DocumentFormat::Yaml => serde_yaml::to_string(&loaded.document)?,
            };
            fs::write(&loaded.path, text)
                .with_context(|| format!("Failed to write document: {}", loaded.path.display()))?;
            debug!(file = %loaded.path.display(), "Document rewritten");
            written += 1;
        }
        Ok(written)
    }
}

/// Loads every document under `root`. Files that are not compilation
/// documents are skipped with a warning.
pub fn load_workspace<F>(root: &Path, excludes: &F) -> anyhow::Result<Workspace>
where
    F: Fn(&Path) -> bool,
{
    let mut workspace = Workspace::default();
    for path in collect_documents(root, excludes)? {
        let Some(format) = DocumentFormat::from_path(&path) else {
            continue;
        };
        match load_document(&path) {
            Ok(document) => {
                debug!(file = %path.display(), units = document.units.len(), "Document loaded");
                workspace.documents.push(LoadedDocument {
                    path,
                    format,
                    document,
                });
            }
            Err(e) => warn!(file = %path.display(), error = %format!("{e:#}"), "Skipping file"),
        }
    }
    Ok(workspace)
}
