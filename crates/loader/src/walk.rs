use std::collections::{HashSet, VecDeque};
use std::fs::{self, FileType};
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::DocumentFormat;

/// File type of `path` without following symlinks; `None` when access is denied.
fn file_type(path: &Path) -> anyhow::Result<Option<FileType>> {
    match fs::symlink_metadata(path) {
        Ok(m) => Ok(Some(m.file_type())),
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            debug!(path = %path.display(), "Permission denied");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

fn children(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            debug!(path = %dir.display(), "Permission denied");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };
    let mut out = Vec::new();
    for entry in entries {
        match entry {
            Ok(e) => out.push(e.path()),
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => continue,
            Err(e) => return Err(e.into()),
        }
    }
    // Deterministic order regardless of the file system.
    out.sort();
    Ok(out)
}

/// Breadth-first walk calling `callback` for every regular file under `path`.
/// Symlinks and unreadable entries are skipped.
pub fn visit<F, C>(path: &Path, excludes: &F, callback: &mut C) -> anyhow::Result<()>
where
    F: Fn(&Path) -> bool,
    C: FnMut(&Path) -> anyhow::Result<()>,
{
    let mut pending: VecDeque<PathBuf> = VecDeque::from([path.to_path_buf()]);
    let mut visited: HashSet<PathBuf> = HashSet::new();

    while let Some(current) = pending.pop_front() {
        if !visited.insert(current.clone()) {
            continue;
        }
        if excludes(&current) {
            debug!(path = %current.display(), "Path excluded");
            continue;
        }
        let Some(kind) = file_type(&current)? else {
            continue;
        };
        if kind.is_symlink() {
            debug!(path = %current.display(), "Symlink skipped");
        } else if kind.is_file() {
            callback(&current)?;
        } else if kind.is_dir() {
            pending.extend(children(&current)?);
        }
    }
    Ok(())
}

/// JSON and YAML files under `root`, in walk order.
pub fn collect_documents<F>(root: &Path, excludes: &F) -> anyhow::Result<Vec<PathBuf>>
where
    F: Fn(&Path) -> bool,
{
    let mut out = Vec::new();
    visit(root, excludes, &mut |p| {
        if DocumentFormat::from_path(p).is_some() {
            debug!(path = %p.display(), "Document discovered");
            out.push(p.to_path_buf());
        }
        Ok(())
    })?;
    Ok(out)
}
