//! Resolve command line paths into the documents yamltree will open.
//!
//! Files named explicitly are always taken, whatever their extension: opening a
//! non-YAML file is how the outline ends up unbound. Directories are walked
//! recursively and only contribute files whose extension is configured as YAML.

use crate::document::Document;
use std::path::{Path, PathBuf};
use std::{fs, io};

/// Expand files and directories into a sorted, de-duplicated list of documents.
///
/// With no paths at all, the current directory is scanned.
///
/// # Errors
///
/// Returns an error if a named path does not exist or a directory cannot be read.
pub fn find_documents(paths: Vec<PathBuf>, extensions: &[String]) -> io::Result<Vec<PathBuf>> {
    let paths = if paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        paths
    };

    let mut found = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut in_dir = Vec::new();
            walk(&path, extensions, &mut in_dir)?;
            in_dir.sort();
            found.extend(in_dir);
        } else if path.is_file() {
            found.push(path);
        } else {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{}: no such file or directory", path.display()),
            ));
        }
    }

    let mut seen = std::collections::HashSet::new();
    found.retain(|path| seen.insert(path.clone()));
    Ok(found)
}

fn walk(dir: &Path, extensions: &[String], found: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let hidden = path
            .file_name()
            .is_some_and(|name| name.to_string_lossy().starts_with('.'));
        if hidden {
            continue;
        }
        if path.is_dir() {
            walk(&path, extensions, found)?;
        } else if has_extension(&path, extensions) {
            found.push(path);
        }
    }
    Ok(())
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension().is_some_and(|ext| {
        let ext = ext.to_string_lossy();
        extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext))
    })
}

/// Read every path into a document snapshot, skipping (and logging) unreadable files.
#[must_use]
pub fn load_documents(paths: &[PathBuf], extensions: &[String]) -> Vec<Document> {
    paths
        .iter()
        .filter_map(|path| match Document::open(path, extensions) {
            Ok(document) => Some(document),
            Err(e) => {
                log::warn!("skipping {}: {e}", path.display());
                None
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;
