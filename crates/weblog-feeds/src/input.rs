//! Input discovery: turns an input location into an ordered list of shards.
//!
//! A file is a single shard. A directory is walked recursively with symlinks
//! followed; every regular, non-empty file becomes one shard. Entries whose
//! names start with `_` or `.` (job markers, hidden files) are skipped at every
//! level. Symlink loops are skipped, and a file reachable through more than one
//! path is only read once.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::error::JobError;

/// One independently processable input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shard {
    /// Position in sorted input order; names the output part file.
    pub index: usize,
    pub path: PathBuf,
    /// File size in bytes at discovery time.
    pub len: u64,
}

/// Discover the shards under `input`, sorted by path.
pub fn discover_shards(input: &Path) -> Result<Vec<Shard>, JobError> {
    let meta = match fs::metadata(input) {
        Ok(meta) => meta,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(JobError::InputNotFound(input.to_path_buf()));
        }
        Err(err) => return Err(JobError::read(input, err)),
    };

    let mut files = if meta.is_file() {
        vec![(input.to_path_buf(), meta.len())]
    } else {
        walk(input)?
    };
    files.sort();

    if files.is_empty() {
        return Err(JobError::NoInput(input.to_path_buf()));
    }

    Ok(files
        .into_iter()
        .enumerate()
        .map(|(index, (path, len))| Shard { index, path, len })
        .collect())
}

fn walk(root: &Path) -> Result<Vec<(PathBuf, u64)>, JobError> {
    let mut seen = HashSet::new();
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_ignored(entry));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.loop_ancestor().is_some() => {
                tracing::warn!(path = ?err.path(), "skipping symlink loop");
                continue;
            }
            Err(err) => {
                let path = err.path().unwrap_or(root).to_path_buf();
                return Err(JobError::read(path, io::Error::from(err)));
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let len = entry
            .metadata()
            .map_err(|e| JobError::read(path, io::Error::from(e)))?
            .len();
        if len == 0 {
            continue;
        }
        let canonical = fs::canonicalize(path).map_err(|e| JobError::read(path, e))?;
        if !seen.insert(canonical) {
            tracing::debug!(path = %path.display(), "skipping file already reached by another path");
            continue;
        }
        files.push((entry.into_path(), len));
    }

    Ok(files)
}

fn is_ignored(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    name.starts_with('_') || name.starts_with('.')
}
