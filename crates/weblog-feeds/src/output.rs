//! Output directory layout.
//!
//! ```text
//! <output>/
//!   part-m-00000     records from shard 0
//!   part-m-00001     records from shard 1
//!   _SUCCESS         written last, only when every shard succeeded
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::JobError;

pub const SUCCESS_MARKER: &str = "_SUCCESS";

/// Output part file name for shard `index`.
pub fn part_file_name(index: usize) -> String {
    format!("part-m-{index:05}")
}

/// A freshly created, job-owned output directory.
#[derive(Debug, Clone)]
pub struct OutputDir {
    root: PathBuf,
}

impl OutputDir {
    /// Create `path`. Fails with [`JobError::OutputExists`] if anything is
    /// already there; parent directories are created as needed.
    pub fn create(path: &Path) -> Result<Self, JobError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| JobError::write(parent, e))?;
        }
        match fs::create_dir(path) {
            Ok(()) => Ok(Self {
                root: path.to_path_buf(),
            }),
            Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
                Err(JobError::OutputExists(path.to_path_buf()))
            }
            Err(err) => Err(JobError::write(path, err)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    pub fn part_path(&self, index: usize) -> PathBuf {
        self.root.join(part_file_name(index))
    }

    pub fn success_path(&self) -> PathBuf {
        self.root.join(SUCCESS_MARKER)
    }

    pub fn mark_success(&self) -> Result<(), JobError> {
        let marker = self.success_path();
        fs::write(&marker, b"").map_err(|e| JobError::write(marker, e))
    }
}
