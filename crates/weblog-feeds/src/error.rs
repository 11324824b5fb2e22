//! Error types for the batch runner.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while setting up or running a job.
///
/// Setup errors (`InputNotFound`, `NoInput`, `OutputExists`) abort the job
/// before any shard starts. `Read` and `Write` fail a single shard.
#[derive(Error, Debug)]
pub enum JobError {
    #[error("input path does not exist: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("no input files found under {}", .0.display())]
    NoInput(PathBuf),

    #[error("output directory already exists: {}", .0.display())]
    OutputExists(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An emitted record or job artefact could not be persisted.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("worker pool closed")]
    PoolClosed(#[from] tokio::sync::AcquireError),

    /// A shard task panicked.
    #[error("shard task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl JobError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        JobError::Read {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        JobError::Write {
            path: path.into(),
            source,
        }
    }
}
