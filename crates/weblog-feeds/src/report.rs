//! Job report: merged counters and per-shard failures for one run.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

use weblog_core::{NormalizedRecord, TransformStats};

use crate::error::JobError;
use crate::shard::ShardReport;

/// A shard that did not complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShardFailure {
    pub input: PathBuf,
    pub error: String,
}

/// One part file written by a successful shard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartSummary {
    pub index: usize,
    pub input: PathBuf,
    pub output: PathBuf,
    pub records_emitted: u64,
    pub elapsed_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobReport {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Column names of every record in the part files.
    pub schema: &'static [&'static str],
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub shards_total: usize,
    pub shards_succeeded: usize,
    pub bytes_read: u64,
    /// Part files in shard order.
    pub parts: Vec<PartSummary>,
    pub failures: Vec<ShardFailure>,
    /// Counters summed over successful shards.
    pub stats: TransformStats,
}

impl JobReport {
    pub fn new(input: &Path, output: &Path, shards_total: usize) -> Self {
        Self {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            schema: &NormalizedRecord::COLUMNS,
            started_at: Utc::now(),
            finished_at: None,
            shards_total,
            shards_succeeded: 0,
            bytes_read: 0,
            parts: Vec::new(),
            failures: Vec::new(),
            stats: TransformStats::default(),
        }
    }

    pub fn record_shard(&mut self, shard: &ShardReport) {
        self.shards_succeeded += 1;
        self.bytes_read += shard.bytes_read;
        self.stats.merge(&shard.stats);
        self.parts.push(PartSummary {
            index: shard.index,
            input: shard.input.clone(),
            output: shard.output.clone(),
            records_emitted: shard.stats.records_emitted,
            elapsed_ms: shard.elapsed.as_millis() as u64,
        });
    }

    pub fn record_failure(&mut self, input: &Path, err: &JobError) {
        self.failures.push(ShardFailure {
            input: input.to_path_buf(),
            error: err.to_string(),
        });
    }

    /// Stamp the finish time. Shards complete in any order, so parts are
    /// sorted here.
    pub fn finish(&mut self) {
        self.parts.sort_by_key(|part| part.index);
        self.finished_at = Some(Utc::now());
    }

    /// Every shard finished without error.
    pub fn succeeded(&self) -> bool {
        self.failures.is_empty() && self.shards_succeeded == self.shards_total
    }

    pub fn elapsed(&self) -> Option<Duration> {
        self.finished_at.map(|end| end - self.started_at)
    }
}
