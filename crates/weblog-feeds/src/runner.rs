//! Job runner: applies the transformer to every shard of an input location.
//!
//! Shards run on the tokio blocking pool, at most `workers` at a time. Each
//! shard owns its reader, writer and counters; the only thing shared is the
//! read-only rule set inside the [`RecordTransformer`]. Output order across
//! shards is unspecified.
//!
//! A failing shard does not stop the others. The job succeeds only if every
//! shard does, in which case the `_SUCCESS` marker is written.

use std::path::Path;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use weblog_core::{FilterRuleSet, RecordTransformer};

use crate::error::JobError;
use crate::input::discover_shards;
use crate::output::OutputDir;
use crate::report::JobReport;
use crate::shard::process_shard;

#[derive(Debug, Clone)]
pub struct Job {
    transformer: RecordTransformer,
    workers: usize,
}

impl Job {
    /// `workers` below 1 is treated as 1.
    pub fn new(rules: Arc<FilterRuleSet>, workers: usize) -> Self {
        Self {
            transformer: RecordTransformer::new(rules),
            workers: workers.max(1),
        }
    }

    /// Run the job. Setup problems (missing input, existing output) are
    /// returned as errors; shard failures are reported in the [`JobReport`].
    pub async fn run(&self, input: &Path, output: &Path) -> Result<JobReport, JobError> {
        let shards = discover_shards(input)?;
        let out = OutputDir::create(output)?;
        let mut report = JobReport::new(input, output, shards.len());

        tracing::info!(
            input = %input.display(),
            output = %output.display(),
            shards = shards.len(),
            input_bytes = shards.iter().map(|s| s.len).sum::<u64>(),
            workers = self.workers,
            "job started"
        );

        let permits = Arc::new(Semaphore::new(self.workers));
        let mut tasks = JoinSet::new();
        for shard in shards {
            let permit = Arc::clone(&permits).acquire_owned().await?;
            let transformer = self.transformer.clone();
            let part = out.part_path(shard.index);
            tasks.spawn_blocking(move || {
                let _permit = permit;
                let result = process_shard(&shard, &part, &transformer);
                (shard, result)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            let (shard, result) = joined?;
            match result {
                Ok(shard_report) => report.record_shard(&shard_report),
                Err(err) => {
                    tracing::warn!(shard = shard.index, input = %shard.path.display(), error = %err, "shard failed");
                    report.record_failure(&shard.path, &err);
                }
            }
        }
        report.finish();

        if report.succeeded() {
            out.mark_success()?;
        }

        tracing::info!(
            succeeded = report.succeeded(),
            shards_failed = report.failures.len(),
            lines = report.stats.lines_read,
            emitted = report.stats.records_emitted,
            excluded_url = report.stats.excluded_url,
            excluded_bot = report.stats.excluded_bot,
            excluded_ip = report.stats.excluded_ip,
            malformed_fields = report.stats.malformed_fields,
            malformed_request = report.stats.malformed_request,
            malformed_cookie = report.stats.malformed_cookie,
            "job finished"
        );

        Ok(report)
    }
}
