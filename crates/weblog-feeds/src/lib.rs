//! weblog-feeds — local sharded batch runner for weblog.
//!
//! Feeds every file under an input location through a
//! [`weblog_core::RecordTransformer`] and writes one part file per input
//! file:
//!
//! ```text
//! input/ ──► discover_shards ──► [Shard] ──► process_shard (blocking pool, ≤ workers)
//!                                                 │
//!                           output/part-m-NNNNN ◄─┘   + _SUCCESS, JobReport
//! ```

pub mod error;
pub mod input;
pub mod output;
pub mod report;
pub mod runner;
pub mod shard;

pub use error::JobError;
pub use input::{discover_shards, Shard};
pub use output::OutputDir;
pub use report::{JobReport, PartSummary, ShardFailure};
pub use runner::Job;
pub use shard::{process_shard, transform_stream, ShardReport};
