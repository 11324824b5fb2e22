//! weblog-core — filtering and normalisation of web access-log lines.
//!
//! # Architecture
//!
//! ```text
//! Config ──► FilterRuleSet (Arc, read-only)
//!                 │
//! raw line ──► RecordTransformer ──► NormalizedRecord | excluded | malformed
//!                 │
//!                 └──► TransformStats (owned per shard)
//! ```
//!
//! The transformer is a pure function of the line and the rule set. No state
//! is carried between lines, so callers may shard input freely and run any
//! number of transformers in parallel.

pub mod config;
pub mod error;
pub mod filter;
pub mod stats;
pub mod transformer;
pub mod types;

pub use config::Config;
pub use error::{ConfigError, MalformedRecord};
pub use filter::{Exclusion, FilterRuleSet};
pub use stats::TransformStats;
pub use transformer::{Disposition, RecordTransformer};
pub use types::NormalizedRecord;
