//! Error types for weblog-core.
//!
//! - [`MalformedRecord`]: a single input line could not be parsed. Never fatal;
//!   the line is skipped and counted.
//! - [`ConfigError`]: the exclusion rules could not be loaded. Fatal at startup.

use thiserror::Error;

/// Why a raw line could not be turned into a record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedRecord {
    /// The line has fewer tab-delimited fields than the schema reads.
    #[error("expected at least {expected} fields, found {found}")]
    TooFewFields { expected: usize, found: usize },

    /// The request field has no second space-delimited token (the URL).
    #[error("request line has no URL: {request:?}")]
    RequestLine { request: String },

    /// No new cookie was issued and the existing cookie has no value part.
    #[error("cookie is not a name=value pair: {cookie:?}")]
    CookiePair { cookie: String },
}

impl MalformedRecord {
    /// Short label used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            MalformedRecord::TooFewFields { .. } => "too_few_fields",
            MalformedRecord::RequestLine { .. } => "request_line",
            MalformedRecord::CookiePair { .. } => "cookie_pair",
        }
    }
}

/// Configuration loading and validation errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config source could not be read or deserialized.
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// An empty pattern would match every value and exclude all records.
    #[error("{list} contains an empty pattern at position {index}")]
    EmptyPattern { list: &'static str, index: usize },

    #[error("job.workers must be at least 1")]
    ZeroWorkers,
}
