//! Core types for weblog-core.
//!
//! This module defines the positional layout of a raw access-log line
//! ([`field`]), the borrowed [`AccessLine`] view over one split line, and the
//! [`NormalizedRecord`] emitted for every line that survives filtering.

use std::fmt;

/// Delimiter used for both input fields and output fields.
pub const DELIMITER: char = '\t';

/// Minimum number of tab-delimited fields a raw line must carry. The highest
/// index read is [`field::USER_AGENT`].
pub const MIN_FIELDS: usize = field::USER_AGENT + 1;

/// Campaign value written when the URL carries no campaign parameter.
pub const NO_CAMPAIGN: &str = "none";

/// Marker in [`field::NEW_COOKIE`] meaning no cookie was issued on this request.
pub const NO_NEW_COOKIE: &str = "-";

/// Positional indexes into a raw access-log line.
pub mod field {
    /// Freshly issued cookie value, or `-`.
    pub const NEW_COOKIE: usize = 0;
    /// Existing cookie as a `name=value` pair.
    pub const COOKIE: usize = 1;
    pub const IP: usize = 2;
    /// Bracket-prefixed timestamp, e.g. `[2014-01-01T00:00:00Z`.
    pub const TIMESTAMP: usize = 5;
    /// Request line, e.g. `GET /index.html HTTP/1.1`.
    pub const REQUEST: usize = 6;
    pub const RESPONSE_CODE: usize = 7;
    pub const REFERER: usize = 9;
    pub const USER_AGENT: usize = 10;
}

/// Collect the pieces of a `str::split`, dropping trailing empty tokens.
///
/// Raw lines, the request line, the cookie pair and the URL are all tokenised this way,
/// so `"/page?id="` yields `["/page", "id"]` and `"uid="` yields `["uid"]`.
/// Leading and interior empty tokens are kept.
pub fn collect_tokens<'a>(pieces: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    let mut tokens: Vec<&'a str> = pieces.into_iter().collect();
    while tokens.last().is_some_and(|t| t.is_empty()) {
        tokens.pop();
    }
    tokens
}

/// A raw line split into its positional fields. Borrowed from the input; no
/// field is copied until a [`NormalizedRecord`] is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessLine<'a> {
    fields: Vec<&'a str>,
}

impl<'a> AccessLine<'a> {
    /// Split `line` on [`DELIMITER`]. Trailing empty fields are dropped like
    /// every other split in this crate, so they do not count towards
    /// [`MIN_FIELDS`].
    pub fn split(line: &'a str) -> Self {
        Self {
            fields: collect_tokens(line.split(DELIMITER)),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field at `index`, or `None` when the line is too short.
    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.fields.get(index).copied()
    }
}

/// The normalised output record.
///
/// Field order matches the output schema; [`fmt::Display`] renders the
/// tab-joined line without a trailing newline.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedRecord {
    pub visitor_id: String,
    pub ip: String,
    pub timestamp: String,
    /// Request URL, with the query string removed when a campaign was found.
    pub url: String,
    pub campaign: String,
    pub response_code: String,
    pub referer: String,
    pub user_agent: String,
}

impl NormalizedRecord {
    /// Number of fields in a rendered record.
    pub const FIELD_COUNT: usize = 8;

    /// Column names in output order.
    pub const COLUMNS: [&'static str; Self::FIELD_COUNT] = [
        "visitor_id",
        "ip",
        "timestamp",
        "url",
        "campaign",
        "response_code",
        "referer",
        "user_agent",
    ];

    /// Field values in output order.
    pub fn values(&self) -> [&str; Self::FIELD_COUNT] {
        [
            self.visitor_id.as_str(),
            self.ip.as_str(),
            self.timestamp.as_str(),
            self.url.as_str(),
            self.campaign.as_str(),
            self.response_code.as_str(),
            self.referer.as_str(),
            self.user_agent.as_str(),
        ]
    }
}

impl fmt::Display for NormalizedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.values().iter().enumerate() {
            if i > 0 {
                write!(f, "{DELIMITER}")?;
            }
            f.write_str(value)?;
        }
        Ok(())
    }
}
