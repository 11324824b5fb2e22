//! Per-shard transform counters.
//!
//! Each shard owns its own [`TransformStats`] and updates it with `&mut self`,
//! so nothing is shared between workers. The runner folds shard counters into
//! a job total with [`TransformStats::merge`].

use serde::Serialize;
use std::ops::AddAssign;

use crate::filter::Exclusion;
use crate::MalformedRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TransformStats {
    /// Lines handed to the transformer.
    pub lines_read: u64,
    /// Records emitted.
    pub records_emitted: u64,
    pub excluded_url: u64,
    pub excluded_bot: u64,
    pub excluded_ip: u64,
    /// Malformed lines, split by [`MalformedRecord::kind`].
    pub malformed_fields: u64,
    pub malformed_request: u64,
    pub malformed_cookie: u64,
}

impl TransformStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_read(&mut self) {
        self.lines_read += 1;
    }

    pub fn record_emitted(&mut self) {
        self.records_emitted += 1;
    }

    pub fn record_excluded(&mut self, reason: Exclusion) {
        match reason {
            Exclusion::Url => self.excluded_url += 1,
            Exclusion::Bot => self.excluded_bot += 1,
            Exclusion::Ip => self.excluded_ip += 1,
        }
    }

    pub fn record_malformed(&mut self, err: &MalformedRecord) {
        match err {
            MalformedRecord::TooFewFields { .. } => self.malformed_fields += 1,
            MalformedRecord::RequestLine { .. } => self.malformed_request += 1,
            MalformedRecord::CookiePair { .. } => self.malformed_cookie += 1,
        }
    }

    /// Total records dropped by exclusion rules.
    pub fn excluded(&self) -> u64 {
        self.excluded_url + self.excluded_bot + self.excluded_ip
    }

    /// Total lines skipped as malformed.
    pub fn malformed(&self) -> u64 {
        self.malformed_fields + self.malformed_request + self.malformed_cookie
    }

    /// Every line read ends up emitted, excluded or malformed.
    pub fn is_balanced(&self) -> bool {
        self.lines_read == self.records_emitted + self.excluded() + self.malformed()
    }

    pub fn merge(&mut self, other: &TransformStats) {
        self.lines_read += other.lines_read;
        self.records_emitted += other.records_emitted;
        self.excluded_url += other.excluded_url;
        self.excluded_bot += other.excluded_bot;
        self.excluded_ip += other.excluded_ip;
        self.malformed_fields += other.malformed_fields;
        self.malformed_request += other.malformed_request;
        self.malformed_cookie += other.malformed_cookie;
    }
}

impl AddAssign<&TransformStats> for TransformStats {
    fn add_assign(&mut self, rhs: &TransformStats) {
        self.merge(rhs);
    }
}
