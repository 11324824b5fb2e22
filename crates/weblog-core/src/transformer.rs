//! Record transformer: one raw access-log line in, zero or one
//! [`NormalizedRecord`] out.
//!
//! Steps, in order:
//!
//! 1. split on tabs and check the field count;
//! 2. pull the URL out of the request line;
//! 3. evaluate the [`FilterRuleSet`] (an excluded line is a drop, not an error);
//! 4. derive visitor id, timestamp, campaign and base URL for kept lines.
//!
//! The transformer holds only an `Arc` to an immutable rule set, so clones
//! are cheap and any number of them can run in parallel.

use std::sync::Arc;

use crate::error::MalformedRecord;
use crate::filter::{Exclusion, FilterRuleSet};
use crate::stats::TransformStats;
use crate::types::{
    collect_tokens, field, AccessLine, NormalizedRecord, MIN_FIELDS, NO_CAMPAIGN, NO_NEW_COOKIE,
};

/// What happened to one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    Emit(NormalizedRecord),
    Excluded(Exclusion),
}

#[derive(Debug, Clone)]
pub struct RecordTransformer {
    rules: Arc<FilterRuleSet>,
}

impl RecordTransformer {
    pub fn new(rules: Arc<FilterRuleSet>) -> Self {
        Self { rules }
    }

    /// Classify and normalise a single line.
    pub fn transform(&self, line: &str) -> Result<Disposition, MalformedRecord> {
        let fields = AccessLine::split(line);
        if fields.len() < MIN_FIELDS {
            return Err(MalformedRecord::TooFewFields {
                expected: MIN_FIELDS,
                found: fields.len(),
            });
        }
        let text = |index: usize| fields.get(index).unwrap_or_default();

        let request = text(field::REQUEST);
        let url = request_url(request).ok_or_else(|| MalformedRecord::RequestLine {
            request: request.to_string(),
        })?;
        let user_agent = text(field::USER_AGENT);
        let ip = text(field::IP);

        if let Some(reason) = self.rules.exclusion(url, user_agent, ip) {
            return Ok(Disposition::Excluded(reason));
        }

        let visitor_id = visitor_id(text(field::NEW_COOKIE), text(field::COOKIE))?;
        let (url, campaign) = split_campaign(url);

        Ok(Disposition::Emit(NormalizedRecord {
            visitor_id: visitor_id.to_string(),
            ip: ip.to_string(),
            timestamp: clean_timestamp(text(field::TIMESTAMP)),
            url: url.to_string(),
            campaign: campaign.to_string(),
            response_code: text(field::RESPONSE_CODE).to_string(),
            referer: text(field::REFERER).to_string(),
            user_agent: user_agent.to_string(),
        }))
    }

    /// Transform `line`, updating `stats`. Malformed lines are logged and
    /// swallowed; only emitted records are returned.
    pub fn apply(&self, line: &str, stats: &mut TransformStats) -> Option<NormalizedRecord> {
        stats.record_read();
        match self.transform(line) {
            Ok(Disposition::Emit(record)) => {
                stats.record_emitted();
                Some(record)
            }
            Ok(Disposition::Excluded(reason)) => {
                stats.record_excluded(reason);
                None
            }
            Err(err) => {
                tracing::warn!(kind = err.kind(), error = %err, "skipping malformed record");
                stats.record_malformed(&err);
                None
            }
        }
    }
}

/// Second space-delimited token of the request line.
fn request_url(request: &str) -> Option<&str> {
    collect_tokens(request.split(' ')).get(1).copied()
}

/// Use the freshly issued cookie when there is one, else the value of the
/// existing `name=value` cookie.
fn visitor_id<'a>(new_cookie: &'a str, cookie: &'a str) -> Result<&'a str, MalformedRecord> {
    if !new_cookie.eq_ignore_ascii_case(NO_NEW_COOKIE) {
        return Ok(new_cookie);
    }
    collect_tokens(cookie.split('='))
        .get(1)
        .copied()
        .ok_or_else(|| MalformedRecord::CookiePair {
            cookie: cookie.to_string(),
        })
}

/// First space-delimited token of the timestamp field with brackets removed.
fn clean_timestamp(raw: &str) -> String {
    let first = raw.split(' ').next().unwrap_or_default();
    first.chars().filter(|&c| c != '[' && c != ']').collect()
}

/// Split the URL on `?` and `=`. With more than two tokens the third is the
/// campaign and the first is the base URL; otherwise the URL is returned
/// untouched with [`NO_CAMPAIGN`].
fn split_campaign(url: &str) -> (&str, &str) {
    let tokens = collect_tokens(url.split(['?', '=']));
    if tokens.len() > 2 {
        (tokens[0], tokens[2])
    } else {
        (url, NO_CAMPAIGN)
    }
}
