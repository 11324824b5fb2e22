//! Filter rule set: decides whether an access record is kept.
//!
//! Three independent exclusion dimensions:
//!
//! | Dimension | Matched against | Rule |
//! |-----------|-----------------|------|
//! | URL | request URL | case-sensitive substring |
//! | bot | user-agent | case-sensitive substring |
//! | IP | source address | exact, ASCII case-insensitive |
//!
//! A [`FilterRuleSet`] is immutable once built. Share it behind an
//! `Arc` between workers; evaluation takes `&self` only.

use std::fmt;

/// Which exclusion dimension rejected a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Exclusion {
    Url,
    Bot,
    Ip,
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exclusion::Url => write!(f, "url"),
            Exclusion::Bot => write!(f, "bot"),
            Exclusion::Ip => write!(f, "ip"),
        }
    }
}

/// Immutable set of exclusion patterns. An empty list excludes nothing in
/// its dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterRuleSet {
    url_patterns: Vec<String>,
    bot_patterns: Vec<String>,
    ip_patterns: Vec<String>,
}

impl FilterRuleSet {
    pub fn new<U, B, I>(url_patterns: U, bot_patterns: B, ip_patterns: I) -> Self
    where
        U: IntoIterator,
        U::Item: Into<String>,
        B: IntoIterator,
        B::Item: Into<String>,
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            url_patterns: url_patterns.into_iter().map(Into::into).collect(),
            bot_patterns: bot_patterns.into_iter().map(Into::into).collect(),
            ip_patterns: ip_patterns.into_iter().map(Into::into).collect(),
        }
    }

    /// A rule set that keeps every record.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn url_patterns(&self) -> &[String] {
        &self.url_patterns
    }

    pub fn bot_patterns(&self) -> &[String] {
        &self.bot_patterns
    }

    pub fn ip_patterns(&self) -> &[String] {
        &self.ip_patterns
    }

    pub fn matches_excluded_url(&self, url: &str) -> bool {
        self.url_patterns.iter().any(|p| url.contains(p.as_str()))
    }

    pub fn matches_excluded_bot(&self, user_agent: &str) -> bool {
        self.bot_patterns
            .iter()
            .any(|p| user_agent.contains(p.as_str()))
    }

    pub fn matches_excluded_ip(&self, ip: &str) -> bool {
        self.ip_patterns.iter().any(|p| p.eq_ignore_ascii_case(ip))
    }

    /// The first dimension (URL, bot, IP) that excludes this record, if any.
    pub fn exclusion(&self, url: &str, user_agent: &str, ip: &str) -> Option<Exclusion> {
        if self.matches_excluded_url(url) {
            Some(Exclusion::Url)
        } else if self.matches_excluded_bot(user_agent) {
            Some(Exclusion::Bot)
        } else if self.matches_excluded_ip(ip) {
            Some(Exclusion::Ip)
        } else {
            None
        }
    }

    /// `true` iff no exclusion dimension matches.
    pub fn should_keep(&self, url: &str, user_agent: &str, ip: &str) -> bool {
        self.exclusion(url, user_agent, ip).is_none()
    }
}
