//! Configuration types for weblog.
//!
//! [`Config::load`] layers, lowest priority first:
//!
//! 1. the embedded defaults below;
//! 2. an optional config file (TOML, YAML or JSON, chosen by extension);
//! 3. `WEBLOG_*` environment variables, e.g.
//!    `WEBLOG_BOT_EXCLUDE_PATTERNS=Googlebot,bingbot` or `WEBLOG_JOB__WORKERS=8`.
//!
//! [`Config::defaults`] returns the embedded layer alone without touching the
//! filesystem or environment (useful in tests).

use serde::Deserialize;
use std::path::Path;

use crate::error::ConfigError;
use crate::filter::FilterRuleSet;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
# Static assets: scripts, images, stylesheets
url_exclude_patterns = [".js", ".jpg", ".css"]

# Known crawlers
bot_exclude_patterns = ["Googlebot"]

# Source addresses to drop
ip_exclude_patterns = ["75.72.48.19"]

[job]
"#;

const ENV_PREFIX: &str = "WEBLOG";

const LIST_KEYS: [&str; 3] = [
    "url_exclude_patterns",
    "bot_exclude_patterns",
    "ip_exclude_patterns",
];

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration. Setting a pattern list to `[]` disables that
/// exclusion dimension.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub url_exclude_patterns: Vec<String>,
    #[serde(default)]
    pub bot_exclude_patterns: Vec<String>,
    #[serde(default)]
    pub ip_exclude_patterns: Vec<String>,
    #[serde(default)]
    pub job: JobConfig,
}

/// `[job]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobConfig {
    /// Maximum shards processed at once. Defaults to the available parallelism.
    #[serde(default)]
    pub workers: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load the layered configuration. A `path` that is given must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml));

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let mut env = config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .list_separator(",")
            .try_parsing(true);
        for key in LIST_KEYS {
            env = env.with_list_parse_key(key);
        }

        let cfg: Self = builder.add_source(env).build()?.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    /// Reject settings that would make the job meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let lists = LIST_KEYS.into_iter().zip([
            &self.url_exclude_patterns,
            &self.bot_exclude_patterns,
            &self.ip_exclude_patterns,
        ]);
        for (list, patterns) in lists {
            if let Some(index) = patterns.iter().position(|p| p.trim().is_empty()) {
                return Err(ConfigError::EmptyPattern { list, index });
            }
        }
        if self.job.workers == Some(0) {
            return Err(ConfigError::ZeroWorkers);
        }
        Ok(())
    }

    /// Build the immutable rule set shared by all workers.
    pub fn rule_set(&self) -> Result<FilterRuleSet, ConfigError> {
        self.validate()?;
        Ok(FilterRuleSet::new(
            self.url_exclude_patterns.iter().cloned(),
            self.bot_exclude_patterns.iter().cloned(),
            self.ip_exclude_patterns.iter().cloned(),
        ))
    }

    /// Configured worker count, or the machine's available parallelism.
    pub fn workers(&self) -> usize {
        self.job.workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
