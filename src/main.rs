use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use weblog_core::Config;
use weblog_feeds::Job;

#[derive(Parser)]
#[command(
    name = "weblog",
    about = "Filter and normalise web access logs into a tab-delimited schema"
)]
struct Cli {
    /// Input file or directory of access logs.
    input: PathBuf,

    /// Output directory; must not already exist.
    output: PathBuf,

    /// Config file with exclusion patterns (TOML, YAML or JSON).
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Maximum shards processed at once. Overrides `job.workers`.
    #[arg(long, short)]
    workers: Option<usize>,

    /// Write the job report as JSON to this path.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    let config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    let rules = Arc::new(config.rule_set()?);
    tracing::debug!(
        url = ?rules.url_patterns(),
        bot = ?rules.bot_patterns(),
        ip = ?rules.ip_patterns(),
        "exclusion rules loaded"
    );
    let workers = cli.workers.unwrap_or_else(|| config.workers());

    let report = Job::new(rules, workers)
        .run(&cli.input, &cli.output)
        .await
        .context("running job")?;

    if let Some(path) = &cli.report {
        let json = serde_json::to_vec_pretty(&report)?;
        std::fs::write(path, json)
            .with_context(|| format!("writing job report to {}", path.display()))?;
    }

    if report.succeeded() {
        Ok(ExitCode::SUCCESS)
    } else {
        for failure in &report.failures {
            tracing::error!(input = %failure.input.display(), error = %failure.error, "shard failed");
        }
        Ok(ExitCode::FAILURE)
    }
}
