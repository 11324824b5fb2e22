//! Static fixtures used across harnesses.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use weblog_core::{Config, FilterRuleSet, RecordTransformer};

use super::builders::{asset_line, bot_line, kept_line};

/// The worked end-to-end example: cookie pair visitor, campaign-tagged URL.
pub const END_TO_END_LINE: &str = "-\tuid=v1\t10.0.0.1\t-\t-\t[2014-01-01T00:00:00Z]\tGET /index.html?foo=1 HTTP/1.1\t200\t2326\thttp://ref.example\tMozilla/5.0";

/// Expected output for [`END_TO_END_LINE`].
pub const END_TO_END_OUTPUT: &str =
    "v1\t10.0.0.1\t2014-01-01T00:00:00Z\t/index.html\t1\t200\thttp://ref.example\tMozilla/5.0";

/// Lines that cannot be parsed.
pub const CORPUS_MALFORMED: &[&str] = &[
    "",
    "just some text",
    "-\tuid=v1\t10.0.0.1\t-\t-\t[2014-01-01\tGET /a HTTP/1.1\t200\t0\t-",
    "v\t-\t10.0.0.1\t-\t-\t[2014-01-01\tGET\t200\t0\t-\tcurl",
    "-\tuid\t10.0.0.1\t-\t-\t[2014-01-01\tGET /a HTTP/1.1\t200\t0\t-\tcurl",
];

/// Rules from the embedded default configuration.
pub fn default_rules() -> Arc<FilterRuleSet> {
    Arc::new(
        Config::defaults()
            .rule_set()
            .expect("default rules must validate"),
    )
}

pub fn default_transformer() -> RecordTransformer {
    RecordTransformer::new(default_rules())
}

/// `n` lines mixing kept, excluded and malformed records in a fixed
/// 7 kept / 1 asset / 1 bot / 1 malformed rotation.
pub fn corpus_mixed(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| {
            let id = format!("visitor-{i}");
            match i % 10 {
                0 => asset_line(&id),
                1 => bot_line(&id),
                2 => "malformed".to_string(),
                _ => kept_line(&id, &format!("/page/{i}?cmp=c{}", i % 4)),
            }
        })
        .collect()
}

/// Write each shard's lines to `<dir>/shard-<i>.log`; returns the paths.
pub fn write_shards(dir: &Path, shards: &[Vec<String>]) -> Vec<PathBuf> {
    std::fs::create_dir_all(dir).expect("create input dir");
    shards
        .iter()
        .enumerate()
        .map(|(i, lines)| {
            let path = dir.join(format!("shard-{i}.log"));
            let mut body = lines.join("\n");
            body.push('\n');
            std::fs::write(&path, body).expect("write shard");
            path
        })
        .collect()
}

/// All record lines under an output directory's part files, sorted so runs
/// can be compared as sets.
pub fn read_output_lines(dir: &Path) -> Vec<String> {
    let mut lines = Vec::new();
    for entry in std::fs::read_dir(dir).expect("read output dir") {
        let path = entry.expect("dir entry").path();
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        if !name.starts_with("part-") {
            continue;
        }
        let body = std::fs::read_to_string(&path).expect("read part file");
        lines.extend(body.lines().map(str::to_string));
    }
    lines.sort();
    lines
}
