//! Shard processing: runs the transformer over one input file and writes
//! the emitted records to one part file.
//!
//! This is blocking I/O; the runner calls it from the tokio blocking pool.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use weblog_core::{RecordTransformer, TransformStats};

use crate::error::JobError;
use crate::input::Shard;

/// Outcome of one successfully processed shard.
#[derive(Debug, Clone)]
pub struct ShardReport {
    pub index: usize,
    pub input: PathBuf,
    pub output: PathBuf,
    pub stats: TransformStats,
    pub bytes_read: u64,
    pub elapsed: Duration,
}

/// Transform every line of `shard` into the part file at `output`.
pub fn process_shard(
    shard: &Shard,
    output: &Path,
    transformer: &RecordTransformer,
) -> Result<ShardReport, JobError> {
    let start = Instant::now();
    let reader = File::open(&shard.path)
        .map(BufReader::new)
        .map_err(|e| JobError::read(&shard.path, e))?;
    let mut writer = File::create(output)
        .map(BufWriter::new)
        .map_err(|e| JobError::write(output, e))?;

    let mut stats = TransformStats::new();
    let bytes_read = transform_stream(
        reader,
        &shard.path,
        &mut writer,
        output,
        transformer,
        &mut stats,
    )?;
    writer.flush().map_err(|e| JobError::write(output, e))?;

    let elapsed = start.elapsed();
    tracing::debug!(
        shard = shard.index,
        input = %shard.path.display(),
        lines = stats.lines_read,
        emitted = stats.records_emitted,
        excluded = stats.excluded(),
        malformed = stats.malformed(),
        elapsed_ms = elapsed.as_millis() as u64,
        "shard complete"
    );

    Ok(ShardReport {
        index: shard.index,
        input: shard.path.clone(),
        output: output.to_path_buf(),
        stats,
        bytes_read,
        elapsed,
    })
}

/// Stream lines from `reader` through `transformer`, writing one record per
/// line to `writer`. Returns the number of bytes read.
///
/// Lines may end in `\n` or `\r\n`; invalid UTF-8 is replaced lossily.
/// `source` and `sink` only label errors.
pub fn transform_stream<R, W>(
    mut reader: R,
    source: &Path,
    writer: &mut W,
    sink: &Path,
    transformer: &RecordTransformer,
    stats: &mut TransformStats,
) -> Result<u64, JobError>
where
    R: BufRead,
    W: Write,
{
    let mut buf = Vec::with_capacity(1024);
    let mut bytes_read = 0u64;

    loop {
        buf.clear();
        let n = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| JobError::read(source, e))?;
        if n == 0 {
            break;
        }
        bytes_read += n as u64;

        let line = String::from_utf8_lossy(trim_line_ending(&buf));
        if let Some(record) = transformer.apply(&line, stats) {
            writeln!(writer, "{record}").map_err(|e| JobError::write(sink, e))?;
        }
    }

    Ok(bytes_read)
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
