//! Domain-specific assertion macros for weblog harnesses.
//!
//! These wrap `pretty_assertions` and add context-rich failure messages that
//! make it clear which line produced which disposition.

// ---------------------------------------------------------------------------
// Disposition assertions
// ---------------------------------------------------------------------------

/// Assert that a line is kept and renders to the expected output line.
///
/// ```rust
/// assert_emits!(transformer, line, "v1\t10.0.0.1\t...");
/// ```
#[macro_export]
macro_rules! assert_emits {
    ($transformer:expr, $line:expr, $expected:expr) => {{
        let line: &str = &$line;
        match $transformer.transform(line) {
            Ok(weblog_core::Disposition::Emit(record)) => {
                pretty_assertions::assert_eq!(record.to_string(), $expected)
            }
            other => panic!(
                "assert_emits! failed: expected a record\n  line:   {:?}\n  actual: {:?}",
                line, other
            ),
        }
    }};
}

/// Assert that a line is dropped by a specific exclusion dimension.
///
/// ```rust
/// assert_excluded!(transformer, line, Exclusion::Bot);
/// ```
#[macro_export]
macro_rules! assert_excluded {
    ($transformer:expr, $line:expr, $reason:expr) => {{
        let line: &str = &$line;
        let expected: weblog_core::Exclusion = $reason;
        match $transformer.transform(line) {
            Ok(weblog_core::Disposition::Excluded(actual)) if actual == expected => {}
            other => panic!(
                "assert_excluded! failed: expected exclusion by {}\n  line:   {:?}\n  actual: {:?}",
                expected, line, other
            ),
        }
    }};
}

/// Assert that a line is rejected as malformed.
#[macro_export]
macro_rules! assert_malformed {
    ($transformer:expr, $line:expr) => {{
        let line: &str = &$line;
        match $transformer.transform(line) {
            Err(_) => {}
            other => panic!(
                "assert_malformed! failed: line was accepted\n  line:   {:?}\n  actual: {:?}",
                line, other
            ),
        }
    }};
}

// ---------------------------------------------------------------------------
// Output assertions
// ---------------------------------------------------------------------------

/// Every output line must have exactly eight tab-separated fields.
pub fn assert_output_schema(lines: &[String]) {
    for line in lines {
        let fields = line.split('\t').count();
        assert_eq!(
            fields,
            weblog_core::NormalizedRecord::FIELD_COUNT,
            "output line has {fields} fields: {line:?}"
        );
    }
}
