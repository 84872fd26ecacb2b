use crate::benchlog::field::{OPTION_FIELDS, OUTCOME_FIELDS, read_block};
use crate::benchlog::{ConfigGroup, ConfigHeader, ParsedLog, ResultRecord};
use anyhow::Context;
use regex::Regex;
use std::fs;

/// Parse a benchmark log file into configuration groups.
pub fn parse_log_file(path: &str) -> anyhow::Result<ParsedLog> {
    let text = fs::read_to_string(path).with_context(|| format!("read log file {}", path))?;
    parse_log(&text).with_context(|| format!("parse log file {}", path))
}

/// Parse benchmark log text into configuration groups.
///
/// Expected shape (other lines are ignored):
///
/// ```text
/// #### mvcc bench ####
/// -Nb threads   : 4
/// -Initial size : 1024
/// -Buckets      : 64
/// -Duration     : 1000
/// -Update rate  : 200
/// -range        : 2048
///
/// #### total ####
/// Set size      : 1030 (expected: 1030)
/// Duration      : 1000 (ms)
/// #ops          : 150 (150.0 / s)
/// #read ops     : 100 (100.0 / s)
/// #update ops   : 50 (50.0 / s)
/// ```
///
/// A group is closed when a configuration block with different values shows
/// up; closed groups without records are dropped. A repeated identical
/// configuration keeps feeding the open group. The open group is always
/// flushed at end of input, even when it is empty.
pub fn parse_log(text: &str) -> anyhow::Result<ParsedLog> {
    let config_marker = Regex::new(r"mvcc bench")?;
    let result_marker = Regex::new(r"#+ total #+")?;
    let option_value = Regex::new(r"[0-9]+")?;
    let outcome_value = Regex::new(r"[0-9.]+")?;

    let mut current_header: Option<ConfigHeader> = None;
    let mut current_records: Vec<ResultRecord> = Vec::new();
    let mut out = ParsedLog::new();

    let mut lines = text.lines().enumerate();
    while let Some((lineno, line)) = lines.next() {
        if config_marker.is_match(line) {
            let [threads, initial_size, buckets, duration, update_rate, range] =
                read_block(&mut lines, "mvcc bench", OPTION_FIELDS, &option_value)?;
            let header = ConfigHeader {
                threads,
                initial_size,
                buckets,
                duration,
                update_rate,
                range,
            };

            if current_header.as_ref() == Some(&header) {
                log::debug!("line {}: repeated configuration, continuing group", lineno + 1);
                continue;
            }

            if !current_records.is_empty() {
                out.push(ConfigGroup {
                    header: current_header.take(),
                    content: std::mem::take(&mut current_records),
                });
            }
            log::debug!(
                "line {}: new configuration with {} threads",
                lineno + 1,
                header.threads
            );
            current_header = Some(header);
        } else if result_marker.is_match(line) {
            let [set_size, duration, ops, read_ops, update_ops] =
                read_block(&mut lines, "total", OUTCOME_FIELDS, &outcome_value)?;
            current_records.push(ResultRecord {
                set_size,
                duration,
                ops,
                read_ops,
                update_ops,
            });
        }
    }

    out.push(ConfigGroup {
        header: current_header,
        content: current_records,
    });

    Ok(out)
}
