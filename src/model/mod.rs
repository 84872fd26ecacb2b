//! Aggregation model: per-thread-count throughput derived from parsed groups.

use crate::Result;
use crate::benchlog::{ConfigGroup, ResultRecord};
use anyhow::{Context, bail};
use indexmap::IndexMap;

/// Figures derived from one configuration group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSummary {
    pub threads: u64,
    pub records: usize,
    pub read_ops: f64,
    pub update_ops: f64,
    /// Duration of one run times the number of runs, in seconds.
    pub seconds: f64,
    /// (read_ops + update_ops) / seconds.
    pub ops_per_sec: f64,
}

/// Thread count -> total ops per second, in first-insertion order.
pub type ThroughputSeries = IndexMap<u64, f64>;

/// Fold group figures into a series. A thread count seen again keeps its
/// position and takes the later value.
pub fn series_from_summaries(summaries: &[GroupSummary]) -> ThroughputSeries {
    let mut series = ThroughputSeries::new();
    for s in summaries {
        if let Some(prev) = series.insert(s.threads, s.ops_per_sec) {
            log::debug!(
                "{} threads reported again: {} ops/s replaces {} ops/s",
                s.threads,
                s.ops_per_sec,
                prev
            );
        }
    }
    series
}

/// Derive per-group figures. Performs:
/// - skip (with a warning) groups without records, whose elapsed time is zero
/// - reject records that appear before any configuration block
/// - reject a zero Duration, which would make the rate undefined
pub fn summarize_groups(groups: &[ConfigGroup]) -> Result<Vec<GroupSummary>> {
    let mut out = Vec::new();

    for (idx, group) in groups.iter().enumerate() {
        if group.content.is_empty() {
            match &group.header {
                Some(h) => log::warn!(
                    "group {}: configuration with {} threads has no result records, skipping",
                    idx,
                    h.threads
                ),
                None => log::warn!("group {}: no configuration and no result records, skipping", idx),
            }
            continue;
        }

        let Some(header) = &group.header else {
            bail!(
                "group {}: {} result record(s) appear before any mvcc bench configuration",
                idx,
                group.content.len()
            );
        };

        let threads: u64 = header
            .threads
            .parse()
            .with_context(|| format!("group {}: bad #threads value {:?}", idx, header.threads))?;
        let duration_ms: u64 = header
            .duration
            .parse()
            .with_context(|| format!("group {}: bad Duration value {:?}", idx, header.duration))?;
        if duration_ms == 0 {
            bail!(
                "group {}: Duration is 0 ms for {} threads, cannot compute ops per second",
                idx,
                threads
            );
        }

        let mut read_ops = 0.0f64;
        let mut update_ops = 0.0f64;
        for (ridx, record) in group.content.iter().enumerate() {
            let (reads, updates) = record_ops(record)
                .with_context(|| format!("group {} record {}", idx, ridx))?;
            read_ops += reads;
            update_ops += updates;
        }

        let records = group.content.len();
        let seconds = duration_ms as f64 * records as f64 / 1000.0;
        let ops_per_sec = (read_ops + update_ops) / seconds;

        log::debug!(
            "group {}: {} threads, {} records, {} ops in {} s -> {} ops/s",
            idx,
            threads,
            records,
            read_ops + update_ops,
            seconds,
            ops_per_sec
        );

        out.push(GroupSummary {
            threads,
            records,
            read_ops,
            update_ops,
            seconds,
            ops_per_sec,
        });
    }

    Ok(out)
}

/// Thread count -> combined read+update ops per second over each group.
pub fn build_series(groups: &[ConfigGroup]) -> Result<ThroughputSeries> {
    Ok(series_from_summaries(&summarize_groups(groups)?))
}

fn record_ops(record: &ResultRecord) -> Result<(f64, f64)> {
    let reads: f64 = record
        .read_ops
        .parse()
        .with_context(|| format!("bad #read ops value {:?}", record.read_ops))?;
    let updates: f64 = record
        .update_ops
        .parse()
        .with_context(|| format!("bad #update ops value {:?}", record.update_ops))?;
    Ok((reads, updates))
}
