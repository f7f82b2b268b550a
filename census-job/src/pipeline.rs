//! The fan-out/fan-in engine that drives one batch run.
//!
//! Extraction runs as one task per input file, folding entries into a
//! shared concurrent map keyed by occupation. Grouping is complete once
//! every extract task has joined; only then are the keys partitioned into
//! buckets and aggregated in parallel. Summaries drain through a channel
//! into the single storage writer.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Error};
use bytes::Bytes;
use dashmap::DashMap;
use glob::glob;
use itertools::Itertools;
use tokio::sync::mpsc;
use tracing::{debug, info};

use common::{ihash, ExtractFn, GroupedEntry, Summary, Workload};

use crate::storage;

/// Counters reported after a completed run.
#[derive(Debug, Default, Clone, Copy)]
pub struct RunStats {
    pub files: usize,
    pub entries: usize,
    pub groups: usize,
    pub rows: usize,
}

/// Resolve the input argument into a sorted list of input files.
///
/// Accepts a plain file, a directory (read non-recursively), or a glob
/// pattern. Resolving to nothing is an error.
pub fn resolve_inputs(input: &str) -> Result<Vec<PathBuf>, Error> {
    let pattern = if Path::new(input).is_dir() {
        format!("{}/*", input.trim_end_matches('/'))
    } else {
        input.to_string()
    };

    let files = glob(&pattern)?
        .flatten()
        .filter(|path| path.is_file())
        .sorted()
        .collect::<Vec<_>>();

    if files.is_empty() {
        return Err(anyhow!("no input files found at `{input}`"));
    }
    Ok(files)
}

/// Run one batch job: extract, group, aggregate, persist.
pub async fn run(
    workload: Workload,
    input: &str,
    sink: &storage::Client,
    n_tasks: usize,
) -> Result<RunStats, Error> {
    let files = resolve_inputs(input)?;
    info!("starting run over {} input file(s)", files.len());

    let groups: Arc<DashMap<String, Vec<GroupedEntry>>> = Arc::new(DashMap::new());

    // 1. Extract stage: one task per input file.
    let mut extract_tasks = Vec::with_capacity(files.len());
    for file in &files {
        let groups = groups.clone();
        let file = file.clone();
        let extract_fn = workload.extract_fn;
        extract_tasks.push(tokio::spawn(async move {
            extract_file(&file, extract_fn, &groups).await
        }));
    }

    let mut entries = 0usize;
    for task in extract_tasks {
        entries += task.await??;
    }

    // Every extract task has joined, so grouping is complete and each key
    // now holds its full set of entries.
    let n_groups = groups.len();
    info!("grouped {entries} entries into {n_groups} occupation group(s)");

    // 2. Aggregate stage: partition the keys into buckets, one task each.
    let n_buckets = n_tasks.max(1).min(n_groups.max(1));
    let mut buckets: Vec<Vec<String>> = vec![Vec::new(); n_buckets];
    for key in groups.iter().map(|group| group.key().clone()) {
        let bucket = (ihash(key.as_bytes()) % n_buckets as u32) as usize;
        buckets[bucket].push(key);
    }

    let (tx, mut rx) = mpsc::channel::<Summary>(64);
    let mut aggregate_tasks = Vec::with_capacity(n_buckets);
    for bucket in buckets {
        let groups = groups.clone();
        let tx = tx.clone();
        let aggregate_fn = workload.aggregate_fn;
        aggregate_tasks.push(tokio::spawn(async move {
            for key in bucket {
                let (key, group) = groups
                    .remove(&key)
                    .ok_or_else(|| anyhow!("group `{key}` disappeared before aggregation"))?;
                let summary = aggregate_fn(&key, &group)?;
                if tx.send(summary).await.is_err() {
                    // The writer hung up; the job is already failing.
                    break;
                }
            }
            Ok::<(), Error>(())
        }));
    }
    drop(tx);

    // 3. Fan-in: the single writer drains the channel into storage.
    let mut rows = 0usize;
    while let Some(summary) = rx.recv().await {
        debug!("{summary}");
        sink.insert_summary(&summary)?;
        rows += 1;
    }

    for task in aggregate_tasks {
        task.await??;
    }

    Ok(RunStats {
        files: files.len(),
        entries,
        groups: n_groups,
        rows,
    })
}

async fn extract_file(
    path: &Path,
    extract_fn: ExtractFn,
    groups: &DashMap<String, Vec<GroupedEntry>>,
) -> Result<usize, Error> {
    let contents = tokio::fs::read(path)
        .await
        .map_err(|e| anyhow!("unable to read input `{}`: {}", path.display(), e))?;

    let mut count = 0usize;
    for entry in extract_fn(Bytes::from(contents))? {
        count += 1;
        groups.entry(entry.occupation.clone()).or_default().push(entry);
    }

    debug!("extracted {} entries from `{}`", count, path.display());
    Ok(count)
}
