//! Applications specify extract and aggregate tasks, and the job driver
//! runs them over a set of local input files. For simplicity, data is
//! read straight from the filesystem and summaries land in an embedded
//! SQLite database rather than a cluster store.

use std::hash::Hasher;

use bytes::Bytes;

pub mod codec;
pub mod record;
pub mod utils;

pub use record::{GroupedEntry, Summary};

/////////////////////////////////////////////////////////////////////////////
// Pipeline application types
/////////////////////////////////////////////////////////////////////////////

/// The output of an application extract function.
///
/// The outer [`anyhow::Result`] accounts for errors that arise while
/// decoding the input chunk. Lines that do not parse as records are not
/// errors: the extractor drops them before they reach the iterator.
pub type ExtractOutput = anyhow::Result<Box<dyn Iterator<Item = GroupedEntry>>>;

/// An extract function takes one chunk of raw input (the contents of a
/// single input file) and returns an iterator over the grouped entries
/// found in it.
pub type ExtractFn = fn(chunk: Bytes) -> ExtractOutput;

/// An aggregate function takes a grouping key and every entry observed
/// for that key. It returns an [`anyhow::Result`] containing the single
/// summary for that key.
pub type AggregateFn = fn(key: &str, entries: &[GroupedEntry]) -> anyhow::Result<Summary>;

/// A pipeline application.
#[derive(Copy, Clone)]
pub struct Workload {
    pub extract_fn: ExtractFn,
    pub aggregate_fn: AggregateFn,
}

/// Hashes a grouping key. Compute an aggregation bucket for a given key
/// by calculating `ihash(key) % n_buckets`.
pub fn ihash(key: &[u8]) -> u32 {
    let mut hasher = fnv::FnvHasher::with_key(0);
    hasher.write(key);
    let value = hasher.finish() & 0x7fffffff;
    u32::try_from(value).expect("Failed to compute ihash of value")
}
