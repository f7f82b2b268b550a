//! Pipeline applications. Each application pairs an extract function with
//! an aggregate function; the job driver looks them up by name.

use common::Workload;

pub mod census;

/// Look up a workload by name.
pub fn try_named(name: &str) -> Option<Workload> {
    match name {
        "census" => Some(Workload {
            extract_fn: census::extract,
            aggregate_fn: census::aggregate,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn census_is_a_known_workload() {
        assert!(try_named("census").is_some());
        assert!(try_named("word-count").is_none());
    }
}
