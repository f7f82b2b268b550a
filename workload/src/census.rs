//! Application that groups census records by occupation and
//! computes per-occupation income and family-size extrema.
//!

use anyhow::{anyhow, Result};
use bytes::Bytes;
use tracing::debug;

use common::codec;
use common::utils::string_from_bytes;
use common::{ExtractOutput, GroupedEntry, Summary};

pub fn extract(chunk: Bytes) -> ExtractOutput {
    let contents = string_from_bytes(chunk)?;

    let mut entries = Vec::new();
    for line in contents.lines() {
        if let Some(entry) = codec::parse_line(line) {
            entries.push(entry);
        } else if !line.starts_with('@') && !line.is_empty() {
            debug!("dropping malformed input line `{line}`");
        }
    }

    Ok(Box::new(entries.into_iter()))
}

pub fn aggregate(key: &str, entries: &[GroupedEntry]) -> Result<Summary> {
    if entries.is_empty() {
        return Err(anyhow!("no entries collected for key `{key}`"));
    }

    let mut min_income = i64::MAX;
    let mut max_income = i64::MIN;
    let mut min_family_size = i64::MAX;
    let mut max_family_size = i64::MIN;

    for entry in entries {
        let income: i64 = entry
            .income
            .parse()
            .map_err(|_| anyhow!("non-numeric income `{}` for key `{}`", entry.income, key))?;
        let family_size: i64 = entry.family_size.parse().map_err(|_| {
            anyhow!(
                "non-numeric family size `{}` for key `{}`",
                entry.family_size,
                key
            )
        })?;

        min_income = min_income.min(income);
        max_income = max_income.max(income);
        min_family_size = min_family_size.min(family_size);
        max_family_size = max_family_size.max(family_size);
    }

    Ok(Summary {
        occupation: key.to_string(),
        min_income,
        max_income,
        min_family_size,
        max_family_size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(income: &str, family_size: &str) -> GroupedEntry {
        GroupedEntry::new("Engineer", income, family_size)
    }

    #[test]
    fn extract_emits_one_entry_per_valid_line() {
        let chunk = Bytes::from(
            "@id,familySize,occupation,income\n1,3,Engineer,50000\n2,4,Engineer,70000\n",
        );
        let entries = extract(chunk).unwrap().collect::<Vec<_>>();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.occupation == "Engineer"));
    }

    #[test]
    fn extract_keys_on_the_trimmed_third_field() {
        let chunk = Bytes::from("1,3,  Teacher ,40000\n");
        let entries = extract(chunk).unwrap().collect::<Vec<_>>();
        assert_eq!(entries[0].occupation, "Teacher");
    }

    #[test]
    fn extract_drops_headers_and_malformed_lines() {
        let chunk = Bytes::from(
            "@id,familySize,occupation,income\nnot,enough\n1,3,Engineer,50000\na,b,c,d,e\n",
        );
        let entries = extract(chunk).unwrap().collect::<Vec<_>>();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn aggregate_bounds_every_entry() {
        let entries = vec![
            entry("50000", "3"),
            entry("70000", "4"),
            entry("60000", "2"),
        ];
        let summary = aggregate("Engineer", &entries).unwrap();

        assert_eq!(summary.min_income, 50000);
        assert_eq!(summary.max_income, 70000);
        assert_eq!(summary.min_family_size, 2);
        assert_eq!(summary.max_family_size, 4);

        for e in &entries {
            let income: i64 = e.income.parse().unwrap();
            let family_size: i64 = e.family_size.parse().unwrap();
            assert!(summary.min_income <= income && income <= summary.max_income);
            assert!(
                summary.min_family_size <= family_size
                    && family_size <= summary.max_family_size
            );
        }
    }

    #[test]
    fn aggregate_is_order_independent() {
        let forward = vec![entry("50000", "3"), entry("70000", "4"), entry("60000", "2")];
        let reversed = forward.iter().rev().cloned().collect::<Vec<_>>();

        assert_eq!(
            aggregate("Engineer", &forward).unwrap(),
            aggregate("Engineer", &reversed).unwrap()
        );
    }

    #[test]
    fn aggregate_collapses_a_single_entry() {
        let summary = aggregate("Teacher", &[entry("40000", "2")]).unwrap();
        assert_eq!(summary.min_income, summary.max_income);
        assert_eq!(summary.min_family_size, summary.max_family_size);
    }

    #[test]
    fn aggregate_rejects_non_numeric_fields() {
        assert!(aggregate("Doctor", &[entry("abc", "3")]).is_err());
        assert!(aggregate("Doctor", &[entry("50000", "x")]).is_err());
    }

    #[test]
    fn aggregate_rejects_an_empty_group() {
        assert!(aggregate("Doctor", &[]).is_err());
    }
}
