//! The census input line format.
//!
//! One record per line, four comma-separated fields:
//! `id,familySize,occupation,income`. Lines starting with `@` are headers
//! and carry no record.

use crate::record::GroupedEntry;

/// Field count of a well-formed line.
const FIELD_COUNT: usize = 4;

/// Parse a single raw line into a [`GroupedEntry`].
///
/// Returns `None` for header lines and for lines that do not split into
/// exactly four fields. Fields are trimmed. No numeric validation happens
/// here; the id field is dropped.
pub fn parse_line(line: &str) -> Option<GroupedEntry> {
    if line.starts_with('@') {
        return None;
    }

    let parts = line.split(',').collect::<Vec<_>>();
    if parts.len() != FIELD_COUNT {
        return None;
    }

    Some(GroupedEntry::new(
        parts[2].trim(),
        parts[3].trim(),
        parts[1].trim(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_valid_line() {
        let entry = parse_line("1,3,Engineer,50000").unwrap();
        assert_eq!(entry.occupation, "Engineer");
        assert_eq!(entry.income, "50000");
        assert_eq!(entry.family_size, "3");
    }

    #[test]
    fn trims_every_kept_field() {
        let entry = parse_line(" 1 , 3 , Engineer , 50000 ").unwrap();
        assert_eq!(entry.occupation, "Engineer");
        assert_eq!(entry.income, "50000");
        assert_eq!(entry.family_size, "3");
    }

    #[test]
    fn drops_header_lines() {
        assert!(parse_line("@id,familySize,occupation,income").is_none());
    }

    #[test]
    fn drops_lines_with_wrong_field_count() {
        assert!(parse_line("").is_none());
        assert!(parse_line("1,3,Engineer").is_none());
        assert!(parse_line("1,3,Engineer,50000,extra").is_none());
    }

    #[test]
    fn keeps_non_numeric_fields_untouched() {
        // Validation is the aggregator's job; the codec passes bad values on.
        let entry = parse_line("4,x,Doctor,abc").unwrap();
        assert_eq!(entry.occupation, "Doctor");
        assert_eq!(entry.income, "abc");
        assert_eq!(entry.family_size, "x");
    }
}
