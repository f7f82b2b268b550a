use std::fmt;
use std::fmt::Formatter;

/// A single record emitted by the extract stage: one occupation key plus
/// the income and family-size fields of the source line.
///
/// Income and family size stay unparsed here. The extract stage performs
/// no numeric validation; bad values surface as parse errors when the
/// group is aggregated.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct GroupedEntry {
    /// The grouping key.
    pub occupation: String,

    /// Raw income field.
    pub income: String,

    /// Raw family-size field.
    pub family_size: String,
}

impl GroupedEntry {
    /// Construct a new entry from the trimmed fields of an input line.
    pub fn new(occupation: &str, income: &str, family_size: &str) -> Self {
        Self {
            occupation: occupation.to_string(),
            income: income.to_string(),
            family_size: family_size.to_string(),
        }
    }
}

impl fmt::Display for GroupedEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {},{}", self.occupation, self.income, self.family_size)
    }
}

/// The aggregated output row for one occupation.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Summary {
    /// The grouping key; unique across the output of one run.
    pub occupation: String,

    pub min_income: i64,
    pub max_income: i64,
    pub min_family_size: i64,
    pub max_family_size: i64,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} income=[{}, {}] family_size=[{}, {}]",
            self.occupation,
            self.min_income,
            self.max_income,
            self.min_family_size,
            self.max_family_size
        )
    }
}
