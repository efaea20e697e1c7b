use std::fmt;

use crate::input::is_missing;

pub const POSITIVE_TOKENS: [&str; 6] = ["POSITIVE", "POS", "+", "1", "YES", "TRUE"];
pub const NEGATIVE_TOKENS: [&str; 6] = ["NEGATIVE", "NEG", "-", "0", "NO", "FALSE"];

pub const UNKNOWN_LABEL: &str = "Unknown";

/// Standardized receptor status.
///
/// Classification is substring based: any value containing a positive token
/// is `+`, checked before the negative tokens. Free text that happens to
/// contain `1`, `0`, `NO` and so on is therefore misclassified (`"NOT
/// DONE"` and `"UNKNOWN"` become `-`, `"T1N0"` becomes `+`). That behaviour
/// is kept as is.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReceptorStatus {
    Positive,
    Negative,
    Unknown,
    Other(String),
}

impl ReceptorStatus {
    pub fn standardize(raw: &str) -> Self {
        if is_missing(raw) {
            return ReceptorStatus::Unknown;
        }
        // Already standardized codes map to themselves.
        match raw {
            "+" => return ReceptorStatus::Positive,
            "-" => return ReceptorStatus::Negative,
            UNKNOWN_LABEL => return ReceptorStatus::Unknown,
            _ => {}
        }
        let value = raw.to_uppercase();
        let value = value.trim();
        if POSITIVE_TOKENS.iter().any(|t| value.contains(t)) {
            ReceptorStatus::Positive
        } else if NEGATIVE_TOKENS.iter().any(|t| value.contains(t)) {
            ReceptorStatus::Negative
        } else {
            ReceptorStatus::Other(value.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ReceptorStatus::Positive => "+",
            ReceptorStatus::Negative => "-",
            ReceptorStatus::Unknown => UNKNOWN_LABEL,
            ReceptorStatus::Other(s) => s,
        }
    }
}

impl fmt::Display for ReceptorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Er,
    Pr,
    Her2,
}

impl Marker {
    pub const ALL: [Marker; 3] = [Marker::Er, Marker::Pr, Marker::Her2];

    pub const fn source_column(self) -> &'static str {
        match self {
            Marker::Er => "ER_Status_nature2012",
            Marker::Pr => "PR_Status_nature2012",
            Marker::Her2 => "HER2_Final_Status_nature2012",
        }
    }

    pub const fn output_column(self) -> &'static str {
        match self {
            Marker::Er => "ER_Status",
            Marker::Pr => "PR_Status",
            Marker::Her2 => "HER2_Status",
        }
    }
}

pub fn marker_source_columns() -> [&'static str; 3] {
    Marker::ALL.map(Marker::source_column)
}

/// Composite `ER/PR/HER2` key. Always derived from the three statuses.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReceptorPattern {
    pub er: ReceptorStatus,
    pub pr: ReceptorStatus,
    pub her2: ReceptorStatus,
}

impl ReceptorPattern {
    pub fn from_raw(er: &str, pr: &str, her2: &str) -> Self {
        Self {
            er: ReceptorStatus::standardize(er),
            pr: ReceptorStatus::standardize(pr),
            her2: ReceptorStatus::standardize(her2),
        }
    }

    pub fn statuses(&self) -> [&ReceptorStatus; 3] {
        [&self.er, &self.pr, &self.her2]
    }
}

impl fmt::Display for ReceptorPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.er, self.pr, self.her2)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/status.rs"]
mod tests;
