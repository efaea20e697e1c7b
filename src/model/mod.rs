pub mod status;

pub use status::{Marker, ReceptorPattern, ReceptorStatus};

pub const SAMPLE_ID_COLUMN: &str = "SampleID";
pub const PATTERN_COLUMN: &str = "Receptor_Pattern";

/// Leading columns of every extract, in output order.
pub const EXTRACT_COLUMNS: [&str; 5] = [
    SAMPLE_ID_COLUMN,
    Marker::Er.output_column(),
    Marker::Pr.output_column(),
    Marker::Her2.output_column(),
    PATTERN_COLUMN,
];

/// Patterns the analyzer stratifies by. Patterns containing `Unknown` or a
/// raw fallback value are deliberately left out.
pub const PATTERNS_OF_INTEREST: [&str; 4] = ["+/+/-", "+/-/-", "-/-/+", "-/-/-"];

pub const DEFAULT_PLACEHOLDER: &str = "~";
