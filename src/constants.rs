/// Placeholder written for any schema key a record does not carry.
pub const MISSING_VALUE: &str = "NA";

/// INFO payload meaning "no annotations".
pub const EMPTY_INFO: &str = ".";

/// CHROM POS ID REF ALT QUAL FILTER INFO FORMAT
pub const N_FIXED_FIELDS: usize = 9;

/// Leading columns shared by both output tables.
pub const CONTENT_COLUMNS: [&str; 7] = ["CHROM", "POS", "ID", "REF", "ALT", "QUAL", "FILTER"];

pub const INDIVIDUAL_COLUMN: &str = "IND";

pub const INFO_PREFIX: &str = "##INFO";
pub const FORMAT_PREFIX: &str = "##FORMAT";
pub const FILTER_PREFIX: &str = "##FILTER";
pub const META_PREFIX: &str = "##";
pub const COLUMN_HEADER_PREFIX: &str = "#CHROM";

pub const DEFAULT_KEEP_HEADER: bool = false;
