use crate::{
    constants::{
        COLUMN_HEADER_PREFIX, CONTENT_COLUMNS, FILTER_PREFIX, FORMAT_PREFIX, INDIVIDUAL_COLUMN,
        INFO_PREFIX, MISSING_VALUE, N_FIXED_FIELDS,
    },
    utils::util::Result,
};
use indexmap::IndexMap;
use std::io::BufRead;

/// Declared keys in header order, each mapped to the placeholder used when a record lacks it.
pub type KeyMap = IndexMap<String, &'static str>;

/// Column layout of a run, extracted once from the VCF header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    pub info: KeyMap,
    pub format: KeyMap,
    pub filter: KeyMap,
    pub samples: Vec<String>,
    /// Whether a `#CHROM` line was seen; without it the sample list is unknown rather than empty.
    pub has_column_header: bool,
}

impl Schema {
    /// Reads header lines up to the first data line. The data line itself is consumed but ignored.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut builder = SchemaBuilder::new();
        for line in reader.lines() {
            if !builder.observe(&line?) {
                break;
            }
        }
        Ok(builder.build())
    }

    pub fn n_samples(&self) -> usize {
        self.samples.len()
    }

    pub fn info_keys(&self) -> impl Iterator<Item = &str> {
        self.info.keys().map(String::as_str)
    }

    pub fn format_keys(&self) -> impl Iterator<Item = &str> {
        self.format.keys().map(String::as_str)
    }

    pub fn filter_keys(&self) -> impl Iterator<Item = &str> {
        self.filter.keys().map(String::as_str)
    }

    /// `CHROM..FILTER` followed by the INFO keys.
    pub fn site_header(&self) -> String {
        CONTENT_COLUMNS
            .iter()
            .copied()
            .chain(self.info_keys())
            .collect::<Vec<_>>()
            .join("\t")
    }

    /// `CHROM..FILTER`, `IND`, then the FORMAT keys.
    pub fn genotype_header(&self) -> String {
        CONTENT_COLUMNS
            .iter()
            .copied()
            .chain(std::iter::once(INDIVIDUAL_COLUMN))
            .chain(self.format_keys())
            .collect::<Vec<_>>()
            .join("\t")
    }
}

/// Accumulates a [`Schema`] one header line at a time, so a single streaming pass can both
/// learn the schema and go on to the records.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    schema: Schema,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` once `line` is not a header line; nothing is recorded for it.
    pub fn observe(&mut self, line: &str) -> bool {
        if !line.starts_with('#') {
            return false;
        }

        let target = if line.starts_with(FORMAT_PREFIX) {
            Some(&mut self.schema.format)
        } else if line.starts_with(INFO_PREFIX) {
            Some(&mut self.schema.info)
        } else if line.starts_with(FILTER_PREFIX) {
            Some(&mut self.schema.filter)
        } else {
            None
        };

        if let Some(keys) = target {
            match declared_id(line) {
                Some(id) => {
                    if !keys.contains_key(id) {
                        keys.insert(id.to_string(), MISSING_VALUE);
                    }
                }
                None => log::warn!("Skipping header declaration without ID: {}", line.trim_end()),
            }
        } else if line.starts_with(COLUMN_HEADER_PREFIX) {
            self.schema.samples = line
                .split_whitespace()
                .skip(N_FIXED_FIELDS)
                .map(str::to_string)
                .collect();
            self.schema.has_column_header = true;
        }
        true
    }

    pub fn build(self) -> Schema {
        log::debug!(
            "Header declares {} INFO, {} FORMAT and {} FILTER keys for {} samples",
            self.schema.info.len(),
            self.schema.format.len(),
            self.schema.filter.len(),
            self.schema.samples.len()
        );
        self.schema
    }
}

/// The text after the first `ID=` up to the next `,` (or the closing `>` if `ID` is last).
fn declared_id(line: &str) -> Option<&str> {
    let start = line.find("ID=")? + "ID=".len();
    let rest = &line[start..];
    let end = rest.find([',', '>']).unwrap_or(rest.len());
    let id = rest[..end].trim();
    (!id.is_empty()).then_some(id)
}
