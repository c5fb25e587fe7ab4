use super::readers::open_text_reader;
use crate::utils::util::Result;
use std::{
    collections::{HashMap, HashSet},
    io::BufRead,
    path::Path,
};

/// Sites to keep, as verbatim position text grouped by chromosome.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteAllowList {
    sites: HashMap<String, HashSet<String>>,
}

impl SiteAllowList {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let reader = open_text_reader(path)?;
        let allow_list = Self::from_reader(reader)
            .map_err(|e| crate::tidy_error!("Error in sites file {}: {}", path.display(), e))?;
        log::debug!(
            "Loaded {} distinct sites from {}",
            allow_list.len(),
            path.display()
        );
        Ok(allow_list)
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut allow_list = Self::default();
        for (line_number, result_line) in reader.lines().enumerate() {
            let line = result_line
                .map_err(|e| crate::tidy_error!("Error at line {}: {}", line_number + 1, e))?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let (chrom, pos) = line_to_site(trimmed)
                .map_err(|e| crate::tidy_error!("Error at line {}: {}", line_number + 1, e))?;
            allow_list.insert(chrom, pos);
        }
        Ok(allow_list)
    }

    pub fn insert(&mut self, chrom: String, pos: String) -> bool {
        self.sites.entry(chrom).or_default().insert(pos)
    }

    pub fn contains(&self, chrom: &str, pos: &str) -> bool {
        self.sites
            .get(chrom)
            .is_some_and(|positions| positions.contains(pos))
    }

    /// Number of distinct sites.
    pub fn len(&self) -> usize {
        self.sites.values().map(HashSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}

impl FromIterator<(String, String)> for SiteAllowList {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut allow_list = Self::default();
        for (chrom, pos) in iter {
            allow_list.insert(chrom, pos);
        }
        allow_list
    }
}

fn line_to_site(line: &str) -> Result<(String, String)> {
    const EXPECTED_FIELD_COUNT: usize = 2;
    let split_line: Vec<&str> = line.split_whitespace().collect();
    let (chrom, pos) = match split_line[..] {
        [chrom, pos] => (chrom, pos),
        _ => {
            return Err(crate::tidy_error!(
                "Expected {} fields in the format 'chrom position', found {}: {}",
                EXPECTED_FIELD_COUNT,
                split_line.len(),
                line
            ))
        }
    };

    let position = pos
        .parse::<u64>()
        .map_err(|error| crate::tidy_error!("Failed to parse position '{}': {}", pos, error))?;
    if position < 1 {
        return Err(crate::tidy_error!(
            "Position {} must be greater than or equal to 1 (1-based)",
            position
        ));
    }

    Ok((chrom.to_string(), pos.to_string()))
}
