use crate::{constants::N_FIXED_FIELDS, error::TidyVcfError, utils::util::Result};

/// One VCF data line split into its columns. Values borrow from the line and are never
/// reinterpreted: `.` and partial numbers pass through untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct VcfRecord<'a> {
    pub line_number: usize,
    pub chrom: &'a str,
    pub pos: &'a str,
    pub id: &'a str,
    pub ref_allele: &'a str,
    pub alt: &'a str,
    pub qual: &'a str,
    pub filter: &'a str,
    pub info: &'a str,
    pub format: &'a str,
    pub genotypes: Vec<&'a str>,
}

impl<'a> VcfRecord<'a> {
    /// Splits `line` on whitespace. `line_number` is 1-based and only used for error context.
    pub fn parse(line: &'a str, line_number: usize) -> Result<Self> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < N_FIXED_FIELDS {
            return Err(TidyVcfError::TooFewFields {
                line: line_number,
                found: fields.len(),
            });
        }

        let (fixed, genotypes) = fields.split_at(N_FIXED_FIELDS);
        let &[chrom, pos, id, ref_allele, alt, qual, filter, info, format] = fixed else {
            unreachable!("split_at yields exactly {N_FIXED_FIELDS} fixed fields")
        };

        Ok(Self {
            line_number,
            chrom,
            pos,
            id,
            ref_allele,
            alt,
            qual,
            filter,
            info,
            format,
            genotypes: genotypes.to_vec(),
        })
    }

    /// The seven leading columns shared by both tables.
    pub fn content_fields(&self) -> [&'a str; 7] {
        [
            self.chrom,
            self.pos,
            self.id,
            self.ref_allele,
            self.alt,
            self.qual,
            self.filter,
        ]
    }

    pub fn content_string(&self) -> String {
        self.content_fields().join("\t")
    }

    /// POS as a 1-based integer; only needed where positions are compared.
    pub fn position(&self) -> Result<u64> {
        let pos = self.pos.parse::<u64>().map_err(|error| {
            TidyVcfError::malformed(
                self.line_number,
                format!("invalid POS '{}': {error}", self.pos),
            )
        })?;
        if pos < 1 {
            return Err(TidyVcfError::malformed(
                self.line_number,
                "POS must be greater than or equal to 1 (1-based)",
            ));
        }
        Ok(pos)
    }
}
