use crate::{
    cli::ConvertArgs,
    constants::META_PREFIX,
    core::{
        projector::{ensure_sample_count, render_genotype_rows, render_site_row},
        record::VcfRecord,
        schema::{Schema, SchemaBuilder},
        selector::SiteSelector,
    },
    error::TidyVcfError,
    io::{readers::open_text_reader, sites_reader::SiteAllowList, table_writer::TableWriter},
    utils::util::{format_number_with_commas, Result},
};
use std::{
    io::BufRead,
    path::{Path, PathBuf},
};


/// Counts reported at the end of a conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertSummary {
    pub header_lines: usize,
    pub records_read: usize,
    pub records_emitted: usize,
    pub genotype_rows: usize,
    pub samples: usize,
}

/// State of one conversion pass. Owned by the reading loop; nothing outlives the run.
struct ConvertContext {
    builder: SchemaBuilder,
    schema: Option<Schema>,
    selector: SiteSelector,
    sites_out: TableWriter,
    genotype_out: TableWriter,
    keep_header: bool,
    summary: ConvertSummary,
}

impl ConvertContext {
    fn consume_line(&mut self, line: &str, line_number: usize) -> Result<()> {
        if line.trim().is_empty() {
            return Ok(());
        }

        if self.schema.is_none() {
            if self.builder.observe(line) {
                self.summary.header_lines += 1;
                if self.keep_header && line.starts_with(META_PREFIX) {
                    self.sites_out.write_line(line)?;
                    self.genotype_out.write_line(line)?;
                }
                return Ok(());
            }
            self.start_body(Some(line_number))?;
        } else if line.starts_with('#') {
            log::warn!("Ignoring header line {} after the first record", line_number);
            return Ok(());
        }

        self.consume_record(line, line_number)
    }

    /// Freezes the schema and writes both column headers. `first_record_line` is `None` when the
    /// input holds no records at all.
    fn start_body(&mut self, first_record_line: Option<usize>) -> Result<()> {
        let schema = std::mem::take(&mut self.builder).build();
        if !schema.has_column_header {
            match first_record_line {
                Some(line) => return Err(TidyVcfError::MissingColumnHeader { line }),
                None => log::warn!("No #CHROM header line found; sample identifiers are unknown"),
            }
        } else if schema.samples.is_empty() {
            log::warn!("VCF header lists no samples; the genotype table will only hold its header");
        }

        self.sites_out.write_line(&schema.site_header())?;
        self.genotype_out.write_line(&schema.genotype_header())?;
        self.summary.samples = schema.n_samples();
        self.schema = Some(schema);
        Ok(())
    }

    fn consume_record(&mut self, line: &str, line_number: usize) -> Result<()> {
        let Some(schema) = self.schema.as_ref() else {
            return Err(crate::tidy_error!(
                "Record at line {line_number} reached before the header was complete"
            ));
        };

        let record = VcfRecord::parse(line, line_number)?;
        ensure_sample_count(&record, schema)?;
        self.summary.records_read += 1;

        if !self.selector.passes(&record)? {
            return Ok(());
        }

        let site_row = render_site_row(&record, schema);
        let genotype_rows = render_genotype_rows(&record, schema)?;
        self.sites_out.write_line(&site_row)?;
        for row in &genotype_rows {
            self.genotype_out.write_line(row)?;
        }
        self.summary.records_emitted += 1;
        self.summary.genotype_rows += genotype_rows.len();
        Ok(())
    }

    fn finish(mut self) -> Result<ConvertSummary> {
        if self.schema.is_none() {
            log::warn!("VCF contains no records");
            self.start_body(None)?;
        }
        let summary = self.summary;
        log::debug!("Finishing {}", self.sites_out.path().display());
        self.sites_out.finish()?;
        log::debug!("Finishing {}", self.genotype_out.path().display());
        self.genotype_out.finish()?;
        Ok(summary)
    }
}

/// `path` with its directory resolved, so that `./out.tsv` and `out.tsv` compare equal. The file
/// itself need not exist yet; paths whose directory cannot be resolved are compared as written.
fn resolve_path(path: &Path) -> PathBuf {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    match (parent.canonicalize(), path.file_name()) {
        (Ok(dir), Some(name)) => dir.join(name),
        _ => path.to_path_buf(),
    }
}

fn validate_paths(args: &ConvertArgs) -> Result<()> {
    let sites_out = resolve_path(&args.sites_out);
    let genotype_out = resolve_path(&args.genotype_out);
    if sites_out == genotype_out {
        return Err(TidyVcfError::DuplicateOutputPath {
            path: args.genotype_out.clone(),
        });
    }

    let inputs: Vec<PathBuf> = std::iter::once(&args.vcf)
        .chain(args.sites.as_ref())
        .map(|input| resolve_path(input))
        .collect();
    for (output, resolved) in [(&args.sites_out, sites_out), (&args.genotype_out, genotype_out)] {
        if inputs.contains(&resolved) {
            return Err(TidyVcfError::DuplicateOutputPath {
                path: output.clone(),
            });
        }
    }
    Ok(())
}

fn build_selector(args: &ConvertArgs) -> Result<SiteSelector> {
    if args.sites.is_some() && args.thin.is_some() {
        return Err(TidyVcfError::ConflictingSelection);
    }
    let allow_list = args
        .sites
        .as_deref()
        .map(SiteAllowList::from_path)
        .transpose()?;
    let selector = SiteSelector::from_config(allow_list, args.thin)?;
    match &selector {
        SiteSelector::All => log::warn!(
            "Neither --sites (-s) nor --thin (-t) were given. Using all VCF sites, this might take a while"
        ),
        SiteSelector::AllowList(allow_list) => {
            log::info!("Selecting {} listed sites", format_number_with_commas(allow_list.len()))
        }
        SiteSelector::Thin { min_distance, .. } => {
            log::info!("Thinning sites to more than {} bases apart", min_distance)
        }
    }
    Ok(selector)
}

/// Converts `args.vcf` into the site and genotype tables in a single streaming pass.
pub fn convert(args: ConvertArgs) -> Result<ConvertSummary> {
    validate_paths(&args)?;
    let selector = build_selector(&args)?;

    let mut reader = open_text_reader(&args.vcf)?;
    let mut context = ConvertContext {
        builder: SchemaBuilder::new(),
        schema: None,
        selector,
        sites_out: TableWriter::create(&args.sites_out)?,
        genotype_out: TableWriter::create(&args.genotype_out)?,
        keep_header: args.keep_header,
        summary: ConvertSummary::default(),
    };
    log::debug!(
        "Reading {} (selection mode: {})",
        args.vcf.display(),
        context.selector.mode_name()
    );

    let mut line = String::new();
    let mut line_number = 0;
    loop {
        line.clear();
        let bytes = reader.read_line(&mut line).map_err(|error| {
            crate::tidy_error!(
                "Failed to read {} at line {}: {error}",
                args.vcf.display(),
                line_number + 1
            )
        })?;
        if bytes == 0 {
            break;
        }
        line_number += 1;
        context.consume_line(line.trim_end_matches(['\n', '\r']), line_number)?;
    }

    let summary = context.finish()?;
    log::info!(
        "Records read: {}, emitted: {}, genotype rows: {} ({} samples)",
        format_number_with_commas(summary.records_read),
        format_number_with_commas(summary.records_emitted),
        format_number_with_commas(summary.genotype_rows),
        summary.samples
    );
    Ok(summary)
}
