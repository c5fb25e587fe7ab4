use crate::constants::DEFAULT_KEEP_HEADER;
use anyhow::{anyhow, Result};
use clap::{ArgAction, Parser};
use env_logger::fmt::Color;
use log::{Level, LevelFilter};
use once_cell::sync::Lazy;
use std::{
    io::Write,
    path::{Path, PathBuf},
};

/// Full version string including the crate version and git description.
///
/// # Examples
/// * `0.3.0-1ba958a-dirty` - while on a dirty branch
/// * `0.3.0-1ba958a` - with a fresh commit
/// * `0.3.0` - built outside a git checkout
pub static FULL_VERSION: Lazy<String> = Lazy::new(|| {
    match option_env!("VERGEN_GIT_DESCRIBE") {
        Some(git_describe) if !git_describe.is_empty() && git_describe != "VERGEN_IDEMPOTENT_OUTPUT" => {
            format!("{}-{}", env!("CARGO_PKG_VERSION"), git_describe)
        }
        _ => env!("CARGO_PKG_VERSION").to_string(),
    }
});

#[derive(Parser, Debug)]
#[command(name="tidy-vcf",
          author="Silas Tittes <silas.tittes@gmail.com>",
          version=&**FULL_VERSION,
          about="Given a VCF file, produces tidy versions of the sites and genotypes data",
          long_about = None,
          after_help = "Site table columns: CHROM POS ID REF ALT QUAL FILTER <INFO keys>
Genotype table columns: CHROM POS ID REF ALT QUAL FILTER IND <FORMAT keys>
Keys follow their declaration order in the VCF header; missing values are written as NA.",
          help_template = "{name} {version}\n{author}{about-section}\n{usage-heading}\n    {usage}\n\n{all-args}{after-help}",
          )]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(flatten)]
    pub args: ConvertArgs,

    /// Specify multiple times to increase verbosity level (e.g., --verbose --verbose)
    #[arg(long = "verbose", action = ArgAction::Count)]
    pub verbosity: u8,
}

#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ConvertArgs {
    /// VCF input file, plain text or gzip compressed (.gz)
    #[arg(
        short = 'v',
        long = "vcf",
        value_name = "VCF",
        value_parser = check_file_exists
    )]
    pub vcf: PathBuf,

    /// File of sites to output, one whitespace-separated chromosome and 1-based position per line
    #[arg(
        short = 's',
        long = "sites",
        value_name = "SITES",
        value_parser = check_file_exists,
        conflicts_with = "thin"
    )]
    pub sites: Option<PathBuf>,

    /// Keep sites no less than THIN bases apart (alternative to --sites)
    #[arg(
        short = 't',
        long = "thin",
        value_name = "THIN",
        value_parser = thin_in_range
    )]
    pub thin: Option<u64>,

    /// Output file for the tidy sites table (.gz for compressed output)
    #[arg(
        short = 'o',
        long = "sites-out",
        alias = "sites_out",
        value_name = "FILE",
        value_parser = check_prefix_path
    )]
    pub sites_out: PathBuf,

    /// Output file for the tidy genotype table (.gz for compressed output)
    #[arg(
        short = 'g',
        long = "genotype-out",
        alias = "genotype_out",
        value_name = "FILE",
        value_parser = check_prefix_path
    )]
    pub genotype_out: PathBuf,

    /// Copy the VCF meta-information (##) lines to the top of both outputs
    #[arg(
        long = "keep-header",
        default_value_t = DEFAULT_KEEP_HEADER,
        help_heading = "Advanced"
    )]
    pub keep_header: bool,
}

impl ConvertArgs {
    pub fn new(
        vcf: impl Into<PathBuf>,
        sites_out: impl Into<PathBuf>,
        genotype_out: impl Into<PathBuf>,
    ) -> Self {
        Self {
            vcf: vcf.into(),
            sites: None,
            thin: None,
            sites_out: sites_out.into(),
            genotype_out: genotype_out.into(),
            keep_header: DEFAULT_KEEP_HEADER,
        }
    }

    pub fn with(mut self, updates: impl FnOnce(&mut Self)) -> Self {
        updates(&mut self);
        self
    }
}

/// Initializes the verbosity level for logging based on the command-line arguments.
///
/// Sets up the logger with a specific verbosity level that is determined
/// by the number of occurrences of the `--verbose` flag in the command-line arguments.
///
/// # Arguments
///
/// * `args` - A reference to the parsed command-line arguments.
pub fn init_verbose(args: &Cli) {
    let filter_level: LevelFilter = match args.verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            let level = record.level();
            let mut style = buf.style();
            match record.level() {
                Level::Error => style.set_color(Color::Red),
                Level::Warn => style.set_color(Color::Yellow),
                Level::Info => style.set_color(Color::Green),
                Level::Debug => style.set_color(Color::Blue),
                Level::Trace => style.set_color(Color::Cyan),
            };

            writeln!(
                buf,
                "{} [{}] {} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                style.value(level),
                record.module_path().unwrap_or("unknown_module"),
                record.args()
            )
        })
        .filter_level(filter_level)
        .init();
}

/// Validates the thinning distance: a positive number of bases.
fn thin_in_range(s: &str) -> Result<u64> {
    let distance: u64 = s
        .parse::<u64>()
        .map_err(|_| anyhow!("`{}` is not a valid thinning distance", s))?;
    if distance == 0 {
        return Err(anyhow!("Thinning distance must be >= 1"));
    }
    Ok(distance)
}

/// Checks if the provided file path exists.
///
/// # Arguments
///
/// * `s` - A string slice representing the file path to check.
///
/// # Returns
///
/// Returns a `Result<PathBuf>` which is Ok if the file exists, or an Err with a descriptive message if not.
fn check_file_exists(s: &str) -> Result<PathBuf> {
    let path = Path::new(s);
    if !path.exists() {
        return Err(anyhow!("File does not exist: {}", path.display()));
    }
    Ok(path.to_path_buf())
}

fn check_prefix_path(s: &str) -> Result<PathBuf> {
    let path = Path::new(s);
    if let Some(parent_dir) = path.parent() {
        if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
            return Err(anyhow!("Path does not exist: {}", parent_dir.display()));
        }
    }
    Ok(path.to_path_buf())
}
