use clap::Parser;
use std::time;
use tidy_vcf::{
    cli::{init_verbose, Cli, FULL_VERSION},
    commands::convert,
    utils::util::{handle_error_and_exit, Result},
};

fn runner() -> Result<()> {
    let cli = Cli::parse();
    init_verbose(&cli);
    log::trace!("CLI options set: {:?}", cli);

    log::info!("Running {}-{}", env!("CARGO_PKG_NAME"), &**FULL_VERSION);
    log::info!("Input VCF: {}", cli.args.vcf.display());
    log::info!("Sites output: {}", cli.args.sites_out.display());
    log::info!("Genotype output: {}", cli.args.genotype_out.display());

    let start_timer = time::Instant::now();
    convert(cli.args)?;
    log::info!("Total execution time: {:.2?}", start_timer.elapsed());

    log::info!("{} end", env!("CARGO_PKG_NAME"));
    Ok(())
}

fn main() {
    if let Err(e) = runner() {
        handle_error_and_exit(e);
    }
}
