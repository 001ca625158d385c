use anyhow::Result;
use clap::Parser;
use ramadan_giving_export::cli::Cli;
use ramadan_giving_export::export_site;
use ramadan_giving_export::logging::init_logging;
use ramadan_giving_shared::site::SiteConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity());

    let config = match &cli.base_url {
        Some(url) => SiteConfig::default().with_base_url(url),
        None => SiteConfig::default(),
    };
    let today = chrono::Local::now().date_naive();

    let report = export_site(&cli.dist, &config, today)?;
    for path in &report.written {
        tracing::info!("{}", path.display());
    }
    Ok(())
}
