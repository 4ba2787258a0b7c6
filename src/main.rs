mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use tracing::info;
use tracing_subscriber::EnvFilter;

use blockledger::archive::ArchiveResolver;
use blockledger::config::Config;
use blockledger::enrich::IpinfoClient;
use blockledger::ledger::{LedgerError, LedgerStore, newest_dated_section};
use blockledger::pipeline::{
    LocalArchiveSource, LoggingSubmissionSink, SubmissionSink, run_extraction, run_ingest,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = match cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Ingest => {
            let source = LocalArchiveSource::new(&config);
            let gateway = IpinfoClient::new(&config.enrichment)?;
            let summary = run_ingest(&config, &source, &gateway).await?;
            if !summary.appended {
                info!(date_key = summary.date_key, "nothing new today, ledger unchanged");
            }
        }
        Commands::Extract(args) => {
            let logging_sink = LoggingSubmissionSink;
            let sink: Option<&dyn SubmissionSink> = if args.submit {
                Some(&logging_sink)
            } else {
                None
            };
            let outcome = run_extraction(&config, args.org.as_deref(), sink).await?;
            for address in &outcome.addresses {
                println!("{address}");
            }
        }
        Commands::Prune(args) => {
            let resolver = ArchiveResolver::new(&config.paths.download_dir, &config.archive);
            let keep = args.keep.unwrap_or(config.retention.keep_archives);
            let deleted = resolver.prune(keep)?;
            info!(deleted, keep, "pruned download directory");
        }
        Commands::Show(args) => {
            let store = LedgerStore::new(&config.paths.ledger_path);
            let doc = store.load()?;
            let section = match &args.date {
                Some(date) => doc
                    .section(date)
                    .ok_or_else(|| LedgerError::SectionNotFound(date.clone()))?,
                None => newest_dated_section(&doc)?,
            };
            print!("{}", section.render());
        }
    }

    Ok(())
}
