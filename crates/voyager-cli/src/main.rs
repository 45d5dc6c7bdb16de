mod cli;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use std::io::Write;
use voyager_client::Voyager;

/// Initialize tracing subscriber for logging.
///
/// Logs go to stderr so stdout carries nothing but results.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default_filter = if verbose { "info,voyager=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Write each item as one JSON line.
fn print_lines<T: Serialize>(items: &[T]) -> anyhow::Result<()> {
    let mut out = std::io::stdout().lock();
    for item in items {
        serde_json::to_writer(&mut out, item)?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose);

    tracing::info!("Starting voyager v{}", env!("CARGO_PKG_VERSION"));

    let config =
        Voyager::load_config(cli.config.as_deref()).context("failed to load configuration")?;
    let voyager = Voyager::from_config(&config).context("failed to create API client")?;

    match cli.command {
        cli::Commands::SearchPeople(args) => {
            let mut options = voyager.search_options(args.limit);
            options.include_private_profiles |= args.include_private;

            let people = voyager
                .search_people(&args.to_query(), &options)
                .await
                .context("people search failed")?;
            tracing::info!("Found {} people", people.len());
            print_lines(&people)?;
        }
        cli::Commands::Connections { urn_id, limit } => {
            let urn_id = cli::member_id(&urn_id);
            let people = voyager
                .get_profile_connections(&urn_id, limit)
                .await
                .with_context(|| format!("failed to list connections of {urn_id}"))?;
            print_lines(&people)?;
        }
        cli::Commands::ConnectionCount => {
            let count = voyager
                .get_current_profile_connections_count()
                .await
                .context("failed to count connections")?;
            print_lines(&[count])?;
        }
        cli::Commands::Updates(args) => {
            let updates = match (&args.company, &args.profile) {
                (Some(company), _) => voyager.get_company_updates(company, args.limit).await,
                (None, Some(profile)) => voyager.get_profile_updates(profile, args.limit).await,
                (None, None) => anyhow::bail!("either --company or --profile is required"),
            }
            .context("failed to fetch updates")?;
            print_lines(&updates)?;
        }
    }

    Ok(())
}
