//! Command-line interface for WikiHum maintenance jobs.
#![forbid(unsafe_code)]

mod commands;
mod connection;
mod error;
mod report;

use std::{
    io::{self, Write},
    time::Instant,
};

use camino::Utf8PathBuf;
use clap::Parser;
use log::info;
use wikihum_core::{TaskSummary, WriteMode, tasks::show};
use wikihum_data::{Credentials, MediaWikiClient, SparqlClient, join_files};

use commands::{Command, Services, execute, parse_entity_id, validate_inputs};
use connection::ConnectionArgs;
use report::RunReport;

pub use error::CliError;

/// Run the CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments or configuration are invalid, an input
/// cannot be read, or a workflow aborts.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let stdout = io::stdout();
    run_with(cli, &mut stdout.lock())
}

#[derive(Debug, Parser)]
#[command(
    name = "wikihum",
    about = "Maintenance jobs for the WikiHum Wikibase",
    version
)]
struct Cli {
    /// Persist changes; without this flag every job is a dry run.
    #[arg(long, global = true)]
    write: bool,
    /// Report file to append to (default: `logs/<command>.log`).
    #[arg(long, value_name = "path", global = true)]
    report: Option<Utf8PathBuf>,
    #[command(flatten)]
    connection: ConnectionArgs,
    #[command(subcommand)]
    command: Command,
}

impl Cli {
    fn report_path(&self) -> Utf8PathBuf {
        self.report
            .clone()
            .unwrap_or_else(|| Utf8PathBuf::from(format!("logs/{}.log", self.command.name())))
    }
}

fn run_with(cli: Cli, out: &mut dyn Write) -> Result<(), CliError> {
    validate_inputs(&cli.command)?;
    if let Command::NeighborhoodJoin(args) = &cli.command {
        let rows = join_files(&args.left, &args.right, &args.key, &args.output)?;
        return writeln!(out, "joined {rows} rows into {}", args.output).map_err(CliError::Output);
    }

    let mode = WriteMode::from_flag(cli.write);
    let report_path = cli.report_path();
    let config = cli.connection.into_config()?;
    if mode.is_write() && config.credentials == Credentials::Anonymous {
        return Err(CliError::WriteNeedsCredentials);
    }
    let store = MediaWikiClient::new(config.clone())?;

    if let Command::Show(args) = &cli.command {
        let id = parse_entity_id(&args.id)?;
        for line in show::run(&store, &id)? {
            writeln!(out, "{line}").map_err(CliError::Output)?;
        }
        return Ok(());
    }

    let query = SparqlClient::new(&config)?;
    let services = Services {
        store: &store,
        query: &query,
        item_page_base: &config.item_page_base,
    };
    info!(
        "running {} against {} ({mode:?})",
        cli.command.name(),
        config.api_url
    );
    let started = Instant::now();
    let mut report = RunReport::open(&report_path, out)?;
    let summary = execute(&cli.command, &services, &mut report, mode)?;
    report.finish(started.elapsed())?;
    info!("{}; report appended to {report_path}", summary_line(summary));
    Ok(())
}

fn summary_line(summary: TaskSummary) -> String {
    format!(
        "processed {}, changed {}, skipped {}, flagged {}, failed {}",
        summary.processed, summary.changed, summary.skipped, summary.flagged, summary.failed
    )
}

#[cfg(test)]
mod tests;
