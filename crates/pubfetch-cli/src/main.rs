//! Command line tool that lists PubMed papers with company-affiliated authors.
//!
//! The tool searches PubMed with the given query, fetches the matching records
//! and keeps the papers where at least one author works for a pharmaceutical or
//! biotech company. Results are printed to the console or saved as CSV.
//!
//! # Usage
//!
//! ```bash
//! # Print matching papers to the console
//! get-papers-list "cancer immunotherapy"
//!
//! # Save them to a CSV file, with debug output
//! get-papers-list "cancer immunotherapy" -f results.csv -d
//!
//! # Ask for fewer papers and report company affiliations without a matched author
//! get-papers-list "crispr" -m 200 --policy company-only
//! ```
//!
//! Logging goes to stderr and honours `RUST_LOG`.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use pubfetch::{
  classifier::EmissionPolicy,
  config::Config,
  entrez::{acquire, Acquisition, RecordSource},
  error::FetchError,
  output,
  paper::ClassifiedPaper,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub mod error;
pub mod interaction;

use crate::{error::*, interaction::*};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(
  version,
  about = "Fetch research papers from PubMed and filter non-academic authors.",
  long_about = None
)]
pub struct Cli {
  /// PubMed search query
  query: String,

  /// Save the results to this CSV file instead of printing them
  #[arg(short, long)]
  file: Option<PathBuf>,

  /// Print debug information
  #[arg(short, long)]
  debug: bool,

  /// Maximum number of papers to request from PubMed [default: 2000]
  #[arg(short, long)]
  max_results: Option<usize>,

  /// Configuration file. Defaults to pubfetch/config.toml in the user configuration directory
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Which papers to report: require-authors or company-only
  #[arg(long)]
  policy: Option<EmissionPolicy>,
}

/// Installs the log subscriber.
///
/// Logs at `warn` by default and at `debug` with `--debug`. `RUST_LOG` takes
/// precedence over both.
fn setup_logging(debug: bool) {
  let filter = if debug { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_file(debug)
    .with_line_number(debug)
    .with_target(true)
    .init();
}

/// Entry point for `get-papers-list`.
///
/// Exits with a failure status when the configuration cannot be used or the
/// results cannot be written. An empty query or an unreachable PubMed is
/// reported and treated as a run without results.
#[tokio::main]
async fn main() -> ExitCode {
  let cli = Cli::parse();
  setup_logging(cli.debug);

  let terminal = Terminal;
  let outcome = match load_config(&cli) {
    Ok(config) => run(&cli, &config, &config.client(), &terminal).await,
    Err(e) => Err(e),
  };
  match outcome {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      if let Err(reply_error) = terminal.reply(ResponseContent::Error(e)) {
        debug!("Could not report error: {reply_error}");
      }
      ExitCode::FAILURE
    },
  }
}

/// Loads the configuration with command line overrides applied.
fn load_config(cli: &Cli) -> Result<Config> {
  let mut config = Config::load(cli.config.as_deref()).map_err(CliError::Config)?;
  if let Some(max_results) = cli.max_results {
    config = config.with_max_results(max_results);
  }
  if let Some(policy) = cli.policy {
    config = config.with_policy(policy);
  }
  config.validate().map_err(CliError::Config)?;
  Ok(config)
}

/// Runs one search, filter and output cycle against `source`.
async fn run<S, I>(cli: &Cli, config: &Config, source: &S, interaction: &I) -> Result<()>
where
  S: RecordSource + ?Sized,
  I: UserInteraction, {
  let classifier = config.classifier().map_err(CliError::Config)?;

  let records = match acquire(source, &cli.query, config.entrez.max_results).await {
    Acquisition::Found(records) => records,
    Acquisition::EmptyQuery => {
      interaction.reply(ResponseContent::Error(FetchError::EmptyQuery.into()))?;
      Vec::new()
    },
    Acquisition::NoMatches => Vec::new(),
    Acquisition::ServiceUnavailable(reason) => {
      interaction
        .reply(ResponseContent::Warning(&format!("PubMed could not be reached: {reason}")))?;
      Vec::new()
    },
  };

  if records.is_empty() {
    return interaction.reply(ResponseContent::Info("No research papers found."));
  }
  if cli.debug {
    interaction.reply(ResponseContent::Info(&format!("Fetched {} papers", records.len())))?;
  }

  let papers = classifier.filter_non_academic_authors(&records);
  if cli.debug {
    interaction.reply(ResponseContent::Info(&format!(
      "{} papers with company-affiliated authors ({} policy)",
      papers.len(),
      classifier.policy()
    )))?;
  }

  if papers.is_empty() {
    return interaction
      .reply(ResponseContent::Info("No papers with company-affiliated authors found."));
  }

  emit(cli, interaction, &papers)
}

/// Saves `papers` to the requested file, or prints them when none was given.
fn emit<I: UserInteraction>(cli: &Cli, interaction: &I, papers: &[ClassifiedPaper]) -> Result<()> {
  match &cli.file {
    Some(path) => {
      output::write_csv(papers, path)
        .map_err(|source| CliError::Output { path: path.clone(), source })?;
      interaction.reply(ResponseContent::Success(&format!(
        "Filtered data saved to {}",
        path.display()
      )))
    },
    None => interaction.reply(ResponseContent::Papers(papers)),
  }
}
