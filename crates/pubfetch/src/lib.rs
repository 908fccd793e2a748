//! PubMed retrieval and company-affiliation filtering library.
//!
//! `pubfetch` searches PubMed for papers matching a query and keeps only the papers
//! that have at least one author affiliated with a commercial organization, such as a
//! pharmaceutical or biotech company. It provides:
//!
//! - Paper search and metadata retrieval through the NCBI E-utilities
//! - Parsing of the flat MEDLINE record format
//! - Affiliation classification with academic-override rules
//! - Corresponding author email discovery
//! - Quoted CSV output of the filtered papers
//!
//! # Getting Started
//!
//! ```no_run
//! use pubfetch::{
//!   classifier::Classifier,
//!   entrez::{acquire, Acquisition, EntrezClient},
//!   output,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!   let client = EntrezClient::new();
//!
//!   if let Acquisition::Found(records) = acquire(&client, "lung cancer", 100).await {
//!     let papers = Classifier::default().filter_non_academic_authors(&records);
//!     output::write_csv(&papers, "results.csv")?;
//!   }
//!
//!   Ok(())
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`paper`]: Input records and classified output papers
//! - [`classifier`]: Company versus academic affiliation heuristics
//! - [`email`]: Email address extraction from affiliation text
//! - [`medline`]: Parser for MEDLINE formatted records
//! - [`entrez`]: PubMed E-utilities client and acquisition outcomes
//! - [`output`]: CSV emission
//! - [`config`]: TOML configuration for the client and classifier
//! - [`prelude`]: Common traits and types for ergonomic imports

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{
  collections::HashSet,
  fmt::Display,
  path::{Path, PathBuf},
  str::FromStr,
  time::Duration,
};

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};
#[cfg(test)] use {tempfile::tempdir, tracing_test::traced_test};

pub mod classifier;
pub mod config;
pub mod email;
pub mod entrez;
pub mod error;
pub mod medline;
pub mod output;
pub mod paper;

use crate::{error::*, paper::*};

/// Common traits and types for ergonomic imports.
///
/// ```no_run
/// use pubfetch::prelude::*;
///
/// async fn example(source: &impl RecordSource) -> Result<(), FetchError> {
///   let ids = source.search("crispr", 10).await?;
///   let records: Vec<PaperRecord> = source.fetch_details(&ids).await?;
///   println!("{} records", records.len());
///   Ok(())
/// }
/// ```
pub mod prelude {
  pub use crate::{
    classifier::Classifier,
    entrez::RecordSource,
    error::FetchError,
    paper::{ClassifiedPaper, PaperRecord},
  };
}
