//! Error types for the pubfetch library.
//!
//! Every failure at an external boundary (user input, the PubMed service, the
//! filesystem) is represented here so callers can decide how to degrade:
//!
//! ```
//! use pubfetch::error::FetchError;
//!
//! fn describe(err: &FetchError) -> &'static str {
//!   match err {
//!     FetchError::EmptyQuery => "nothing to search for",
//!     FetchError::Network(_) | FetchError::Api(_) => "PubMed is unavailable",
//!     _ => "something else went wrong",
//!   }
//! }
//! ```

use thiserror::Error;

/// Error type alias used for the [`pubfetch`](crate) crate.
pub type Result<T> = core::result::Result<T, FetchError>;

/// Errors that can occur while fetching, classifying, or writing papers.
#[derive(Error, Debug)]
pub enum FetchError {
  /// The search query was empty or contained only whitespace.
  #[error("Query cannot be empty.")]
  EmptyQuery,

  /// A network request to the E-utilities failed.
  ///
  /// This covers unreachable hosts, TLS failures and request timeouts.
  #[error(transparent)]
  Network(#[from] reqwest::Error),

  /// The E-utilities answered, but with an error status or an error document.
  ///
  /// The string holds the status line or the message reported by the service.
  #[error("API error: {0}")]
  Api(String),

  /// An esearch response could not be read as XML.
  #[error(transparent)]
  Xml(#[from] quick_xml::Error),

  /// A single MEDLINE record was malformed.
  #[error("Malformed record: {0}")]
  Record(String),

  /// A classifier pattern failed to compile.
  #[error(transparent)]
  Pattern(#[from] regex::Error),

  /// A file system operation failed.
  ///
  /// This occurs when the output file or the configuration file cannot be
  /// created, read, or written (missing directories, permissions).
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// Writing CSV output failed.
  #[error(transparent)]
  Csv(#[from] csv::Error),

  /// The configuration file is not valid TOML for [`Config`](crate::config::Config).
  #[error(transparent)]
  TomlDe(#[from] toml::de::Error),

  /// A configuration value was rejected.
  #[error("{0}")]
  Config(String),
}
