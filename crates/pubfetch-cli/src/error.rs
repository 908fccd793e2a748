//! Error types for the `get-papers-list` binary.

use thiserror::Error;

use super::*;

/// Error type alias used for the binary.
pub type Result<T> = core::result::Result<T, CliError>;

/// Errors that end a run with a failure status.
#[derive(Error, Debug)]
pub enum CliError {
  /// A failure reported by the [`pubfetch`] library.
  #[error(transparent)]
  Fetch(#[from] FetchError),

  /// The configuration file could not be loaded or holds invalid values.
  #[error("Failed to load configuration: {0}")]
  Config(FetchError),

  /// The CSV file could not be written.
  #[error("Failed to write {}: {source}", path.display())]
  Output {
    /// Requested output file
    path:   PathBuf,
    /// Underlying failure
    source: FetchError,
  },

  /// Writing to the terminal failed.
  #[error(transparent)]
  Io(#[from] std::io::Error),
}
