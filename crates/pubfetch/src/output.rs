//! CSV output of classified papers.
//!
//! Every file starts with a header row and uses a fixed column order:
//!
//! | PubmedID | Title | Publication Date | Non-academic Author(s) | Company Affiliation(s) | Corresponding Author Email |
//!
//! All fields are quoted and rows end in `\r\n`. Author and company lists are
//! joined with `", "` inside their column.

use std::{fs::File, io::Write};

use csv::{QuoteStyle, Terminator, WriterBuilder};

use super::*;

/// Column headers, in output order.
pub const COLUMNS: [&str; 6] = [
  "PubmedID",
  "Title",
  "Publication Date",
  "Non-academic Author(s)",
  "Company Affiliation(s)",
  "Corresponding Author Email",
];

/// Writes `papers` as CSV to `writer`, header included.
///
/// Nothing at all is written for an empty slice.
///
/// # Examples
///
/// ```
/// use pubfetch::{classifier::Classifier, output::write_records, paper::PaperRecord};
///
/// let record = PaperRecord::new("1", "Title", "2024").with_author("A", Some("Acme Inc"));
/// let papers = Classifier::default().filter_non_academic_authors(&[record]);
///
/// let mut buffer = Vec::new();
/// write_records(&papers, &mut buffer)?;
/// assert!(String::from_utf8(buffer)?.starts_with("\"PubmedID\",\"Title\""));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn write_records<W: Write>(papers: &[ClassifiedPaper], writer: W) -> Result<()> {
  if papers.is_empty() {
    return Ok(());
  }

  let mut csv_writer = WriterBuilder::new()
    .quote_style(QuoteStyle::Always)
    .terminator(Terminator::CRLF)
    .from_writer(writer);
  for paper in papers {
    csv_writer.serialize(paper)?;
  }
  csv_writer.flush()?;
  Ok(())
}

/// Writes `papers` to a CSV file at `path`, replacing any existing file.
///
/// With no papers to write, a warning is logged and no file is created.
///
/// # Errors
///
/// Returns [`FetchError::Io`] when the file cannot be created (missing
/// directory, permissions) and [`FetchError::Csv`] when writing fails.
pub fn write_csv(papers: &[ClassifiedPaper], path: impl AsRef<Path>) -> Result<()> {
  let path = path.as_ref();
  if papers.is_empty() {
    warn!("No data to save, not creating {}", path.display());
    return Ok(());
  }

  let file = File::create(path)?;
  write_records(papers, file)?;
  debug!("Wrote {} papers to {}", papers.len(), path.display());
  Ok(())
}
