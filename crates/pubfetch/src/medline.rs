//! Parser for MEDLINE formatted PubMed records.
//!
//! `efetch` with `rettype=medline` returns plain text in which every line starts
//! with a tag of up to four characters, padded to four columns and followed by
//! `"- "`. Long values wrap onto continuation lines indented by six spaces, and
//! records are separated by blank lines:
//!
//! ```text
//! PMID- 38000001
//! TI  - Safety of a novel kinase inhibitor in a
//!       phase 1 trial.
//! DP  - 2023 Nov 20
//! AU  - Doe J
//! AD  - Acme Pharma Inc, Boston, MA, USA. jane.doe@acme.com.
//! AU  - Roe R
//! AD  - Department of Oncology, Harvard Medical School, Boston, MA, USA.
//! ```
//!
//! Only the fields needed to classify a paper are kept; everything else is read
//! and discarded.

use super::*;

/// Tag holding the PubMed identifier.
const TAG_PMID: &str = "PMID";
/// Tag holding the title.
const TAG_TITLE: &str = "TI";
/// Tag holding the publication date.
const TAG_DATE: &str = "DP";
/// Tag holding one author name, repeated per author.
const TAG_AUTHOR: &str = "AU";
/// Tag holding one affiliation, repeated per author.
const TAG_AFFILIATION: &str = "AD";

/// Indentation that marks a continuation line.
const CONTINUATION: &str = "      ";

/// Parses every record in a MEDLINE document.
///
/// Malformed records are logged and skipped; the rest of the batch is still
/// returned.
///
/// # Examples
///
/// ```
/// use pubfetch::medline::parse_records;
///
/// let text = "PMID- 1\nTI  - First\nDP  - 2020\n\nPMID- 2\nTI  - Second\nDP  - 2021\n";
/// let records = parse_records(text);
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[1].title, "Second");
/// ```
pub fn parse_records(text: &str) -> Vec<PaperRecord> {
  let mut records = Vec::new();
  for (index, block) in record_blocks(text).into_iter().enumerate() {
    match parse_record(block.as_slice()) {
      Ok(record) => records.push(record),
      Err(e) => warn!("Skipping MEDLINE record #{}: {}", index + 1, e),
    }
  }
  debug!("Parsed {} MEDLINE records", records.len());
  records
}

/// Parses a single record given as its lines.
///
/// # Errors
///
/// Returns [`FetchError::Record`] when a line is neither a tag line nor a
/// continuation, or when the record has no `PMID`.
pub fn parse_record<S: AsRef<str>>(lines: &[S]) -> Result<PaperRecord> {
  let fields = parse_fields(lines)?;

  let single = |tag: &str| -> Option<String> {
    fields.iter().find(|(t, _)| t == tag).map(|(_, value)| value.clone())
  };
  let repeated = |tag: &str| -> Vec<String> {
    fields.iter().filter(|(t, _)| t == tag).map(|(_, value)| value.clone()).collect()
  };

  let identifier = single(TAG_PMID)
    .filter(|pmid| !pmid.is_empty())
    .ok_or_else(|| FetchError::Record("missing PMID".to_string()))?;
  let affiliations = repeated(TAG_AFFILIATION);
  let email = email::extract_email(&affiliations);

  Ok(PaperRecord {
    identifier,
    title: single(TAG_TITLE).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
    publication_date: single(TAG_DATE).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
    authors: repeated(TAG_AUTHOR),
    affiliations,
    email,
  })
}

/// Splits a document into groups of non-blank lines.
fn record_blocks(text: &str) -> Vec<Vec<&str>> {
  let mut blocks = Vec::new();
  let mut current = Vec::new();
  for line in text.lines() {
    if line.trim().is_empty() {
      if !current.is_empty() {
        blocks.push(std::mem::take(&mut current));
      }
    } else {
      current.push(line);
    }
  }
  if !current.is_empty() {
    blocks.push(current);
  }
  blocks
}

/// Reads `(tag, value)` pairs in order, folding continuation lines into the
/// preceding value.
fn parse_fields<S: AsRef<str>>(lines: &[S]) -> Result<Vec<(String, String)>> {
  let mut fields: Vec<(String, String)> = Vec::new();

  for line in lines {
    let line = line.as_ref().trim_end();

    if let Some(continued) = line.strip_prefix(CONTINUATION) {
      let Some((_, value)) = fields.last_mut() else {
        return Err(FetchError::Record(format!("continuation before any tag: {line:?}")));
      };
      if !value.is_empty() {
        value.push(' ');
      }
      value.push_str(continued.trim());
      continue;
    }

    match line.get(..4).zip(line.get(4..)) {
      Some((tag, rest)) if !tag.trim().is_empty() && rest.starts_with('-') => {
        fields.push((tag.trim().to_string(), rest[1..].trim().to_string()));
      },
      _ => return Err(FetchError::Record(format!("unrecognized line: {line:?}"))),
    }
  }

  trace!("Read {} MEDLINE fields", fields.len());
  Ok(fields)
}
