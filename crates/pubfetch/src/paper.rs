//! Paper types flowing through the pipeline.
//!
//! A [`PaperRecord`] is what the record source hands over: the bibliographic
//! metadata of one PubMed entry, with authors and affiliations kept as parallel
//! lists. A [`ClassifiedPaper`] is what survives classification: the same paper
//! reduced to its company-affiliated authors, the companies themselves and a
//! contact email.
//!
//! # Examples
//!
//! ```
//! use pubfetch::paper::PaperRecord;
//!
//! let record = PaperRecord::new("12345", "Test Paper", "2023")
//!   .with_author("Dr. Alice", Some("XYZ Pharma Inc"))
//!   .with_author("Dr. Bob", Some("Harvard University"));
//!
//! assert_eq!(record.authors.len(), 2);
//! assert_eq!(record.affiliations.len(), 2);
//! ```

use super::*;

/// Placeholder used by PubMed records for a missing value.
pub const NOT_AVAILABLE: &str = "N/A";

/// Placeholder reported when no corresponding author email could be found.
pub const EMAIL_NOT_FOUND: &str = "not found";

/// Bibliographic metadata for a single paper, as retrieved from PubMed.
///
/// `affiliations` is positionally aligned with `authors`, but the source data is
/// not guaranteed to be: the list may be shorter than the author list, and a
/// missing entry means the author has no known affiliation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperRecord {
  /// PubMed identifier (PMID)
  pub identifier:       String,
  /// Full paper title
  pub title:            String,
  /// Publication date exactly as reported, e.g. "2023 Jan 12"
  pub publication_date: String,
  /// Author names in publication order
  pub authors:          Vec<String>,
  /// Affiliation strings, aligned by index with `authors`
  pub affiliations:     Vec<String>,
  /// Corresponding author email, when one was found in the record
  #[serde(default)]
  pub email:            Option<String>,
}

impl PaperRecord {
  /// Creates a record with no authors or affiliations.
  pub fn new(
    identifier: impl Into<String>,
    title: impl Into<String>,
    publication_date: impl Into<String>,
  ) -> Self {
    Self {
      identifier: identifier.into(),
      title: title.into(),
      publication_date: publication_date.into(),
      ..Self::default()
    }
  }

  /// Appends an author and, when given, the affiliation at the same position.
  ///
  /// An author without an affiliation only keeps the lists aligned while no
  /// later author adds one; after that the alignment is whatever the caller made
  /// it, just as with raw PubMed data.
  pub fn with_author(mut self, name: impl Into<String>, affiliation: Option<&str>) -> Self {
    self.authors.push(name.into());
    if let Some(affiliation) = affiliation {
      self.affiliations.push(affiliation.to_string());
    }
    self
  }

  /// Sets the corresponding author email.
  pub fn with_email(mut self, email: impl Into<String>) -> Self {
    self.email = Some(email.into());
    self
  }

  /// Iterates over `(author, affiliation)` pairs.
  ///
  /// Pairing is strictly by index and stops at the end of the shorter list.
  pub fn author_affiliations(&self) -> impl Iterator<Item = (&str, &str)> {
    self.authors.iter().map(String::as_str).zip(self.affiliations.iter().map(String::as_str))
  }
}

/// A paper with at least one company affiliation.
///
/// Serializes to the CSV columns written by [`output`](crate::output), with both
/// lists joined by `", "`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedPaper {
  /// PubMed identifier (PMID)
  #[serde(rename = "PubmedID")]
  pub identifier:           String,
  /// Full paper title
  #[serde(rename = "Title")]
  pub title:                String,
  /// Publication date exactly as reported
  #[serde(rename = "Publication Date")]
  pub publication_date:     String,
  /// Authors with at least one company affiliation, in publication order
  #[serde(rename = "Non-academic Author(s)", serialize_with = "serialize_joined")]
  pub non_academic_authors: Vec<String>,
  /// Distinct company affiliation segments, in order of first appearance
  #[serde(rename = "Company Affiliation(s)", serialize_with = "serialize_joined")]
  pub company_affiliations: Vec<String>,
  /// Corresponding author email, or [`EMAIL_NOT_FOUND`]
  #[serde(rename = "Corresponding Author Email")]
  pub email:                String,
}

impl ClassifiedPaper {
  /// Non-academic authors joined for display.
  pub fn authors_joined(&self) -> String { self.non_academic_authors.join(", ") }

  /// Company affiliations joined for display.
  pub fn companies_joined(&self) -> String { self.company_affiliations.join(", ") }
}

impl Display for ClassifiedPaper {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{} ({}): {}", self.identifier, self.publication_date, self.title)
  }
}

/// Serializes a list of strings as a single `", "`-joined field.
fn serialize_joined<S>(values: &[String], serializer: S) -> std::result::Result<S::Ok, S::Error>
where S: serde::Serializer {
  serializer.serialize_str(&values.join(", "))
}
