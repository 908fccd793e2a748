//! Company versus academic affiliation classification.
//!
//! An affiliation counts as a company when it mentions a corporate marker
//! ("Inc", "Pharma", "Therapeutics", ...) and does **not** mention an academic
//! one ("University", "College", "Medical School", ...). Academic markers always
//! win: hospital and university affiliations routinely name a "Research
//! Institute" or "Laboratories", and those must not be reported as companies.
//! The price is that a company with "University" in its name is missed.
//!
//! Affiliation strings often list several institutions at once, so papers are
//! classified segment by segment: the raw string is split on `;`, `,` and the
//! word "and", and every segment is tested on its own.
//!
//! # Examples
//!
//! ```
//! use pubfetch::{classifier::Classifier, paper::PaperRecord};
//!
//! let classifier = Classifier::default();
//! assert!(classifier.is_company_affiliation("XYZ Pharma Inc"));
//! assert!(!classifier.is_company_affiliation("Harvard University"));
//!
//! let record = PaperRecord::new("12345", "Test Paper", "2023")
//!   .with_author("Dr. Alice", Some("XYZ Pharma Inc"))
//!   .with_author("Dr. Bob", Some("Harvard University"));
//!
//! let paper = classifier.classify(&record).unwrap();
//! assert_eq!(paper.non_academic_authors, vec!["Dr. Alice"]);
//! assert_eq!(paper.company_affiliations, vec!["XYZ Pharma Inc"]);
//! ```

use super::*;

/// Default academic markers. Any match marks an affiliation as academic.
pub const DEFAULT_ACADEMIC_PATTERNS: &[&str] = &[
  "University",
  "Universit[a-z]*",
  "College",
  "School of",
  "Academy",
  "Faculty of",
  "Department of",
  "Institute of Technology",
  "Medical School",
  "Teaching Hospital",
  "Universitario",
];

/// Default company markers, consulted only when no academic marker matched.
pub const DEFAULT_COMPANY_PATTERNS: &[&str] = &[
  "Inc",
  "Ltd",
  "Corp",
  "Pharma",
  "Technologies",
  "Solutions",
  "LLC",
  "Consulting",
  "Biotech",
  "Laboratories",
  "Diagnostics",
  "Therapeutics",
  "Biosciences",
  "Research Institute",
];

/// Default delimiter between institutions inside one affiliation string.
///
/// The word "and" is matched case-sensitively.
pub const DEFAULT_SPLIT_PATTERN: &str = r";|,|\band\b";

lazy_static! {
  static ref DEFAULT_VOCABULARY: Vocabulary = Vocabulary::new(
    DEFAULT_ACADEMIC_PATTERNS,
    DEFAULT_COMPANY_PATTERNS,
    DEFAULT_SPLIT_PATTERN
  )
  .unwrap();
}

/// Compiled keyword sets used by a [`Classifier`].
///
/// Each keyword pattern is a regular expression fragment. Fragments are matched
/// case-insensitively and only on word boundaries, so `"Inc"` matches
/// "Acme Inc." but not "Incyte Research".
#[derive(Debug, Clone)]
pub struct Vocabulary {
  /// Alternation of all academic fragments, `None` when the list is empty
  academic: Option<Regex>,
  /// Alternation of all company fragments, `None` when the list is empty
  company:  Option<Regex>,
  /// Delimiter between institutions in one affiliation string
  split:    Regex,
}

impl Vocabulary {
  /// Compiles a vocabulary from keyword fragments and a delimiter pattern.
  ///
  /// # Errors
  ///
  /// Returns [`FetchError::Pattern`] when any fragment or the delimiter is not a
  /// valid regular expression.
  ///
  /// # Examples
  ///
  /// ```
  /// use pubfetch::classifier::{Classifier, Vocabulary};
  ///
  /// let vocabulary = Vocabulary::new(&["Hospital"], &["GmbH", "AG"], ";")?;
  /// let classifier = Classifier::default().with_vocabulary(vocabulary);
  /// assert!(classifier.is_company_affiliation("Roche Diagnostics GmbH"));
  /// assert!(!classifier.is_company_affiliation("Charite Hospital GmbH"));
  /// # Ok::<(), pubfetch::error::FetchError>(())
  /// ```
  pub fn new<S: AsRef<str>>(academic: &[S], company: &[S], split: &str) -> Result<Self> {
    Ok(Self {
      academic: keyword_regex(academic)?,
      company:  keyword_regex(company)?,
      split:    Regex::new(split)?,
    })
  }

  /// Whether any academic keyword occurs in `text`.
  pub fn is_academic(&self, text: &str) -> bool {
    self.academic.as_ref().is_some_and(|re| re.is_match(text))
  }

  /// Whether any company keyword occurs in `text`.
  pub fn is_company(&self, text: &str) -> bool {
    self.company.as_ref().is_some_and(|re| re.is_match(text))
  }
}

impl Default for Vocabulary {
  fn default() -> Self { DEFAULT_VOCABULARY.clone() }
}

/// Builds one case-insensitive, word-bounded alternation from keyword fragments.
fn keyword_regex<S: AsRef<str>>(fragments: &[S]) -> Result<Option<Regex>> {
  if fragments.is_empty() {
    return Ok(None);
  }
  let alternation =
    fragments.iter().map(|f| format!("(?:{})", f.as_ref())).collect::<Vec<_>>().join("|");
  let re = RegexBuilder::new(&format!(r"\b(?:{alternation})\b")).case_insensitive(true).build()?;
  Ok(Some(re))
}

/// Which classified papers are reported.
///
/// A paper always needs at least one company affiliation. The policies differ
/// on papers whose company affiliations cannot be tied to a listed author, which
/// happens when a record has more affiliations than authors.
///
/// Names are matched case-insensitively, both on the command line and in the
/// configuration file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmissionPolicy {
  /// Require both a company affiliation and a company-affiliated author
  #[default]
  RequireAuthors,
  /// Require only a company affiliation; the author list may be empty
  CompanyOnly,
}

impl Display for EmissionPolicy {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      EmissionPolicy::RequireAuthors => write!(f, "require-authors"),
      EmissionPolicy::CompanyOnly => write!(f, "company-only"),
    }
  }
}

impl<'de> Deserialize<'de> for EmissionPolicy {
  fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
  where D: serde::Deserializer<'de> {
    let name = String::deserialize(deserializer)?;
    name.parse().map_err(serde::de::Error::custom)
  }
}

impl FromStr for EmissionPolicy {
  type Err = FetchError;

  fn from_str(s: &str) -> Result<Self> {
    match &s.to_lowercase() as &str {
      "require-authors" => Ok(EmissionPolicy::RequireAuthors),
      "company-only" => Ok(EmissionPolicy::CompanyOnly),
      s => Err(FetchError::Config(format!(
        "Unknown emission policy \"{s}\", expected \"require-authors\" or \"company-only\""
      ))),
    }
  }
}

/// Decides which papers have company-affiliated authors.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
  /// Keyword sets to classify with
  vocabulary: Vocabulary,
  /// Which papers to report
  policy:     EmissionPolicy,
}

impl Classifier {
  /// Creates a classifier with the given vocabulary and policy.
  pub fn new(vocabulary: Vocabulary, policy: EmissionPolicy) -> Self {
    Self { vocabulary, policy }
  }

  /// Replaces the vocabulary.
  pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
    self.vocabulary = vocabulary;
    self
  }

  /// Replaces the emission policy.
  pub fn with_policy(mut self, policy: EmissionPolicy) -> Self {
    self.policy = policy;
    self
  }

  /// The emission policy in use.
  pub fn policy(&self) -> EmissionPolicy { self.policy }

  /// Whether a single affiliation names a company and no academic institution.
  ///
  /// Empty text and the [`NOT_AVAILABLE`] placeholder are never companies.
  pub fn is_company_affiliation(&self, affiliation: &str) -> bool {
    let affiliation = affiliation.trim();
    if is_absent(affiliation) || self.vocabulary.is_academic(affiliation) {
      return false;
    }
    self.vocabulary.is_company(affiliation)
  }

  /// Splits a raw affiliation into trimmed, non-empty institution segments.
  ///
  /// ```
  /// use pubfetch::classifier::Classifier;
  ///
  /// let segments = Classifier::default().split_affiliation("Dept of Biology, XYZ Pharma Inc");
  /// assert_eq!(segments, vec!["Dept of Biology", "XYZ Pharma Inc"]);
  /// ```
  pub fn split_affiliation<'a>(&self, affiliation: &'a str) -> Vec<&'a str> {
    self.vocabulary.split.split(affiliation).map(str::trim).filter(|s| !s.is_empty()).collect()
  }

  /// Company segments of one raw affiliation, in order of appearance.
  fn company_segments<'a>(&self, affiliation: &'a str) -> Vec<&'a str> {
    if is_absent(affiliation.trim()) {
      return Vec::new();
    }
    self
      .split_affiliation(affiliation)
      .into_iter()
      .filter(|segment| self.is_company_affiliation(segment))
      .collect()
  }

  /// Authors whose affiliation contains at least one company segment.
  ///
  /// Authors and affiliations are paired by index and the pairing stops at the
  /// shorter list. Order is preserved and a name listed twice is reported twice.
  pub fn extract_non_academic_authors(
    &self,
    authors: &[String],
    affiliations: &[String],
  ) -> Vec<String> {
    authors
      .iter()
      .zip(affiliations)
      .filter(|(_, affiliation)| !self.company_segments(affiliation).is_empty())
      .map(|(author, _)| author.clone())
      .collect()
  }

  /// Distinct company segments across all affiliations, in order of first appearance.
  pub fn company_affiliations(&self, affiliations: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    affiliations
      .iter()
      .flat_map(|affiliation| self.company_segments(affiliation))
      .filter(|segment| seen.insert(*segment))
      .map(str::to_string)
      .collect()
  }

  /// Classifies one record, returning `None` when it is not reported.
  pub fn classify(&self, record: &PaperRecord) -> Option<ClassifiedPaper> {
    let company_affiliations = self.company_affiliations(&record.affiliations);
    if company_affiliations.is_empty() {
      trace!("Dropping {}: no company affiliations", record.identifier);
      return None;
    }

    let non_academic_authors =
      self.extract_non_academic_authors(&record.authors, &record.affiliations);
    if non_academic_authors.is_empty() && self.policy == EmissionPolicy::RequireAuthors {
      debug!(
        "Dropping {}: company affiliations {:?} have no matching author",
        record.identifier, company_affiliations
      );
      return None;
    }

    let email = record
      .email
      .clone()
      .unwrap_or_else(|| email::extract_email_or_sentinel(&record.affiliations));

    Some(ClassifiedPaper {
      identifier: record.identifier.clone(),
      title: record.title.clone(),
      publication_date: record.publication_date.clone(),
      non_academic_authors,
      company_affiliations,
      email,
    })
  }

  /// Classifies every record and keeps the reported ones, preserving input order.
  pub fn filter_non_academic_authors(&self, records: &[PaperRecord]) -> Vec<ClassifiedPaper> {
    let papers: Vec<_> = records.iter().filter_map(|record| self.classify(record)).collect();
    debug!(
      "Filtered {} of {} papers with company affiliations ({} policy)",
      papers.len(),
      records.len(),
      self.policy
    );
    papers
  }
}

/// Whether an affiliation is missing altogether.
fn is_absent(affiliation: &str) -> bool {
  affiliation.is_empty() || affiliation == NOT_AVAILABLE
}

/// [`Classifier::is_company_affiliation`] with the default vocabulary.
pub fn is_company_affiliation(affiliation: &str) -> bool {
  Classifier::default().is_company_affiliation(affiliation)
}

/// [`Classifier::extract_non_academic_authors`] with the default vocabulary.
pub fn extract_non_academic_authors(authors: &[String], affiliations: &[String]) -> Vec<String> {
  Classifier::default().extract_non_academic_authors(authors, affiliations)
}

/// [`Classifier::filter_non_academic_authors`] with the default vocabulary and policy.
pub fn filter_non_academic_authors(records: &[PaperRecord]) -> Vec<ClassifiedPaper> {
  Classifier::default().filter_non_academic_authors(records)
}
