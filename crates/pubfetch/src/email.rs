//! Corresponding author email discovery.
//!
//! PubMed has no dedicated field for the corresponding author's address; it is
//! usually buried in one of the affiliation strings ("... Boston, MA, USA.
//! jane.doe@example.com."). The first address found anywhere in a paper's
//! affiliations is taken as the contact email.

use super::*;

lazy_static! {
  static ref EMAIL: Regex =
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap();
}

/// Returns the first email address found in the given texts.
///
/// The texts are joined with a single space before matching, so only the first
/// address across all of them is reported.
///
/// # Examples
///
/// ```
/// use pubfetch::email::extract_email;
///
/// let email = extract_email(["Contact: j.doe@biotech-corp.com for details"]);
/// assert_eq!(email.as_deref(), Some("j.doe@biotech-corp.com"));
///
/// assert_eq!(extract_email(["Acme Pharma Inc, Boston"]), None);
/// ```
pub fn extract_email<I, S>(texts: I) -> Option<String>
where
  I: IntoIterator<Item = S>,
  S: AsRef<str>, {
  let joined = texts.into_iter().map(|s| s.as_ref().to_owned()).collect::<Vec<_>>().join(" ");
  let found = EMAIL.find(&joined).map(|m| m.as_str().to_string());
  trace!("Email lookup found {found:?}");
  found
}

/// Like [`extract_email`], but renders a miss as [`EMAIL_NOT_FOUND`].
pub fn extract_email_or_sentinel<I, S>(texts: I) -> String
where
  I: IntoIterator<Item = S>,
  S: AsRef<str>, {
  extract_email(texts).unwrap_or_else(|| EMAIL_NOT_FOUND.to_string())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[traced_test]
  #[test]
  fn test_email_in_free_text() {
    assert_eq!(
      extract_email(["Contact: j.doe@biotech-corp.com for details"]).as_deref(),
      Some("j.doe@biotech-corp.com")
    );
  }

  #[test]
  fn test_no_email() {
    assert_eq!(extract_email(["Department of Biology, Harvard University"]), None);
    assert_eq!(extract_email_or_sentinel(["no address here"]), EMAIL_NOT_FOUND);
    assert_eq!(extract_email(Vec::<String>::new()), None);
  }

  #[test]
  fn test_trailing_period_is_not_part_of_domain() {
    let affiliation = "Acme Therapeutics, Cambridge, MA, USA. alice.smith@acme-tx.com.";
    assert_eq!(extract_email([affiliation]).as_deref(), Some("alice.smith@acme-tx.com"));
  }

  #[test]
  fn test_first_match_across_joined_affiliations() {
    let affiliations = vec![
      "Harvard University, Boston".to_string(),
      "XYZ Pharma Inc. first@xyz.com".to_string(),
      "second@abc.org".to_string(),
    ];
    assert_eq!(extract_email(&affiliations).as_deref(), Some("first@xyz.com"));
  }
}
