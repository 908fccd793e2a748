//! Terminal output for the binary.

use std::io::Write;

use console::style;

use super::*;

/// Prefix for information messages
pub static INFO_PREFIX: &str = "ℹ ";
/// Prefix for success messages
pub static SUCCESS_PREFIX: &str = "✓ ";
/// Prefix for error messages
pub static ERROR_PREFIX: &str = "✗ ";
/// Prefix for warning messages
pub static WARNING_PREFIX: &str = "! ";

/// Line printed after every paper in a console listing.
pub static SEPARATOR: &str =
  "--------------------------------------------------------------------------------";

/// Something to show the user.
#[derive(Debug)]
pub enum ResponseContent<'a> {
  /// Filtered papers, printed as blocks
  Papers(&'a [ClassifiedPaper]),
  /// A completed step
  Success(&'a str),
  /// A failure that ends the run
  Error(CliError),
  /// Progress or status
  Info(&'a str),
  /// A degraded but recoverable outcome
  Warning(&'a str),
}

/// A channel to the user.
pub trait UserInteraction {
  /// Shows `content` to the user.
  fn reply(&self, content: ResponseContent) -> Result<()>;
}

/// Coloured output on stdout, with errors and warnings on stderr.
#[derive(Debug, Default)]
pub struct Terminal;

impl UserInteraction for Terminal {
  fn reply(&self, content: ResponseContent) -> Result<()> {
    match content {
      ResponseContent::Papers(papers) => {
        let mut stdout = std::io::stdout().lock();
        for paper in papers {
          write!(stdout, "{}", render_paper(paper))?;
        }
        stdout.flush()?;
      },
      ResponseContent::Success(message) =>
        println!("{} {}", style(SUCCESS_PREFIX).green(), message),
      ResponseContent::Error(error) => eprintln!("{} {}", style(ERROR_PREFIX).red(), error),
      ResponseContent::Info(message) => println!("{} {}", style(INFO_PREFIX).blue(), message),
      ResponseContent::Warning(message) =>
        eprintln!("{} {}", style(WARNING_PREFIX).yellow(), message),
    }
    Ok(())
  }
}

/// Formats one paper as a labelled block ending in [`SEPARATOR`].
pub fn render_paper(paper: &ClassifiedPaper) -> String {
  let fields = [
    ("PubmedID", paper.identifier.clone()),
    ("Title", paper.title.clone()),
    ("Publication Date", paper.publication_date.clone()),
    ("Non-academic Authors", paper.authors_joined()),
    ("Company", paper.companies_joined()),
    ("Corresponding Author Email", paper.email.clone()),
  ];

  let mut block = String::new();
  for (label, value) in fields {
    block.push_str(&format!("{}: {}\n", style(label).bold(), value));
  }
  block.push_str(SEPARATOR);
  block.push('\n');
  block
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_render_paper() {
    let paper = ClassifiedPaper {
      identifier:           "12345".into(),
      title:                "Test Paper".into(),
      publication_date:     "2023".into(),
      non_academic_authors: vec!["Dr. Alice".into(), "Dr. Carol".into()],
      company_affiliations: vec!["XYZ Pharma Inc".into()],
      email:                "alice@xyzpharma.com".into(),
    };

    let block = render_paper(&paper);
    assert!(block.contains("12345"));
    assert!(block.contains("Dr. Alice, Dr. Carol"));
    assert!(block.contains("XYZ Pharma Inc"));
    assert!(block.contains("Corresponding Author Email"));
    assert!(block.ends_with(&format!("{SEPARATOR}\n")));
    assert_eq!(block.lines().count(), 7);
  }
}
