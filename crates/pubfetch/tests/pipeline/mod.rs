use super::*;

#[test]
fn test_fixture_parses_valid_records_only() {
  let records = fixture_records();
  let identifiers: Vec<_> = records.iter().map(|r| r.identifier.as_str()).collect();
  assert_eq!(identifiers, vec!["38100001", "38100002", "38100003", "38100005"]);

  assert_eq!(
    records[0].title,
    "Preclinical evaluation of an oral GLP-1 receptor agonist in obese cynomolgus monkeys."
  );
  assert_eq!(records[0].email.as_deref(), Some("n.okafor@helixtx.com"));
}

#[test]
fn test_fixture_classification() {
  let papers = Classifier::default().filter_non_academic_authors(&fixture_records());
  assert_eq!(papers.len(), 2);

  let helix = &papers[0];
  assert_eq!(helix.identifier, "38100001");
  assert_eq!(helix.non_academic_authors, vec!["Alvarez M", "Okafor N"]);
  assert_eq!(helix.company_affiliations, vec!["Helix Therapeutics"]);
  assert_eq!(helix.email, "n.okafor@helixtx.com");

  // "Research and Development" splits into two segments, neither a company.
  let nordic = &papers[1];
  assert_eq!(nordic.identifier, "38100003");
  assert_eq!(nordic.non_academic_authors, vec!["Muller T"]);
  assert_eq!(nordic.company_affiliations, vec!["Nordic Diagnostics"]);
  assert_eq!(nordic.email, "jla@ssi.dk");
}

#[test]
fn test_every_reported_paper_has_a_company() {
  for policy in [EmissionPolicy::RequireAuthors, EmissionPolicy::CompanyOnly] {
    let classifier = Classifier::default().with_policy(policy);
    let papers: Vec<ClassifiedPaper> = classifier.filter_non_academic_authors(&fixture_records());
    assert!(papers.iter().all(|p| !p.company_affiliations.is_empty()));
  }
}

#[test]
fn test_end_to_end_example() {
  let record = PaperRecord::new("12345", "Test Paper", "2023")
    .with_author("Dr. Alice", Some("XYZ Pharma Inc"))
    .with_author("Dr. Bob", Some("Harvard University"))
    .with_email("alice@xyzpharma.com");

  let papers = pubfetch::classifier::filter_non_academic_authors(&[record]);
  assert_eq!(papers, vec![ClassifiedPaper {
    identifier:           "12345".into(),
    title:                "Test Paper".into(),
    publication_date:     "2023".into(),
    non_academic_authors: vec!["Dr. Alice".into()],
    company_affiliations: vec!["XYZ Pharma Inc".into()],
    email:                "alice@xyzpharma.com".into(),
  }]);
}

#[test]
fn test_missing_email_sentinel_reaches_csv() -> TestResult<()> {
  let record =
    PaperRecord::new("77", "No contact", "2022").with_author("Q", Some("Quanta Biosciences"));
  let papers = Classifier::default().filter_non_academic_authors(&[record]);
  assert_eq!(papers[0].email, EMAIL_NOT_FOUND);

  let dir = tempdir()?;
  let path = dir.path().join("out.csv");
  output::write_csv(&papers, &path)?;

  let content = fs::read_to_string(&path)?;
  assert!(content.ends_with("\"Q\",\"Quanta Biosciences\",\"not found\"\r\n"));
  Ok(())
}

#[test]
fn test_configured_pipeline() -> TestResult<()> {
  let config: Config = r#"
    [classifier]
    policy = "company-only"
    company_patterns = ["Serum Institut"]
  "#
  .parse()?;

  let papers = config.classifier()?.filter_non_academic_authors(&fixture_records());
  assert_eq!(papers.len(), 1);
  assert_eq!(papers[0].identifier, "38100003");
  assert_eq!(papers[0].non_academic_authors, vec!["Muller T", "Larsen J"]);
  assert_eq!(papers[0].company_affiliations, vec!["Statens Serum Institut"]);
  Ok(())
}
