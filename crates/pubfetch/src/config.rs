//! Configuration for the PubMed client and the affiliation classifier.
//!
//! Configuration lives in a TOML file, by default `pubfetch/config.toml` under
//! the platform configuration directory. Every key is optional:
//!
//! ```toml
//! [entrez]
//! email        = "someone@example.org"
//! api_key      = "0123456789abcdef"
//! max_results  = 500
//! timeout_secs = 60
//!
//! [classifier]
//! policy           = "company-only"
//! company_patterns = ["Inc", "Ltd", "GmbH", "AG", "S\\.A\\."]
//! ```

use super::*;
use crate::{
  classifier::{
    Classifier, EmissionPolicy, Vocabulary, DEFAULT_ACADEMIC_PATTERNS, DEFAULT_COMPANY_PATTERNS,
    DEFAULT_SPLIT_PATTERN,
  },
  entrez::{EntrezClient, DEFAULT_BASE_URL, DEFAULT_MAX_RESULTS, DEFAULT_TIMEOUT, DEFAULT_TOOL},
};

/// Complete pubfetch configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
  /// PubMed client settings
  pub entrez:     EntrezConfig,
  /// Classification settings
  pub classifier: ClassifierConfig,
}

/// Settings for [`EntrezClient`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EntrezConfig {
  /// Service root of the E-utilities
  pub base_url:     String,
  /// Contact email reported to NCBI
  pub email:        Option<String>,
  /// Tool name reported to NCBI
  pub tool:         Option<String>,
  /// NCBI API key
  pub api_key:      Option<String>,
  /// Maximum number of papers requested per search
  pub max_results:  usize,
  /// Per-request timeout in seconds
  pub timeout_secs: u64,
}

impl Default for EntrezConfig {
  fn default() -> Self {
    Self {
      base_url:     DEFAULT_BASE_URL.to_string(),
      email:        None,
      tool:         Some(DEFAULT_TOOL.to_string()),
      api_key:      None,
      max_results:  DEFAULT_MAX_RESULTS,
      timeout_secs: DEFAULT_TIMEOUT.as_secs(),
    }
  }
}

/// Settings for [`Classifier`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassifierConfig {
  /// Keyword fragments marking an academic institution
  pub academic_patterns: Vec<String>,
  /// Keyword fragments marking a company
  pub company_patterns:  Vec<String>,
  /// Delimiter between institutions in one affiliation string
  pub split_pattern:     String,
  /// Which classified papers are reported
  pub policy:            EmissionPolicy,
}

impl Default for ClassifierConfig {
  fn default() -> Self {
    Self {
      academic_patterns: DEFAULT_ACADEMIC_PATTERNS.iter().map(|s| s.to_string()).collect(),
      company_patterns:  DEFAULT_COMPANY_PATTERNS.iter().map(|s| s.to_string()).collect(),
      split_pattern:     DEFAULT_SPLIT_PATTERN.to_string(),
      policy:            EmissionPolicy::default(),
    }
  }
}

impl Config {
  /// Default location of the configuration file.
  pub fn default_path() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join("pubfetch").join("config.toml")
  }

  /// Reads and validates the configuration file at `path`.
  ///
  /// # Errors
  ///
  /// Fails when the file cannot be read, is not valid TOML for this structure,
  /// or holds an invalid value.
  pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    debug!("Loading configuration from {}", path.display());
    std::fs::read_to_string(path)?.parse()
  }

  /// Loads the configuration for a run.
  ///
  /// An explicitly given path must exist. Without one, the file at
  /// [`Config::default_path`] is used when present and the built-in defaults
  /// otherwise.
  pub fn load(path: Option<&Path>) -> Result<Self> {
    match path {
      Some(path) => Self::from_path(path),
      None => {
        let default_path = Self::default_path();
        if default_path.is_file() {
          Self::from_path(default_path)
        } else {
          trace!("No configuration at {}, using defaults", default_path.display());
          Ok(Self::default())
        }
      },
    }
  }

  /// Sets the maximum number of papers requested per search.
  pub fn with_max_results(mut self, max_results: usize) -> Self {
    self.entrez.max_results = max_results;
    self
  }

  /// Sets the emission policy.
  pub fn with_policy(mut self, policy: EmissionPolicy) -> Self {
    self.classifier.policy = policy;
    self
  }

  /// Checks values that deserialize fine but cannot be used.
  pub fn validate(&self) -> Result<()> {
    if self.entrez.max_results == 0 {
      return Err(FetchError::Config("entrez.max_results must be at least 1".into()));
    }
    if self.entrez.timeout_secs == 0 {
      return Err(FetchError::Config("entrez.timeout_secs must be at least 1".into()));
    }
    if self.entrez.base_url.trim().is_empty() {
      return Err(FetchError::Config("entrez.base_url must not be empty".into()));
    }
    Ok(())
  }

  /// Builds the classifier described by this configuration.
  ///
  /// # Errors
  ///
  /// Returns [`FetchError::Pattern`] when a configured pattern is invalid.
  pub fn classifier(&self) -> Result<Classifier> {
    let ClassifierConfig { academic_patterns, company_patterns, split_pattern, policy } =
      &self.classifier;
    let vocabulary =
      Vocabulary::new(academic_patterns.as_slice(), company_patterns.as_slice(), split_pattern)?;
    Ok(Classifier::new(vocabulary, *policy))
  }

  /// Builds the PubMed client described by this configuration.
  pub fn client(&self) -> EntrezClient {
    let EntrezConfig { base_url, email, tool, api_key, timeout_secs, .. } = &self.entrez;
    let mut client =
      EntrezClient::new().with_base_url(base_url).with_timeout(Duration::from_secs(*timeout_secs));
    if let Some(email) = email {
      client = client.with_email(email);
    }
    if let Some(tool) = tool {
      client = client.with_tool(tool);
    }
    if let Some(api_key) = api_key {
      client = client.with_api_key(api_key);
    }
    client
  }
}

impl FromStr for Config {
  type Err = FetchError;

  fn from_str(s: &str) -> Result<Self> {
    let config: Config = toml::from_str(s)?;
    config.validate()?;
    Ok(config)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_empty_file_gives_defaults() {
    let config: Config = "".parse().unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.entrez.max_results, DEFAULT_MAX_RESULTS);
    assert_eq!(config.classifier.policy, EmissionPolicy::RequireAuthors);
  }

  #[traced_test]
  #[test]
  fn test_partial_file() {
    let config: Config = r#"
      [entrez]
      email = "someone@example.org"
      max_results = 25

      [classifier]
      policy = "company-only"
      company_patterns = ["GmbH"]
    "#
    .parse()
    .unwrap();

    assert_eq!(config.entrez.email.as_deref(), Some("someone@example.org"));
    assert_eq!(config.entrez.max_results, 25);
    assert_eq!(config.entrez.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.classifier.academic_patterns.len(), DEFAULT_ACADEMIC_PATTERNS.len());

    let classifier = config.classifier().unwrap();
    assert_eq!(classifier.policy(), EmissionPolicy::CompanyOnly);
    assert!(classifier.is_company_affiliation("Siemens Healthineers GmbH"));
    assert!(!classifier.is_company_affiliation("XYZ Pharma Inc"));

    let client = config.client();
    assert_eq!(client.base_url(), DEFAULT_BASE_URL);
  }

  #[test]
  fn test_invalid_values() {
    assert!(matches!("[entrez]\nmax_results = 0".parse::<Config>(), Err(FetchError::Config(_))));
    assert!(matches!("[entrez]\ntimeout_secs = 0".parse::<Config>(), Err(FetchError::Config(_))));
    assert!(matches!(
      "[classifier]\npolicy = \"maybe\"".parse::<Config>(),
      Err(FetchError::TomlDe(_))
    ));
    assert!(matches!("[entrez]\nunknown = 1".parse::<Config>(), Err(FetchError::TomlDe(_))));
  }

  #[test]
  fn test_invalid_pattern_fails_at_classifier_construction() {
    let config: Config = "[classifier]\nsplit_pattern = \"(\"".parse().unwrap();
    assert!(matches!(config.classifier(), Err(FetchError::Pattern(_))));
  }

  #[test]
  fn test_policy_name_ignores_case() {
    let config: Config = "[classifier]\npolicy = \"Company-Only\"".parse().unwrap();
    assert_eq!(config.classifier.policy, EmissionPolicy::CompanyOnly);

    let rendered = toml::to_string(&config).unwrap();
    assert!(rendered.contains("policy = \"company-only\""));
    assert_eq!(rendered.parse::<Config>().unwrap(), config);
  }

  #[test]
  fn test_overrides() {
    let config = Config::default().with_max_results(10).with_policy(EmissionPolicy::CompanyOnly);
    assert_eq!(config.entrez.max_results, 10);
    assert_eq!(config.classifier.policy, EmissionPolicy::CompanyOnly);
  }

  #[test]
  fn test_from_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[entrez]\napi_key = \"abc\"\n").unwrap();

    let config = Config::load(Some(path.as_path())).unwrap();
    assert_eq!(config.entrez.api_key.as_deref(), Some("abc"));

    let missing = dir.path().join("missing.toml");
    assert!(matches!(Config::load(Some(missing.as_path())), Err(FetchError::Io(_))));
  }

  #[test]
  fn test_default_path() {
    assert!(Config::default_path().ends_with("pubfetch/config.toml"));
  }
}
