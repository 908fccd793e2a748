//! PubMed access through the NCBI E-utilities.
//!
//! Papers are acquired in two requests: `esearch` turns a query into a list of
//! PubMed identifiers, and `efetch` returns the MEDLINE records for those
//! identifiers. Both steps sit behind the [`RecordSource`] trait so the rest of
//! the pipeline can run against any source of [`PaperRecord`]s.
//!
//! Failures are not surfaced to the caller of [`acquire`]: an empty query, an
//! unreachable service or a search without hits all become an [`Acquisition`]
//! variant, and the reason is logged.
//!
//! # Examples
//!
//! ```no_run
//! use pubfetch::entrez::{acquire, Acquisition, EntrezClient};
//!
//! # async fn example() {
//! let client = EntrezClient::new().with_email("someone@example.org");
//! match acquire(&client, "cancer immunotherapy", 50).await {
//!   Acquisition::Found(records) => println!("{} records", records.len()),
//!   Acquisition::NoMatches => println!("nothing matched"),
//!   Acquisition::EmptyQuery => println!("empty query"),
//!   Acquisition::ServiceUnavailable(reason) => println!("PubMed unavailable: {reason}"),
//! }
//! # }
//! ```

use quick_xml::{events::Event, Reader};

use super::*;

/// Base URL of the public E-utilities service.
pub const DEFAULT_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

/// Number of identifiers requested from `esearch` unless configured otherwise.
pub const DEFAULT_MAX_RESULTS: usize = 2000;

/// Per-request timeout unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Tool name reported to NCBI unless configured otherwise.
pub const DEFAULT_TOOL: &str = "pubfetch";

/// A source of paper records.
///
/// Implemented by [`EntrezClient`] for PubMed; tests and alternative databases
/// can provide their own.
#[async_trait]
pub trait RecordSource: Send + Sync {
  /// Searches for papers, returning at most `max_results` identifiers.
  ///
  /// # Errors
  ///
  /// Returns [`FetchError::EmptyQuery`] for a blank query and a network or API
  /// error when the search itself fails.
  async fn search(&self, query: &str, max_results: usize) -> Result<Vec<String>>;

  /// Retrieves the records for the given identifiers.
  ///
  /// Records that cannot be parsed are skipped, so the result may be shorter
  /// than `identifiers`.
  async fn fetch_details(&self, identifiers: &[String]) -> Result<Vec<PaperRecord>>;
}

/// Outcome of acquiring records for a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Acquisition {
  /// At least one record was retrieved
  Found(Vec<PaperRecord>),
  /// The query was empty or blank
  EmptyQuery,
  /// The search succeeded but yielded no usable records
  NoMatches,
  /// The source could not be reached or answered with an error
  ServiceUnavailable(String),
}

impl Acquisition {
  /// The retrieved records, empty for every outcome other than [`Acquisition::Found`].
  pub fn into_records(self) -> Vec<PaperRecord> {
    match self {
      Acquisition::Found(records) => records,
      _ => Vec::new(),
    }
  }
}

/// Searches `source` for `query` and fetches the matching records.
///
/// Never fails: every error is logged and turned into an [`Acquisition`] variant.
pub async fn acquire<S>(source: &S, query: &str, max_results: usize) -> Acquisition
where S: RecordSource + ?Sized {
  if query.trim().is_empty() {
    debug!("Input error: {}", FetchError::EmptyQuery);
    return Acquisition::EmptyQuery;
  }

  debug!("Searching for {query:?} with max_results={max_results}");
  let identifiers = match source.search(query, max_results).await {
    Ok(identifiers) if identifiers.is_empty() => {
      warn!("No papers found for {query:?}");
      return Acquisition::NoMatches;
    },
    Ok(identifiers) => identifiers,
    Err(FetchError::EmptyQuery) => return Acquisition::EmptyQuery,
    Err(e) => {
      warn!("Search for {query:?} failed: {e}");
      return Acquisition::ServiceUnavailable(e.to_string());
    },
  };
  debug!("Found {} papers matching query", identifiers.len());

  match source.fetch_details(&identifiers).await {
    Ok(records) if records.is_empty() => {
      warn!("None of the {} matching records could be read", identifiers.len());
      Acquisition::NoMatches
    },
    Ok(records) => {
      debug!("Retrieved {} of {} records", records.len(), identifiers.len());
      Acquisition::Found(records)
    },
    Err(e) => {
      warn!("Fetching details for {} identifiers failed: {e}", identifiers.len());
      Acquisition::ServiceUnavailable(e.to_string())
    },
  }
}

/// Client for the PubMed E-utilities.
///
/// NCBI asks clients to identify themselves with a tool name and a contact
/// email; an API key raises the request rate limit. All three are optional.
#[derive(Debug, Clone)]
pub struct EntrezClient {
  /// Service root, e.g. [`DEFAULT_BASE_URL`]
  base_url: String,
  /// Contact email sent with every request
  email:    Option<String>,
  /// Tool name sent with every request
  tool:     Option<String>,
  /// NCBI API key
  api_key:  Option<String>,
  /// Per-request timeout
  timeout:  Duration,
  /// Shared HTTP client, pooling connections across requests
  http:     reqwest::Client,
}

impl Default for EntrezClient {
  fn default() -> Self {
    Self {
      base_url: DEFAULT_BASE_URL.to_string(),
      email:    None,
      tool:     Some(DEFAULT_TOOL.to_string()),
      api_key:  None,
      timeout:  DEFAULT_TIMEOUT,
      http:     reqwest::Client::new(),
    }
  }
}

impl EntrezClient {
  /// Creates a client for the public E-utilities service.
  pub fn new() -> Self { Self::default() }

  /// Points the client at a different service root.
  pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
    self.base_url = base_url.into();
    self
  }

  /// Sets the contact email reported to NCBI.
  pub fn with_email(mut self, email: impl Into<String>) -> Self {
    self.email = Some(email.into());
    self
  }

  /// Sets the tool name reported to NCBI.
  pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
    self.tool = Some(tool.into());
    self
  }

  /// Sets the NCBI API key.
  pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
    self.api_key = Some(api_key.into());
    self
  }

  /// Sets the per-request timeout.
  pub fn with_timeout(mut self, timeout: Duration) -> Self {
    self.timeout = timeout;
    self
  }

  /// The service root this client talks to.
  pub fn base_url(&self) -> &str { &self.base_url }

  /// Full URL of an E-utility.
  fn endpoint(&self, utility: &str) -> String {
    format!("{}/{}", self.base_url.trim_end_matches('/'), utility)
  }

  /// Parameters sent with every request.
  fn common_params(&self) -> Vec<(&'static str, String)> {
    let mut params = vec![("db", "pubmed".to_string())];
    let optional = [("tool", &self.tool), ("email", &self.email), ("api_key", &self.api_key)];
    for (key, value) in optional {
      if let Some(value) = value {
        params.push((key, value.clone()));
      }
    }
    params
  }
}

#[async_trait]
impl RecordSource for EntrezClient {
  async fn search(&self, query: &str, max_results: usize) -> Result<Vec<String>> {
    if query.trim().is_empty() {
      return Err(FetchError::EmptyQuery);
    }

    let mut params = self.common_params();
    params.extend([
      ("term", query.to_string()),
      ("retmax", max_results.to_string()),
      ("sort", "pub_date".to_string()),
      ("retmode", "xml".to_string()),
    ]);

    let url = self.endpoint("esearch.fcgi");
    debug!("Searching PubMed via: {url}");
    let response = self.http.get(&url).timeout(self.timeout).query(&params).send().await?;
    if !response.status().is_success() {
      return Err(FetchError::Api(format!("esearch returned {}", response.status())));
    }
    let body = response.text().await?;
    trace!("esearch response: {body}");

    parse_search_response(&body)
  }

  async fn fetch_details(&self, identifiers: &[String]) -> Result<Vec<PaperRecord>> {
    if identifiers.is_empty() {
      return Ok(Vec::new());
    }

    let mut params = self.common_params();
    params.extend([
      ("id", identifiers.join(",")),
      ("rettype", "medline".to_string()),
      ("retmode", "text".to_string()),
    ]);

    // POST keeps long identifier lists out of the URL.
    let url = self.endpoint("efetch.fcgi");
    debug!("Fetching {} records via: {url}", identifiers.len());
    let response = self.http.post(&url).timeout(self.timeout).form(&params).send().await?;
    if !response.status().is_success() {
      return Err(FetchError::Api(format!("efetch returned {}", response.status())));
    }
    let body = response.text().await?;
    trace!("efetch response: {} bytes", body.len());

    Ok(medline::parse_records(&body))
  }
}

/// Extracts the identifiers from an `esearch` XML document.
///
/// # Errors
///
/// Returns [`FetchError::Api`] when the document carries an `ERROR` element and
/// [`FetchError::Xml`] when it is not well-formed.
///
/// # Examples
///
/// ```
/// use pubfetch::entrez::parse_search_response;
///
/// let xml = "<eSearchResult><Count>2</Count><IdList><Id>11</Id><Id>12</Id></IdList></eSearchResult>";
/// assert_eq!(parse_search_response(xml)?, vec!["11", "12"]);
/// # Ok::<(), pubfetch::error::FetchError>(())
/// ```
pub fn parse_search_response(xml: &str) -> Result<Vec<String>> {
  let mut reader = Reader::from_str(xml);
  let mut path: Vec<String> = Vec::new();
  let mut identifiers = Vec::new();

  loop {
    match reader.read_event()? {
      Event::Start(e) => path.push(String::from_utf8_lossy(e.name().as_ref()).into_owned()),
      Event::End(_) => {
        path.pop();
      },
      Event::Text(e) =>
        if let Ok(text) = e.unescape() {
          let text = text.trim();
          if text.is_empty() {
            continue;
          }
          let parent = path.len().checked_sub(2).and_then(|i| path.get(i)).map(String::as_str);
          match (parent, path.last().map(String::as_str)) {
            (Some("IdList"), Some("Id")) => identifiers.push(text.to_string()),
            (_, Some("ERROR")) => return Err(FetchError::Api(text.to_string())),
            (Some("ErrorList" | "WarningList"), Some(kind)) => debug!("esearch {kind}: {text}"),
            _ => (),
          }
        },
      Event::Eof => break,
      _ => (),
    }
  }

  Ok(identifiers)
}
