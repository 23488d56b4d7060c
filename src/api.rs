use std::time::Duration;

use reqwest::Url;

use crate::country::CountryRecord;
use crate::error::{FetchError, TransportError};

pub const DEFAULT_API_BASE: &str = "https://restcountries.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Which REST Countries endpoint a query goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchKind {
    Name,
    Region,
}

impl SearchKind {
    fn path(self) -> &'static str {
        match self {
            SearchKind::Name => "name",
            SearchKind::Region => "region",
        }
    }
}

/// A blocking GET: URL in, body bytes or a classified failure out.
pub trait HttpGet {
    fn get(&self, url: &str) -> Result<Vec<u8>, TransportError>;
}

pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl HttpGet for ReqwestTransport {
    fn get(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .map_err(|e| TransportError::Network(format!("Failed to read response body: {}", e)))?;

        Ok(body.to_vec())
    }
}

pub struct Client<T = ReqwestTransport> {
    transport: T,
    config: ApiConfig,
}

impl Client<ReqwestTransport> {
    pub fn new(config: ApiConfig) -> Result<Self, TransportError> {
        let transport = ReqwestTransport::new(config.timeout)?;
        Ok(Self { transport, config })
    }
}

impl<T: HttpGet> Client<T> {
    pub fn with_transport(transport: T, config: ApiConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn fetch_by_name(&self, name: &str) -> Result<Vec<CountryRecord>, FetchError> {
        self.fetch(SearchKind::Name, name)
    }

    pub fn fetch_by_region(&self, region: &str) -> Result<Vec<CountryRecord>, FetchError> {
        self.fetch(SearchKind::Region, region)
    }

    /// Runs one query. The query must already be non-empty; an empty JSON
    /// array is a successful result with no records.
    pub fn fetch(&self, kind: SearchKind, query: &str) -> Result<Vec<CountryRecord>, FetchError> {
        let url = self.endpoint(kind, query)?;
        log::info!("Fetching {}", url);

        let body = self.transport.get(url.as_str()).map_err(|err| {
            log::warn!("Country request to {} failed: {}", url, err);
            FetchError::from(err)
        })?;

        let records: Vec<CountryRecord> = serde_json::from_slice(&body).map_err(|err| {
            log::warn!("Undecodable country payload from {}: {}", url, err);
            FetchError::from(err)
        })?;

        log::info!("Fetched {} countries", records.len());
        Ok(records)
    }

    /// `{base}/v3.1/{name|region}/{query}`, with the query encoded as one path segment.
    pub fn endpoint(&self, kind: SearchKind, query: &str) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.config.base_url)
            .map_err(|e| FetchError::Transport(format!("invalid API base URL: {}", e)))?;

        url.path_segments_mut()
            .map_err(|_| FetchError::Transport("API base URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(["v3.1", kind.path(), query]);

        Ok(url)
    }

    pub fn get_bytes(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        self.transport.get(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{test_client, FakeTransport, TEST_BASE};

    #[test]
    fn default_config_targets_rest_countries() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, "https://restcountries.com");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn endpoint_encodes_the_query_as_one_segment() {
        let client = test_client(FakeTransport::default());

        let url = client.endpoint(SearchKind::Name, "united states").unwrap();
        assert_eq!(url.as_str(), format!("{}/v3.1/name/united%20states", TEST_BASE));

        let url = client.endpoint(SearchKind::Region, "a/b").unwrap();
        assert_eq!(url.as_str(), format!("{}/v3.1/region/a%2Fb", TEST_BASE));
    }

    #[test]
    fn endpoint_keeps_a_base_path_prefix() {
        let config = ApiConfig {
            base_url: "http://mirror.test/countries/".to_string(),
            ..ApiConfig::default()
        };
        let client = Client::with_transport(FakeTransport::default(), config);

        let url = client.endpoint(SearchKind::Region, "europe").unwrap();
        assert_eq!(url.as_str(), "http://mirror.test/countries/v3.1/region/europe");
    }

    #[test]
    fn fetch_preserves_response_order() {
        let fake = FakeTransport::default().with_json(
            "/v3.1/name/guinea",
            r#"[
                {"name": {"common": "Guinea", "official": "Guinean Republic"}},
                {"name": {"common": "Equatorial Guinea", "official": "Republic of Equatorial Guinea"}},
                {"name": {"common": "Guinea-Bissau", "official": "Republic of Guinea-Bissau"}}
            ]"#,
        );
        let client = test_client(fake);

        let records = client.fetch_by_name("guinea").unwrap();
        let names: Vec<_> = records.iter().map(|r| r.common_name()).collect();
        assert_eq!(names, ["Guinea", "Equatorial Guinea", "Guinea-Bissau"]);
    }

    #[test]
    fn empty_array_is_a_successful_empty_result() {
        let client = test_client(FakeTransport::default().with_json("/v3.1/region/atlantis", "[]"));
        assert_eq!(client.fetch_by_region("atlantis").unwrap(), Vec::new());
    }

    #[test]
    fn http_404_is_not_found() {
        let fake = FakeTransport::default().with_error("/v3.1/name/zzz", TransportError::Status(404));
        let client = test_client(fake);
        assert_eq!(client.fetch_by_name("zzz"), Err(FetchError::NotFound));
    }

    #[test]
    fn other_http_errors_keep_their_status() {
        let fake =
            FakeTransport::default().with_error("/v3.1/region/asia", TransportError::Status(500));
        let client = test_client(fake);
        assert_eq!(client.fetch_by_region("asia"), Err(FetchError::Status(500)));
    }

    #[test]
    fn unreachable_host_is_a_transport_error() {
        let client = test_client(FakeTransport::default());
        assert!(matches!(client.fetch_by_name("japan"), Err(FetchError::Transport(_))));
    }

    #[test]
    fn non_array_payload_is_malformed() {
        let fake = FakeTransport::default()
            .with_json("/v3.1/name/japan", r#"{"status": 404, "message": "Not Found"}"#);
        let client = test_client(fake);
        assert!(matches!(client.fetch_by_name("japan"), Err(FetchError::Malformed(_))));
    }

    #[test]
    fn record_without_official_name_is_malformed() {
        let fake = FakeTransport::default()
            .with_json("/v3.1/name/japan", r#"[{"name": {"common": "Japan"}}]"#);
        let client = test_client(fake);
        assert!(matches!(client.fetch_by_name("japan"), Err(FetchError::Malformed(_))));
    }

    #[test]
    fn each_fetch_issues_exactly_one_request() {
        let fake = FakeTransport::default().with_json("/v3.1/name/peru", "[]");
        let client = test_client(fake);

        client.fetch_by_name("peru").unwrap();
        assert_eq!(client.transport.calls(), vec![format!("{}/v3.1/name/peru", TEST_BASE)]);
    }
}
