//! Async HTTP client for the host.io DNS endpoint.

use std::time::Duration;

use tracing::debug;

use crate::{Error, Result, record::RecordSet, session::Fetch};

/// Default API base; the path `/dns/{domain}` is appended per lookup.
pub const DEFAULT_BASE_URL: &str = "https://host.io/api";

/// Connection settings for the lookup endpoint.
#[derive(Debug, Clone)]
pub struct LookupConfig {
  pub base_url: String,
  /// API credential, passed as the `token` query parameter.
  pub token:    String,
}

impl LookupConfig {
  pub fn new(token: impl Into<String>) -> Self {
    Self {
      base_url: DEFAULT_BASE_URL.to_string(),
      token:    token.into(),
    }
  }
}

/// Async HTTP client for the DNS lookup API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct DnsClient {
  client: reqwest::Client,
  config: LookupConfig,
}

impl DnsClient {
  pub fn new(config: LookupConfig) -> Result<Self> {
    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(30))
      .build()?;
    Ok(Self { client, config })
  }

  fn url(&self, domain: &str) -> String {
    format!(
      "{}/dns/{domain}",
      self.config.base_url.trim_end_matches('/')
    )
  }
}

impl Fetch for DnsClient {
  /// `GET {base}/dns/{domain}?token={token}`
  async fn dns(&self, domain: &str) -> Result<RecordSet> {
    let url = self.url(domain);
    debug!(%url, "dns lookup");

    let resp = self
      .client
      .get(&url)
      .query(&[("token", self.config.token.as_str())])
      .send()
      .await?;

    if !resp.status().is_success() {
      return Err(Error::Status(resp.status()));
    }

    let body: serde_json::Value = resp.json().await?;
    RecordSet::from_json(body)
  }
}
