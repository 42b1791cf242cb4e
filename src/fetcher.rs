//! HTTPS fetcher for upstream range documents.
//!
//! Only `https` URLs on [`ALLOWED_SOURCE_HOSTS`] are ever contacted; the
//! check runs before the request is built and again on every redirect hop.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::redirect::Policy;
use reqwest::{Client, Url};
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::debug;

#[cfg(test)]
use mockall::automock;

use crate::config::FetchConfig;
use crate::error::FetchError;
use crate::sources::ALLOWED_SOURCE_HOSTS;

/// Maximum redirect hops, each of which must also be allowlisted.
const MAX_REDIRECTS: usize = 5;

/// Parsed top-level JSON object from a source. Untrusted.
pub type RawPayload = Map<String, Value>;

/// Fetch a JSON object from a source URL.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    /// Fetch `url` and return its top-level JSON object.
    async fn fetch_json(&self, url: &str) -> Result<RawPayload, FetchError>;
}

/// Validate scheme and host of a source URL.
///
/// # Examples
/// ```
/// use rangewarden::fetcher::ensure_source_url_allowed;
/// assert!(ensure_source_url_allowed("https://openai.com/gptbot.json").is_ok());
/// assert!(ensure_source_url_allowed("http://openai.com/gptbot.json").is_err());
/// assert!(ensure_source_url_allowed("https://example.com/").is_err());
/// ```
pub fn ensure_source_url_allowed(url: &str) -> Result<Url, FetchError> {
    let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    check_allowed(&parsed)?;
    Ok(parsed)
}

fn check_allowed(url: &Url) -> Result<(), FetchError> {
    if !url.scheme().eq_ignore_ascii_case("https") {
        return Err(FetchError::DisallowedScheme {
            url: url.to_string(),
        });
    }
    let host = url.host_str().unwrap_or("").to_ascii_lowercase();
    if !ALLOWED_SOURCE_HOSTS.contains(&host.as_str()) {
        return Err(FetchError::DisallowedHost {
            host: if host.is_empty() {
                "(empty)".to_string()
            } else {
                host
            },
        });
    }
    Ok(())
}

/// Parse a response body into a top-level JSON object.
pub fn parse_payload(url: &str, body: &[u8]) -> Result<RawPayload, FetchError> {
    let value: Value = serde_json::from_slice(body).map_err(|e| FetchError::InvalidJson {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(FetchError::NotAnObject {
            url: url.to_string(),
        }),
    }
}

/// Production fetcher backed by reqwest with rustls.
pub struct HttpFetcher {
    client: Client,
    max_payload_bytes: usize,
}

impl HttpFetcher {
    /// Create a fetcher using the configured timeout and size limit.
    pub fn new(config: &FetchConfig) -> anyhow::Result<Self> {
        let redirect = Policy::custom(|attempt| {
            if attempt.previous().len() >= MAX_REDIRECTS {
                attempt.error("too many redirects")
            } else if check_allowed(attempt.url()).is_err() {
                attempt.stop()
            } else {
                attempt.follow()
            }
        });

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(format!("rangewarden/{}", env!("CARGO_PKG_VERSION")))
            .redirect(redirect)
            .https_only(true)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self {
            client,
            max_payload_bytes: config.max_payload_bytes,
        })
    }

    fn network_error(url: &str, e: reqwest::Error) -> FetchError {
        FetchError::Network {
            url: url.to_string(),
            reason: e.to_string(),
        }
    }
}

// Note: Default is intentionally not implemented for HttpFetcher
// because new() can fail and we want explicit error handling.

#[async_trait]
impl SourceFetcher for HttpFetcher {
    async fn fetch_json(&self, url: &str) -> Result<RawPayload, FetchError> {
        let parsed = ensure_source_url_allowed(url)?;
        debug!("GET {}", parsed);

        let mut response = self
            .client
            .get(parsed)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| Self::network_error(url, e))?;

        if !response.status().is_success() {
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        if let Some(content_length) = response.content_length() {
            if content_length as usize > self.max_payload_bytes {
                return Err(FetchError::TooLarge {
                    url: url.to_string(),
                    size: content_length as usize,
                    max: self.max_payload_bytes,
                });
            }
        }

        // Content-Length may be absent or wrong; enforce the limit while streaming.
        let mut body: Vec<u8> = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| Self::network_error(url, e))?
        {
            if body.len() + chunk.len() > self.max_payload_bytes {
                return Err(FetchError::TooLarge {
                    url: url.to_string(),
                    size: body.len() + chunk.len(),
                    max: self.max_payload_bytes,
                });
            }
            body.extend_from_slice(&chunk);
        }

        debug!("Fetched {} bytes from {}", body.len(), url);
        parse_payload(url, &body)
    }
}
