use crate::config::FetchConfig;
use crate::error::FetchError;
use reqwest::{Client, redirect};
use std::time::Duration;
use url::Url;

/// Markup retrieved for one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub markup: String,
    /// Address after redirects; relative addresses in `markup` resolve
    /// against it
    pub final_url: String,
}

/// Retrieves pages over HTTP with an explicit timeout
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    timeout_secs: u64,
}

impl Fetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .redirect(redirect::Policy::limited(config.max_redirects))
            .build()?;
        Ok(Self {
            client,
            timeout_secs: config.timeout_secs,
        })
    }

    /// Fetch `url`, failing on transport errors, timeouts and non-success
    /// statuses
    pub async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let parsed = validate_url(url)?;
        ::log::info!("Fetching {}", parsed);

        let resp = self
            .client
            .get(parsed.clone())
            .send()
            .await
            .map_err(|e| self.transport_error(url, e))?;

        let final_url = resp.url().to_string();
        if final_url != parsed.as_str() {
            ::log::info!("{} redirected to {}", parsed, final_url);
        }

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: final_url,
                status,
            });
        }

        let markup = resp
            .text()
            .await
            .map_err(|e| self.transport_error(url, e))?;
        ::log::debug!("Fetched {} bytes from {}", markup.len(), final_url);

        Ok(FetchedPage { markup, final_url })
    }

    fn transport_error(&self, url: &str, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
                secs: self.timeout_secs,
            }
        } else {
            FetchError::Transport {
                url: url.to_string(),
                source: error,
            }
        }
    }
}

/// Parse `url` and require an http(s) scheme
pub fn validate_url(url: &str) -> Result<Url, FetchError> {
    let parsed = Url::parse(url.trim()).map_err(|source| FetchError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(FetchError::UnsupportedScheme(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("https://example.com/page").is_ok());
        assert!(validate_url("  http://example.com  ").is_ok());
        assert!(matches!(
            validate_url("example.com"),
            Err(FetchError::InvalidUrl { .. })
        ));
        assert!(matches!(
            validate_url("ftp://example.com/file"),
            Err(FetchError::UnsupportedScheme(scheme)) if scheme == "ftp"
        ));
    }

    #[tokio::test]
    async fn test_invalid_url_fails_before_any_request() {
        let fetcher = Fetcher::new(&FetchConfig::default()).unwrap();
        let err = fetcher.fetch("not a url").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
    }
}
