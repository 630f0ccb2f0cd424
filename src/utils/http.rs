// src/utils/http.rs

//! HTTP client utilities.

use std::error::Error as StdError;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{AppError, Result};
use crate::models::HttpConfig;

/// Something that can download a URL.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// GET `url` and return the body. Every failure is a connection failure.
    async fn fetch(&self, url: &str, timeout: Option<Duration>) -> Result<Vec<u8>>;
}

/// reqwest-backed fetcher with a one-shot fallback for broken certificates.
///
/// Several state health sites serve incomplete or expired certificate chains.
/// When a request fails certificate validation it is repeated once with a
/// client that skips verification; any other failure is returned as is.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    insecure: Option<Client>,
}

impl HttpFetcher {
    /// Create a fetcher from HTTP settings.
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))?;

        let insecure = if config.insecure_fallback {
            let client = Client::builder()
                .user_agent(&config.user_agent)
                .danger_accept_invalid_certs(true)
                .build()
                .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))?;
            Some(client)
        } else {
            None
        };

        Ok(Self { client, insecure })
    }

    async fn get(
        client: &Client,
        url: &str,
        timeout: Option<Duration>,
    ) -> std::result::Result<Vec<u8>, reqwest::Error> {
        let mut request = client.get(url);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }
        let response = request.send().await?.error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str, timeout: Option<Duration>) -> Result<Vec<u8>> {
        match Self::get(&self.client, url, timeout).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if is_certificate_failure(&e) => {
                let Some(insecure) = &self.insecure else {
                    return Err(AppError::connection(url, describe(&e)));
                };
                log::debug!("Certificate check failed for {url}, retrying without verification");
                Self::get(insecure, url, timeout)
                    .await
                    .map_err(|e| AppError::connection(url, describe(&e)))
            }
            Err(e) => Err(AppError::connection(url, describe(&e))),
        }
    }
}

/// Fetch a page and decode it as (lossy) UTF-8 text.
pub async fn fetch_page(
    fetcher: &dyn Fetcher,
    url: &str,
    timeout: Option<Duration>,
) -> Result<String> {
    let bytes = fetcher.fetch(url, timeout).await?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Whether a failed request was rejected during certificate validation.
///
/// The top-level reqwest message embeds the request URL, so only the causes
/// below it are inspected. Status and timeout errors never qualify.
fn is_certificate_failure(err: &reqwest::Error) -> bool {
    if err.is_status() || err.is_timeout() {
        return false;
    }
    err.source().is_some_and(is_certificate_error)
}

/// Whether any error in the chain reports a certificate problem.
pub fn is_certificate_error(err: &(dyn StdError + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if e.to_string().to_ascii_lowercase().contains("certificate") {
            return true;
        }
        current = e.source();
    }
    false
}

/// Render an error with its whole source chain.
fn describe(err: &(dyn StdError + 'static)) -> String {
    let mut parts = vec![err.to_string()];
    let mut current = err.source();
    while let Some(e) = current {
        let text = e.to_string();
        if !parts.contains(&text) {
            parts.push(text);
        }
        current = e.source();
    }
    parts.join(": ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct Wrapped(std::io::Error);

    impl fmt::Display for Wrapped {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "error sending request")
        }
    }

    impl StdError for Wrapped {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_certificate_error_in_chain() {
        let err = Wrapped(std::io::Error::other(
            "invalid peer certificate: UnknownIssuer",
        ));
        assert!(is_certificate_error(&err));
    }

    #[test]
    fn test_other_errors_are_not_certificate_errors() {
        let err = Wrapped(std::io::Error::other("connection refused"));
        assert!(!is_certificate_error(&err));
    }

    #[test]
    fn test_describe_joins_chain() {
        let err = Wrapped(std::io::Error::other("connection refused"));
        assert_eq!(describe(&err), "error sending request: connection refused");
    }

    #[test]
    fn test_create_fetcher() {
        assert!(HttpFetcher::new(&HttpConfig::default()).is_ok());
    }
}
