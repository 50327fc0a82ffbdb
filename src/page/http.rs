// src/page/http.rs
// =============================================================================
// This module talks to the website over HTTP.
//
// The crawler needs two things from the network:
// - probe: a HEAD request that tells us whether a URL is an HTML page or
//   something else (a PDF, a Word document...) without downloading it
// - fetch: a GET request that downloads an HTML page so we can read its links
//
// Both are defined on the PageSource trait so the crawl engine can be tested
// against an in-memory fake website instead of the real network.
//
// Rust concepts:
// - async-trait: async functions inside a trait
// - thiserror: A typed error enum instead of opaque strings
// - Send + Sync: The trait object can be shared across async tasks
// =============================================================================

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use thiserror::Error;

/// Sent on every request unless overridden; some sites refuse unknown clients.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_11_5) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/50.0.2661.102 Safari/537.36";

// What a HEAD probe says a URL points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// text/html: a page worth crawling
    Html,
    /// Anything else: documents, images, archives...
    Other,
}

// Why a probe or a download failed
//
// Every variant is recoverable: the crawler skips the URL and carries on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,
    #[error("too many redirects")]
    TooManyRedirects,
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("HTTP {0}")]
    Status(u16),
    #[error("response has no Content-Type header")]
    MissingContentType,
    #[error("{0}")]
    Other(String),
}

/// A downloaded HTML page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// URL the server finally answered from, after redirects.
    /// Relative links on the page resolve against this.
    pub final_url: String,
    pub body: String,
}

#[async_trait]
pub trait PageSource: Send + Sync {
    /// Classifies a URL with a header-only request.
    async fn probe(&self, url: &str) -> Result<ContentKind, FetchError>;

    /// Downloads a page body. Non-2xx responses are errors.
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

// Settings for the real HTTP client
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub user_agent: String,
    pub timeout: Duration,
    pub max_redirects: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(10),
            max_redirects: 5,
        }
    }
}

// PageSource backed by a reqwest Client
//
// One client is reused for the whole crawl so connections are pooled.
#[derive(Debug, Clone)]
pub struct HttpPageSource {
    client: Client,
}

impl HttpPageSource {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn probe(&self, url: &str) -> Result<ContentKind, FetchError> {
        let response = self.client.head(url).send().await.map_err(categorize_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok());

        classify_content_type(content_type)
    }

    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let response = self.client.get(url).send().await.map_err(categorize_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        // Grab the final URL before text() consumes the response
        let final_url = response.url().to_string();
        let body = response.text().await.map_err(categorize_error)?;

        Ok(FetchedPage { final_url, body })
    }
}

// Maps a Content-Type header value to a ContentKind
//
// "text/html; charset=utf-8" -> Html
// "application/pdf"          -> Other
// missing header             -> error (we can't tell what it is)
pub fn classify_content_type(content_type: Option<&str>) -> Result<ContentKind, FetchError> {
    match content_type {
        Some(value) if value.to_ascii_lowercase().contains("text/html") => Ok(ContentKind::Html),
        Some(_) => Ok(ContentKind::Other),
        None => Err(FetchError::MissingContentType),
    }
}

// Categorizes reqwest errors into our FetchError variants
//
// reqwest errors can happen for many reasons:
// - Network timeout
// - DNS resolution failure / refused connection
// - Redirect loops
// - A body that isn't valid text
fn categorize_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else if error.is_redirect() {
        FetchError::TooManyRedirects
    } else if error.is_connect() {
        FetchError::Connect(error.to_string())
    } else if let Some(status) = error.status() {
        FetchError::Status(status.as_u16())
    } else {
        FetchError::Other(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header_regex, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn source() -> HttpPageSource {
        HttpPageSource::new(&HttpConfig {
            timeout: Duration::from_secs(2),
            ..HttpConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_classify_content_type() {
        assert_eq!(
            classify_content_type(Some("text/html; charset=UTF-8")),
            Ok(ContentKind::Html)
        );
        assert_eq!(classify_content_type(Some("TEXT/HTML")), Ok(ContentKind::Html));
        assert_eq!(classify_content_type(Some("application/pdf")), Ok(ContentKind::Other));
        assert_eq!(classify_content_type(None), Err(FetchError::MissingContentType));
    }

    #[tokio::test]
    async fn test_probe_html_page() {
        let mock_server = MockServer::start().await;

        Mock::given(method("HEAD"))
            .and(path("/about"))
            .respond_with(ResponseTemplate::new(200).insert_header("content-type", "text/html; charset=utf-8"))
            .mount(&mock_server)
            .await;

        let kind = source().probe(&format!("{}/about", mock_server.uri())).await;
        assert_eq!(kind, Ok(ContentKind::Html));
    }

    #[tokio::test]
    async fn test_probe_document() {
        let mock_server = MockServer::start().await;

        Mock::given(method("HEAD"))
            .and(path("/files/report.pdf"))
            .respond_with(ResponseTemplate::new(200).insert_header("content-type", "application/pdf"))
            .mount(&mock_server)
            .await;

        let kind = source()
            .probe(&format!("{}/files/report.pdf", mock_server.uri()))
            .await;
        assert_eq!(kind, Ok(ContentKind::Other));
    }

    #[tokio::test]
    async fn test_probe_not_found_is_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("HEAD"))
            .and(path("/gone"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let kind = source().probe(&format!("{}/gone", mock_server.uri())).await;
        assert_eq!(kind, Err(FetchError::Status(404)));
    }

    #[tokio::test]
    async fn test_fetch_sends_user_agent_and_returns_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/"))
            .and(header_regex("user-agent", r"^Mozilla/5\.0 \(Macintosh"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"<a href="/files/report.pdf">Report</a>"#,
                "text/html",
            ))
            .mount(&mock_server)
            .await;

        let page = source().fetch(&mock_server.uri()).await.unwrap();
        assert!(page.body.contains("report.pdf"));
        assert_eq!(page.final_url, format!("{}/", mock_server.uri()));
    }

    #[tokio::test]
    async fn test_fetch_server_error_is_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/broken"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&mock_server)
            .await;

        let result = source().fetch(&format!("{}/broken", mock_server.uri())).await;
        assert_eq!(result, Err(FetchError::Status(500)));
    }

    #[tokio::test]
    async fn test_fetch_timeout() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(10)))
            .mount(&mock_server)
            .await;

        let result = source().fetch(&format!("{}/slow", mock_server.uri())).await;
        assert_eq!(result, Err(FetchError::Timeout));
    }
}
