use crate::domain::model::Mode;
use crate::domain::ports::{ConfigProvider, DocumentSource};
use crate::utils::error::{JaneError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_SERVICE_URL: &str = "http://biosemantics.org:8080/jane/";
pub const DEFAULT_GRAPH_ARTICLE_COUNT: usize = 100;

/// JANE over plain HTTP GET.
pub struct JaneHttpSource {
    client: Client,
    service_url: String,
    graph_article_count: usize,
}

impl JaneHttpSource {
    pub fn new(service_url: &str, graph_article_count: usize, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("jane-digest/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            service_url: service_url.to_string(),
            graph_article_count,
        })
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        Self::new(
            config.service_url(),
            config.graph_article_count(),
            Duration::from_secs(config.timeout_seconds()),
        )
    }

    /// `<service>/<endpoint>?text=<trimmed, percent-encoded query>`; graph mode also asks for more articles.
    pub fn query_url(&self, mode: Mode, query: &str) -> String {
        let base = self.service_url.trim_end_matches('/');
        let mut url = format!(
            "{}/{}?text={}",
            base,
            mode.endpoint(),
            urlencoding::encode(query.trim())
        );
        if mode == Mode::Graph {
            url.push_str(&format!("&count={}", self.graph_article_count));
        }
        url
    }
}

#[async_trait]
impl DocumentSource for JaneHttpSource {
    async fn fetch(&self, mode: Mode, query: &str) -> Result<String> {
        let url = self.query_url(mode, query);
        tracing::debug!("Making JANE request to: {}", url);

        let response = self.client.get(&url).send().await?;
        tracing::debug!("JANE response status: {}", response.status());

        if !response.status().is_success() {
            return Err(JaneError::HttpStatusError {
                status: response.status().as_u16(),
                url,
            });
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn source(url: &str) -> JaneHttpSource {
        JaneHttpSource::new(url, DEFAULT_GRAPH_ARTICLE_COUNT, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_query_url_trims_and_encodes() {
        let jane = source(DEFAULT_SERVICE_URL);
        assert_eq!(
            jane.query_url(Mode::Journals, "  malaria vaccines\n"),
            "http://biosemantics.org:8080/jane/journals?text=malaria%20vaccines"
        );
        assert_eq!(
            jane.query_url(Mode::Authors, "p53 & mdm2"),
            "http://biosemantics.org:8080/jane/authors?text=p53%20%26%20mdm2"
        );
    }

    #[test]
    fn test_graph_reads_articles_with_count() {
        let jane = source("http://localhost:1/jane");
        assert_eq!(
            jane.query_url(Mode::Graph, "H1N1 china mortality"),
            "http://localhost:1/jane/articles?text=H1N1%20china%20mortality&count=100"
        );
    }

    #[tokio::test]
    async fn test_fetch_returns_body() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/jane/journals")
                .query_param("text", "zebra fish");
            then.status(200)
                .header("Content-Type", "text/xml")
                .body("<results/>");
        });

        let jane = source(&server.url("/jane/"));
        let body = jane.fetch(Mode::Journals, " zebra fish ").await.unwrap();

        api_mock.assert();
        assert_eq!(body, "<results/>");
    }

    #[tokio::test]
    async fn test_fetch_non_success_status_is_transport_error() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/jane/authors");
            then.status(500);
        });

        let jane = source(&server.url("/jane"));
        let err = jane.fetch(Mode::Authors, "zebra").await.unwrap_err();

        api_mock.assert();
        match err {
            JaneError::HttpStatusError { status, url } => {
                assert_eq!(status, 500);
                assert!(url.ends_with("/jane/authors?text=zebra"));
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }
}
