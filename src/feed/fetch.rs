use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::FeedError;

/// Retrieves the raw text of a feed.
#[async_trait]
pub trait FetchFeed: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FeedError>;
}

/// Fetches feeds over HTTP(S). A request is attempted once; the timeout covers the
/// whole request including the body.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn builder() -> HttpFetcherBuilder {
        HttpFetcherBuilder::default()
    }

    pub fn new() -> Result<Self, FeedError> {
        Self::builder().build()
    }
}

#[async_trait]
impl FetchFeed for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FeedError> {
        let transport = |source| FeedError::Transport {
            url: url.to_owned(),
            source,
        };

        debug!(%url, "fetching feed");
        let response = self.client.get(url).send().await.map_err(transport)?;

        let status = response.status();
        debug!(%url, %status, "received feed response");
        if !status.is_success() {
            return Err(FeedError::Status {
                url: url.to_owned(),
                status,
            });
        }

        response.text().await.map_err(transport)
    }
}

#[derive(Debug)]
pub struct HttpFetcherBuilder {
    timeout: Duration,
    user_agent: String,
}

impl Default for HttpFetcherBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            user_agent: concat!("calfeed/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

impl HttpFetcherBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    pub fn build(self) -> Result<HttpFetcher, FeedError> {
        let client = Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent)
            .build()
            .map_err(|err| FeedError::Client(err.to_string()))?;
        Ok(HttpFetcher { client })
    }
}
