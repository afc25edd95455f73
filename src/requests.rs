use std::time::Duration;

use reqwest::{Client, ClientBuilder};

use crate::errors::ScrapeError;
use crate::ratelimit::RateLimiter;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct RequestClient {
    client: Client,
    rate_limiter: RateLimiter,
}

impl RequestClient {
    pub fn new() -> anyhow::Result<Self> {
        let client = ClientBuilder::new()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        let rate_limiter = RateLimiter::new();
        Ok(Self {
            client,
            rate_limiter,
        })
    }

    /// Fetches a page body, pacing requests according to our self-imposed
    /// rate-limiting policy. Non-2xx responses count as fetch failures.
    pub async fn fetch_url_body(&self, url: &str) -> Result<String, ScrapeError> {
        self.rate_limiter.wait_until_ready().await;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|source| ScrapeError::Fetch {
                url: url.to_string(),
                source,
            })?;
        response.text().await.map_err(|source| ScrapeError::Fetch {
            url: url.to_string(),
            source,
        })
    }
}
