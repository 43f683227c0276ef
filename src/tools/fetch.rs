//! `fetch_url`: a single HTTP GET returning the body text.
//!
//! The status code is not checked; a 404 page is still a result. Only
//! transport failures (DNS, connect, timeout, unreadable body) are errors.

use rmcp::schemars;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::config::Config;
use crate::error::ToolError;
use crate::registry::Tool;

use super::parse_params;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FetchUrlParams {
    #[schemars(description = "URL to fetch with an HTTP GET")]
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct FetchUrl {
    client: reqwest::Client,
}

impl FetchUrl {
    pub const NAME: &'static str = "fetch_url";

    pub fn new(config: &Config) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.fetch_timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }

    pub async fn fetch(&self, url: &str) -> Result<String, ToolError> {
        let parsed = Url::parse(url)
            .map_err(|e| ToolError::InvalidParams(format!("invalid url {url:?}: {e}")))?;
        let fetch_err = |source: reqwest::Error| ToolError::Fetch {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(parsed).send().await.map_err(fetch_err)?;
        let status = response.status();
        let body = response.text().await.map_err(fetch_err)?;
        tracing::debug!(%url, %status, bytes = body.len(), "fetched url");
        Ok(body)
    }
}

#[async_trait::async_trait]
impl Tool for FetchUrl {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn call(&self, params: Value) -> Result<String, ToolError> {
        let FetchUrlParams { url } = parse_params(params)?;
        self.fetch(&url).await
    }
}
