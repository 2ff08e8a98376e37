use std::time::Duration;

use anyhow::anyhow;
use reqwest::{
    Client, IntoUrl, RequestBuilder, Url,
    header::{ACCEPT, CONTENT_TYPE, HeaderValue},
};

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// A reqwest client bound to the chain client's base URL.
#[derive(Debug, Clone)]
pub struct ClientWithBaseUrl {
    client: Client,
    base_url: Url,
}

impl ClientWithBaseUrl {
    pub fn new(url: Url, request_timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|err| anyhow!("Failed to build HTTP client {err:?}"))?;

        Ok(Self {
            client,
            base_url: url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn get<U: IntoUrl>(&self, url: U) -> anyhow::Result<RequestBuilder> {
        let url = self.base_url.join(url.as_str())?;
        Ok(self
            .client
            .get(url)
            .header(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))
            .header(ACCEPT, HeaderValue::from_static(JSON_CONTENT_TYPE)))
    }
}
