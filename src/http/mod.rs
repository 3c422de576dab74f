use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use crate::{
    audio::{error::AudioError, traits::BookSource},
    book::Book,
};

pub fn client() -> Result<Client, AudioError> {
    Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| AudioError::FetchFailed(e.to_string()))
}

/// Fetches the book document from a JSON endpoint.
pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl BookSource for HttpSource {
    async fn fetch(&self) -> Result<Book, AudioError> {
        debug!(url = self.url.as_str(), "http_fetch_book");
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AudioError::FetchFailed(e.to_string()))?;

        response
            .json::<Book>()
            .await
            .map_err(|e| AudioError::FetchFailed(format!("malformed book: {e}")))
    }
}

pub async fn download(client: &Client, url: Url) -> Result<Vec<u8>, AudioError> {
    let response = client
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| AudioError::EngineOpenFailed(e.to_string()))?;

    let bytes = response
        .bytes()
        .await
        .map_err(|e| AudioError::EngineOpenFailed(e.to_string()))?;
    Ok(bytes.to_vec())
}
