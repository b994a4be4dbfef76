//! HTTP client for the Postman management API

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::StatusCode;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::types::CollectionDocument;

pub struct PostmanClient {
    http: reqwest::Client,
    base_url: String,
}

impl PostmanClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "X-API-Key",
            HeaderValue::from_str(&config.api_key)
                .map_err(|_| Error::Config("API key contains invalid characters".to_string()))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch one collection document. Any failure aborts setup; the caller
    /// never retries.
    pub async fn get_collection(&self, collection_id: &str) -> Result<CollectionDocument> {
        let url = format!("{}/collections/{}", self.base_url, collection_id);
        tracing::debug!(%url, "fetching collection");

        let response = self.http.get(&url).send().await?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(Error::Auth(response.status().as_u16()));
            }
            StatusCode::NOT_FOUND => {
                return Err(Error::CollectionNotFound(collection_id.to_string()));
            }
            status if !status.is_success() => {
                return Err(Error::Api(status.as_u16()));
            }
            _ => {}
        }

        response
            .json::<CollectionDocument>()
            .await
            .map_err(|e| Error::MalformedCollection(e.to_string()))
    }
}
