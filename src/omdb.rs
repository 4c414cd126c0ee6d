//! OMDb metadata lookups and poster downloads.

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;

use crate::{
    config::OmdbConfig,
    error::{GatewayError, Result},
    types::{PosterImage, TitleMetadata, image_content_type},
    year::normalize_year,
};

/// Poster value OMDb uses when it has no image.
pub const POSTER_NOT_AVAILABLE: &str = "N/A";

/// Source of title metadata.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Look up a title. `None` means the provider has no match.
    async fn lookup(&self, id: &str) -> Result<Option<TitleMetadata>>;
}

/// Fetches poster images from their upstream URL.
#[async_trait]
pub trait ImageDownloader: Send + Sync {
    /// Download an image. `None` means the upstream answered with a
    /// non-success status.
    async fn download(&self, url: &str) -> Result<Option<PosterImage>>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OmdbResponse {
    response: Option<String>,
    year: Option<String>,
    poster: Option<String>,
    error: Option<String>,
}

impl OmdbResponse {
    fn into_metadata(self) -> Option<TitleMetadata> {
        if self.response.as_deref() == Some("False") {
            debug!(
                "OMDb reported no match: {}",
                self.error.as_deref().unwrap_or("no reason given")
            );
            return None;
        }

        let poster_url = self
            .poster
            .filter(|poster| !poster.is_empty() && poster != POSTER_NOT_AVAILABLE);

        Some(TitleMetadata {
            year: normalize_year(self.year.as_deref()),
            poster_url,
        })
    }
}

#[derive(Debug, Clone)]
pub struct OmdbClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl OmdbClient {
    #[must_use]
    pub fn new(config: &OmdbConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl MetadataProvider for OmdbClient {
    async fn lookup(&self, id: &str) -> Result<Option<TitleMetadata>> {
        debug!("Querying OMDb for {id}");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("i", id), ("apikey", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            let omdb: OmdbResponse = serde_json::from_str(&body)?;
            return Ok(omdb.into_metadata());
        }

        // OMDb answers a bad key or an exhausted quota with an error status
        // and a regular `"Response": "False"` body.
        match serde_json::from_str::<OmdbResponse>(&body) {
            Ok(omdb) if omdb.response.as_deref() == Some("False") => {
                warn!(
                    "OMDb answered {status} for {id}: {}",
                    omdb.error.as_deref().unwrap_or("no reason given")
                );
                Ok(None)
            }
            _ => {
                warn!("Unexpected OMDb response ({status}) for {id}: {body}");
                Err(GatewayError::OmdbApi {
                    status,
                    message: "unexpected response from metadata service".to_string(),
                })
            }
        }
    }
}

#[async_trait]
impl ImageDownloader for OmdbClient {
    async fn download(&self, url: &str) -> Result<Option<PosterImage>> {
        debug!("Downloading poster from {url}");

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            warn!("Poster download from {url} failed with {}", response.status());
            return Ok(None);
        }

        let content_type = image_content_type(
            response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
        );
        let bytes = response.bytes().await?.to_vec();
        debug!("Downloaded {} bytes ({content_type})", bytes.len());

        Ok(Some(PosterImage {
            bytes,
            content_type,
        }))
    }
}
