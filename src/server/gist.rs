//! Pass-through for a fixed external text document.

use log::debug;

use crate::error::{GatewayError, Result};

#[derive(Debug, Clone)]
pub struct GistProxy {
    url: String,
    client: reqwest::Client,
}

impl GistProxy {
    #[must_use]
    pub fn new(url: String) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the document body as text.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure or a non-success upstream status.
    pub async fn fetch(&self) -> Result<String> {
        debug!("Fetching gist from {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            return Err(GatewayError::GistUpstream {
                status: response.status(),
            });
        }

        Ok(response.text().await?)
    }
}
