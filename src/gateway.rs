//! Cache lookup and populate logic behind `GET /api/cache`.

use std::sync::Arc;

use log::{debug, info, warn};

use crate::{
    config::{Config, MetadataMode, MissPolicy, PosterUrlMode},
    error::{GatewayError, Result},
    keys::KeyLayout,
    omdb::{ImageDownloader, MetadataProvider},
    store::ObjectStore,
    types::{METADATA_CONTENT_TYPE, PosterResponse, StoredMetadata, TitleMetadata},
};

/// Behaviour switches for the gateway.
#[derive(Debug, Clone)]
pub struct GatewaySettings {
    pub url_mode: PosterUrlMode,
    pub metadata_mode: MetadataMode,
    pub miss_policy: MissPolicy,
    pub keys: KeyLayout,
}

impl From<&Config> for GatewaySettings {
    fn from(config: &Config) -> Self {
        Self {
            url_mode: config.url_mode.clone(),
            metadata_mode: config.metadata_mode,
            miss_policy: config.miss_policy,
            keys: config.keys.clone(),
        }
    }
}

/// Serves poster references from the object store, populating it from the
/// metadata provider on a miss.
///
/// Concurrent misses for the same identifier are not coordinated: each one
/// fetches and writes, and the last write wins.
#[derive(Clone)]
pub struct PosterGateway {
    store: Arc<dyn ObjectStore>,
    metadata: Arc<dyn MetadataProvider>,
    downloader: Arc<dyn ImageDownloader>,
    settings: GatewaySettings,
}

impl PosterGateway {
    #[must_use]
    pub fn new(
        store: Arc<dyn ObjectStore>,
        metadata: Arc<dyn MetadataProvider>,
        downloader: Arc<dyn ImageDownloader>,
        settings: GatewaySettings,
    ) -> Self {
        Self {
            store,
            metadata,
            downloader,
            settings,
        }
    }

    /// Resolve the poster reference and release year for an identifier.
    ///
    /// # Errors
    ///
    /// Returns `MissingParameter` for an empty identifier, `TitleNotFound` for
    /// an upstream miss under [`MissPolicy::NotFound`], and any store or
    /// upstream failure on the populate path.
    pub async fn get_poster(&self, id: &str) -> Result<PosterResponse> {
        if id.is_empty() {
            return Err(GatewayError::MissingParameter("imdb"));
        }

        let poster_key = self.settings.keys.poster_key(id);

        if self.is_cached(&poster_key).await {
            debug!("Cache hit for {id} ({poster_key})");
            let year = self.cached_year(id).await;
            let poster_url = self.poster_reference(&poster_key).await?;
            return Ok(PosterResponse {
                poster_url: Some(poster_url),
                year,
            });
        }

        debug!("Cache miss for {id} ({poster_key})");
        self.populate(id, &poster_key).await
    }

    async fn is_cached(&self, key: &str) -> bool {
        match self.store.exists(key).await {
            Ok(exists) => exists,
            Err(e) => {
                warn!("Cache existence check for {key} failed, fetching from upstream instead: {e}");
                false
            }
        }
    }

    async fn cached_year(&self, id: &str) -> String {
        if self.settings.metadata_mode == MetadataMode::Stored {
            let key = self.settings.keys.metadata_key(id);
            match self.read_stored_metadata(&key).await {
                Ok(Some(stored)) => return stored.year,
                Ok(None) => debug!("No metadata object at {key}, asking upstream"),
                Err(e) => warn!("Failed to read metadata object {key}, asking upstream: {e}"),
            }
        }

        self.live_year(id).await
    }

    async fn read_stored_metadata(&self, key: &str) -> Result<Option<StoredMetadata>> {
        let Some(object) = self.store.get(key).await? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_slice(&object.bytes)?))
    }

    // A failed year lookup on the hit path never fails the request.
    async fn live_year(&self, id: &str) -> String {
        match self.metadata.lookup(id).await {
            Ok(Some(metadata)) => metadata.year,
            Ok(None) => String::new(),
            Err(e) => {
                warn!("Year lookup for {id} failed: {e}");
                String::new()
            }
        }
    }

    async fn populate(&self, id: &str, poster_key: &str) -> Result<PosterResponse> {
        let Some(TitleMetadata { year, poster_url }) = self.metadata.lookup(id).await? else {
            return match self.settings.miss_policy {
                MissPolicy::Empty => Ok(PosterResponse::without_poster(String::new())),
                MissPolicy::NotFound => Err(GatewayError::TitleNotFound(id.to_string())),
            };
        };

        let Some(poster_url) = poster_url else {
            debug!("No poster available upstream for {id}");
            return Ok(PosterResponse::without_poster(year));
        };

        let Some(image) = self.downloader.download(&poster_url).await? else {
            return Ok(PosterResponse::without_poster(year));
        };

        self.store
            .put(poster_key, image.bytes, &image.content_type)
            .await?;

        if self.settings.metadata_mode == MetadataMode::Stored {
            let metadata_key = self.settings.keys.metadata_key(id);
            let body = serde_json::to_vec(&StoredMetadata { year: year.clone() })?;
            self.store
                .put(&metadata_key, body, METADATA_CONTENT_TYPE)
                .await?;
        }

        info!("Cached poster for {id} at {poster_key}");

        let poster_url = self.poster_reference(poster_key).await?;
        Ok(PosterResponse {
            poster_url: Some(poster_url),
            year,
        })
    }

    async fn poster_reference(&self, key: &str) -> Result<String> {
        match &self.settings.url_mode {
            PosterUrlMode::Public { base_url } => {
                Ok(format!("{}/{key}", base_url.trim_end_matches('/')))
            }
            PosterUrlMode::Presigned { expires_in } => {
                self.store.presigned_url(key, *expires_in).await
            }
        }
    }
}
