//! Fakes for the gateway's collaborators.

use std::{
    collections::HashMap,
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

use async_trait::async_trait;
use axum::Router;
use tokio::net::TcpListener;

use crate::{
    error::{GatewayError, Result},
    omdb::{ImageDownloader, MetadataProvider},
    store::{MemoryObjectStore, ObjectStore},
    types::{PosterImage, StoredObject, TitleMetadata},
    year::normalize_year,
};

/// Serve a router on an ephemeral local port and return its base URL.
pub async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind local listener");
    let addr = listener.local_addr().expect("local address");
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            log::error!("Local test server stopped: {e}");
        }
    });
    format!("http://{addr}")
}

pub fn title(year: &str, poster_url: Option<&str>) -> TitleMetadata {
    TitleMetadata {
        year: normalize_year(Some(year)),
        poster_url: poster_url.map(str::to_string),
    }
}

pub fn poster_image(bytes: &[u8], content_type: &str) -> PosterImage {
    PosterImage {
        bytes: bytes.to_vec(),
        content_type: content_type.to_string(),
    }
}

fn upstream_down() -> GatewayError {
    GatewayError::Io(std::io::Error::other("upstream unreachable"))
}

/// Metadata provider answering from a fixed table. Unknown ids are misses.
#[derive(Default)]
pub struct FakeMetadata {
    titles: HashMap<String, TitleMetadata>,
    failing: bool,
    calls: AtomicUsize,
}

impl FakeMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn with(mut self, id: &str, metadata: TitleMetadata) -> Self {
        self.titles.insert(id.to_string(), metadata);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetadataProvider for FakeMetadata {
    async fn lookup(&self, id: &str) -> Result<Option<TitleMetadata>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(upstream_down());
        }
        Ok(self.titles.get(id).cloned())
    }
}

/// Downloader serving fixed images. Unknown URLs behave like a 404.
#[derive(Default)]
pub struct FakeDownloader {
    images: HashMap<String, PosterImage>,
    calls: AtomicUsize,
}

impl FakeDownloader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: &str, image: PosterImage) -> Self {
        self.images.insert(url.to_string(), image);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageDownloader for FakeDownloader {
    async fn download(&self, url: &str) -> Result<Option<PosterImage>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.images.get(url).cloned())
    }
}

/// Store whose existence check always fails; everything else is in memory.
#[derive(Default)]
pub struct FlakyStore {
    inner: MemoryObjectStore,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inner(&self) -> &MemoryObjectStore {
        &self.inner
    }
}

#[async_trait]
impl ObjectStore for FlakyStore {
    async fn exists(&self, _key: &str) -> Result<bool> {
        Err(upstream_down())
    }

    async fn get(&self, key: &str) -> Result<Option<StoredObject>> {
        self.inner.get(key).await
    }

    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<()> {
        self.inner.put(key, bytes, content_type).await
    }

    async fn presigned_url(&self, key: &str, expires_in: Duration) -> Result<String> {
        self.inner.presigned_url(key, expires_in).await
    }
}
