//! S3-compatible object store (Storj gateway).

use std::time::Duration;

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::{
    Client,
    config::Credentials,
    error::SdkError,
    presigning::PresigningConfig,
    primitives::ByteStream,
};
use log::{debug, info};

use crate::{config::StorjConfig, error::Result, types::StoredObject};

use super::ObjectStore;

#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
}

impl S3ObjectStore {
    /// Build a new store from configuration.
    ///
    /// Uses the configured static credentials and path-style addressing, which
    /// the Storj gateway expects.
    pub async fn from_config(config: &StorjConfig) -> Self {
        let credentials = Credentials::new(
            config.access_key.clone(),
            config.secret_key.clone(),
            None,
            None,
            "storj",
        );

        let shared_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .endpoint_url(config.endpoint.clone())
            .credentials_provider(credentials)
            .load()
            .await;

        let s3_config = aws_sdk_s3::config::Builder::from(&shared_config)
            .force_path_style(true)
            .build();

        info!(
            "Using object store s3://{} at {}",
            config.bucket, config.endpoint
        );

        Self {
            client: Client::from_conf(s3_config),
            bucket: config.bucket.clone(),
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn exists(&self, key: &str) -> Result<bool> {
        let result = self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(SdkError::ServiceError(err)) if err.err().is_not_found() => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    async fn get(&self, key: &str) -> Result<Option<StoredObject>> {
        let result = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await;

        let output = match result {
            Ok(output) => output,
            Err(SdkError::ServiceError(err)) if err.err().is_no_such_key() => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let content_type = output.content_type().map(str::to_string);
        let bytes = output.body.collect().await?.into_bytes().to_vec();
        debug!("Read {} bytes from s3://{}/{key}", bytes.len(), self.bucket);

        Ok(Some(StoredObject {
            bytes,
            content_type,
        }))
    }

    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<()> {
        let len = bytes.len();

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .send()
            .await?;

        info!("Stored {len} bytes at s3://{}/{key} ({content_type})", self.bucket);
        Ok(())
    }

    async fn presigned_url(&self, key: &str, expires_in: Duration) -> Result<String> {
        let config = PresigningConfig::builder().expires_in(expires_in).build()?;

        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(config)
            .await?;

        Ok(presigned.uri().to_string())
    }
}
