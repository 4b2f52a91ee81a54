use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

use super::traits::ObjectStore;
use crate::config::StorageConfig;
use crate::utils::error::StorageError;

/// Object store reached over plain HTTP: `GET {endpoint}/{bucket}/{key}`.
#[derive(Debug, Clone)]
pub struct HttpObjectStore {
    client: Client,
    endpoint: Url,
}

impl HttpObjectStore {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, StorageError> {
        let endpoint = Url::parse(endpoint)?;
        if endpoint.cannot_be_a_base() {
            return Err(StorageError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("price-catalog/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, endpoint })
    }

    pub fn from_config(config: &StorageConfig) -> Result<Self, StorageError> {
        Self::new(&config.endpoint, config.timeout())
    }

    pub fn object_url(&self, bucket: &str, key: &str) -> Result<Url, StorageError> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| StorageError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .push(bucket)
            .extend(key.split('/'));
        Ok(url)
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StorageError> {
        let url = self.object_url(bucket, key)?;
        tracing::debug!(url = %url, "Fetching object");

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(StorageError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            });
        }

        if !status.is_success() {
            return Err(StorageError::Status {
                bucket: bucket.to_string(),
                key: key.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}
