//! S3 object store backend

use crate::{
    error::StoreError,
    store::{ObjectBody, ObjectStore},
};
use aws_sdk_s3::{error::DisplayErrorContext, primitives::ByteStream, Client};
use tracing::{debug, instrument};

/// [`ObjectStore`] backed by Amazon S3
#[derive(Clone)]
pub struct S3Store {
    client: Client,
}

impl S3Store {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl ObjectStore for S3Store {
    #[instrument(skip(self))]
    async fn get(&self, container: &str, key: &str) -> Result<ObjectBody, StoreError> {
        let output = self
            .client
            .get_object()
            .bucket(container)
            .key(key)
            .send()
            .await
            .map_err(|err| {
                let not_found = err
                    .as_service_error()
                    .map(|e| e.is_no_such_key())
                    .unwrap_or(false);
                if not_found {
                    StoreError::NotFound {
                        container: container.to_string(),
                        key: key.to_string(),
                    }
                } else {
                    StoreError::Backend {
                        operation: "GetObject",
                        message: DisplayErrorContext(&err).to_string(),
                    }
                }
            })?;

        let content_length = output.content_length().and_then(|len| u64::try_from(len).ok());
        debug!(?content_length, "Fetched object");
        Ok(ObjectBody::new(output.body.into_async_read(), content_length))
    }

    #[instrument(skip(self, bytes))]
    async fn put(
        &self,
        container: &str,
        key: &str,
        bytes: Vec<u8>,
        content_length: u64,
    ) -> Result<(), StoreError> {
        let content_length = i64::try_from(content_length).map_err(|_| StoreError::Backend {
            operation: "PutObject",
            message: format!("content length {} out of range", content_length),
        })?;

        self.client
            .put_object()
            .bucket(container)
            .key(key)
            .content_length(content_length)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|err| StoreError::Backend {
                operation: "PutObject",
                message: DisplayErrorContext(&err).to_string(),
            })?;
        Ok(())
    }
}
