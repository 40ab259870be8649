use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use tracing::{debug, info};

use crate::persist::types::{PersistError, PersistResult};
use crate::persist::ObjectStore;

pub const DEFAULT_BUCKET: &str = "dydx-orderbook";
pub const DEFAULT_REGION: &str = "eu-west-2";

pub const ACCESS_KEY_VAR: &str = "AWS_ACCESS_KEY";
pub const SECRET_KEY_VAR: &str = "AWS_SECRET_KEY";

pub struct S3Store {
    client: aws_sdk_s3::Client,
    bucket: String,
}

fn store_err(key: &str, err: impl std::error::Error) -> PersistError {
    PersistError::Store { key: key.to_string(), message: DisplayErrorContext(err).to_string() }
}

impl S3Store {
    /// Build a client for `bucket` in a fixed `region`.
    ///
    /// Static keys come from `AWS_ACCESS_KEY` / `AWS_SECRET_KEY` when both are
    /// set; otherwise the SDK's default credential chain applies.
    pub async fn connect(bucket: &str, region: &str) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(region.to_string()));

        match (std::env::var(ACCESS_KEY_VAR), std::env::var(SECRET_KEY_VAR)) {
            (Ok(access), Ok(secret)) => {
                info!(bucket, region, "using static S3 credentials from environment");
                loader = loader.credentials_provider(Credentials::new(access, secret, None, None, "environment"));
            }
            _ => info!(bucket, region, "using default AWS credential chain"),
        }

        let sdk_config = loader.load().await;
        Self::from_client(aws_sdk_s3::Client::new(&sdk_config), bucket)
    }

    pub fn from_client(client: aws_sdk_s3::Client, bucket: &str) -> Self {
        Self { client, bucket: bucket.to_string() }
    }
}

#[async_trait::async_trait]
impl ObjectStore for S3Store {
    async fn exists(&self, key: &str) -> PersistResult<bool> {
        match self.client.head_object().bucket(&self.bucket).key(key).send().await {
            Ok(_) => Ok(true),
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_not_found() {
                    debug!(key, "object not found");
                    Ok(false)
                } else {
                    Err(store_err(key, service_err))
                }
            }
        }
    }

    async fn get(&self, key: &str) -> PersistResult<Vec<u8>> {
        let out = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| store_err(key, e))?;
        let body = out.body.collect().await.map_err(|e| store_err(key, e))?;
        Ok(body.into_bytes().to_vec())
    }

    async fn put(&self, key: &str, body: Vec<u8>) -> PersistResult<()> {
        let bytes = body.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type("text/csv")
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| store_err(key, e))?;
        debug!(key, bytes, "object written");
        Ok(())
    }
}
