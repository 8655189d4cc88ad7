//! S3 object store implementation

use crate::{ObjectError, ObjectMeta, ObjectReader, ObjectStore};
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::DisplayErrorContext;
use std::pin::Pin;
use tokio::io::{AsyncRead, AsyncReadExt};

type Body = Pin<Box<dyn AsyncRead + Send>>;

/// Connection to an S3-compatible service
///
/// Credentials come from the default AWS provider chain (environment,
/// profile, ...). Requests use path-style addressing so that self-hosted
/// services such as SeaweedFS or MinIO work without DNS tricks.
#[derive(Clone)]
pub struct S3Store {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3Store {
    /// Build a client for `bucket` at `endpoint` in `region`
    ///
    /// No request is sent here; a bad endpoint surfaces on the first `stat`.
    pub async fn connect(endpoint: &str, bucket: &str, region: &str) -> Result<Self, ObjectError> {
        if bucket.is_empty() {
            return Err(ObjectError::Config("Bucket name must not be empty".to_string()));
        }

        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_owned()))
            .endpoint_url(endpoint)
            .load()
            .await;
        let config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(true)
            .build();

        tracing::debug!("Created S3 client for {endpoint} (bucket: {bucket}, region: {region})");

        Ok(Self {
            client: aws_sdk_s3::Client::from_conf(config),
            bucket: bucket.to_owned(),
        })
    }

    fn target(&self, key: &str) -> String {
        format!("s3://{}/{}", self.bucket, key)
    }
}

#[async_trait::async_trait]
impl ObjectStore for S3Store {
    type Reader = S3Reader;

    async fn stat(&self, name: &str) -> Result<ObjectMeta, ObjectError> {
        let response = self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(name)
            .send()
            .await
            .map_err(|err| {
                if err
                    .as_service_error()
                    .is_some_and(|service_err| service_err.is_not_found())
                {
                    ObjectError::NotFound(self.target(name))
                } else {
                    ObjectError::Request {
                        target: self.target(name),
                        message: DisplayErrorContext(&err).to_string(),
                    }
                }
            })?;

        let length = response.content_length().unwrap_or_default();
        let size = u64::try_from(length).map_err(|_| ObjectError::Request {
            target: self.target(name),
            message: format!("Invalid content length: {length}"),
        })?;

        Ok(ObjectMeta { size })
    }

    async fn open(&self, name: &str) -> Result<S3Reader, ObjectError> {
        Ok(S3Reader {
            client: self.client.clone(),
            bucket: self.bucket.clone(),
            key: name.to_owned(),
            position: 0,
            body: None,
            closed: false,
        })
    }
}

/// Seekable reader over a single S3 object
///
/// The first read after open or seek issues a GetObject with an open-ended
/// `Range: bytes=<position>-` header, the request a streaming HTTP server
/// sends when serving a browser range request. The body is then consumed in
/// whatever chunk sizes the transport hands back.
pub struct S3Reader {
    client: aws_sdk_s3::Client,
    bucket: String,
    key: String,
    position: u64,
    body: Option<Body>,
    closed: bool,
}

impl S3Reader {
    fn target(&self) -> String {
        format!("s3://{}/{}", self.bucket, self.key)
    }

    fn ensure_open(&self) -> Result<(), ObjectError> {
        if self.closed {
            return Err(ObjectError::Closed(self.target()));
        }
        Ok(())
    }
}

/// Issue an open-ended range request starting at `position`.
async fn get_range(
    client: &aws_sdk_s3::Client,
    bucket: &str,
    key: &str,
    position: u64,
) -> Result<Body, ObjectError> {
    let range = format!("bytes={position}-");
    tracing::trace!("GetObject s3://{bucket}/{key} {range}");

    let response = client
        .get_object()
        .bucket(bucket)
        .key(key)
        .range(range)
        .send()
        .await
        .map_err(|err| ObjectError::Request {
            target: format!("s3://{bucket}/{key}"),
            message: DisplayErrorContext(&err).to_string(),
        })?;

    Ok(Box::pin(response.body.into_async_read()))
}

#[async_trait::async_trait]
impl ObjectReader for S3Reader {
    async fn seek(&mut self, offset: u64) -> Result<u64, ObjectError> {
        self.ensure_open()?;
        if offset != self.position && self.body.take().is_some() {
            tracing::trace!("Discarding in-flight body of {}", self.target());
        }
        self.position = offset;
        Ok(self.position)
    }

    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, ObjectError> {
        self.ensure_open()?;
        if buf.is_empty() {
            return Ok(0);
        }

        let mut body = match self.body.take() {
            Some(body) => body,
            None => get_range(&self.client, &self.bucket, &self.key, self.position).await?,
        };
        let n = body.read(buf).await?;
        self.position += n as u64;
        self.body = Some(body);

        Ok(n)
    }

    fn close(&mut self) {
        self.body = None;
        self.closed = true;
    }
}
