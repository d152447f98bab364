#![doc = "S3-backed storage: bridges the ObjectStore contract to the AWS SDK client used by the CLI."]
//
//! # Storage Integration (CLI <-> Core)
//!
//! This module provides the bridge between the CLI workflow and the storage
//! abstraction in [`site_bucket_core::contract`]. It wires up the
//! [`ObjectStore`] trait for real use against S3 (or an S3-compatible
//! endpoint), and provides the [`S3Store`] the CLI hands to the sync
//! pipeline.
//!
//! ## Client Usage
//!
//! - Construct [`S3Store`] from a [`SessionConfig`] with [`S3Store::connect`].
//! - Credentials come from the default AWS provider chain, optionally pinned
//!   to a named profile.
//! - Setting `S3_ENDPOINT_URL` redirects every call to a local emulator;
//!   path-style addressing is switched on at the same time, since
//!   virtual-hosted bucket DNS does not resolve against localhost.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{
    BucketLocationConstraint, CreateBucketConfiguration, ErrorDocument, IndexDocument,
    WebsiteConfiguration,
};
use aws_sdk_s3::Client;
use site_bucket_core::contract::{Bucket, ObjectStore, StoreError, UploadRequest};
use site_bucket_core::{policy, website};
use tracing::{debug, error, info};

use crate::config::SessionConfig;

/// Region assumed when the provider chain resolves none. Also the one region
/// whose CreateBucket call must not carry a LocationConstraint.
const DEFAULT_REGION: &str = "us-east-1";

/// Object storage client bound to one resolved region.
pub struct S3Store {
    client: Client,
    region: String,
}

impl S3Store {
    /// Connect using the default AWS credential chain, honouring the session's
    /// profile and endpoint override.
    pub async fn connect(session: &SessionConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(profile) = &session.profile {
            loader = loader.profile_name(profile);
        }
        if let Some(endpoint) = &session.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }
        let shared = loader.load().await;
        let region = shared
            .region()
            .map(|r| r.to_string())
            .unwrap_or_else(|| DEFAULT_REGION.to_owned());

        let mut builder = aws_sdk_s3::config::Builder::from(&shared);
        if session.endpoint_url.is_some() {
            builder = builder.force_path_style(true);
        }
        let client = Client::from_conf(builder.build());

        info!(
            region = %region,
            profile = session.profile.as_deref().unwrap_or("default"),
            endpoint_override = session.endpoint_url.is_some(),
            "Initialized S3 client"
        );
        Self { client, region }
    }

    /// Region every bucket handled by this store lives in.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Public website URL a bucket answers on once hosting is enabled.
    pub fn website_url(&self, bucket: &Bucket) -> String {
        website::endpoint_url(&bucket.name, &self.region)
    }
}

/// Website configuration serving `index_document` at the root and
/// `error_document` for missing keys.
fn website_configuration(
    index_document: &str,
    error_document: &str,
) -> Result<WebsiteConfiguration, aws_sdk_s3::error::BuildError> {
    let index = IndexDocument::builder().suffix(index_document).build()?;
    let error = ErrorDocument::builder().key(error_document).build()?;
    Ok(WebsiteConfiguration::builder()
        .index_document(index)
        .error_document(error)
        .build())
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn list_buckets(&self) -> Result<Vec<String>, StoreError> {
        let resp = self.client.list_buckets().send().await?;
        let names: Vec<String> = resp
            .buckets()
            .iter()
            .filter_map(|b| b.name())
            .map(ToOwned::to_owned)
            .collect();
        debug!(count = names.len(), "Listed buckets");
        Ok(names)
    }

    async fn list_objects(&self, bucket: &str) -> Result<Vec<String>, StoreError> {
        let mut keys = Vec::new();
        let mut continuation: Option<String> = None;
        loop {
            let mut req = self.client.list_objects_v2().bucket(bucket);
            if let Some(token) = continuation.take() {
                req = req.continuation_token(token);
            }
            let resp = req.send().await?;
            for object in resp.contents() {
                if let Some(key) = object.key() {
                    keys.push(key.to_owned());
                }
            }
            if resp.is_truncated() == Some(true) {
                continuation = resp.next_continuation_token().map(ToOwned::to_owned);
            } else {
                break;
            }
        }
        debug!(bucket, count = keys.len(), "Listed objects");
        Ok(keys)
    }

    async fn create_or_get_bucket(&self, name: &str) -> Result<Bucket, StoreError> {
        let mut req = self.client.create_bucket().bucket(name);
        // us-east-1 rejects a LocationConstraint naming itself.
        if self.region != DEFAULT_REGION {
            let constraint = BucketLocationConstraint::from(self.region.as_str());
            let config = CreateBucketConfiguration::builder()
                .location_constraint(constraint)
                .build();
            req = req.create_bucket_configuration(config);
        }

        match req.send().await {
            Ok(_) => {
                info!(bucket = name, region = %self.region, "Created bucket");
                Ok(Bucket::named(name))
            }
            Err(err) => {
                let already_owned = err
                    .as_service_error()
                    .is_some_and(|e| e.is_bucket_already_owned_by_you());
                if already_owned {
                    info!(bucket = name, "Bucket already owned by caller, reusing");
                    Ok(Bucket::named(name))
                } else {
                    error!(bucket = name, error = %err, "Failed to create bucket");
                    Err(Box::new(err))
                }
            }
        }
    }

    async fn set_public_read_policy(&self, bucket: &Bucket) -> Result<(), StoreError> {
        let document = policy::public_read(&bucket.name);
        debug!(bucket = %bucket.name, policy = %document, "Applying bucket policy");
        self.client
            .put_bucket_policy()
            .bucket(&bucket.name)
            .policy(document)
            .send()
            .await?;
        info!(bucket = %bucket.name, "Applied public-read policy");
        Ok(())
    }

    async fn enable_website_hosting(
        &self,
        bucket: &Bucket,
        index_document: &str,
        error_document: &str,
    ) -> Result<(), StoreError> {
        let config = website_configuration(index_document, error_document)?;
        self.client
            .put_bucket_website()
            .bucket(&bucket.name)
            .website_configuration(config)
            .send()
            .await?;
        info!(
            bucket = %bucket.name,
            index = index_document,
            error = error_document,
            "Enabled static website hosting"
        );
        Ok(())
    }

    async fn upload<'a>(&self, bucket: &Bucket, req: UploadRequest<'a>) -> Result<(), StoreError> {
        let body = ByteStream::from_path(req.local_path).await?;
        self.client
            .put_object()
            .bucket(&bucket.name)
            .key(req.key)
            .body(body)
            .content_type(req.content_type)
            .send()
            .await?;
        debug!(bucket = %bucket.name, key = req.key, content_type = req.content_type, "Stored object");
        Ok(())
    }
}
