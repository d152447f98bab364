//! # contract: Universal interface for object storage backends
//!
//! This module defines a single trait (`ObjectStore`) and concrete supporting
//! types for provisioning website buckets and uploading local files into them
//! via a cloud API, a local S3-compatible emulator, or a mock/test
//! implementation.
//!
//! ## Interface & Extensibility
//! - Implement the [`ObjectStore`] trait to create new storage clients (e.g. S3, emulator-backed).
//! - All methods are async, returning results and using boxed error types.
//! - Error handling is uniform: all API/caller errors return boxed trait objects.
//! - Meant for both production code and robust mocking in tests.
//!
//! ## Mocking & Testing
//! - The trait is annotated for `mockall` so consumers can generate
//!   deterministic mocks for unit/integration tests.
//!
//! ## Adding New Storage Backends
//! - Implement the trait for your backend.
//! - Convert all meaningful upstream errors to a boxed error.
//! - Creation must be idempotent: a bucket that already exists under the
//!   caller's ownership is returned as a usable handle, not an error.

use std::path::Path;

use async_trait::async_trait;

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

/// Error type for the storage contract (simple boxed error for now).
pub type StoreError = Box<dyn std::error::Error + Send + Sync>;

/// Handle to a bucket the store has vouched for.
///
/// This is a plain value: constructing one performs no network call. Backends
/// hand it out from [`ObjectStore::create_or_get_bucket`], and callers that
/// already know a bucket exists may build one directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    /// Globally unique bucket name.
    pub name: String,
}

impl Bucket {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Represents the minimal data needed to upload one local file as an object.
#[derive(Debug)]
pub struct UploadRequest<'a> {
    /// Path of the file on the local filesystem.
    pub local_path: &'a Path,
    /// Object key under the bucket, `/`-separated regardless of platform.
    pub key: &'a str,
    /// MIME type to record on the stored object.
    pub content_type: &'a str,
}

/// Trait for provisioning buckets and managing the objects inside them.
/// The implementor is responsible for connecting to a backing storage API.
///
/// The trait is implemented by real clients and by test mocks, and is
/// `Send` + `Sync` and intended for async/await usage.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// List the names of all buckets owned by the caller.
    async fn list_buckets(&self) -> Result<Vec<String>, StoreError>;

    /// List every object key in the bucket, following pagination to the end.
    async fn list_objects(&self, bucket: &str) -> Result<Vec<String>, StoreError>;

    /// Create the bucket, or return a handle to it if the caller already owns it.
    async fn create_or_get_bucket(&self, name: &str) -> Result<Bucket, StoreError>;

    /// Attach a bucket policy granting anonymous read on every object.
    async fn set_public_read_policy(&self, bucket: &Bucket) -> Result<(), StoreError>;

    /// Switch the bucket into static website hosting mode with the given
    /// index and error documents.
    async fn enable_website_hosting(
        &self,
        bucket: &Bucket,
        index_document: &str,
        error_document: &str,
    ) -> Result<(), StoreError>;

    /// Store one local file as an object, recording its content type.
    ///
    /// Implementor is responsible for streaming the file body and for
    /// overwriting any object already stored under the same key.
    async fn upload<'a>(&self, bucket: &Bucket, req: UploadRequest<'a>) -> Result<(), StoreError>;
}
