//! High-level pipeline: walk a local site tree and upload it into a bucket.
//!
//! This module provides the top-level orchestration logic for "synchronising"
//! a directory of static site files into a website bucket. It implements a
//! coordinated pipeline that:
//!   - Canonicalises the sync root so keys are derived from a stable base
//!   - Walks the tree with an explicit worklist, collecting one [`SyncEntry`]
//!     per regular file
//!   - Uploads every entry through an [`ObjectStore`], resolving the content
//!     type from the object key
//!   - Aggregates and returns a report of everything uploaded.
//!
//! # Major Types
//! - [`SyncEntry`]: One planned upload (local path plus derived object key)
//! - [`SyncReport`]: Output report listing every stored object for downstream audit
//!
//! # Error Handling
//! Fail-fast: the first failed step (root resolution, directory read, upload)
//! returns immediately as a [`SyncError`]; objects uploaded before the
//! failure stay in the bucket. Callers should log and surface these errors.
//!
//! # Callable From
//! - Used by both the CLI crate and integration tests
//! - Expects a concrete (async) [`ObjectStore`] implementation for uploads
//!
//! # Navigation
//! - Main entrypoint: [`synchronise`]
//! - Plan-only walk: [`plan`]; upload of a prepared plan: [`upload_all`].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::content_type;
use crate::contract::{Bucket, ObjectStore, StoreError, UploadRequest};

/// One planned upload: a regular file under the sync root and the object key
/// it will be stored under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncEntry {
    /// Absolute path of the file on disk.
    pub local_path: PathBuf,
    /// Key relative to the sync root, `/`-separated on every platform.
    pub key: String,
}

/// Report of a completed synchronisation run.
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub bucket: String,
    pub uploaded: Vec<UploadedObject>,
}

/// One object stored during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadedObject {
    pub key: String,
    pub content_type: String,
}

/// Error cases for a synchronisation run, in pipeline order.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The sync root could not be resolved to a canonical directory.
    #[error("cannot resolve sync root {}: {source}", .path.display())]
    Root { path: PathBuf, source: io::Error },

    /// A directory or entry under the root could not be read.
    #[error("failed to read {} while walking the site tree: {source}", .path.display())]
    Walk { path: PathBuf, source: io::Error },

    /// The store rejected an upload. Entries after this one were not attempted.
    #[error("failed to upload {key} to bucket {bucket}: {source}")]
    Upload {
        bucket: String,
        key: String,
        source: StoreError,
    },
}

/// Walk the tree under `root` and return one entry per regular file.
///
/// The walk keeps an explicit worklist of directories still to visit, paired
/// with the `/`-separated key prefix each one maps to, so no recursion depth
/// limit applies. Symlinks are resolved: a link to a file is planned like a
/// file, a link to a directory is descended into. Anything that is neither a
/// file nor a directory (sockets, broken links) is skipped.
///
/// The order of entries is not specified.
pub fn plan(root: &Path) -> Result<Vec<SyncEntry>, SyncError> {
    let mut entries = Vec::new();
    let mut pending: Vec<(PathBuf, String)> = vec![(root.to_path_buf(), String::new())];

    while let Some((dir, prefix)) = pending.pop() {
        let listing = fs::read_dir(&dir).map_err(|source| SyncError::Walk {
            path: dir.clone(),
            source,
        })?;
        for item in listing {
            let item = item.map_err(|source| SyncError::Walk {
                path: dir.clone(),
                source,
            })?;
            let name = item.file_name().to_string_lossy().into_owned();
            let path = item.path();
            if path.is_dir() {
                pending.push((path, format!("{prefix}{name}/")));
            } else if path.is_file() {
                entries.push(SyncEntry {
                    local_path: path,
                    key: format!("{prefix}{name}"),
                });
            }
        }
    }

    Ok(entries)
}

/// Upload every planned entry through `store`, in the order given.
///
/// Fail-fast: the first rejected upload aborts the run and the remaining
/// entries are not attempted.
pub async fn upload_all<S>(
    store: &S,
    bucket: &Bucket,
    entries: &[SyncEntry],
) -> Result<SyncReport, SyncError>
where
    S: ObjectStore,
{
    let mut uploaded: Vec<UploadedObject> = Vec::new();

    for entry in entries {
        let content_type = content_type::resolve(&entry.key);
        info!(
            key = %entry.key,
            content_type,
            path = %entry.local_path.display(),
            "[SYNC][UPLOAD] uploading object"
        );
        match store
            .upload(
                bucket,
                UploadRequest {
                    local_path: &entry.local_path,
                    key: &entry.key,
                    content_type,
                },
            )
            .await
        {
            Ok(()) => uploaded.push(UploadedObject {
                key: entry.key.clone(),
                content_type: content_type.to_owned(),
            }),
            Err(source) => {
                error!(key = %entry.key, error = ?source, "[SYNC][ERROR] upload failed, aborting run");
                return Err(SyncError::Upload {
                    bucket: bucket.name.clone(),
                    key: entry.key.clone(),
                    source,
                });
            }
        }
    }

    Ok(SyncReport {
        bucket: bucket.name.clone(),
        uploaded,
    })
}

/// Entrypoint: walk `root` and upload its contents into `bucket`.
///
/// Already-stored objects with the same keys are overwritten unconditionally,
/// so re-running against an unchanged tree converges on the same bucket
/// state.
pub async fn synchronise<S>(
    store: &S,
    root: &Path,
    bucket: &Bucket,
) -> Result<SyncReport, SyncError>
where
    S: ObjectStore,
{
    let root = root.canonicalize().map_err(|source| SyncError::Root {
        path: root.to_path_buf(),
        source,
    })?;
    info!(root = %root.display(), bucket = %bucket.name, "[SYNC] starting synchronisation");

    let entries = plan(&root)?;
    debug!(files = entries.len(), "[SYNC] plan prepared");

    let report = upload_all(store, bucket, &entries).await?;

    match serde_json::to_string_pretty(&report) {
        Ok(json) => debug!(report = %json, "[SYNC][DEBUG] synchronisation report as JSON"),
        Err(e) => error!(error = ?e, "[SYNC][DEBUG] failed to serialise synchronisation report"),
    }
    info!(
        uploaded = report.uploaded.len(),
        bucket = %report.bucket,
        "[SYNC] synchronisation complete"
    );

    Ok(report)
}
