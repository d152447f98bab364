//! # site-bucket CLI Interface (Module)
//!
//! This module implements the full CLI interface for site-bucket, handling
//! command parsing, argument validation, main entrypoints, and user-visible
//! invocations.
//!
//! All core business logic (sync planning, content types, policy documents)
//! lives in the [`site-bucket-core`] crate. This module is strictly for CLI
//! glue, ergonomic argument exposure, and orchestration.
//!
//! ## Features
//! - Entry struct [`Cli`] defines all user-facing options and subcommands.
//! - Subcommand routing and argument validation; local paths are checked
//!   before any storage client exists, so bad invocations never touch the
//!   network.
//! - Async entrypoint ([`run`]) for programmatic invocation and integration
//!   testing.
//! - Logging, tracing, and structured error output at CLI level.
//!
//! ## How To Use
//! - For command-line users: use the installed `site-bucket` binary with
//!   `--help`.
//! - For programmatic/integration use: call [`run`] with a constructed
//!   [`Cli`].
//!
//! ## Extending
//! When adding subcommands, update [`Commands`] below and keep all
//! non-trivial business logic inside `site-bucket-core`.
//!
//! [`site-bucket-core`]: ../../site_bucket_core/

use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand};
use site_bucket_core::contract::{Bucket, ObjectStore};
use site_bucket_core::synchronise::synchronise;
use site_bucket_core::website;

use crate::config::SessionConfig;
use crate::store::S3Store;

/// CLI for site-bucket: provision website buckets and publish static sites.
#[derive(Parser)]
#[clap(
    name = "site-bucket",
    version,
    about = "Provision S3 buckets for static website hosting and sync local site trees into them"
)]
pub struct Cli {
    /// AWS credentials profile to use
    #[clap(long, global = true, value_name = "NAME")]
    pub profile: Option<String>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all buckets owned by the caller
    ListBuckets,
    /// List the object keys stored in a bucket
    ListBucketObjects {
        /// Name of the bucket to list
        bucket: String,
    },
    /// Create a bucket (if needed), apply the public-read policy and enable website hosting
    SetupBucket {
        /// Globally unique bucket name
        bucket: String,
    },
    /// Upload the contents of a local directory to a bucket and print its website URL
    Sync {
        /// Directory holding the site files
        pathname: PathBuf,
        /// Destination bucket
        bucket: String,
    },
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    let session = SessionConfig::from_cli(cli.profile);
    session.trace_loaded();

    match cli.command {
        Commands::ListBuckets => {
            let store = S3Store::connect(&session).await;
            let names = store
                .list_buckets()
                .await
                .map_err(|e| anyhow!("listing buckets failed: {e}"))?;
            for name in names {
                println!("{name}");
            }
            Ok(())
        }
        Commands::ListBucketObjects { bucket } => {
            let store = S3Store::connect(&session).await;
            let keys = store
                .list_objects(&bucket)
                .await
                .map_err(|e| anyhow!("listing objects in {bucket} failed: {e}"))?;
            for key in keys {
                println!("{key}");
            }
            Ok(())
        }
        Commands::SetupBucket { bucket } => {
            tracing::info!(command = "setup-bucket", bucket = %bucket, "Starting bucket setup");
            let store = S3Store::connect(&session).await;
            let handle = store
                .create_or_get_bucket(&bucket)
                .await
                .map_err(|e| anyhow!("creating bucket {bucket} failed: {e}"))?;
            store
                .set_public_read_policy(&handle)
                .await
                .map_err(|e| anyhow!("applying public-read policy to {bucket} failed: {e}"))?;
            store
                .enable_website_hosting(&handle, website::INDEX_DOCUMENT, website::ERROR_DOCUMENT)
                .await
                .map_err(|e| anyhow!("enabling website hosting on {bucket} failed: {e}"))?;
            println!("{}", store.website_url(&handle));
            Ok(())
        }
        Commands::Sync { pathname, bucket } => {
            // Local preconditions come first: no client, no network until the
            // pathname is known to be a usable sync root.
            if !pathname.exists() {
                bail!("pathname {} does not exist", pathname.display());
            }
            if !pathname.is_dir() {
                bail!("pathname {} is not a directory", pathname.display());
            }

            tracing::info!(command = "sync", bucket = %bucket, "Starting synchronisation");
            let store = S3Store::connect(&session).await;
            let target = Bucket::named(bucket);
            match synchronise(&store, &pathname, &target).await {
                Ok(report) => {
                    tracing::info!(
                        command = "sync",
                        uploaded = report.uploaded.len(),
                        "Synchronisation complete"
                    );
                    println!("{}", store.website_url(&target));
                    Ok(())
                }
                Err(e) => {
                    tracing::error!(command = "sync", error = %e, "Synchronisation failed");
                    Err(anyhow::Error::msg(e))
                }
            }
        }
    }
}
