#![doc = "site-bucket-core: core logic library for site-bucket."]

//! This crate contains the storage contract, sync pipeline and the static
//! hosting conventions (content types, bucket policy, website documents) for
//! site-bucket. No cloud SDK appears here: backends implement
//! [`contract::ObjectStore`] in their own crate.
//!
//! # Usage
//! Add this as a dependency for shared sync, policy and content-type code.

pub mod content_type;
pub mod contract;
pub mod policy;
pub mod synchronise;
pub mod website;
