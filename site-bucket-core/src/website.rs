//! # website: Static website hosting conventions
//!
//! The documents a website bucket serves and the public URL it answers on.
//! Document names are fixed by convention rather than configurable: every
//! site this tool publishes serves `index.html` at the root and `error.html`
//! for missing keys.

/// Object served for directory-style requests.
pub const INDEX_DOCUMENT: &str = "index.html";

/// Object served when a requested key does not exist.
pub const ERROR_DOCUMENT: &str = "error.html";

/// Regions whose website endpoint joins the region with a dash. These are the
/// long-standing regions; everything launched later uses the dot form.
static DASH_ENDPOINT_REGIONS: &[&str] = &[
    "us-east-1",
    "us-west-1",
    "us-west-2",
    "ap-northeast-1",
    "ap-southeast-1",
    "ap-southeast-2",
    "eu-west-1",
    "sa-east-1",
    "us-gov-west-1",
];

/// Public website endpoint for a bucket hosted in `region`.
///
/// Website endpoints speak plain HTTP; TLS in front of them is a CDN concern
/// and out of scope here.
pub fn endpoint_url(bucket: &str, region: &str) -> String {
    if DASH_ENDPOINT_REGIONS.contains(&region) {
        format!("http://{bucket}.s3-website-{region}.amazonaws.com")
    } else {
        format!("http://{bucket}.s3-website.{region}.amazonaws.com")
    }
}
