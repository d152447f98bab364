//! # policy: Bucket policy documents
//!
//! Renders the policy JSON a website bucket needs. Only one policy exists
//! today: anonymous read on every object, which static website hosting
//! requires so browsers can fetch pages without credentials.

use serde_json::json;

/// Policy document granting anonymous `s3:GetObject` on every object in
/// `bucket`, serialised to the JSON string the storage API expects.
pub fn public_read(bucket: &str) -> String {
    json!({
        "Version": "2012-10-17",
        "Statement": [{
            "Sid": "PublicReadGetObject",
            "Effect": "Allow",
            "Principal": "*",
            "Action": ["s3:GetObject"],
            "Resource": [format!("arn:aws:s3:::{bucket}/*")],
        }]
    })
    .to_string()
}
