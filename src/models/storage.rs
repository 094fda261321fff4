use serde::Deserialize;
use std::fmt;

/// Location of an object (or folder) in a storage bucket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    pub bucket: String,
    pub full_path: String,
}

impl ObjectRef {
    pub fn new(bucket: &str, full_path: &str) -> Self {
        ObjectRef {
            bucket: bucket.to_string(),
            full_path: full_path.trim_matches('/').to_string(),
        }
    }

    /// Parse a `gs://bucket/path/to/object` URL.
    pub fn from_gs_url(url: &str) -> Option<Self> {
        let rest = url.strip_prefix("gs://")?;
        let (bucket, path) = match rest.split_once('/') {
            Some((bucket, path)) => (bucket, path),
            None => (rest, ""),
        };
        if bucket.is_empty() {
            return None;
        }
        Some(ObjectRef::new(bucket, path))
    }

    pub fn to_gs_url(&self) -> String {
        format!("gs://{}/{}", self.bucket, self.full_path)
    }

    /// Listing prefix for this ref treated as a folder ("" for the bucket root)
    pub fn folder_prefix(&self) -> String {
        if self.full_path.is_empty() {
            String::new()
        } else {
            format!("{}/", self.full_path)
        }
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_gs_url())
    }
}

/// One page of `GET /v0/b/{bucket}/o`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListObjectsPage {
    #[serde(default)]
    pub items: Vec<ListedObject>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListedObject {
    pub name: String,
    pub bucket: String,
}

/// Object metadata; only the fields needed to build a download URL
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMetadata {
    #[serde(default)]
    pub download_tokens: Option<String>,
}

impl ObjectMetadata {
    pub fn first_download_token(&self) -> Option<&str> {
        self.download_tokens
            .as_deref()
            .and_then(|tokens| tokens.split(',').map(str::trim).find(|t| !t.is_empty()))
    }
}
