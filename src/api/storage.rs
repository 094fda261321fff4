//! Object storage: listing and download URLs via the Firebase Storage REST API

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use thiserror::Error;

use crate::models::{ListObjectsPage, ObjectMetadata, ObjectRef};

const STORAGE_URL: &str = "https://firebasestorage.googleapis.com/v0";

#[derive(Error, Debug, Clone)]
pub enum StorageError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Access denied: {0}")]
    Unauthorized(String),

    #[error("No download token for {0}")]
    NoDownloadToken(String),

    #[error("Invalid storage URL: {0}")]
    InvalidUrl(String),

    #[error("Storage request failed: {0}")]
    OperationFailed(String),
}

impl From<reqwest::Error> for StorageError {
    fn from(err: reqwest::Error) -> Self {
        StorageError::Network(err.to_string())
    }
}

pub type StorageResult<T> = Result<T, StorageError>;

#[async_trait(?Send)]
pub trait ObjectStorage {
    /// Every object directly under `folder`, across all result pages
    async fn list_all(&self, folder: &ObjectRef) -> StorageResult<Vec<ObjectRef>>;

    /// Tokenized, fetchable URL for `object`
    async fn download_url(&self, object: &ObjectRef) -> StorageResult<String>;
}

pub struct FirebaseStorage {
    client: Client,
    base_url: String,
}

impl FirebaseStorage {
    pub fn new() -> Self {
        Self::with_base_url(STORAGE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        FirebaseStorage {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn objects_url(&self, bucket: &str) -> StorageResult<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| StorageError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| StorageError::InvalidUrl(self.base_url.clone()))?
            .push("b")
            .push(bucket)
            .push("o");
        Ok(url)
    }

    /// `.../b/{bucket}/o/{full_path}` with the whole path encoded as one segment
    fn object_url(&self, object: &ObjectRef) -> StorageResult<Url> {
        let mut url = self.objects_url(&object.bucket)?;
        url.path_segments_mut()
            .map_err(|_| StorageError::InvalidUrl(self.base_url.clone()))?
            .push(&object.full_path);
        Ok(url)
    }

    async fn check_status(response: reqwest::Response, what: &str) -> StorageResult<reqwest::Response> {
        match response.status() {
            s if s.is_success() => Ok(response),
            StatusCode::NOT_FOUND => Err(StorageError::NotFound(what.to_string())),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(StorageError::Unauthorized(what.to_string()))
            }
            status => {
                let text = response.text().await.unwrap_or_default();
                Err(StorageError::OperationFailed(format!("{}: {}", status, text)))
            }
        }
    }
}

impl Default for FirebaseStorage {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the media URL clients fetch the object bytes from.
pub fn media_url(mut object_url: Url, token: &str) -> String {
    object_url
        .query_pairs_mut()
        .append_pair("alt", "media")
        .append_pair("token", token);
    object_url.to_string()
}

#[async_trait(?Send)]
impl ObjectStorage for FirebaseStorage {
    async fn list_all(&self, folder: &ObjectRef) -> StorageResult<Vec<ObjectRef>> {
        let prefix = folder.folder_prefix();
        let mut objects = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut url = self.objects_url(&folder.bucket)?;
            {
                let mut query = url.query_pairs_mut();
                query.append_pair("prefix", &prefix).append_pair("delimiter", "/");
                if let Some(token) = &page_token {
                    query.append_pair("pageToken", token);
                }
            }

            let response = self.client.get(url).send().await?;
            let response = Self::check_status(response, &folder.to_gs_url()).await?;
            let page: ListObjectsPage = response
                .json()
                .await
                .map_err(|e| StorageError::OperationFailed(e.to_string()))?;

            objects.extend(
                page.items
                    .into_iter()
                    .map(|item| ObjectRef::new(&item.bucket, &item.name)),
            );

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        tracing::debug!("Listed {} objects under {}", objects.len(), folder);
        Ok(objects)
    }

    async fn download_url(&self, object: &ObjectRef) -> StorageResult<String> {
        let url = self.object_url(object)?;
        let response = self.client.get(url.clone()).send().await?;
        let response = Self::check_status(response, &object.to_gs_url()).await?;
        let metadata: ObjectMetadata = response
            .json()
            .await
            .map_err(|e| StorageError::OperationFailed(e.to_string()))?;

        let token = metadata
            .first_download_token()
            .ok_or_else(|| StorageError::NoDownloadToken(object.to_gs_url()))?;

        Ok(media_url(url, token))
    }
}
