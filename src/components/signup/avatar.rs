//! Random avatar assignment for new accounts

use rand::Rng;

use crate::api::storage::StorageResult;
use crate::api::ObjectStorage;
use crate::config::AppConfig;
use crate::models::ObjectRef;

/// Uniform pick over `objects`; `None` when there is nothing to pick from.
pub fn pick_random<'a, R: Rng + ?Sized>(objects: &'a [ObjectRef], rng: &mut R) -> Option<&'a ObjectRef> {
    if objects.is_empty() {
        return None;
    }
    objects.get(rng.gen_range(0..objects.len()))
}

/// List the avatar folder and choose one object path from it.
pub async fn pick_avatar_path(storage: &dyn ObjectStorage, folder: &ObjectRef) -> StorageResult<Option<String>> {
    let objects = storage.list_all(folder).await?;
    let picked = pick_random(&objects, &mut rand::thread_rng()).map(|o| o.full_path.clone());

    if picked.is_none() {
        tracing::warn!("No avatars found under {}", folder);
    }
    Ok(picked)
}

/// Resolve a picked path inside `bucket` to a download URL.
pub async fn resolve_avatar_url(storage: &dyn ObjectStorage, bucket: &str, path: &str) -> StorageResult<String> {
    let object = ObjectRef::new(bucket, path);
    storage.download_url(&object).await
}

/// Path of a random avatar under the configured folder, or `""` when the
/// folder is invalid, empty, or cannot be listed.
pub async fn load_avatar_path(storage: &dyn ObjectStorage, config: &AppConfig) -> String {
    let folder_url = config.avatar_folder_url();
    let Some(folder) = ObjectRef::from_gs_url(&folder_url) else {
        tracing::warn!("Invalid avatar folder {}", folder_url);
        return String::new();
    };

    match pick_avatar_path(storage, &folder).await {
        Ok(path) => path.unwrap_or_default(),
        Err(e) => {
            tracing::warn!("Avatar listing failed: {}", e);
            String::new()
        }
    }
}

/// Download URL for `path`, or `""` when there is no path or the lookup fails.
pub async fn load_avatar_url(storage: &dyn ObjectStorage, bucket: &str, path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }

    match resolve_avatar_url(storage, bucket, path).await {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!("Avatar URL lookup for {} failed: {}", path, e);
            String::new()
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::api::StorageError;
    use async_trait::async_trait;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::RefCell;

    /// Storage fake with canned listing and URL results
    pub(crate) struct FakeStorage {
        pub listing: Result<Vec<ObjectRef>, StorageError>,
        pub url: Result<String, StorageError>,
        pub resolved: RefCell<Vec<ObjectRef>>,
    }

    impl FakeStorage {
        pub(crate) fn with_paths(paths: &[&str]) -> Self {
            FakeStorage {
                listing: Ok(paths.iter().map(|p| ObjectRef::new("bucket", p)).collect()),
                url: Ok("https://cdn.example/avatar.png".to_string()),
                resolved: RefCell::new(Vec::new()),
            }
        }

        pub(crate) fn failing_listing() -> Self {
            FakeStorage {
                listing: Err(StorageError::Network("connection refused".into())),
                ..Self::with_paths(&[])
            }
        }

        pub(crate) fn failing_url(paths: &[&str]) -> Self {
            FakeStorage {
                url: Err(StorageError::NoDownloadToken("gs://bucket/avatars/a.png".into())),
                ..Self::with_paths(paths)
            }
        }
    }

    #[async_trait(?Send)]
    impl ObjectStorage for FakeStorage {
        async fn list_all(&self, _folder: &ObjectRef) -> StorageResult<Vec<ObjectRef>> {
            self.listing.clone()
        }

        async fn download_url(&self, object: &ObjectRef) -> StorageResult<String> {
            self.resolved.borrow_mut().push(object.clone());
            self.url.clone()
        }
    }

    fn refs(n: usize) -> Vec<ObjectRef> {
        (0..n).map(|i| ObjectRef::new("bucket", &format!("avatars/{}.png", i))).collect()
    }

    #[test]
    fn test_single_object_always_picked() {
        let objects = refs(1);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            assert_eq!(pick_random(&objects, &mut rng), Some(&objects[0]));
        }
    }

    #[test]
    fn test_empty_listing_picks_nothing() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(pick_random(&[], &mut rng), None);
    }

    #[test]
    fn test_pick_is_roughly_uniform() {
        let objects = refs(4);
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts = [0usize; 4];
        let draws = 40_000;

        for _ in 0..draws {
            let picked = pick_random(&objects, &mut rng).unwrap();
            let index = objects.iter().position(|o| o == picked).unwrap();
            counts[index] += 1;
        }

        let expected = draws / objects.len();
        for count in counts {
            // within 5% of the expected share
            assert!(count.abs_diff(expected) < expected / 20, "counts: {:?}", counts);
        }
    }

    #[tokio::test]
    async fn test_pick_avatar_path_from_listing() {
        let storage = FakeStorage::with_paths(&["avatars/only.png"]);
        let folder = ObjectRef::new("bucket", "avatars");
        let path = pick_avatar_path(&storage, &folder).await.unwrap();
        assert_eq!(path.as_deref(), Some("avatars/only.png"));
    }

    #[tokio::test]
    async fn test_pick_avatar_path_empty_folder() {
        let storage = FakeStorage::with_paths(&[]);
        let folder = ObjectRef::new("bucket", "avatars");
        assert_eq!(pick_avatar_path(&storage, &folder).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_listing_failure_propagates() {
        let storage = FakeStorage::failing_listing();
        let folder = ObjectRef::new("bucket", "avatars");
        assert!(pick_avatar_path(&storage, &folder).await.is_err());
    }

    #[tokio::test]
    async fn test_resolve_uses_configured_bucket() {
        let storage = FakeStorage::with_paths(&[]);
        let url = resolve_avatar_url(&storage, "wordchecker-a26d8.appspot.com", "avatars/a.png")
            .await
            .unwrap();
        assert_eq!(url, "https://cdn.example/avatar.png");
        assert_eq!(
            storage.resolved.borrow()[0].to_gs_url(),
            "gs://wordchecker-a26d8.appspot.com/avatars/a.png"
        );
    }

    fn config() -> AppConfig {
        AppConfig {
            storage_bucket: "bucket".into(),
            avatar_folder: "avatars".into(),
            ..AppConfig::default()
        }
    }

    #[tokio::test]
    async fn test_load_avatar_path_picks_listed_object() {
        let storage = FakeStorage::with_paths(&["avatars/only.png"]);
        assert_eq!(load_avatar_path(&storage, &config()).await, "avatars/only.png");
    }

    #[tokio::test]
    async fn test_load_avatar_path_listing_failure_is_empty() {
        let storage = FakeStorage::failing_listing();
        assert_eq!(load_avatar_path(&storage, &config()).await, "");
    }

    #[tokio::test]
    async fn test_load_avatar_path_empty_folder_is_empty() {
        let storage = FakeStorage::with_paths(&[]);
        assert_eq!(load_avatar_path(&storage, &config()).await, "");
    }

    #[tokio::test]
    async fn test_load_avatar_path_invalid_folder_url_is_empty() {
        let storage = FakeStorage::with_paths(&["avatars/only.png"]);
        let config = AppConfig {
            storage_bucket: String::new(),
            ..config()
        };
        assert_eq!(config.avatar_folder_url(), "gs:///avatars");
        assert_eq!(load_avatar_path(&storage, &config).await, "");
    }

    #[tokio::test]
    async fn test_load_avatar_url_resolves_path() {
        let storage = FakeStorage::with_paths(&[]);
        let url = load_avatar_url(&storage, "bucket", "avatars/a.png").await;
        assert_eq!(url, "https://cdn.example/avatar.png");
        assert_eq!(storage.resolved.borrow()[0].to_gs_url(), "gs://bucket/avatars/a.png");
    }

    #[tokio::test]
    async fn test_load_avatar_url_failure_is_empty() {
        let storage = FakeStorage::failing_url(&[]);
        assert_eq!(load_avatar_url(&storage, "bucket", "avatars/a.png").await, "");
    }

    #[tokio::test]
    async fn test_load_avatar_url_skips_empty_path() {
        let storage = FakeStorage::with_paths(&[]);
        assert_eq!(load_avatar_url(&storage, "bucket", "").await, "");
        assert!(storage.resolved.borrow().is_empty());
    }
}
