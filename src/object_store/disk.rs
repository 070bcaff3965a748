/// Disk-based object storage backend
use crate::{
    error::{RecordsError, RecordsResult},
    object_store::{suffixed_key, ObjectStore, PutOptions, StoredObject},
};
use async_trait::async_trait;
use rand::Rng;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Disk storage backend
///
/// Writes record text under a root directory, mirroring the storage key as a
/// relative path. Public URLs are composed from a configured base URL; the
/// server exposes the root at /objects so those URLs resolve in demo mode.
#[derive(Clone)]
pub struct DiskObjectStore {
    root: PathBuf,
    public_base_url: String,
}

impl DiskObjectStore {
    /// Create a new disk storage backend
    pub fn new(root: PathBuf, public_base_url: String) -> Self {
        Self {
            root,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    fn object_path(&self, key: &str) -> PathBuf {
        key.split('/').fold(self.root.clone(), |path, segment| path.join(segment))
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url, key)
    }

    async fn ensure_parent(&self, path: &Path) -> RecordsResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                RecordsError::Storage(format!("Failed to create object directory: {}", e))
            })?;
        }
        Ok(())
    }

    fn random_suffix() -> String {
        const CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
        let mut rng = rand::thread_rng();
        (0..5)
            .map(|_| {
                let idx = rng.gen_range(0..CHARSET.len());
                CHARSET[idx] as char
            })
            .collect()
    }
}

#[async_trait]
impl ObjectStore for DiskObjectStore {
    async fn put(&self, key: &str, body: String, opts: PutOptions) -> RecordsResult<StoredObject> {
        let key = if opts.exact_key {
            key.to_string()
        } else {
            suffixed_key(key, &Self::random_suffix())
        };

        let path = self.object_path(&key);
        self.ensure_parent(&path).await?;

        fs::write(&path, body).await.map_err(|e| {
            RecordsError::Storage(format!("Failed to write object {}: {}", key, e))
        })?;

        Ok(StoredObject {
            url: self.public_url(&key),
        })
    }
}
