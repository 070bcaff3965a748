/// Object Storage Boundary
///
/// The records service treats durable storage as an opaque key -> text blob
/// service that hands back a public URL per stored object. Supports multiple
/// backend implementations (disk, hosted blob API, memory).

pub mod disk;
pub mod http;
pub mod memory;

pub use disk::DiskObjectStore;
pub use http::{HttpObjectStore, HttpStoreConfig};
pub use memory::MemoryObjectStore;

use crate::error::RecordsResult;
use async_trait::async_trait;

/// Options for a single put
#[derive(Debug, Clone, Copy)]
pub struct PutOptions {
    /// Request public read access on the stored object
    pub public_read: bool,

    /// Write at exactly the given key. When false, backends append a random
    /// suffix before the extension so repeated puts never collide.
    pub exact_key: bool,
}

impl Default for PutOptions {
    fn default() -> Self {
        Self {
            public_read: true,
            exact_key: true,
        }
    }
}

/// A successfully stored object
#[derive(Debug, Clone)]
pub struct StoredObject {
    /// Public URL at which the object can be fetched
    pub url: String,
}

/// Object storage backend trait
///
/// `put` is the only capability the record store uses: a second write to the
/// same key overwrites the first with no error.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put(&self, key: &str, body: String, opts: PutOptions) -> RecordsResult<StoredObject>;
}

/// Insert a random suffix before the key's extension.
///
/// `logins/student/a_at_b.com_17.json` -> `logins/student/a_at_b.com_17-x7k2p.json`
pub(crate) fn suffixed_key(key: &str, suffix: &str) -> String {
    match key.rfind('.') {
        Some(dot) if dot > key.rfind('/').map_or(0, |s| s + 1) => {
            format!("{}-{}{}", &key[..dot], suffix, &key[dot..])
        }
        _ => format!("{}-{}", key, suffix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_inserted_before_extension() {
        assert_eq!(
            suffixed_key("logins/student/a_17.json", "x7k2p"),
            "logins/student/a_17-x7k2p.json"
        );
    }

    #[test]
    fn suffix_appended_when_no_extension() {
        assert_eq!(suffixed_key("logins/student/a_17", "x7k2p"), "logins/student/a_17-x7k2p");
    }

    #[test]
    fn dot_in_directory_is_not_an_extension() {
        assert_eq!(
            suffixed_key("course-notes/v1.2/notes", "ab"),
            "course-notes/v1.2/notes-ab"
        );
    }
}
