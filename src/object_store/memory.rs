/// In-memory object storage backend
///
/// Keeps every put in a `HashMap` behind a lock. Data is lost when the store
/// is dropped. Backs the ephemeral demo mode and the fake store the tests
/// use to observe put counts and stored bodies.
use crate::{
    error::RecordsResult,
    object_store::{suffixed_key, ObjectStore, PutOptions, StoredObject},
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// A recorded put
#[derive(Debug, Clone)]
pub struct PutRecord {
    pub key: String,
    pub body: String,
    pub public_read: bool,
    pub exact_key: bool,
}

/// In-memory implementation of `ObjectStore`
#[derive(Default)]
pub struct MemoryObjectStore {
    objects: Mutex<HashMap<String, String>>,
    puts: Mutex<Vec<PutRecord>>,
    put_count: AtomicUsize,
}

impl MemoryObjectStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of puts issued against this store
    pub fn put_count(&self) -> usize {
        self.put_count.load(Ordering::SeqCst)
    }

    /// Current body stored at a key
    pub fn object(&self, key: &str) -> Option<String> {
        self.objects.lock().expect("memory store lock").get(key).cloned()
    }

    /// Keys currently stored
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .objects
            .lock()
            .expect("memory store lock")
            .keys()
            .cloned()
            .collect();
        keys.sort();
        keys
    }

    /// Every put recorded in order
    pub fn puts(&self) -> Vec<PutRecord> {
        self.puts.lock().expect("memory store lock").clone()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put(&self, key: &str, body: String, opts: PutOptions) -> RecordsResult<StoredObject> {
        let key = if opts.exact_key {
            key.to_string()
        } else {
            // Counter-based suffix keeps puts distinguishable without randomness
            suffixed_key(key, &format!("{:05}", self.put_count()))
        };

        self.put_count.fetch_add(1, Ordering::SeqCst);
        self.puts.lock().expect("memory store lock").push(PutRecord {
            key: key.clone(),
            body: body.clone(),
            public_read: opts.public_read,
            exact_key: opts.exact_key,
        });
        self.objects
            .lock()
            .expect("memory store lock")
            .insert(key.clone(), body);

        Ok(StoredObject {
            url: format!("memory://{}", key),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_stores_and_counts() {
        let store = MemoryObjectStore::new();

        let stored = store
            .put("logins/student/a_17.json", "body".to_string(), PutOptions::default())
            .await
            .unwrap();

        assert_eq!(stored.url, "memory://logins/student/a_17.json");
        assert_eq!(store.put_count(), 1);
        assert_eq!(store.object("logins/student/a_17.json").as_deref(), Some("body"));
    }

    #[tokio::test]
    async fn exact_key_put_overwrites() {
        let store = MemoryObjectStore::new();
        let key = "logins/student/a_17.json";

        store.put(key, "first".to_string(), PutOptions::default()).await.unwrap();
        store.put(key, "second".to_string(), PutOptions::default()).await.unwrap();

        assert_eq!(store.put_count(), 2);
        assert_eq!(store.keys().len(), 1);
        assert_eq!(store.object(key).as_deref(), Some("second"));
    }
}
