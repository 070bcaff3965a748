/// Hosted blob API storage backend
use crate::{
    error::{RecordsError, RecordsResult},
    object_store::{ObjectStore, PutOptions, StoredObject},
};
use async_trait::async_trait;
use tracing::{debug, error};

/// Configuration for the hosted blob API
#[derive(Debug, Clone)]
pub struct HttpStoreConfig {
    /// Base URL of the blob API, e.g. "https://blob.example.com/store"
    pub endpoint: String,

    /// Bearer token for the blob API
    pub token: String,
}

/// Blob API storage backend
///
/// Issues one `PUT <endpoint>/<key>` per stored object. The API is expected
/// to answer with a JSON body carrying the public `url` of the stored blob.
#[derive(Clone)]
pub struct HttpObjectStore {
    client: reqwest::Client,
    config: HttpStoreConfig,
}

impl HttpObjectStore {
    /// Create a new blob API backend
    pub fn new(config: HttpStoreConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Percent-encode each key segment, keeping the `/` separators
    fn object_url(&self, key: &str) -> String {
        let encoded: Vec<String> = key
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect();
        format!(
            "{}/{}",
            self.config.endpoint.trim_end_matches('/'),
            encoded.join("/")
        )
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    async fn put(&self, key: &str, body: String, opts: PutOptions) -> RecordsResult<StoredObject> {
        let url = self.object_url(key);

        debug!("Uploading record to blob API: {} ({} bytes)", key, body.len());

        let response = self
            .client
            .put(&url)
            .bearer_auth(&self.config.token)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .query(&[
                ("access", if opts.public_read { "public" } else { "private" }),
                ("addRandomSuffix", if opts.exact_key { "0" } else { "1" }),
            ])
            .body(body)
            .send()
            .await
            .map_err(|e| {
                error!("Blob API request failed: {}", e);
                RecordsError::Storage(format!("Blob API request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            error!("Blob API rejected upload for {}: {} {}", key, status, detail);
            return Err(RecordsError::Storage(format!(
                "Blob API returned {}: {}",
                status, detail
            )));
        }

        let payload: serde_json::Value = response.json().await.map_err(|e| {
            RecordsError::Storage(format!("Invalid blob API response: {}", e))
        })?;

        let url = payload
            .get("url")
            .and_then(|u| u.as_str())
            .ok_or_else(|| {
                RecordsError::Storage("Blob API response missing url".to_string())
            })?
            .to_string();

        debug!("Record uploaded: {} -> {}", key, url);

        Ok(StoredObject { url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(endpoint: &str) -> HttpObjectStore {
        HttpObjectStore::new(HttpStoreConfig {
            endpoint: endpoint.to_string(),
            token: "test-token".to_string(),
        })
    }

    #[test]
    fn object_url_joins_endpoint_and_key() {
        let store = store("https://blob.example.com/store/");
        assert_eq!(
            store.object_url("logins/student/a_at_b.com_17.json"),
            "https://blob.example.com/store/logins/student/a_at_b.com_17.json"
        );
    }

    #[test]
    fn object_url_escapes_unsafe_segments() {
        let store = store("https://blob.example.com");
        let url = store.object_url("course-notes/Intro Design/notes.json");
        assert_eq!(
            url,
            "https://blob.example.com/course-notes/Intro%20Design/notes.json"
        );
    }
}
