/// Configuration management for the Skillpath records service
use crate::error::{RecordsError, RecordsResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Main server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub service: ServiceConfig,
    pub blobstore: BlobstoreConfig,
    pub rate_limit: RateLimitConfig,
    pub logging: LoggingConfig,
}

/// Service-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub hostname: String,
    pub port: u16,
    pub version: String,
}

/// Object storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BlobstoreConfig {
    /// Store records on local disk and serve them back at /objects
    Disk {
        location: PathBuf,
        public_base_url: String,
    },

    /// Store records through a hosted blob API
    Http { endpoint: String, token: String },

    /// Keep records in process memory (ephemeral demo mode)
    Memory,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    pub enabled: bool,
    pub writes_per_second: u32,
    pub burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            writes_per_second: 50,
            burst_size: 100,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> RecordsResult<Self> {
        dotenv::dotenv().ok();

        let hostname = env::var("RECORDS_HOSTNAME").unwrap_or_else(|_| "localhost".to_string());
        let port = env::var("RECORDS_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| RecordsError::Config("Invalid port number".to_string()))?;
        let version = env::var("RECORDS_VERSION").unwrap_or_else(|_| "0.1.0".to_string());

        let blobstore = if let Ok(endpoint) = env::var("RECORDS_BLOB_API_ENDPOINT") {
            BlobstoreConfig::Http {
                endpoint,
                token: env::var("RECORDS_BLOB_API_TOKEN")
                    .map_err(|_| RecordsError::Config("Blob API token required".to_string()))?,
            }
        } else if env::var("RECORDS_BLOBSTORE")
            .map(|v| v == "memory")
            .unwrap_or(false)
        {
            BlobstoreConfig::Memory
        } else {
            let location = env::var("RECORDS_BLOBSTORE_DISK_LOCATION")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data/records"));
            let public_base_url = env::var("RECORDS_PUBLIC_BASE_URL")
                .unwrap_or_else(|_| format!("http://{}:{}/objects", hostname, port));
            BlobstoreConfig::Disk {
                location,
                public_base_url,
            }
        };

        let rate_limit_enabled = env::var("RECORDS_RATE_LIMITS_ENABLED")
            .unwrap_or_else(|_| "true".to_string())
            .parse()
            .unwrap_or(true);
        let writes_per_second = env::var("RECORDS_RATE_LIMIT_WRITES_PER_SECOND")
            .unwrap_or_else(|_| "50".to_string())
            .parse()
            .unwrap_or(50);
        let burst_size = env::var("RECORDS_RATE_LIMIT_BURST")
            .unwrap_or_else(|_| "100".to_string())
            .parse()
            .unwrap_or(100);

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Ok(ServerConfig {
            service: ServiceConfig {
                hostname,
                port,
                version,
            },
            blobstore,
            rate_limit: RateLimitConfig {
                enabled: rate_limit_enabled,
                writes_per_second,
                burst_size,
            },
            logging: LoggingConfig { level: log_level },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> RecordsResult<()> {
        if self.service.hostname.is_empty() {
            return Err(RecordsError::Config("Hostname cannot be empty".to_string()));
        }

        match &self.blobstore {
            BlobstoreConfig::Http { endpoint, token } => {
                if endpoint.is_empty() {
                    return Err(RecordsError::Config(
                        "Blob API endpoint cannot be empty".to_string(),
                    ));
                }
                if token.is_empty() {
                    return Err(RecordsError::Config(
                        "Blob API token cannot be empty".to_string(),
                    ));
                }
            }
            BlobstoreConfig::Disk {
                public_base_url, ..
            } => {
                if public_base_url.is_empty() {
                    return Err(RecordsError::Config(
                        "Public base URL cannot be empty".to_string(),
                    ));
                }
            }
            BlobstoreConfig::Memory => {}
        }

        Ok(())
    }
}
