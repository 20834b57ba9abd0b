use std::env;

use catalog_client::{AcceptedTypes, UploadPolicy};

/// Console configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the catalog REST API.
    pub api_url: String,
    /// Log level (e.g., "info", "debug", "trace").
    pub log_level: String,
    /// Upload size ceiling in bytes.
    pub upload_max_bytes: u64,
    /// Accepted upload types: "images" or "images+pdf".
    pub upload_accept: AcceptedTypes,
}

impl AppConfig {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = UploadPolicy::full_form();
        let upload_accept = match env::var("UPLOAD_ACCEPT").as_deref() {
            Ok("images") => AcceptedTypes::Images,
            Ok("images+pdf") | Err(_) => AcceptedTypes::ImagesAndPdf,
            Ok(other) => anyhow::bail!("UPLOAD_ACCEPT must be `images` or `images+pdf`, got `{other}`"),
        };
        Ok(Self {
            api_url: env::var("CATALOG_API_URL")
                .unwrap_or_else(|_| "http://localhost:3000/api".to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            upload_max_bytes: match env::var("UPLOAD_MAX_BYTES") {
                Ok(raw) => raw
                    .parse()
                    .map_err(|_| anyhow::anyhow!("UPLOAD_MAX_BYTES must be a valid u64"))?,
                Err(_) => defaults.max_bytes,
            },
            upload_accept,
        })
    }

    pub fn upload_policy(&self) -> UploadPolicy {
        UploadPolicy {
            max_bytes: self.upload_max_bytes,
            accept: self.upload_accept,
        }
    }
}
