//! Upload adapter: client-side validation, local preview, and submission
//! of a file blob to the object-storage endpoint.
//!
//! Validation runs before any network call; a rejected blob issues zero
//! requests. A failed upload leaves the caller's target field unwritten —
//! the descriptor is only produced on success.

use base64::Engine as _;
use thiserror::Error;

use catalog_core::UploadedFileDescriptor;

use crate::error::ClientResult;
use crate::gateway::CatalogBackend;

const MIB: u64 = 1024 * 1024;

/// Which MIME types an upload target accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptedTypes {
    Images,
    ImagesAndPdf,
}

impl AcceptedTypes {
    fn accepts(&self, mimetype: &str) -> bool {
        match self {
            AcceptedTypes::Images => mimetype.starts_with("image/"),
            AcceptedTypes::ImagesAndPdf => {
                mimetype.starts_with("image/") || mimetype == "application/pdf"
            }
        }
    }
}

/// Size ceiling and accepted-type set, applied uniformly across the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadPolicy {
    pub max_bytes: u64,
    pub accept: AcceptedTypes,
}

impl UploadPolicy {
    /// The policy applied everywhere by default: 10 MiB, images and PDFs.
    pub fn full_form() -> Self {
        Self {
            max_bytes: 10 * MIB,
            accept: AcceptedTypes::ImagesAndPdf,
        }
    }

    /// Stricter image-only variant: 5 MiB ceiling.
    pub fn images_only() -> Self {
        Self {
            max_bytes: 5 * MIB,
            accept: AcceptedTypes::Images,
        }
    }
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::full_form()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadValidationError {
    #[error("unsupported file type `{0}`")]
    UnsupportedType(String),
    #[error("file is {size} bytes; the limit is {limit} bytes")]
    TooLarge { size: u64, limit: u64 },
}

/// A raw file as selected by the operator.
#[derive(Debug, Clone)]
pub struct FileBlob {
    pub bytes: Vec<u8>,
    pub mimetype: String,
    pub originalname: String,
}

impl FileBlob {
    pub fn new(bytes: Vec<u8>, mimetype: impl Into<String>, originalname: impl Into<String>) -> Self {
        Self {
            bytes,
            mimetype: mimetype.into(),
            originalname: originalname.into(),
        }
    }

    /// Read a file from disk, deriving the MIME type from its extension.
    pub fn from_path(path: &std::path::Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let originalname = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let mimetype = mime_for_extension(
            path.extension().and_then(|e| e.to_str()).unwrap_or_default(),
        );
        Ok(Self::new(bytes, mimetype, originalname))
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

fn mime_for_extension(ext: &str) -> String {
    match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
    .to_string()
}

/// Validates blobs against the policy and pushes them through the backend.
#[derive(Debug, Clone, Default)]
pub struct UploadAdapter {
    policy: UploadPolicy,
}

impl UploadAdapter {
    pub fn new(policy: UploadPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> UploadPolicy {
        self.policy
    }

    /// Pre-network validation: type first, then size.
    pub fn validate(&self, blob: &FileBlob) -> Result<(), UploadValidationError> {
        if !self.policy.accept.accepts(&blob.mimetype) {
            return Err(UploadValidationError::UnsupportedType(blob.mimetype.clone()));
        }
        if blob.size() > self.policy.max_bytes {
            return Err(UploadValidationError::TooLarge {
                size: blob.size(),
                limit: self.policy.max_bytes,
            });
        }
        Ok(())
    }

    /// Local preview data URL for image blobs, available immediately and
    /// independent of upload success.
    pub fn preview(&self, blob: &FileBlob) -> Option<String> {
        if !blob.mimetype.starts_with("image/") {
            return None;
        }
        let encoded = base64::engine::general_purpose::STANDARD.encode(&blob.bytes);
        Some(format!("data:{};base64,{}", blob.mimetype, encoded))
    }

    /// Validate, then submit. The caller writes the resulting descriptor's
    /// URL into its target field only after this resolves.
    pub async fn submit(
        &self,
        backend: &dyn CatalogBackend,
        blob: &FileBlob,
    ) -> ClientResult<UploadedFileDescriptor> {
        self.validate(blob)?;
        tracing::info!(name = %blob.originalname, size = blob.size(), "uploading file");
        backend.upload(blob).await
    }
}
