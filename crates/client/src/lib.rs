//! Outbound side of the catalog admin console: gateway client over the
//! REST backend, session/identity store, upload adapter, and the per-entity
//! list/detail managers.

pub mod error;
pub mod gateway;
pub mod manager;
pub mod session;
pub mod upload;

pub use error::{ClientError, ClientResult};
pub use gateway::{CatalogBackend, Gateway, LoginResponse};
pub use manager::{AlwaysConfirm, CategoryForm, CategoryManager, ConfirmPrompt, Phase, ProductManager};
pub use session::{AuthUser, SessionStore};
pub use upload::{AcceptedTypes, FileBlob, UploadAdapter, UploadPolicy, UploadValidationError};
