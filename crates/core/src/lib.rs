//! Document layer of the catalog admin console.
//!
//! Holds the typed wire documents (categories, products, uploaded-file
//! descriptors), the path-addressed mutation engine the product editor is
//! built on, and the edit-session lifecycle. No I/O happens in this crate;
//! the working copy is a `serde_json::Value` owned by an [`editor::EditorSession`]
//! for the duration of an edit and handed to the gateway as a single payload
//! on submit.

pub mod document;
pub mod editor;
pub mod mutation;

pub use document::model::{
    CategoryDocument, CategoryUpdate, CountryLang, NewCategory, ProductDocument,
    UploadedFileDescriptor,
};
pub use document::validate::DocumentValidationError;
pub use editor::{EditorSession, Section};
pub use mutation::engine;
pub use mutation::keyed::{KeyGen, SpecTable};
pub use mutation::path::PathError;
