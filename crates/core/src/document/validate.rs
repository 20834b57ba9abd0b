//! Pre-submit validation of working-copy documents.

use serde_json::Value;
use thiserror::Error;

use crate::mutation::engine;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentValidationError {
    #[error("category url is required")]
    MissingCategoryUrl,
    #[error("category title is required")]
    MissingCategoryTitle,
    #[error("product field `{0}` is required")]
    MissingProductField(&'static str),
}

/// Validate the fields a category creation needs.
pub fn validate_new_category(url: &str, title: &str) -> Result<(), DocumentValidationError> {
    if url.trim().is_empty() {
        return Err(DocumentValidationError::MissingCategoryUrl);
    }
    if title.trim().is_empty() {
        return Err(DocumentValidationError::MissingCategoryTitle);
    }
    Ok(())
}

/// Fields the product form marks required.
const REQUIRED_PRODUCT_FIELDS: [&str; 7] = [
    "slug",
    "product.id",
    "product.name",
    "product.category",
    "product.type",
    "product.tagline",
    "product.description",
];

/// Validate a product working copy before it becomes an outbound payload.
pub fn validate_product(doc: &Value) -> Result<(), DocumentValidationError> {
    for field in REQUIRED_PRODUCT_FIELDS {
        let present = engine::get(doc, field)
            .ok()
            .and_then(Value::as_str)
            .is_some_and(|s| !s.trim().is_empty());
        if !present {
            return Err(DocumentValidationError::MissingProductField(field));
        }
    }
    Ok(())
}
