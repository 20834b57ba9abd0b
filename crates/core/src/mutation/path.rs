//! Dot-separated paths into a nested document.
//!
//! Paths resolve through object fields only; indexed collections are
//! addressed by the array operations in [`crate::mutation::engine`].

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("path is empty")]
    Empty,
    #[error("path `{0}` does not resolve")]
    PathNotFound(String),
    #[error("path `{0}` traverses a non-object value")]
    NotAnObject(String),
    #[error("path `{0}` does not address an array")]
    NotAnArray(String),
}

/// Split a dot-separated path into segments, rejecting empty input.
pub fn segments(path: &str) -> Result<Vec<&str>, PathError> {
    if path.is_empty() {
        return Err(PathError::Empty);
    }
    let parts: Vec<&str> = path.split('.').collect();
    if parts.iter().any(|s| s.is_empty()) {
        return Err(PathError::PathNotFound(path.to_string()));
    }
    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_dots() {
        assert_eq!(
            segments("technicalSpecifications.models").unwrap(),
            vec!["technicalSpecifications", "models"]
        );
        assert_eq!(segments("faqs").unwrap(), vec!["faqs"]);
    }

    #[test]
    fn rejects_empty_and_dangling_segments() {
        assert_eq!(segments(""), Err(PathError::Empty));
        assert!(segments("a..b").is_err());
        assert!(segments("a.").is_err());
    }
}
