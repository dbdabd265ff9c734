//! Owner-key validation shared by the publish pipeline and the upload store.

use crate::error::CoreError;

/// Validate that an owner key is usable as a single path component under the
/// uploads directory.
///
/// Owner keys are opaque wallet addresses supplied by clients; anything that
/// could escape the owner's directory is rejected before it reaches the
/// filesystem.
pub fn validate_owner_key(owner_key: &str) -> Result<(), CoreError> {
    if owner_key.trim().is_empty() {
        return Err(CoreError::Validation("owner key must not be empty".to_string()));
    }
    if owner_key.contains('/') || owner_key.contains('\\') || owner_key.contains("..") {
        return Err(CoreError::Validation(format!(
            "owner key '{owner_key}' contains path separators"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_wallet_style_keys() {
        assert!(validate_owner_key("9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin").is_ok());
    }

    #[test]
    fn rejects_empty_and_blank() {
        assert!(validate_owner_key("").is_err());
        assert!(validate_owner_key("   ").is_err());
    }

    #[test]
    fn rejects_path_traversal() {
        assert!(validate_owner_key("../etc").is_err());
        assert!(validate_owner_key("a/b").is_err());
        assert!(validate_owner_key("a\\b").is_err());
    }
}
