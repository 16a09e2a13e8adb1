use crate::domain::AppError;
use crate::domain::identifiers::validation::validate_username;
use crate::impl_validated_id;

/// A validated non-root system username.
///
/// Guarantees:
/// - Non-empty, at most 32 characters
/// - Starts with a lowercase letter or underscore
/// - Safe to use as a path segment under `/home`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Username(String);

impl_validated_id!(Username, validate_username, AppError::InvalidUsername);

impl Default for Username {
    fn default() -> Self {
        Self("user".to_string())
    }
}
