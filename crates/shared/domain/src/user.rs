//! User record and the input used to create or replace one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{MSG_AGE_NOT_POSITIVE, MSG_EMAIL_REQUIRED, MSG_NAME_REQUIRED};
use crate::error::{DomainError, DomainResult};

/// User identifier, assigned by the backing store.
pub type UserId = i32;

/// Persisted user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct User {
    /// Store-assigned identifier
    #[cfg_attr(feature = "openapi", schema(example = 1))]
    pub id: UserId,
    /// Display name
    #[cfg_attr(feature = "openapi", schema(example = "Alikhan"))]
    pub name: String,
    /// Contact email
    #[cfg_attr(feature = "openapi", schema(example = "a@b.com"))]
    pub email: String,
    /// Age in years
    #[cfg_attr(feature = "openapi", schema(example = 30))]
    pub age: i32,
    /// Server-assigned creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Full set of writable user fields.
///
/// Used for both creation and full replacement. Missing JSON fields
/// deserialize to empty values so that [`UserInput::validate`] can
/// report which one is wrong.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct UserInput {
    #[cfg_attr(feature = "openapi", schema(example = "Alikhan"))]
    pub name: String,
    #[cfg_attr(feature = "openapi", schema(example = "a@b.com"))]
    pub email: String,
    #[cfg_attr(feature = "openapi", schema(example = 30))]
    pub age: i32,
}

impl UserInput {
    pub fn new(name: impl Into<String>, email: impl Into<String>, age: i32) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            age,
        }
    }

    /// Check required fields, reporting the first violation.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation(MSG_NAME_REQUIRED));
        }
        if self.email.trim().is_empty() {
            return Err(DomainError::validation(MSG_EMAIL_REQUIRED));
        }
        if self.age <= 0 {
            return Err(DomainError::validation(MSG_AGE_NOT_POSITIVE));
        }
        Ok(())
    }

    /// Materialize a user record with the given identity.
    pub fn into_user(self, id: UserId, created_at: DateTime<Utc>) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            age: self.age,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_input_passes() {
        assert!(UserInput::new("Ali", "a@b.com", 30).validate().is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = UserInput::new("", "a@b.com", 30).validate().unwrap_err();
        assert_eq!(err, DomainError::validation(MSG_NAME_REQUIRED));
    }

    #[test]
    fn test_blank_email_rejected() {
        let err = UserInput::new("Ali", "   ", 30).validate().unwrap_err();
        assert_eq!(err, DomainError::validation(MSG_EMAIL_REQUIRED));
    }

    #[test]
    fn test_non_positive_age_rejected() {
        for age in [0, -4] {
            let err = UserInput::new("Ali", "a@b.com", age).validate().unwrap_err();
            assert_eq!(err, DomainError::validation(MSG_AGE_NOT_POSITIVE));
        }
    }

    #[test]
    fn test_missing_fields_deserialize_to_empty() {
        let input: UserInput = serde_json::from_str(r#"{"email":"a@b.com"}"#).unwrap();
        assert_eq!(input, UserInput::new("", "a@b.com", 0));
        assert!(input.validate().is_err());
    }

    #[cfg(feature = "openapi")]
    #[test]
    fn test_schemas_carry_examples() {
        use utoipa::ToSchema;

        let (name, schema) = UserInput::schema();
        assert_eq!(name, "UserInput");
        let json = serde_json::to_value(&schema).unwrap();
        assert_eq!(json["properties"]["name"]["example"], "Alikhan");
        assert_eq!(json["properties"]["age"]["example"], 30);

        let (_, schema) = User::schema();
        let json = serde_json::to_value(&schema).unwrap();
        assert_eq!(json["properties"]["email"]["example"], "a@b.com");
    }
}
