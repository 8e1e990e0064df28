//! User entity and mutation inputs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{self, ValidationError, MAX_EMAIL, MAX_NAME};

/// A registered user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Validated input for creating a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

impl NewUser {
    pub fn new(name: &str, email: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            name: validation::required_text("name", name, MAX_NAME)?,
            email: validation::required_text("email", email, MAX_EMAIL)?,
        })
    }
}

/// Partial update for a user. Absent fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl UserPatch {
    pub fn new(name: Option<String>, email: Option<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            name: name
                .map(|v| validation::required_text("name", &v, MAX_NAME))
                .transpose()?,
            email: email
                .map(|v| validation::required_text("email", &v, MAX_EMAIL))
                .transpose()?,
        })
    }

    /// True when no recognized field is present.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_validates_fields() {
        let user = NewUser::new("Ann", "ann@x.com").unwrap();
        assert_eq!(user.name, "Ann");
        assert_eq!(user.email, "ann@x.com");

        assert!(NewUser::new("", "ann@x.com").is_err());
        assert!(NewUser::new("Ann", "  ").is_err());
    }

    #[test]
    fn empty_patch_is_detected() {
        let patch = UserPatch::new(None, None).unwrap();
        assert!(patch.is_empty());

        let patch = UserPatch::new(Some("Bea".into()), None).unwrap();
        assert!(!patch.is_empty());
    }

    #[test]
    fn patch_rejects_blank_provided_field() {
        assert!(UserPatch::new(Some("  ".into()), None).is_err());
    }

    #[test]
    fn user_serializes_rfc3339_timestamp() {
        let user = User {
            id: 1,
            name: "Ann".into(),
            email: "ann@x.com".into(),
            created_at: super::super::ts_to_datetime(0),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["created_at"], "1970-01-01T00:00:00Z");
    }
}
