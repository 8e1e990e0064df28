//! Todo entity and mutation inputs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{self, ValidationError, MAX_DESCRIPTION, MAX_TITLE};

/// A todo item owned by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating a todo.
///
/// Ownership (`user_id`) is fixed at creation time; no patch can change it.
#[derive(Debug, Clone)]
pub struct NewTodo {
    pub user_id: i64,
    pub title: String,
    pub description: Option<String>,
}

impl NewTodo {
    pub fn new(
        user_id: i64,
        title: &str,
        description: Option<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            user_id,
            title: validation::required_text("title", title, MAX_TITLE)?,
            description: validation::bounded_text("description", description, MAX_DESCRIPTION)?,
        })
    }
}

/// Partial update for a todo. Absent fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

impl TodoPatch {
    pub fn new(
        title: Option<String>,
        description: Option<String>,
        completed: Option<bool>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            title: title
                .map(|v| validation::required_text("title", &v, MAX_TITLE))
                .transpose()?,
            description: validation::bounded_text("description", description, MAX_DESCRIPTION)?,
            completed,
        })
    }

    /// True when no recognized field is present.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_todo_validates_title() {
        let todo = NewTodo::new(1, "Buy milk", None).unwrap();
        assert_eq!(todo.title, "Buy milk");
        assert_eq!(todo.description, None);

        assert!(NewTodo::new(1, "", None).is_err());
    }

    #[test]
    fn empty_patch_is_detected() {
        assert!(TodoPatch::new(None, None, None).unwrap().is_empty());
        assert!(!TodoPatch::new(None, None, Some(true)).unwrap().is_empty());
    }

    #[test]
    fn patch_rejects_blank_title() {
        assert!(TodoPatch::new(Some("  ".into()), None, None).is_err());
    }
}
