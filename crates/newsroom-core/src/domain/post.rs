use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Post entity - a persisted news post.
///
/// `id` and both timestamps are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated post that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
}

impl NewPost {
    /// Validate raw input, reporting every missing or empty field at once.
    pub fn validate(title: Option<String>, content: Option<String>) -> Result<Self, DomainError> {
        let title = title.filter(|t| !t.is_empty());
        let content = content.filter(|c| !c.is_empty());

        let mut problems = Vec::new();
        if title.is_none() {
            problems.push("title is required");
        }
        if content.is_none() {
            problems.push("content is required");
        }

        match (title, content) {
            (Some(title), Some(content)) => Ok(Self { title, content }),
            _ => Err(DomainError::Validation(problems.join("; "))),
        }
    }
}

/// Fields to replace on an existing post. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl PostChanges {
    /// Absent and empty values both mean "do not change".
    pub fn from_request(title: Option<String>, content: Option<String>) -> Self {
        Self {
            title: title.filter(|t| !t.is_empty()),
            content: content.filter(|c| !c.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_complete_input() {
        let post = NewPost::validate(Some("Title".into()), Some("Body".into())).unwrap();
        assert_eq!(post.title, "Title");
        assert_eq!(post.content, "Body");
    }

    #[test]
    fn validate_reports_both_missing_fields() {
        let err = NewPost::validate(None, Some(String::new())).unwrap_err();
        match err {
            DomainError::Validation(msg) => {
                assert_eq!(msg, "title is required; content is required")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn changes_ignore_empty_strings() {
        let changes = PostChanges::from_request(Some(String::new()), Some("new".into()));
        assert_eq!(changes.title, None);
        assert_eq!(changes.content.as_deref(), Some("new"));
        assert_eq!(
            PostChanges::from_request(None, Some(String::new())),
            PostChanges::default()
        );
    }
}
