//! Domain DTOs for the posts API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.
//!
//! Identifiers are UUIDs everywhere: on the wire, in the store and in the
//! gateway. The server assigns them; the client never invents one.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Server-assigned identifier of a post.
pub type PostId = Uuid;

/// Longest accepted post title, in characters.
pub const NAME_MAX_LEN: usize = 100;

/// Longest accepted post description, in characters.
pub const DESCRIPTION_MAX_LEN: usize = 500;

/// A single post returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub name: String,
    pub description: String,
}

/// Request payload for creating a new post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewPost {
    pub name: String,
    pub description: String,
}

impl NewPost {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// Check the local constraints the backend would otherwise reject.
    ///
    /// Blank means empty after trimming whitespace. Lengths are counted in
    /// characters, not bytes.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        let name_len = self.name.chars().count();
        if name_len > NAME_MAX_LEN {
            return Err(ValidationError::NameTooLong {
                len: name_len,
                max: NAME_MAX_LEN,
            });
        }
        let description_len = self.description.chars().count();
        if description_len > DESCRIPTION_MAX_LEN {
            return Err(ValidationError::DescriptionTooLong {
                len: description_len,
                max: DESCRIPTION_MAX_LEN,
            });
        }
        Ok(())
    }
}

/// `{ "posts": [...] }` list body, used when the backend wraps the list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostsEnvelope {
    pub posts: Vec<Post>,
}

/// Optional `{ "id": ... }` body a backend may return from delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedPost {
    pub id: PostId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_regular_input() {
        assert!(NewPost::new("Title", "Body").validate().is_ok());
    }

    #[test]
    fn validate_rejects_blank_fields() {
        let err = NewPost::new("   ", "Body").validate().unwrap_err();
        assert!(matches!(err, ValidationError::EmptyName));
        let err = NewPost::new("Title", "").validate().unwrap_err();
        assert!(matches!(err, ValidationError::EmptyDescription));
    }

    #[test]
    fn validate_counts_characters_not_bytes() {
        let name = "é".repeat(NAME_MAX_LEN);
        assert!(NewPost::new(name, "Body").validate().is_ok());

        let name = "a".repeat(NAME_MAX_LEN + 1);
        let err = NewPost::new(name, "Body").validate().unwrap_err();
        assert!(matches!(err, ValidationError::NameTooLong { len: 101, max: 100 }));
    }

    #[test]
    fn validate_rejects_long_description() {
        let description = "d".repeat(DESCRIPTION_MAX_LEN + 1);
        let err = NewPost::new("Title", description).validate().unwrap_err();
        assert!(matches!(err, ValidationError::DescriptionTooLong { .. }));
    }

    #[test]
    fn post_deserializes_from_wire_shape() {
        let post: Post = serde_json::from_str(
            r#"{"id":"00000000-0000-0000-0000-000000000001","name":"A","description":"d"}"#,
        )
        .unwrap();
        assert_eq!(post.id, Uuid::from_u128(1));
        assert_eq!(post.name, "A");
    }
}
