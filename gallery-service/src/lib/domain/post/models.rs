use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::user::models::UserId;
use crate::post::errors::DescriptionError;
use crate::post::errors::TitleError;

/// Post aggregate entity.
///
/// An image-bearing post owned by a user. The image itself lives on disk;
/// only its stored filename is kept here.
#[derive(Debug, Clone)]
pub struct Post {
    pub id: PostId,
    pub title: Title,
    pub description: Description,
    pub image_path: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Post unique identifier type (database-assigned serial)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PostId(pub i64);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Title value type, 1-255 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title(String);

impl Title {
    const MAX_LENGTH: usize = 255;

    /// Create a new valid title.
    ///
    /// # Errors
    /// * `Empty` - Title is empty
    /// * `TooLong` - Title longer than 255 characters
    pub fn new(title: String) -> Result<Self, TitleError> {
        let length = title.chars().count();
        if length == 0 {
            Err(TitleError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(TitleError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(title))
        }
    }

    /// Get title as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Description value type, 1-1000 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description(String);

impl Description {
    const MAX_LENGTH: usize = 1000;

    /// Create a new valid description.
    ///
    /// # Errors
    /// * `Empty` - Description is empty
    /// * `TooLong` - Description longer than 1000 characters
    pub fn new(description: String) -> Result<Self, DescriptionError> {
        let length = description.chars().count();
        if length == 0 {
            Err(DescriptionError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(DescriptionError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(description))
        }
    }

    /// Get description as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Command to create a new post with domain types
#[derive(Debug)]
pub struct CreatePostCommand {
    pub title: Title,
    pub description: Description,
    pub image_path: String,
    pub user_id: UserId,
}
