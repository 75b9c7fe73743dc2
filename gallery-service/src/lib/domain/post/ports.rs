use async_trait::async_trait;

use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::Post;
use crate::post::errors::PostError;

/// Port for post domain service operations.
#[async_trait]
pub trait PostServicePort: Send + Sync + 'static {
    /// Create a new post for the owning user.
    ///
    /// # Arguments
    /// * `command` - Validated command with title, description, stored image
    ///   path, and owner
    ///
    /// # Returns
    /// Created post entity with database-assigned id and timestamps
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_post(&self, command: CreatePostCommand) -> Result<Post, PostError>;

    /// List all posts, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_posts(&self) -> Result<Vec<Post>, PostError>;
}

/// Persistence operations for post aggregate.
#[async_trait]
pub trait PostRepository: Send + Sync + 'static {
    /// Persist a new post; storage assigns id and timestamps.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, command: CreatePostCommand) -> Result<Post, PostError>;

    /// Retrieve all posts, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_all(&self) -> Result<Vec<Post>, PostError>;
}
