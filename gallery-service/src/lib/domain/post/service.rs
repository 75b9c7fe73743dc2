use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::Post;
use crate::post::errors::PostError;
use crate::post::ports::PostRepository;
use crate::post::ports::PostServicePort;

/// Domain service implementation for post operations.
pub struct PostService<PR>
where
    PR: PostRepository,
{
    repository: Arc<PR>,
}

impl<PR> PostService<PR>
where
    PR: PostRepository,
{
    /// Create a new post service with an injected repository.
    pub fn new(repository: Arc<PR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<PR> PostServicePort for PostService<PR>
where
    PR: PostRepository,
{
    async fn create_post(&self, command: CreatePostCommand) -> Result<Post, PostError> {
        let post = self.repository.create(command).await?;

        tracing::info!(post_id = %post.id, user_id = %post.user_id, "Post created");

        Ok(post)
    }

    async fn list_posts(&self) -> Result<Vec<Post>, PostError> {
        self.repository.list_all().await
    }
}
