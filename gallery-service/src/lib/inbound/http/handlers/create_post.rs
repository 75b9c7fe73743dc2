use std::path::Path;

use axum::extract::Multipart;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::Description;
use crate::domain::post::models::Post;
use crate::domain::post::models::Title;
use crate::domain::post::ports::PostServicePort;
use crate::inbound::http::middleware::AuthenticatedSession;
use crate::inbound::http::router::AppState;
use crate::post::errors::DescriptionError;
use crate::post::errors::TitleError;

const ALLOWED_IMAGE_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "image/webp"];

pub async fn create_post(
    State(state): State<AppState>,
    Extension(session): Extension<AuthenticatedSession>,
    mut multipart: Multipart,
) -> Result<ApiSuccess<CreatePostResponseData>, ApiError> {
    let mut title: Option<String> = None;
    let mut description: Option<String> = None;
    let mut image: Option<(String, axum::body::Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        let name = field.name().map(str::to_string);

        match name.as_deref() {
            Some("title") => {
                title = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::BadRequest(e.to_string()))?,
                );
            }
            Some("description") => {
                description = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::BadRequest(e.to_string()))?,
                );
            }
            Some("image") => {
                let content_type = field.content_type().unwrap_or_default().to_string();
                if !ALLOWED_IMAGE_TYPES.contains(&content_type.as_str()) {
                    return Err(ApiError::BadRequest(
                        "Only image files are allowed (JPEG, PNG, GIF, WebP)".to_string(),
                    ));
                }

                let extension = field
                    .file_name()
                    .and_then(|name| Path::new(name).extension())
                    .and_then(|ext| ext.to_str())
                    .map(|ext| format!(".{}", ext))
                    .unwrap_or_default();

                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(e.to_string()))?;

                image = Some((extension, bytes));
            }
            _ => {}
        }
    }

    let (extension, bytes) =
        image.ok_or_else(|| ApiError::BadRequest("Image file is required".to_string()))?;

    let command = PostFields {
        title: title.unwrap_or_default(),
        description: description.unwrap_or_default(),
    }
    .try_into_command(&session, &extension)?;

    // Random filename; the original name never touches the filesystem.
    let stored_name = command.image_path.clone();
    let path = state.uploads_dir.join(&stored_name);
    tokio::fs::write(&path, &bytes).await.map_err(|e| {
        tracing::error!(error = %e, path = %path.display(), "Failed to store uploaded image");
        ApiError::InternalServerError("Failed to store image".to_string())
    })?;

    state
        .post_service
        .create_post(command)
        .await
        .map_err(ApiError::from)
        .map(|ref post| ApiSuccess::new(StatusCode::CREATED, post.into()))
}

/// Text fields collected from the multipart form
struct PostFields {
    title: String,
    description: String,
}

#[derive(Debug, Clone, Error)]
enum ParseCreatePostRequestError {
    #[error("Invalid title: {0}")]
    Title(#[from] TitleError),

    #[error("Invalid description: {0}")]
    Description(#[from] DescriptionError),
}

impl PostFields {
    fn try_into_command(
        self,
        session: &AuthenticatedSession,
        extension: &str,
    ) -> Result<CreatePostCommand, ParseCreatePostRequestError> {
        let title = Title::new(self.title)?;
        let description = Description::new(self.description)?;

        Ok(CreatePostCommand {
            title,
            description,
            image_path: format!("{}{}", Uuid::new_v4(), extension),
            user_id: session.user_id,
        })
    }
}

impl From<ParseCreatePostRequestError> for ApiError {
    fn from(err: ParseCreatePostRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatePostResponseData {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Post> for CreatePostResponseData {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.0,
            title: post.title.as_str().to_string(),
            description: post.description.as_str().to_string(),
            image_url: format!("/uploads/{}", post.image_path),
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}
