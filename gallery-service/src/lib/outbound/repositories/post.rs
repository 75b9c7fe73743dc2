use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::Description;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::models::Title;
use crate::domain::user::models::UserId;
use crate::post::errors::PostError;
use crate::post::ports::PostRepository;

pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_error(e: sqlx::Error) -> PostError {
    PostError::DatabaseError(e.to_string())
}

fn row_to_post(row: &PgRow) -> Result<Post, PostError> {
    Ok(Post {
        id: PostId(row.try_get::<i64, _>("id").map_err(db_error)?),
        title: Title::new(row.try_get("title").map_err(db_error)?)?,
        description: Description::new(row.try_get("description").map_err(db_error)?)?,
        image_path: row.try_get("image_path").map_err(db_error)?,
        user_id: UserId(row.try_get::<Uuid, _>("user_id").map_err(db_error)?),
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(db_error)?,
        updated_at: row
            .try_get::<DateTime<Utc>, _>("updated_at")
            .map_err(db_error)?,
    })
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, command: CreatePostCommand) -> Result<Post, PostError> {
        let row = sqlx::query(
            r#"
            INSERT INTO posts (title, description, image_path, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, description, image_path, user_id, created_at, updated_at
            "#,
        )
        .bind(command.title.as_str())
        .bind(command.description.as_str())
        .bind(&command.image_path)
        .bind(command.user_id.0)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;

        row_to_post(&row)
    }

    async fn list_all(&self) -> Result<Vec<Post>, PostError> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, description, image_path, user_id, created_at, updated_at
            FROM posts
            ORDER BY id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.iter().map(row_to_post).collect()
    }
}
