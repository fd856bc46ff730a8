use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::data::post_repository::{NewPost, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostWithAuthor};
use crate::domain::user::Author;

#[derive(Debug, Clone)]
pub(crate) struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct PostRow {
    id: i64,
    content: String,
    author_id: i64,
    thread_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(FromRow)]
struct PostWithAuthorRow {
    #[sqlx(flatten)]
    post: PostRow,
    author_username: String,
    author_created_at: DateTime<Utc>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Self {
            id: row.id,
            content: row.content,
            author_id: row.author_id,
            thread_id: row.thread_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<PostWithAuthorRow> for PostWithAuthor {
    fn from(row: PostWithAuthorRow) -> Self {
        let post = Post::from(row.post);
        let author = Author {
            id: post.author_id,
            username: row.author_username,
            created_at: row.author_created_at,
        };
        Self { post, author }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        let mut tx = self.pool.begin().await.map_err(map_post_db_error)?;

        // row lock serializes concurrent replies and pins the locked flag
        let thread: Option<(bool,)> = sqlx::query_as(
            r#"
            SELECT is_locked
            FROM threads
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(input.thread_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_post_db_error)?;

        match thread {
            None => return Err(DomainError::NotFound(format!("thread id: {}", input.thread_id))),
            Some((true,)) => return Err(DomainError::ThreadLocked(input.thread_id)),
            Some((false,)) => {}
        }

        // stamped after the lock, so timestamps follow commit order
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            WITH stamp AS (SELECT clock_timestamp() AS at)
            INSERT INTO posts (content, author_id, thread_id, created_at, updated_at)
            SELECT $1, $2, $3, stamp.at, stamp.at
            FROM stamp
            RETURNING id, content, author_id, thread_id, created_at, updated_at
            "#,
        )
        .bind(&input.content)
        .bind(input.author_id)
        .bind(input.thread_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_post_db_error)?;

        sqlx::query(
            r#"
            UPDATE threads
            SET reply_count = reply_count + 1,
                updated_at = GREATEST(updated_at, $2)
            WHERE id = $1
            "#,
        )
        .bind(input.thread_id)
        .bind(row.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_post_db_error)?;

        tx.commit().await.map_err(map_post_db_error)?;

        Ok(Post::from(row))
    }

    async fn list_posts(&self, thread_id: i64) -> Result<Vec<PostWithAuthor>, DomainError> {
        let rows = sqlx::query_as::<_, PostWithAuthorRow>(
            r#"
            SELECT
                p.id,
                p.content,
                p.author_id,
                p.thread_id,
                p.created_at,
                p.updated_at,
                u.username AS author_username,
                u.created_at AS author_created_at
            FROM posts p
            INNER JOIN users u ON u.id = p.author_id
            WHERE p.thread_id = $1
            ORDER BY p.created_at ASC, p.id ASC
            "#,
        )
        .bind(thread_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(rows.into_iter().map(PostWithAuthor::from).collect())
    }
}

fn map_post_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.code().as_deref() == Some("23503")
    {
        let resource = match db_err.constraint() {
            Some("posts_thread_id_fkey") => "thread",
            _ => "author",
        };
        return DomainError::NotFound(resource.to_string());
    }
    DomainError::Unexpected(err.to_string())
}
