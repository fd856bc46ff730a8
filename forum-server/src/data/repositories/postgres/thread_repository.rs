use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use crate::data::thread_repository::{NewThread, ThreadRepository};
use crate::domain::category::Category;
use crate::domain::error::DomainError;
use crate::domain::thread::{Thread, ThreadDetails, ThreadFilter, ThreadSort};
use crate::domain::user::Author;

const THREAD_DETAILS_SELECT: &str = r#"
    SELECT
        t.id,
        t.title,
        t.content,
        t.author_id,
        t.category_id,
        t.is_pinned,
        t.is_locked,
        t.view_count,
        t.reply_count,
        t.created_at,
        t.updated_at,
        u.username AS author_username,
        u.created_at AS author_created_at,
        c.name AS category_name,
        c.slug AS category_slug,
        c.description AS category_description,
        c.icon AS category_icon,
        c.color AS category_color,
        c.thread_count AS category_thread_count
    FROM threads t
    INNER JOIN users u ON u.id = t.author_id
    INNER JOIN categories c ON c.id = t.category_id
"#;

#[derive(Debug, Clone)]
pub(crate) struct PostgresThreadRepository {
    pool: PgPool,
}

impl PostgresThreadRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct ThreadRow {
    id: i64,
    title: String,
    content: String,
    author_id: i64,
    category_id: i64,
    is_pinned: bool,
    is_locked: bool,
    view_count: i64,
    reply_count: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(FromRow)]
struct ThreadDetailsRow {
    #[sqlx(flatten)]
    thread: ThreadRow,
    author_username: String,
    author_created_at: DateTime<Utc>,
    category_name: String,
    category_slug: String,
    category_description: Option<String>,
    category_icon: String,
    category_color: String,
    category_thread_count: i64,
}

impl From<ThreadRow> for Thread {
    fn from(row: ThreadRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            content: row.content,
            author_id: row.author_id,
            category_id: row.category_id,
            is_pinned: row.is_pinned,
            is_locked: row.is_locked,
            view_count: row.view_count,
            reply_count: row.reply_count,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<ThreadDetailsRow> for ThreadDetails {
    fn from(row: ThreadDetailsRow) -> Self {
        let thread = Thread::from(row.thread);
        let author = Author {
            id: thread.author_id,
            username: row.author_username,
            created_at: row.author_created_at,
        };
        let category = Category {
            id: thread.category_id,
            name: row.category_name,
            slug: row.category_slug,
            description: row.category_description,
            icon: row.category_icon,
            color: row.category_color,
            thread_count: row.category_thread_count,
        };

        Self {
            thread,
            author,
            category,
        }
    }
}

#[async_trait]
impl ThreadRepository for PostgresThreadRepository {
    async fn create_thread(&self, input: NewThread) -> Result<Thread, DomainError> {
        let mut tx = self.pool.begin().await.map_err(map_thread_db_error)?;

        let row = sqlx::query_as::<_, ThreadRow>(
            r#"
            INSERT INTO threads (title, content, author_id, category_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, content, author_id, category_id, is_pinned, is_locked,
                      view_count, reply_count, created_at, updated_at
            "#,
        )
        .bind(&input.title)
        .bind(&input.content)
        .bind(input.author_id)
        .bind(input.category_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_thread_db_error)?;

        let bumped = sqlx::query(
            r#"
            UPDATE categories
            SET thread_count = thread_count + 1
            WHERE id = $1
            "#,
        )
        .bind(input.category_id)
        .execute(&mut *tx)
        .await
        .map_err(map_thread_db_error)?;

        // dropping tx without commit rolls the insert back
        if bumped.rows_affected() == 0 {
            return Err(DomainError::validation("categoryId", "unknown category"));
        }

        tx.commit().await.map_err(map_thread_db_error)?;

        Ok(Thread::from(row))
    }

    async fn get_thread(&self, id: i64) -> Result<Option<ThreadDetails>, DomainError> {
        let mut query = QueryBuilder::<Postgres>::new(THREAD_DETAILS_SELECT);
        query.push(" WHERE t.id = ").push_bind(id);

        let row = query
            .build_query_as::<ThreadDetailsRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_thread_db_error)?;

        Ok(row.map(ThreadDetails::from))
    }

    async fn list_threads(&self, filter: &ThreadFilter) -> Result<Vec<ThreadDetails>, DomainError> {
        let mut query = QueryBuilder::<Postgres>::new(THREAD_DETAILS_SELECT);
        query.push(" WHERE TRUE");

        if let Some(category_id) = filter.category_id {
            query.push(" AND t.category_id = ").push_bind(category_id);
        }
        if let Some(search) = &filter.search {
            query
                .push(" AND t.title ILIKE ")
                .push_bind(contains_pattern(search))
                .push(" ESCAPE '\\'");
        }
        query.push(" ORDER BY ").push(order_by_clause(filter.sort));

        let rows = query
            .build_query_as::<ThreadDetailsRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_thread_db_error)?;

        Ok(rows.into_iter().map(ThreadDetails::from).collect())
    }

    async fn increment_views(&self, id: i64) -> Result<Option<i64>, DomainError> {
        let row: Option<(i64,)> = sqlx::query_as(
            r#"
            UPDATE threads
            SET view_count = view_count + 1
            WHERE id = $1
            RETURNING view_count
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_thread_db_error)?;

        Ok(row.map(|(view_count,)| view_count))
    }
}

/// Pinned threads lead for every key; the trailing id keeps ties stable.
fn order_by_clause(sort: ThreadSort) -> &'static str {
    match sort {
        ThreadSort::Latest => "t.is_pinned DESC, t.updated_at DESC, t.id DESC",
        ThreadSort::Oldest => "t.is_pinned DESC, t.created_at ASC, t.id ASC",
        ThreadSort::MostReplies => "t.is_pinned DESC, t.reply_count DESC, t.id DESC",
        ThreadSort::MostViews => "t.is_pinned DESC, t.view_count DESC, t.id DESC",
    }
}

/// `ILIKE` pattern matching `term` anywhere, with wildcards in `term` taken
/// literally.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn map_thread_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.code().as_deref() == Some("23503")
    {
        return match db_err.constraint() {
            Some("threads_category_id_fkey") => {
                DomainError::validation("categoryId", "unknown category")
            }
            _ => DomainError::NotFound("author".to_string()),
        };
    }
    DomainError::Unexpected(err.to_string())
}
