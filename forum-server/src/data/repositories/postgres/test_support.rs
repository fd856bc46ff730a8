//! Fixtures for the `#[sqlx::test]` suites. Each test gets a fresh database
//! with the migrations applied, so the seeded categories are present too.

use sqlx::PgPool;

pub(crate) async fn insert_user(pool: &PgPool, username: &str) -> i64 {
    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO users (username, email, password_hash) VALUES ($1, $2, 'not-a-real-hash') RETURNING id",
    )
    .bind(username)
    .bind(format!("{username}@forum.test"))
    .fetch_one(pool)
    .await
    .expect("insert user fixture");
    id
}

pub(crate) async fn insert_category(pool: &PgPool, slug: &str) -> i64 {
    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO categories (name, slug, icon, color) VALUES ($1, $1, 'fas fa-code', 'blue') RETURNING id",
    )
    .bind(slug)
    .fetch_one(pool)
    .await
    .expect("insert category fixture");
    id
}

pub(crate) async fn category_thread_count(pool: &PgPool, category_id: i64) -> i64 {
    let (count,): (i64,) = sqlx::query_as("SELECT thread_count FROM categories WHERE id = $1")
        .bind(category_id)
        .fetch_one(pool)
        .await
        .expect("read category counter");
    count
}

/// Overwrites listing-relevant columns directly, bypassing the counters.
pub(crate) async fn set_thread_columns(
    pool: &PgPool,
    thread_id: i64,
    is_pinned: bool,
    reply_count: i64,
    view_count: i64,
) {
    sqlx::query(
        "UPDATE threads SET is_pinned = $2, reply_count = $3, view_count = $4 WHERE id = $1",
    )
    .bind(thread_id)
    .bind(is_pinned)
    .bind(reply_count)
    .bind(view_count)
    .execute(pool)
    .await
    .expect("update thread fixture");
}

pub(crate) async fn lock_thread(pool: &PgPool, thread_id: i64) {
    sqlx::query("UPDATE threads SET is_locked = TRUE WHERE id = $1")
        .bind(thread_id)
        .execute(pool)
        .await
        .expect("lock thread fixture");
}
