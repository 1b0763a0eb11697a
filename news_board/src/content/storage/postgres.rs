use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{Pool, Postgres};

use crate::content::{
    errors::ContentError,
    types::{Comment, News},
};
use crate::storage::validate_postgres_table_schema;
use crate::userdb::DB_TABLE_USERS;

use super::config::{DB_TABLE_COMMENTS, DB_TABLE_NEWS};

pub(super) async fn create_tables_postgres(pool: &Pool<Postgres>) -> Result<(), ContentError> {
    let news_table = DB_TABLE_NEWS.as_str();
    let comments_table = DB_TABLE_COMMENTS.as_str();
    let users_table = DB_TABLE_USERS.as_str();

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {news_table} (
            id BIGSERIAL PRIMARY KEY,
            title TEXT NOT NULL,
            text TEXT NOT NULL,
            date DATE NOT NULL
        )
        "#
    ))
    .execute(pool)
    .await?;

    // The users table has to exist before the foreign key can be declared.
    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {comments_table} (
            id BIGSERIAL PRIMARY KEY,
            news_id BIGINT NOT NULL REFERENCES {news_table}(id) ON DELETE CASCADE,
            author_id TEXT NOT NULL REFERENCES {users_table}(id) ON DELETE CASCADE,
            text TEXT NOT NULL,
            created TIMESTAMPTZ NOT NULL
        )
        "#
    ))
    .execute(pool)
    .await?;

    sqlx::query(&format!(
        r#"
        CREATE INDEX IF NOT EXISTS idx_{comments_table}_news_created
        ON {comments_table} (news_id, created)
        "#
    ))
    .execute(pool)
    .await?;

    Ok(())
}

pub(super) async fn validate_content_tables_postgres(
    pool: &Pool<Postgres>,
) -> Result<(), ContentError> {
    let news_columns = [
        ("id", "bigint"),
        ("title", "text"),
        ("text", "text"),
        ("date", "date"),
    ];
    validate_postgres_table_schema(
        pool,
        DB_TABLE_NEWS.as_str(),
        &news_columns,
        ContentError::Storage,
    )
    .await?;

    let comment_columns = [
        ("id", "bigint"),
        ("news_id", "bigint"),
        ("author_id", "text"),
        ("text", "text"),
        ("created", "timestamp with time zone"),
    ];
    validate_postgres_table_schema(
        pool,
        DB_TABLE_COMMENTS.as_str(),
        &comment_columns,
        ContentError::Storage,
    )
    .await
}

fn comment_select() -> String {
    let comments_table = DB_TABLE_COMMENTS.as_str();
    let users_table = DB_TABLE_USERS.as_str();
    format!(
        r#"
        SELECT c.id, c.news_id, c.author_id, u.username AS author_username, c.text, c.created
        FROM {comments_table} c
        JOIN {users_table} u ON u.id = c.author_id
        "#
    )
}

pub(super) async fn list_recent_news_postgres(
    pool: &Pool<Postgres>,
    limit: i64,
) -> Result<Vec<News>, ContentError> {
    let news_table = DB_TABLE_NEWS.as_str();

    let news = sqlx::query_as::<_, News>(&format!(
        r#"
        SELECT * FROM {news_table} ORDER BY date DESC, id DESC LIMIT $1
        "#
    ))
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(news)
}

pub(super) async fn get_news_postgres(
    pool: &Pool<Postgres>,
    id: i64,
) -> Result<Option<News>, ContentError> {
    let news_table = DB_TABLE_NEWS.as_str();

    let news = sqlx::query_as::<_, News>(&format!(
        r#"
        SELECT * FROM {news_table} WHERE id = $1
        "#
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(news)
}

pub(super) async fn insert_news_postgres(
    pool: &Pool<Postgres>,
    title: &str,
    text: &str,
    date: NaiveDate,
) -> Result<i64, ContentError> {
    let news_table = DB_TABLE_NEWS.as_str();

    let id = sqlx::query_scalar::<_, i64>(&format!(
        r#"
        INSERT INTO {news_table} (title, text, date) VALUES ($1, $2, $3) RETURNING id
        "#
    ))
    .bind(title)
    .bind(text)
    .bind(date)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

pub(super) async fn count_news_postgres(pool: &Pool<Postgres>) -> Result<i64, ContentError> {
    let news_table = DB_TABLE_NEWS.as_str();

    let count = sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {news_table}"))
        .fetch_one(pool)
        .await?;

    Ok(count)
}

pub(super) async fn list_comments_postgres(
    pool: &Pool<Postgres>,
    news_id: i64,
) -> Result<Vec<Comment>, ContentError> {
    let comments = sqlx::query_as::<_, Comment>(&format!(
        "{} WHERE c.news_id = $1 ORDER BY c.created ASC, c.id ASC",
        comment_select()
    ))
    .bind(news_id)
    .fetch_all(pool)
    .await?;

    Ok(comments)
}

pub(super) async fn get_comment_postgres(
    pool: &Pool<Postgres>,
    id: i64,
) -> Result<Option<Comment>, ContentError> {
    let comment = sqlx::query_as::<_, Comment>(&format!("{} WHERE c.id = $1", comment_select()))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(comment)
}

pub(super) async fn insert_comment_postgres(
    pool: &Pool<Postgres>,
    news_id: i64,
    author_id: &str,
    text: &str,
    created: DateTime<Utc>,
) -> Result<i64, ContentError> {
    let comments_table = DB_TABLE_COMMENTS.as_str();

    let id = sqlx::query_scalar::<_, i64>(&format!(
        r#"
        INSERT INTO {comments_table} (news_id, author_id, text, created)
        VALUES ($1, $2, $3, $4) RETURNING id
        "#
    ))
    .bind(news_id)
    .bind(author_id)
    .bind(text)
    .bind(created)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

pub(super) async fn update_comment_text_postgres(
    pool: &Pool<Postgres>,
    id: i64,
    text: &str,
) -> Result<bool, ContentError> {
    let comments_table = DB_TABLE_COMMENTS.as_str();

    let result = sqlx::query(&format!(
        r#"
        UPDATE {comments_table} SET text = $1 WHERE id = $2
        "#
    ))
    .bind(text)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub(super) async fn delete_comment_postgres(
    pool: &Pool<Postgres>,
    id: i64,
) -> Result<bool, ContentError> {
    let comments_table = DB_TABLE_COMMENTS.as_str();

    let result = sqlx::query(&format!(
        r#"
        DELETE FROM {comments_table} WHERE id = $1
        "#
    ))
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub(super) async fn count_comments_postgres(
    pool: &Pool<Postgres>,
    news_id: i64,
) -> Result<i64, ContentError> {
    let comments_table = DB_TABLE_COMMENTS.as_str();

    let count = sqlx::query_scalar::<_, i64>(&format!(
        "SELECT COUNT(*) FROM {comments_table} WHERE news_id = $1"
    ))
    .bind(news_id)
    .fetch_one(pool)
    .await?;

    Ok(count)
}
