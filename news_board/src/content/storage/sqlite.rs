use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{Pool, Sqlite};

use crate::content::{
    errors::ContentError,
    types::{Comment, News},
};
use crate::storage::validate_sqlite_table_schema;
use crate::userdb::DB_TABLE_USERS;

use super::config::{DB_TABLE_COMMENTS, DB_TABLE_NEWS};

pub(super) async fn create_tables_sqlite(pool: &Pool<Sqlite>) -> Result<(), ContentError> {
    let news_table = DB_TABLE_NEWS.as_str();
    let comments_table = DB_TABLE_COMMENTS.as_str();
    let users_table = DB_TABLE_USERS.as_str();

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {news_table} (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            text TEXT NOT NULL,
            date DATE NOT NULL
        )
        "#
    ))
    .execute(pool)
    .await?;

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {comments_table} (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            news_id INTEGER NOT NULL REFERENCES {news_table}(id) ON DELETE CASCADE,
            author_id TEXT NOT NULL REFERENCES {users_table}(id) ON DELETE CASCADE,
            text TEXT NOT NULL,
            created TIMESTAMP NOT NULL
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

pub(super) async fn validate_content_tables_sqlite(
    pool: &Pool<Sqlite>,
) -> Result<(), ContentError> {
    let news_columns = [
        ("id", "INTEGER"),
        ("title", "TEXT"),
        ("text", "TEXT"),
        ("date", "DATE"),
    ];
    validate_sqlite_table_schema(
        pool,
        DB_TABLE_NEWS.as_str(),
        &news_columns,
        ContentError::Storage,
    )
    .await?;

    let comment_columns = [
        ("id", "INTEGER"),
        ("news_id", "INTEGER"),
        ("author_id", "TEXT"),
        ("text", "TEXT"),
        ("created", "TIMESTAMP"),
    ];
    validate_sqlite_table_schema(
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

pub(super) async fn list_recent_news_sqlite(
    pool: &Pool<Sqlite>,
    limit: i64,
) -> Result<Vec<News>, ContentError> {
    create_tables_sqlite(pool).await?;

    let news_table = DB_TABLE_NEWS.as_str();

    let news = sqlx::query_as::<_, News>(&format!(
        r#"
        SELECT * FROM {news_table} ORDER BY date DESC, id DESC LIMIT ?
        "#
    ))
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(news)
}

pub(super) async fn get_news_sqlite(
    pool: &Pool<Sqlite>,
    id: i64,
) -> Result<Option<News>, ContentError> {
    create_tables_sqlite(pool).await?;

    let news_table = DB_TABLE_NEWS.as_str();

    let news = sqlx::query_as::<_, News>(&format!(
        r#"
        SELECT * FROM {news_table} WHERE id = ?
        "#
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(news)
}

pub(super) async fn insert_news_sqlite(
    pool: &Pool<Sqlite>,
    title: &str,
    text: &str,
    date: NaiveDate,
) -> Result<i64, ContentError> {
    create_tables_sqlite(pool).await?;

    let news_table = DB_TABLE_NEWS.as_str();

    let result = sqlx::query(&format!(
        r#"
        INSERT INTO {news_table} (title, text, date) VALUES (?, ?, ?)
        "#
    ))
    .bind(title)
    .bind(text)
    .bind(date)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

pub(super) async fn count_news_sqlite(pool: &Pool<Sqlite>) -> Result<i64, ContentError> {
    create_tables_sqlite(pool).await?;

    let news_table = DB_TABLE_NEWS.as_str();

    let count = sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {news_table}"))
        .fetch_one(pool)
        .await?;

    Ok(count)
}

pub(super) async fn list_comments_sqlite(
    pool: &Pool<Sqlite>,
    news_id: i64,
) -> Result<Vec<Comment>, ContentError> {
    create_tables_sqlite(pool).await?;

    let comments = sqlx::query_as::<_, Comment>(&format!(
        "{} WHERE c.news_id = ? ORDER BY c.created ASC, c.id ASC",
        comment_select()
    ))
    .bind(news_id)
    .fetch_all(pool)
    .await?;

    Ok(comments)
}

pub(super) async fn get_comment_sqlite(
    pool: &Pool<Sqlite>,
    id: i64,
) -> Result<Option<Comment>, ContentError> {
    create_tables_sqlite(pool).await?;

    let comment = sqlx::query_as::<_, Comment>(&format!("{} WHERE c.id = ?", comment_select()))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(comment)
}

pub(super) async fn insert_comment_sqlite(
    pool: &Pool<Sqlite>,
    news_id: i64,
    author_id: &str,
    text: &str,
    created: DateTime<Utc>,
) -> Result<i64, ContentError> {
    create_tables_sqlite(pool).await?;

    let comments_table = DB_TABLE_COMMENTS.as_str();

    let result = sqlx::query(&format!(
        r#"
        INSERT INTO {comments_table} (news_id, author_id, text, created) VALUES (?, ?, ?, ?)
        "#
    ))
    .bind(news_id)
    .bind(author_id)
    .bind(text)
    .bind(created)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

pub(super) async fn update_comment_text_sqlite(
    pool: &Pool<Sqlite>,
    id: i64,
    text: &str,
) -> Result<bool, ContentError> {
    create_tables_sqlite(pool).await?;

    let comments_table = DB_TABLE_COMMENTS.as_str();

    let result = sqlx::query(&format!(
        r#"
        UPDATE {comments_table} SET text = ? WHERE id = ?
        "#
    ))
    .bind(text)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub(super) async fn delete_comment_sqlite(
    pool: &Pool<Sqlite>,
    id: i64,
) -> Result<bool, ContentError> {
    create_tables_sqlite(pool).await?;

    let comments_table = DB_TABLE_COMMENTS.as_str();

    let result = sqlx::query(&format!(
        r#"
        DELETE FROM {comments_table} WHERE id = ?
        "#
    ))
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub(super) async fn count_comments_sqlite(
    pool: &Pool<Sqlite>,
    news_id: i64,
) -> Result<i64, ContentError> {
    create_tables_sqlite(pool).await?;

    let comments_table = DB_TABLE_COMMENTS.as_str();

    let count = sqlx::query_scalar::<_, i64>(&format!(
        "SELECT COUNT(*) FROM {comments_table} WHERE news_id = ?"
    ))
    .bind(news_id)
    .fetch_one(pool)
    .await?;

    Ok(count)
}
