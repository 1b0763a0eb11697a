use chrono::{DateTime, NaiveDate, Utc};

use crate::content::{
    errors::ContentError,
    types::{Comment, News},
};
use crate::storage::GENERIC_DATA_STORE;

use super::postgres::*;
use super::sqlite::*;

pub struct NewsStore;

impl NewsStore {
    /// Create the news and comments tables and validate their schema
    pub(crate) async fn init() -> Result<(), ContentError> {
        let store = GENERIC_DATA_STORE.lock().await;

        match (store.as_sqlite(), store.as_postgres()) {
            (Some(pool), _) => {
                create_tables_sqlite(pool).await?;
                validate_content_tables_sqlite(pool).await
            }
            (_, Some(pool)) => {
                create_tables_postgres(pool).await?;
                validate_content_tables_postgres(pool).await
            }
            _ => Err(ContentError::Storage("Unsupported database type".to_string())),
        }
    }

    /// Most recent news first, at most `limit` items
    #[tracing::instrument]
    pub async fn list_recent_news(limit: usize) -> Result<Vec<News>, ContentError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let store = GENERIC_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            list_recent_news_sqlite(pool, limit).await
        } else if let Some(pool) = store.as_postgres() {
            list_recent_news_postgres(pool, limit).await
        } else {
            Err(ContentError::Storage("Unsupported database type".to_string()))
        }
    }

    #[tracing::instrument]
    pub async fn get_news(id: i64) -> Result<Option<News>, ContentError> {
        let store = GENERIC_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            get_news_sqlite(pool, id).await
        } else if let Some(pool) = store.as_postgres() {
            get_news_postgres(pool, id).await
        } else {
            Err(ContentError::Storage("Unsupported database type".to_string()))
        }
    }

    /// Insert a news item; `date` defaults to today (UTC)
    #[tracing::instrument(skip(text))]
    pub async fn create_news(
        title: &str,
        text: &str,
        date: Option<NaiveDate>,
    ) -> Result<News, ContentError> {
        let date = date.unwrap_or_else(|| Utc::now().date_naive());

        let id = {
            let store = GENERIC_DATA_STORE.lock().await;

            if let Some(pool) = store.as_sqlite() {
                insert_news_sqlite(pool, title, text, date).await?
            } else if let Some(pool) = store.as_postgres() {
                insert_news_postgres(pool, title, text, date).await?
            } else {
                return Err(ContentError::Storage("Unsupported database type".to_string()));
            }
        };

        tracing::info!(news_id = id, "News created");

        Ok(News {
            id,
            title: title.to_string(),
            text: text.to_string(),
            date,
        })
    }

    pub async fn count_news() -> Result<i64, ContentError> {
        let store = GENERIC_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            count_news_sqlite(pool).await
        } else if let Some(pool) = store.as_postgres() {
            count_news_postgres(pool).await
        } else {
            Err(ContentError::Storage("Unsupported database type".to_string()))
        }
    }
}

pub struct CommentStore;

impl CommentStore {
    /// Comments of a news item, oldest first
    #[tracing::instrument]
    pub async fn list_comments(news_id: i64) -> Result<Vec<Comment>, ContentError> {
        let store = GENERIC_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            list_comments_sqlite(pool, news_id).await
        } else if let Some(pool) = store.as_postgres() {
            list_comments_postgres(pool, news_id).await
        } else {
            Err(ContentError::Storage("Unsupported database type".to_string()))
        }
    }

    #[tracing::instrument]
    pub async fn get_comment(id: i64) -> Result<Option<Comment>, ContentError> {
        let store = GENERIC_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            get_comment_sqlite(pool, id).await
        } else if let Some(pool) = store.as_postgres() {
            get_comment_postgres(pool, id).await
        } else {
            Err(ContentError::Storage("Unsupported database type".to_string()))
        }
    }

    /// Insert a comment without any content checks; `created` defaults to now.
    ///
    /// Callers validate the text first, see `crate::validate_comment_text`.
    #[tracing::instrument(skip(text))]
    pub async fn create_comment(
        news_id: i64,
        author_id: &str,
        text: &str,
        created: Option<DateTime<Utc>>,
    ) -> Result<Comment, ContentError> {
        let created = created.unwrap_or_else(Utc::now);

        let id = {
            let store = GENERIC_DATA_STORE.lock().await;

            if let Some(pool) = store.as_sqlite() {
                insert_comment_sqlite(pool, news_id, author_id, text, created).await?
            } else if let Some(pool) = store.as_postgres() {
                insert_comment_postgres(pool, news_id, author_id, text, created).await?
            } else {
                return Err(ContentError::Storage("Unsupported database type".to_string()));
            }
        };

        tracing::info!(comment_id = id, "Comment created");

        Self::get_comment(id)
            .await?
            .ok_or_else(|| ContentError::Storage(format!("Comment {id} vanished after insert")))
    }

    /// Returns false when no such comment exists
    #[tracing::instrument(skip(text))]
    pub async fn update_comment_text(id: i64, text: &str) -> Result<bool, ContentError> {
        let store = GENERIC_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            update_comment_text_sqlite(pool, id, text).await
        } else if let Some(pool) = store.as_postgres() {
            update_comment_text_postgres(pool, id, text).await
        } else {
            Err(ContentError::Storage("Unsupported database type".to_string()))
        }
    }

    /// Returns false when no such comment exists
    #[tracing::instrument]
    pub async fn delete_comment(id: i64) -> Result<bool, ContentError> {
        let store = GENERIC_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            delete_comment_sqlite(pool, id).await
        } else if let Some(pool) = store.as_postgres() {
            delete_comment_postgres(pool, id).await
        } else {
            Err(ContentError::Storage("Unsupported database type".to_string()))
        }
    }

    pub async fn count_comments(news_id: i64) -> Result<i64, ContentError> {
        let store = GENERIC_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            count_comments_sqlite(pool, news_id).await
        } else if let Some(pool) = store.as_postgres() {
            count_comments_postgres(pool, news_id).await
        } else {
            Err(ContentError::Storage("Unsupported database type".to_string()))
        }
    }
}
