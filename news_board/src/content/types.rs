use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A published article
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct News {
    pub id: i64,
    pub title: String,
    pub text: String,
    /// Publication date, the creation date unless given explicitly
    pub date: NaiveDate,
}

/// A reply to a news item, owned by its author
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Comment {
    pub id: i64,
    pub news_id: i64,
    pub author_id: String,
    /// Joined from the users table for display
    pub author_username: String,
    pub text: String,
    pub created: DateTime<Utc>,
}
