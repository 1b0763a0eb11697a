use crate::content::{Comment, CommentStore, NewsStore};
use crate::moderation::validate_comment_text;
use crate::policy::{Access, can_modify};

use super::errors::CoordinationError;
use super::types::FormErrors;

fn check_text(text: &str) -> Result<(), CoordinationError> {
    validate_comment_text(text)
        .map_err(|e| CoordinationError::InvalidForm(FormErrors::single("text", e.to_string())))
}

/// Post a comment under a news item.
///
/// Text failing moderation yields `InvalidForm` with the message on `text`
/// and nothing is stored.
#[tracing::instrument(skip(text))]
pub async fn create_comment_core(
    news_id: i64,
    user_id: &str,
    text: &str,
) -> Result<Comment, CoordinationError> {
    if NewsStore::get_news(news_id).await?.is_none() {
        return Err(CoordinationError::not_found("News", news_id));
    }

    check_text(text)?;

    Ok(CommentStore::create_comment(news_id, user_id, text, None).await?)
}

/// Load a comment on behalf of its author.
///
/// Missing comments and comments of other users both give `ResourceNotFound`.
pub async fn comment_for_owner(
    comment_id: i64,
    user_id: &str,
) -> Result<Comment, CoordinationError> {
    let comment = CommentStore::get_comment(comment_id)
        .await?
        .ok_or_else(|| CoordinationError::not_found("Comment", comment_id))?;

    match can_modify(&comment, user_id) {
        Access::Allowed => Ok(comment),
        Access::NotFound => {
            tracing::debug!(comment_id, "Comment requested by a user other than its author");
            Err(CoordinationError::not_found("Comment", comment_id))
        }
    }
}

#[tracing::instrument(skip(text))]
pub async fn update_comment_core(
    comment_id: i64,
    user_id: &str,
    text: &str,
) -> Result<Comment, CoordinationError> {
    let comment = comment_for_owner(comment_id, user_id).await?;

    check_text(text)?;

    if !CommentStore::update_comment_text(comment.id, text).await? {
        return Err(CoordinationError::not_found("Comment", comment_id));
    }

    Ok(Comment {
        text: text.to_string(),
        ..comment
    })
}

/// Delete a comment and return the id of the news item it belonged to
#[tracing::instrument]
pub async fn delete_comment_core(comment_id: i64, user_id: &str) -> Result<i64, CoordinationError> {
    let comment = comment_for_owner(comment_id, user_id).await?;

    if !CommentStore::delete_comment(comment.id).await? {
        return Err(CoordinationError::not_found("Comment", comment_id));
    }

    Ok(comment.news_id)
}
