use crate::config::NEWS_COUNT_ON_HOME_PAGE;
use crate::content::{CommentStore, NewsStore};
use crate::policy::can_submit_comment;

use super::errors::CoordinationError;
use super::types::{CommentForm, HomePage, NewsDetailPage};

/// Most recent news, capped at `NEWS_COUNT_ON_HOME_PAGE`
pub async fn home_page() -> Result<HomePage, CoordinationError> {
    let object_list = NewsStore::list_recent_news(*NEWS_COUNT_ON_HOME_PAGE).await?;
    Ok(HomePage { object_list })
}

/// A news item with its comments, oldest first.
///
/// The comment form is included only for authenticated requesters.
pub async fn news_detail_page(
    news_id: i64,
    is_authenticated: bool,
) -> Result<NewsDetailPage, CoordinationError> {
    let object = NewsStore::get_news(news_id)
        .await?
        .ok_or_else(|| CoordinationError::not_found("News", news_id))?;
    let comments = CommentStore::list_comments(news_id).await?;

    Ok(NewsDetailPage {
        object,
        comments,
        form: can_submit_comment(is_authenticated).then(CommentForm::default),
    })
}
