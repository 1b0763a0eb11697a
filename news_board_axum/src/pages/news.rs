use askama::Template;
use axum::{
    Form,
    extract::Path,
    response::{IntoResponse, Response},
};
use http::StatusCode;

use news_board::{
    CommentForm, CoordinationError, HomePage, NewsDetailPage, create_comment_core, home_page,
    news_detail_page,
};

use super::{CsrfForm, comments_anchor, parse_id, render};
use crate::error::IntoResponseError;
use crate::session::{AuthUser, found};

#[derive(Template)]
#[template(path = "home.j2", escape = "html")]
struct HomeTemplate {
    user: Option<AuthUser>,
    page: HomePage,
}

#[derive(Template)]
#[template(path = "detail.j2", escape = "html")]
struct DetailTemplate {
    user: Option<AuthUser>,
    page: NewsDetailPage,
}

pub(crate) async fn home(user: Option<AuthUser>) -> Result<Response, (StatusCode, String)> {
    let page = home_page().await.into_response_error()?;
    Ok(render(&HomeTemplate { user, page })?.into_response())
}

pub(crate) async fn news_detail(
    Path(news_id): Path<String>,
    user: Option<AuthUser>,
) -> Result<Response, (StatusCode, String)> {
    let news_id = parse_id(&news_id)?;
    let page = news_detail_page(news_id, user.is_some())
        .await
        .into_response_error()?;
    Ok(render(&DetailTemplate { user, page })?.into_response())
}

/// Post a comment; on a moderation failure the page is shown again with the message
pub(crate) async fn create_comment(
    Path(news_id): Path<String>,
    user: AuthUser,
    Form(submitted): Form<CsrfForm<CommentForm>>,
) -> Result<Response, (StatusCode, String)> {
    let news_id = parse_id(&news_id)?;
    if let Err(rejection) = user.verify_form_csrf(&submitted.csrf_token) {
        return Ok(rejection.into_response());
    }
    let text = submitted.form.text;

    match create_comment_core(news_id, &user.id, &text).await {
        Ok(_) => Ok(found(&comments_anchor(news_id))),
        Err(CoordinationError::InvalidForm(errors)) => {
            let mut page = news_detail_page(news_id, true)
                .await
                .into_response_error()?;
            page.form = Some(CommentForm::with_text(text).with_errors(errors));
            Ok(render(&DetailTemplate {
                user: Some(user),
                page,
            })?
            .into_response())
        }
        Err(e) => Err(e).into_response_error(),
    }
}
