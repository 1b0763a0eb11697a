use askama::Template;
use axum::{
    Extension, Form,
    extract::{Path, rejection::FormRejection},
    response::{IntoResponse, Response},
};
use http::StatusCode;

use news_board::{
    Comment, CommentForm, CoordinationError, comment_for_owner, delete_comment_core,
    update_comment_core,
};

use super::{CsrfForm, CsrfOnly, comments_anchor, parse_id, render};
use crate::error::IntoResponseError;
use crate::session::{AuthUser, found};

#[derive(Template)]
#[template(path = "comment_edit.j2", escape = "html")]
struct EditTemplate {
    user: Option<AuthUser>,
    comment: Comment,
    form: CommentForm,
}

#[derive(Template)]
#[template(path = "comment_delete.j2", escape = "html")]
struct DeleteTemplate {
    user: Option<AuthUser>,
    comment: Comment,
}

pub(crate) async fn edit_comment_form(
    Path(comment_id): Path<String>,
    Extension(user): Extension<AuthUser>,
) -> Result<Response, (StatusCode, String)> {
    let comment_id = parse_id(&comment_id)?;
    let comment = comment_for_owner(comment_id, &user.id)
        .await
        .into_response_error()?;
    let form = CommentForm::with_text(comment.text.clone());

    Ok(render(&EditTemplate {
        user: Some(user),
        comment,
        form,
    })?
    .into_response())
}

pub(crate) async fn edit_comment(
    Path(comment_id): Path<String>,
    Extension(user): Extension<AuthUser>,
    Form(submitted): Form<CsrfForm<CommentForm>>,
) -> Result<Response, (StatusCode, String)> {
    let comment_id = parse_id(&comment_id)?;
    if let Err(rejection) = user.verify_form_csrf(&submitted.csrf_token) {
        return Ok(rejection.into_response());
    }
    let text = submitted.form.text;

    match update_comment_core(comment_id, &user.id, &text).await {
        Ok(comment) => Ok(found(&comments_anchor(comment.news_id))),
        Err(CoordinationError::InvalidForm(errors)) => {
            let comment = comment_for_owner(comment_id, &user.id)
                .await
                .into_response_error()?;
            Ok(render(&EditTemplate {
                user: Some(user),
                comment,
                form: CommentForm::with_text(text).with_errors(errors),
            })?
            .into_response())
        }
        Err(e) => Err(e).into_response_error(),
    }
}

pub(crate) async fn delete_comment_confirm(
    Path(comment_id): Path<String>,
    Extension(user): Extension<AuthUser>,
) -> Result<Response, (StatusCode, String)> {
    let comment_id = parse_id(&comment_id)?;
    let comment = comment_for_owner(comment_id, &user.id)
        .await
        .into_response_error()?;

    Ok(render(&DeleteTemplate {
        user: Some(user),
        comment,
    })?
    .into_response())
}

pub(crate) async fn delete_comment(
    Path(comment_id): Path<String>,
    Extension(user): Extension<AuthUser>,
    body: Result<Form<CsrfOnly>, FormRejection>,
) -> Result<Response, (StatusCode, String)> {
    let comment_id = parse_id(&comment_id)?;
    let submitted = CsrfOnly::from_body(body);
    if let Err(rejection) = user.verify_form_csrf(&submitted.csrf_token) {
        return Ok(rejection.into_response());
    }

    let news_id = delete_comment_core(comment_id, &user.id)
        .await
        .into_response_error()?;
    Ok(found(&comments_anchor(news_id)))
}
