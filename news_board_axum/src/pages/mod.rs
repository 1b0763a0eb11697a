//! HTML pages for news, comments and accounts

mod comments;
mod news;
mod users;

use askama::Template;
use axum::{Form, extract::rejection::FormRejection, response::Html};
use http::StatusCode;
use serde::Deserialize;

use crate::error::IntoResponseError;

pub(crate) use comments::{delete_comment, delete_comment_confirm, edit_comment, edit_comment_form};
pub(crate) use news::{create_comment, home, news_detail};
pub(crate) use users::{login, login_form, logout, signup, signup_form};

/// A submitted form together with its `csrf_token` field
#[derive(Deserialize)]
pub(crate) struct CsrfForm<T> {
    #[serde(default)]
    csrf_token: String,
    #[serde(flatten)]
    form: T,
}

/// Body of forms that carry nothing but the CSRF token
#[derive(Deserialize, Default)]
pub(crate) struct CsrfOnly {
    #[serde(default)]
    csrf_token: String,
}

impl CsrfOnly {
    /// Token from the body; header-authenticated requests may omit the body
    fn from_body(body: Result<Form<CsrfOnly>, FormRejection>) -> Self {
        body.map(|Form(form)| form).unwrap_or_default()
    }
}

fn render(template: &impl Template) -> Result<Html<String>, (StatusCode, String)> {
    Ok(Html(template.render().into_response_error()?))
}

/// Path ids that are not numbers cannot exist, so they are 404 rather than 400
fn parse_id(raw: &str) -> Result<i64, (StatusCode, String)> {
    raw.parse::<i64>()
        .map_err(|_| (StatusCode::NOT_FOUND, format!("Not found: {raw}")))
}

fn comments_anchor(news_id: i64) -> String {
    format!("/news/{news_id}/#comments")
}
