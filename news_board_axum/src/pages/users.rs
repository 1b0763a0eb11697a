use askama::Template;
use axum::{
    Form,
    extract::{Query, rejection::FormRejection},
    response::{IntoResponse, Response},
};
use axum_extra::{TypedHeader, headers};
use http::StatusCode;
use serde::Deserialize;

use news_board::{
    CoordinationError, FormErrors, LoginForm, SignupForm, login_core, logout_core, signup_core,
};

use super::{CsrfOnly, render};
use crate::config::{NEWS_LOGIN_REDIRECT_URL, NEWS_LOGIN_URL};
use crate::error::IntoResponseError;
use crate::session::{AuthUser, found};

#[derive(Template)]
#[template(path = "login.j2", escape = "html")]
struct LoginTemplate {
    user: Option<AuthUser>,
    form: LoginForm,
    next: String,
}

#[derive(Template)]
#[template(path = "signup.j2", escape = "html")]
struct SignupTemplate {
    user: Option<AuthUser>,
    form: SignupForm,
}

#[derive(Template)]
#[template(path = "logged_out.j2", escape = "html")]
struct LoggedOutTemplate {
    user: Option<AuthUser>,
}

#[derive(Deserialize)]
pub(crate) struct NextQuery {
    #[serde(default)]
    next: String,
}

#[derive(Deserialize)]
pub(crate) struct LoginSubmission {
    #[serde(flatten)]
    form: LoginForm,
    #[serde(default)]
    next: String,
}

/// Only local paths are followed after login
fn safe_next(next: &str) -> Option<&str> {
    (next.starts_with('/') && !next.starts_with("//") && !next.contains('\\')).then_some(next)
}

pub(crate) async fn login_form(
    user: Option<AuthUser>,
    Query(query): Query<NextQuery>,
) -> Result<Response, (StatusCode, String)> {
    Ok(render(&LoginTemplate {
        user,
        form: LoginForm::default(),
        next: query.next,
    })?
    .into_response())
}

pub(crate) async fn login(
    Form(submitted): Form<LoginSubmission>,
) -> Result<Response, (StatusCode, String)> {
    match login_core(&submitted.form).await {
        Ok((user, headers)) => {
            let target = safe_next(&submitted.next).unwrap_or(NEWS_LOGIN_REDIRECT_URL.as_str());
            tracing::debug!(user_id = %user.id, "Login succeeded, redirecting to {}", target);
            Ok((headers, found(target)).into_response())
        }
        Err(CoordinationError::InvalidForm(errors)) => Ok(render(&LoginTemplate {
            user: None,
            form: submitted.form.redisplay(errors),
            next: submitted.next,
        })?
        .into_response()),
        Err(e) => Err(e).into_response_error(),
    }
}

pub(crate) async fn signup_form(user: Option<AuthUser>) -> Result<Response, (StatusCode, String)> {
    Ok(render(&SignupTemplate {
        user,
        form: SignupForm::default(),
    })?
    .into_response())
}

pub(crate) async fn signup(
    Form(form): Form<SignupForm>,
) -> Result<Response, (StatusCode, String)> {
    let errors = match signup_core(&form).await {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "Account created");
            return Ok(found(NEWS_LOGIN_URL.as_str()));
        }
        Err(CoordinationError::InvalidForm(errors)) => errors,
        Err(CoordinationError::Conflict(message)) => FormErrors::single("username", message),
        Err(e) => return Err(e).into_response_error(),
    };

    Ok(render(&SignupTemplate {
        user: None,
        form: form.redisplay(errors),
    })?
    .into_response())
}

/// POST only; the router answers GET with 405
pub(crate) async fn logout(
    user: Option<AuthUser>,
    cookies: Option<TypedHeader<headers::Cookie>>,
    body: Result<Form<CsrfOnly>, FormRejection>,
) -> Result<Response, (StatusCode, String)> {
    if let Some(user) = &user {
        let submitted = CsrfOnly::from_body(body);
        if let Err(rejection) = user.verify_form_csrf(&submitted.csrf_token) {
            return Ok(rejection.into_response());
        }
    }

    let headers = logout_core(cookies.map(|TypedHeader(cookies)| cookies))
        .await
        .into_response_error()?;

    Ok((headers, render(&LoggedOutTemplate { user: None })?).into_response())
}
