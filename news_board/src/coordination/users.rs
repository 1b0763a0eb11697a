use headers::Cookie;
use http::HeaderMap;
use tokio::sync::OnceCell;

use crate::session::{User as SessionUser, create_session_with_uid, prepare_logout_response};
use crate::userdb::{User, UserError, UserSearchField, UserStore, hash_password, verify_password};
use crate::utils::gen_random_string;

use super::errors::CoordinationError;
use super::types::{FormErrors, LoginForm, NON_FIELD_ERRORS, SignupForm};

pub const INVALID_LOGIN: &str =
    "Please enter a correct username and password. Note that both fields may be case-sensitive.";

pub const USERNAME_TAKEN: &str = "A user with that username already exists.";

/// Verified against when the username is unknown so both failures cost the same
static DUMMY_PASSWORD_HASH: OnceCell<String> = OnceCell::const_new();

async fn dummy_password_hash() -> &'static str {
    DUMMY_PASSWORD_HASH
        .get_or_init(|| async { hash_password("dummy-password").await.unwrap_or_default() })
        .await
}

/// Create an account.
///
/// Field problems come back as `InvalidForm`; a taken username as `Conflict`.
#[tracing::instrument(skip(form), fields(username = %form.username))]
pub async fn signup_core(form: &SignupForm) -> Result<SessionUser, CoordinationError> {
    let errors = form.validate();
    if !errors.is_empty() {
        return Err(CoordinationError::InvalidForm(errors));
    }

    let existing = UserStore::get_user_by(UserSearchField::Username(form.username.clone())).await?;
    if existing.is_some() {
        return Err(CoordinationError::Conflict(USERNAME_TAKEN.to_string()));
    }

    let password_hash = hash_password(&form.password1).await?;
    let user = User::new(gen_random_string(16)?, form.username.clone(), password_hash);

    match UserStore::create_user(user).await {
        Ok(user) => Ok(SessionUser::from(user)),
        // Lost a race with another signup for the same name
        Err(UserError::Conflict(_)) => Err(CoordinationError::Conflict(USERNAME_TAKEN.to_string())),
        Err(e) => Err(e.into()),
    }
}

/// Check credentials and open a session.
///
/// Returns the user and the `Set-Cookie` headers. Unknown usernames and
/// wrong passwords give the same error.
#[tracing::instrument(skip(form), fields(username = %form.username))]
pub async fn login_core(form: &LoginForm) -> Result<(SessionUser, HeaderMap), CoordinationError> {
    let errors = form.validate();
    if !errors.is_empty() {
        return Err(CoordinationError::InvalidForm(errors));
    }

    let user = UserStore::get_user_by(UserSearchField::Username(form.username.clone())).await?;

    let user = match user {
        Some(user) => {
            if !verify_password(&form.password, &user.password_hash).await {
                return Err(invalid_login());
            }
            user
        }
        None => {
            let _ = verify_password(&form.password, dummy_password_hash().await).await;
            return Err(invalid_login());
        }
    };

    let headers = create_session_with_uid(&user.id).await?;
    tracing::info!(user_id = %user.id, "User logged in");

    Ok((SessionUser::from(user), headers))
}

fn invalid_login() -> CoordinationError {
    tracing::debug!("Login rejected");
    CoordinationError::InvalidForm(FormErrors::single(NON_FIELD_ERRORS, INVALID_LOGIN))
}

/// End the session named by the cookie, if any, and return headers expiring the cookie
pub async fn logout_core(cookies: Option<Cookie>) -> Result<HeaderMap, CoordinationError> {
    Ok(prepare_logout_response(cookies).await?)
}
