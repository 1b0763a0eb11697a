use chrono::{Duration, Utc};
use headers::Cookie;
use http::header::HeaderMap;

use crate::session::config::{SESSION_COOKIE_MAX_AGE, SESSION_COOKIE_NAME, SESSION_COOKIE_SECURE};
use crate::session::errors::SessionError;
use crate::session::types::{CsrfToken, StoredSession, User as SessionUser};
use crate::storage::{CacheData, GENERIC_CACHE_STORE};
use crate::userdb::UserStore;
use crate::utils::{gen_random_string, header_set_cookie};

const SESSION_PREFIX: &str = "session";

/// Prepare a logout response by expiring the session cookie and deleting the session from storage
///
/// Requests without a session cookie still get the expiring cookie.
pub async fn prepare_logout_response(cookies: Option<Cookie>) -> Result<HeaderMap, SessionError> {
    let mut headers = HeaderMap::new();
    header_set_cookie(
        &mut headers,
        SESSION_COOKIE_NAME.as_str(),
        "value",
        -86400,
        *SESSION_COOKIE_SECURE,
    )?;

    if let Some(session_id) = cookies.as_ref().and_then(|c| c.get(SESSION_COOKIE_NAME.as_str())) {
        delete_session_from_store(session_id).await?;
        tracing::debug!("Session removed on logout");
    }
    Ok(headers)
}

/// Create a session for the user and return the `Set-Cookie` headers carrying it
pub(crate) async fn create_session_with_uid(user_id: &str) -> Result<HeaderMap, SessionError> {
    let session_id = gen_random_string(32)?;
    let csrf_token = gen_random_string(32)?;
    let max_age = *SESSION_COOKIE_MAX_AGE;
    let expires_at = Utc::now() + Duration::seconds(max_age as i64);

    let stored_session = StoredSession {
        user_id: user_id.to_string(),
        csrf_token,
        expires_at,
        ttl: max_age,
    };
    let cache_data: CacheData = stored_session.try_into()?;

    GENERIC_CACHE_STORE
        .lock()
        .await
        .put_with_ttl(SESSION_PREFIX, &session_id, cache_data, max_age as usize)
        .await
        .map_err(|e| SessionError::Storage(e.to_string()))?;

    let mut headers = HeaderMap::new();
    header_set_cookie(
        &mut headers,
        SESSION_COOKIE_NAME.as_str(),
        &session_id,
        max_age as i64,
        *SESSION_COOKIE_SECURE,
    )?;

    tracing::debug!(user_id = %user_id, "Session created");
    Ok(headers)
}

async fn delete_session_from_store(session_id: &str) -> Result<(), SessionError> {
    GENERIC_CACHE_STORE
        .lock()
        .await
        .remove(SESSION_PREFIX, session_id)
        .await
        .map_err(|e| SessionError::Storage(e.to_string()))
}

async fn load_session(session_id: &str) -> Result<StoredSession, SessionError> {
    let cached_session = GENERIC_CACHE_STORE
        .lock()
        .await
        .get(SESSION_PREFIX, session_id)
        .await
        .map_err(|e| SessionError::Storage(e.to_string()))?
        .ok_or(SessionError::SessionError)?;

    let stored_session: StoredSession = cached_session.try_into()?;

    if stored_session.expires_at < Utc::now() {
        tracing::debug!("Session expired at {}", stored_session.expires_at);
        delete_session_from_store(session_id).await?;
        return Err(SessionError::SessionExpiredError);
    }

    Ok(stored_session)
}

/// Retrieves the user information from the session
pub async fn get_user_from_session(session_id: &str) -> Result<SessionUser, SessionError> {
    get_user_and_csrf_token_from_session(session_id)
        .await
        .map(|(user, _)| user)
}

/// Retrieves the user and the session's CSRF token
///
/// The user is re-read from the database so a deleted account cannot keep
/// using an old session.
pub async fn get_user_and_csrf_token_from_session(
    session_id: &str,
) -> Result<(SessionUser, CsrfToken), SessionError> {
    let stored_session = load_session(session_id).await?;

    let user = UserStore::get_user(&stored_session.user_id)
        .await?
        .ok_or(SessionError::SessionError)?;

    Ok((
        SessionUser::from(user),
        CsrfToken::new(stored_session.csrf_token),
    ))
}
