mod config;
mod errors;
mod lifecycle;
mod types;

pub use config::SESSION_COOKIE_NAME;
pub use errors::SessionError;
pub use lifecycle::{
    get_user_and_csrf_token_from_session, get_user_from_session, prepare_logout_response,
};
pub use types::{CsrfToken, User};

pub(crate) use lifecycle::create_session_with_uid;
