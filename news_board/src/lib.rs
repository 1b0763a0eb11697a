//! news_board - news items, comments and the rules around them
//!
//! Content storage, comment moderation, ownership checks and password
//! accounts with cookie sessions. The HTTP layer lives in `news_board_axum`.

mod config;
mod content;
mod coordination;
mod moderation;
mod policy;
mod session;
mod storage;
mod userdb;
mod utils;

#[cfg(test)]
mod test_utils;

pub use config::NEWS_COUNT_ON_HOME_PAGE;

pub use content::{Comment, CommentStore, ContentError, News, NewsStore};

pub use coordination::{
    CommentForm, CoordinationError, FormErrors, HomePage, INVALID_LOGIN, LoginForm,
    NON_FIELD_ERRORS, NewsDetailPage, SignupForm, USERNAME_TAKEN, comment_for_owner,
    create_comment_core, delete_comment_core, home_page, login_core, logout_core,
    news_detail_page, signup_core, update_comment_core,
};

pub use moderation::{BAD_WORDS, FIELD_REQUIRED, ModerationError, WARNING, validate_comment_text};
pub use policy::{Access, can_modify, can_submit_comment};

pub use userdb::UserError;

pub use session::{
    CsrfToken, SESSION_COOKIE_NAME, SessionError, User as SessionUser,
    get_user_and_csrf_token_from_session, get_user_from_session,
};

/// Initialize the stores and create missing tables
pub async fn init() -> Result<(), Box<dyn std::error::Error>> {
    storage::init().await?;
    userdb::init().await?;
    content::init().await?;
    Ok(())
}
