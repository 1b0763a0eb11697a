//! High-level operations called by the HTTP layer
//!
//! Each function combines the stores with the moderation and ownership
//! rules and reports failures as a `CoordinationError`.

mod comments;
mod errors;
mod news;
mod types;
mod users;

pub use comments::{
    comment_for_owner, create_comment_core, delete_comment_core, update_comment_core,
};
pub use errors::CoordinationError;
pub use news::{home_page, news_detail_page};
pub use types::{
    CommentForm, FormErrors, HomePage, LoginForm, NON_FIELD_ERRORS, NewsDetailPage, SignupForm,
};
pub use users::{INVALID_LOGIN, USERNAME_TAKEN, login_core, logout_core, signup_core};
