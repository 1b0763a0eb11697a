//! news_board_axum - Axum pages and login guard for the news_board library
//!
//! Mount [`news_board_router`] in an application after calling [`init`].

mod config;
mod error;
mod middleware;
mod pages;
mod router;
mod session;

pub use config::{NEWS_LOGIN_REDIRECT_URL, NEWS_LOGIN_URL};
pub use error::IntoResponseError;
pub use middleware::login_required;
pub use router::{news_board_router, news_board_router_no_trace};
pub use session::{AuthRejection, AuthUser};

// Re-export the initialization function and the seeding API of the core crate
pub use news_board::{NewsStore, init};
