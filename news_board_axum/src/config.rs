//! URLs the login guard redirects to

use std::sync::LazyLock;

/// Login page; anonymous requests to protected pages are sent here with `?next=`
/// Default: "/users/login/"
pub static NEWS_LOGIN_URL: LazyLock<String> = LazyLock::new(|| {
    std::env::var("NEWS_LOGIN_URL").unwrap_or_else(|_| "/users/login/".to_string())
});

/// Where a successful login lands when no usable `next` was given
/// Default: "/news/"
pub static NEWS_LOGIN_REDIRECT_URL: LazyLock<String> = LazyLock::new(|| {
    std::env::var("NEWS_LOGIN_REDIRECT_URL").unwrap_or_else(|_| "/news/".to_string())
});

/// Whether protected pages echo the session's CSRF token in an `X-CSRF-Token` header
pub static NEWS_RESPOND_WITH_X_CSRF_TOKEN: LazyLock<bool> = LazyLock::new(|| {
    std::env::var("NEWS_RESPOND_WITH_X_CSRF_TOKEN")
        .map(|val| val.to_lowercase() != "false")
        .unwrap_or(true)
});
