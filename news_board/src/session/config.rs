use std::sync::LazyLock;

pub static SESSION_COOKIE_NAME: LazyLock<String> = LazyLock::new(|| {
    std::env::var("SESSION_COOKIE_NAME")
        .ok()
        .unwrap_or("news_sessionid".to_string())
});

const DEFAULT_SESSION_COOKIE_MAX_AGE: u64 = 1_209_600;

/// Ten years; larger lifetimes overflow expiry timestamps
const MAX_SESSION_COOKIE_MAX_AGE: u64 = 315_360_000;

/// Session lifetime in seconds, two weeks by default
pub(super) static SESSION_COOKIE_MAX_AGE: LazyLock<u64> = LazyLock::new(|| {
    parse_max_age(std::env::var("SESSION_COOKIE_MAX_AGE").ok().as_deref())
});

fn parse_max_age(value: Option<&str>) -> u64 {
    let max_age = value
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_SESSION_COOKIE_MAX_AGE);
    if max_age > MAX_SESSION_COOKIE_MAX_AGE {
        tracing::warn!(
            "SESSION_COOKIE_MAX_AGE {} too large, capped at {}",
            max_age,
            MAX_SESSION_COOKIE_MAX_AGE
        );
        return MAX_SESSION_COOKIE_MAX_AGE;
    }
    max_age
}

/// Whether the session cookie carries the `Secure` attribute
pub(super) static SESSION_COOKIE_SECURE: LazyLock<bool> = LazyLock::new(|| {
    std::env::var("SESSION_COOKIE_SECURE")
        .map(|val| val.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
});
