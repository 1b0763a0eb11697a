//! Central configuration for the news_board crate

use std::sync::LazyLock;

const DEFAULT_NEWS_COUNT_ON_HOME_PAGE: usize = 10;

/// Number of news items on the home page
///
/// Default: 10. Values that are not a positive integer fall back to the default.
pub static NEWS_COUNT_ON_HOME_PAGE: LazyLock<usize> = LazyLock::new(|| {
    parse_page_size(std::env::var("NEWS_COUNT_ON_HOME_PAGE").ok().as_deref())
});

fn parse_page_size(raw: Option<&str>) -> usize {
    match raw.map(str::parse::<usize>) {
        Some(Ok(count)) if count > 0 => count,
        Some(_) => {
            tracing::warn!(
                "Invalid NEWS_COUNT_ON_HOME_PAGE, using default {}",
                DEFAULT_NEWS_COUNT_ON_HOME_PAGE
            );
            DEFAULT_NEWS_COUNT_ON_HOME_PAGE
        }
        None => DEFAULT_NEWS_COUNT_ON_HOME_PAGE,
    }
}
