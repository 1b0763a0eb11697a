use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use news_board::{Comment, CommentStore, News, NewsStore, get_user_from_session};

use super::MockBrowser;

pub const PASSWORD: &str = "correct-horse-battery";

/// Names stay unique across tests sharing one database
pub fn unique_name(prefix: &str) -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let count = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}{}{count}", Utc::now().timestamp_micros())
}

/// A signed-up, logged-in user and their browser
pub struct TestUser {
    pub id: String,
    pub username: String,
    pub browser: MockBrowser,
}

pub async fn signed_in_user(prefix: &str) -> TestUser {
    let username = unique_name(prefix);
    let mut browser = MockBrowser::new();

    let signup = browser
        .post_form_without_csrf(
            "/users/signup/",
            &[
                ("username", username.as_str()),
                ("password1", PASSWORD),
                ("password2", PASSWORD),
            ],
        )
        .await;
    assert_eq!(signup.location(), Some("/users/login/"), "{}", signup.body);

    browser.login(&username, PASSWORD).await;
    let session_id = browser.session_id().expect("logged in").to_string();
    let id = get_user_from_session(&session_id).await.unwrap().id;

    TestUser {
        id,
        username,
        browser,
    }
}

pub async fn create_news() -> News {
    NewsStore::create_news("Заголовок", "Текст", None)
        .await
        .unwrap()
}

pub async fn create_comment(news: &News, author: &TestUser) -> Comment {
    create_comment_at(news, author, "Текст комментария", None).await
}

pub async fn create_comment_at(
    news: &News,
    author: &TestUser,
    text: &str,
    created: Option<DateTime<Utc>>,
) -> Comment {
    CommentStore::create_comment(news.id, &author.id, text, created)
        .await
        .unwrap()
}

pub async fn comment_count(news: &News) -> i64 {
    CommentStore::count_comments(news.id).await.unwrap()
}
