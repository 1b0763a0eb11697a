use http::StatusCode;
use serial_test::serial;

use crate::common::{
    MockBrowser, create_comment, create_news, init_test_environment, signed_in_user,
};

#[tokio::test]
#[serial]
async fn test_pages_availability_for_anonymous_user() {
    init_test_environment().await;
    let news = create_news().await;
    let browser = MockBrowser::new();

    for path in [
        "/news/".to_string(),
        format!("/news/{}/", news.id),
        "/users/login/".to_string(),
        "/users/signup/".to_string(),
    ] {
        let response = browser.get(&path).await;
        assert_eq!(response.status, StatusCode::OK, "GET {path}");
    }
}

#[tokio::test]
#[serial]
async fn test_logout_is_post_only() {
    init_test_environment().await;
    let browser = MockBrowser::new();

    assert_eq!(
        browser.get("/users/logout/").await.status,
        StatusCode::METHOD_NOT_ALLOWED
    );
    assert_eq!(browser.post_empty("/users/logout/").await.status, StatusCode::OK);
}

#[tokio::test]
#[serial]
async fn test_logout_ends_session() {
    init_test_environment().await;
    let user = signed_in_user("Автор").await;
    let session_id = user.browser.session_id().unwrap().to_string();

    let response = user.browser.post_form("/users/logout/", &[]).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(news_board::get_user_from_session(&session_id).await.is_err());
}

#[tokio::test]
#[serial]
async fn test_missing_news_is_not_found() {
    init_test_environment().await;
    let browser = MockBrowser::new();

    assert_eq!(
        browser.get("/news/999999999/").await.status,
        StatusCode::NOT_FOUND
    );
    assert_eq!(browser.get("/news/abc/").await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[serial]
async fn test_availability_for_comment_edit_and_delete() {
    init_test_environment().await;
    let author = signed_in_user("Автор").await;
    let reader = signed_in_user("Другой").await;
    let news = create_news().await;
    let comment = create_comment(&news, &author).await;

    for path in [
        format!("/news/{}/edit/", comment.id),
        format!("/news/{}/delete/", comment.id),
    ] {
        assert_eq!(author.browser.get(&path).await.status, StatusCode::OK, "author GET {path}");
        assert_eq!(
            reader.browser.get(&path).await.status,
            StatusCode::NOT_FOUND,
            "reader GET {path}"
        );
    }
}

#[tokio::test]
#[serial]
async fn test_redirect_for_anonymous_client() {
    init_test_environment().await;
    let author = signed_in_user("Автор").await;
    let news = create_news().await;
    let comment = create_comment(&news, &author).await;
    let browser = MockBrowser::new();

    for path in [
        format!("/news/{}/edit/", comment.id),
        format!("/news/{}/delete/", comment.id),
    ] {
        let expected = format!("/users/login/?next={path}");

        let response = browser.get(&path).await;
        assert_eq!(response.status, StatusCode::FOUND);
        assert_eq!(response.location(), Some(expected.as_str()));

        let response = browser.post_empty(&path).await;
        assert_eq!(response.status, StatusCode::FOUND);
        assert_eq!(response.location(), Some(expected.as_str()));
    }
}

#[tokio::test]
#[serial]
async fn test_login_follows_local_next() {
    init_test_environment().await;
    let user = signed_in_user("Автор").await;
    let browser = MockBrowser::new();

    let response = browser
        .post_form_without_csrf(
            "/users/login/",
            &[
                ("username", user.username.as_str()),
                ("password", crate::common::PASSWORD),
                ("next", "/news/1/edit/"),
            ],
        )
        .await;
    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(response.location(), Some("/news/1/edit/"));

    let response = browser
        .post_form_without_csrf(
            "/users/login/",
            &[
                ("username", user.username.as_str()),
                ("password", crate::common::PASSWORD),
                ("next", "https://elsewhere.example/"),
            ],
        )
        .await;
    assert_eq!(response.location(), Some("/news/"));
}

#[tokio::test]
#[serial]
async fn test_wrong_password_shows_form_again() {
    init_test_environment().await;
    let user = signed_in_user("Автор").await;

    let response = MockBrowser::new()
        .post_form_without_csrf(
            "/users/login/",
            &[("username", user.username.as_str()), ("password", "wrong")],
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Please enter a correct username and password."));
    assert!(response.headers.get(http::header::SET_COOKIE).is_none());
}

#[tokio::test]
#[serial]
async fn test_signup_rejects_taken_username() {
    init_test_environment().await;
    let user = signed_in_user("Автор").await;

    let response = MockBrowser::new()
        .post_form_without_csrf(
            "/users/signup/",
            &[
                ("username", user.username.as_str()),
                ("password1", crate::common::PASSWORD),
                ("password2", crate::common::PASSWORD),
            ],
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains(news_board::USERNAME_TAKEN));
}
