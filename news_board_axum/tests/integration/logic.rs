use http::StatusCode;
use serial_test::serial;

use news_board::{BAD_WORDS, CommentStore, WARNING};

use crate::common::{
    MockBrowser, comment_count, create_comment, create_news, init_test_environment,
    signed_in_user,
};

const NEW_TEXT: &str = "Обновлённый комментарий";

#[tokio::test]
#[serial]
async fn test_anonymous_user_cant_create_comment() {
    init_test_environment().await;
    let news = create_news().await;
    let url = format!("/news/{}/", news.id);

    let response = MockBrowser::new()
        .post_form_without_csrf(&url, &[("text", "Текст комментария")])
        .await;

    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(
        response.location(),
        Some(format!("/users/login/?next={url}").as_str())
    );
    assert_eq!(comment_count(&news).await, 0);
}

#[tokio::test]
#[serial]
async fn test_user_can_create_comment() {
    init_test_environment().await;
    let author = signed_in_user("Автор").await;
    let news = create_news().await;

    let response = author
        .browser
        .post_form(&format!("/news/{}/", news.id), &[("text", "Текст комментария")])
        .await;

    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(
        response.location(),
        Some(format!("/news/{}/#comments", news.id).as_str())
    );

    let comments = CommentStore::list_comments(news.id).await.unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].text, "Текст комментария");
    assert_eq!(comments[0].news_id, news.id);
    assert_eq!(comments[0].author_id, author.id);
}

#[tokio::test]
#[serial]
async fn test_user_cant_use_bad_words() {
    init_test_environment().await;
    let author = signed_in_user("Автор").await;
    let news = create_news().await;

    for word in BAD_WORDS {
        let text = format!("Какой-то текст, {word}, еще текст");
        let response = author
            .browser
            .post_form(&format!("/news/{}/", news.id), &[("text", text.as_str())])
            .await;

        assert_eq!(response.status, StatusCode::OK);
        assert!(response.body.contains(WARNING));
        assert!(response.body.contains(r#"id="comment-form""#));
    }

    assert_eq!(comment_count(&news).await, 0);
}

#[tokio::test]
#[serial]
async fn test_post_without_csrf_token_is_forbidden() {
    init_test_environment().await;
    let author = signed_in_user("Автор").await;
    let news = create_news().await;

    let response = author
        .browser
        .post_form_without_csrf(&format!("/news/{}/", news.id), &[("text", "Текст")])
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(comment_count(&news).await, 0);
}

#[tokio::test]
#[serial]
async fn test_author_can_delete_comment() {
    init_test_environment().await;
    let author = signed_in_user("Автор").await;
    let news = create_news().await;
    let comment = create_comment(&news, &author).await;

    let response = author
        .browser
        .post_form(&format!("/news/{}/delete/", comment.id), &[])
        .await;

    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(
        response.location(),
        Some(format!("/news/{}/#comments", news.id).as_str())
    );
    assert_eq!(comment_count(&news).await, 0);
}

#[tokio::test]
#[serial]
async fn test_user_cant_delete_comment_of_another_user() {
    init_test_environment().await;
    let author = signed_in_user("Автор").await;
    let reader = signed_in_user("Другой").await;
    let news = create_news().await;
    let comment = create_comment(&news, &author).await;

    let response = reader
        .browser
        .post_form(&format!("/news/{}/delete/", comment.id), &[])
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(comment_count(&news).await, 1);
}

#[tokio::test]
#[serial]
async fn test_author_can_edit_comment() {
    init_test_environment().await;
    let author = signed_in_user("Автор").await;
    let news = create_news().await;
    let comment = create_comment(&news, &author).await;

    let response = author
        .browser
        .post_form(&format!("/news/{}/edit/", comment.id), &[("text", NEW_TEXT)])
        .await;

    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(
        response.location(),
        Some(format!("/news/{}/#comments", news.id).as_str())
    );

    let stored = CommentStore::get_comment(comment.id).await.unwrap().unwrap();
    assert_eq!(stored.text, NEW_TEXT);
}

#[tokio::test]
#[serial]
async fn test_author_cant_edit_in_bad_words() {
    init_test_environment().await;
    let author = signed_in_user("Автор").await;
    let news = create_news().await;
    let comment = create_comment(&news, &author).await;

    let response = author
        .browser
        .post_form(
            &format!("/news/{}/edit/", comment.id),
            &[("text", "Ты негодяй!")],
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains(WARNING));

    let stored = CommentStore::get_comment(comment.id).await.unwrap().unwrap();
    assert_eq!(stored.text, comment.text);
}

#[tokio::test]
#[serial]
async fn test_user_cant_edit_comment_of_another_user() {
    init_test_environment().await;
    let author = signed_in_user("Автор").await;
    let reader = signed_in_user("Другой").await;
    let news = create_news().await;
    let comment = create_comment(&news, &author).await;

    let response = reader
        .browser
        .post_form(&format!("/news/{}/edit/", comment.id), &[("text", NEW_TEXT)])
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let stored = CommentStore::get_comment(comment.id).await.unwrap().unwrap();
    assert_eq!(stored.text, comment.text);
}
