use chrono::{Duration, NaiveDate, Utc};
use http::StatusCode;
use serial_test::serial;

use news_board::{NEWS_COUNT_ON_HOME_PAGE, NewsStore};

use crate::common::{
    MockBrowser, create_comment_at, create_news, init_test_environment, signed_in_user,
};

fn news_dates(body: &str) -> Vec<NaiveDate> {
    body.split("<time>")
        .skip(1)
        .filter_map(|chunk| chunk.split("</time>").next())
        .map(|date| NaiveDate::parse_from_str(date, "%d.%m.%Y").unwrap())
        .collect()
}

#[tokio::test]
#[serial]
async fn test_news_count() {
    init_test_environment().await;

    for index in 0..=*NEWS_COUNT_ON_HOME_PAGE {
        NewsStore::create_news(&format!("Новость {index}"), "Просто текст.", None)
            .await
            .unwrap();
    }

    let response = MockBrowser::new().get("/news/").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body.matches(r#"<article class="news">"#).count(),
        *NEWS_COUNT_ON_HOME_PAGE
    );
}

#[tokio::test]
#[serial]
async fn test_news_order() {
    init_test_environment().await;

    let today = Utc::now().date_naive();
    for index in 0..=*NEWS_COUNT_ON_HOME_PAGE as i64 {
        NewsStore::create_news("Новость", "Просто текст.", Some(today + Duration::days(1000 + index)))
            .await
            .unwrap();
    }

    let response = MockBrowser::new().get("/news/").await;
    let dates = news_dates(&response.body);
    let mut sorted = dates.clone();
    sorted.sort_by(|a, b| b.cmp(a));

    assert!(!dates.is_empty());
    assert_eq!(dates, sorted);
}

#[tokio::test]
#[serial]
async fn test_comments_order() {
    init_test_environment().await;

    let author = signed_in_user("Автор").await;
    let news = create_news().await;
    let now = Utc::now();
    // Created newest first, so only sorting puts them in order
    for index in (0..10).rev() {
        create_comment_at(
            &news,
            &author,
            &format!("Текст {index}"),
            Some(now + Duration::days(index)),
        )
        .await;
    }

    let response = MockBrowser::new().get(&format!("/news/{}/", news.id)).await;
    assert_eq!(response.status, StatusCode::OK);

    let positions: Vec<usize> = (0..10)
        .map(|index| {
            response
                .body
                .find(&format!("Текст {index}<"))
                .unwrap_or_else(|| panic!("comment {index} missing"))
        })
        .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
}

#[tokio::test]
#[serial]
async fn test_anonymous_client_has_no_form() {
    init_test_environment().await;
    let news = create_news().await;

    let response = MockBrowser::new().get(&format!("/news/{}/", news.id)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(!response.body.contains(r#"id="comment-form""#));
}

#[tokio::test]
#[serial]
async fn test_authorized_client_has_form() {
    init_test_environment().await;
    let author = signed_in_user("Автор").await;
    let news = create_news().await;

    let response = author.browser.get(&format!("/news/{}/", news.id)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains(r#"id="comment-form""#));
    assert!(response.body.contains(r#"<textarea name="text">"#));
}
