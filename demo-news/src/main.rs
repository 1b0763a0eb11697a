use axum::{
    Router,
    http::{StatusCode, header::LOCATION},
    response::IntoResponse,
    routing::get,
};
use chrono::{Duration, Utc};

use news_board_axum::{NewsStore, news_board_router};

mod server;

use crate::server::{init_tracing, spawn_http_server};

const DEFAULT_PORT: u16 = 3001;

async fn index() -> impl IntoResponse {
    (StatusCode::FOUND, [(LOCATION, "/news/")])
}

/// Give an empty database something to show
async fn seed_demo_news() -> Result<(), Box<dyn std::error::Error>> {
    if NewsStore::count_news().await? > 0 {
        return Ok(());
    }

    let today = Utc::now().date_naive();
    for days_ago in 0..12 {
        NewsStore::create_news(
            &format!("Новость {}", days_ago + 1),
            "Просто текст.",
            Some(today - Duration::days(days_ago)),
        )
        .await?;
    }
    tracing::info!("Seeded demo news");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_tracing(env!("CARGO_CRATE_NAME"));

    news_board_axum::init().await?;
    seed_demo_news().await?;

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    let app = Router::new()
        .route("/", get(index))
        .merge(news_board_router());

    spawn_http_server(port, app).await??;
    Ok(())
}
