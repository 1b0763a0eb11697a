//! Router for the news and account pages

use axum::{Router, middleware::from_fn, routing::get, routing::post};
use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use super::middleware::login_required;
use super::pages;

/// Create the router for all news and account pages
///
/// - `/news/` home listing
/// - `/news/{id}/` news detail; POST adds a comment
/// - `/news/{id}/edit/`, `/news/{id}/delete/` author-only comment pages, `id` is the comment's
/// - `/users/login/`, `/users/signup/`, `/users/logout/` (POST only)
pub fn news_board_router() -> Router {
    news_board_router_no_trace().layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(
                DefaultOnResponse::new()
                    .level(Level::INFO)
                    .latency_unit(LatencyUnit::Millis),
            ),
    )
}

/// Same as `news_board_router()` without the HTTP tracing layer
pub fn news_board_router_no_trace() -> Router {
    let author_only = Router::new()
        .route(
            "/news/{id}/edit/",
            get(pages::edit_comment_form).post(pages::edit_comment),
        )
        .route(
            "/news/{id}/delete/",
            get(pages::delete_comment_confirm).post(pages::delete_comment),
        )
        .route_layer(from_fn(login_required));

    Router::new()
        .route("/news/", get(pages::home))
        .route(
            "/news/{id}/",
            get(pages::news_detail).post(pages::create_comment),
        )
        .route(
            "/users/login/",
            get(pages::login_form).post(pages::login),
        )
        .route(
            "/users/signup/",
            get(pages::signup_form).post(pages::signup),
        )
        .route("/users/logout/", post(pages::logout))
        .merge(author_only)
}
