use axum::{
    extract::{FromRequestParts, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use http::header::HeaderValue;

use super::config::NEWS_RESPOND_WITH_X_CSRF_TOKEN;
use super::session::{AuthUser, CSRF_HEADER};

fn add_csrf_header(mut response: Response, csrf_token: &str) -> Response {
    if !*NEWS_RESPOND_WITH_X_CSRF_TOKEN {
        return response;
    }

    if let Ok(header_value) = HeaderValue::from_str(csrf_token) {
        response.headers_mut().insert(CSRF_HEADER, header_value);
    } else {
        tracing::error!("Failed to create CSRF header value from token");
    }
    response
}

/// Route guard for pages that need a logged-in user
///
/// Anonymous requests of any method get a 302 to the login page with
/// `next` set to the requested path. Otherwise the `AuthUser` is put into
/// the request extensions for the handler.
///
/// ```no_run
/// use axum::{Router, middleware::from_fn, routing::get};
/// use news_board_axum::login_required;
///
/// async fn secret() -> &'static str {
///     "members only"
/// }
///
/// let app: Router = Router::new()
///     .route("/secret/", get(secret))
///     .route_layer(from_fn(login_required));
/// ```
pub async fn login_required(req: Request, next: Next) -> Response {
    let (mut parts, body) = req.into_parts();

    match <AuthUser as FromRequestParts<()>>::from_request_parts(&mut parts, &()).await {
        Ok(auth_user) => {
            tracing::debug!(user_id = %auth_user.id, "Login guard passed");
            let csrf_token = auth_user.csrf_token.clone();
            parts.extensions.insert(auth_user);
            let response = next.run(Request::from_parts(parts, body)).await;
            add_csrf_header(response, &csrf_token)
        }
        Err(rejection) => rejection.into_response(),
    }
}
