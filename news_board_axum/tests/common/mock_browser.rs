use axum::{Router, body::Body};
use http::{HeaderMap, Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use news_board::SESSION_COOKIE_NAME;
use news_board_axum::news_board_router_no_trace;

/// Status, headers and body text of a page
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }
}

/// Browser stand-in that keeps the session cookie and CSRF token between requests
pub struct MockBrowser {
    app: Router,
    session_id: Option<String>,
    csrf_token: Option<String>,
}

impl MockBrowser {
    pub fn new() -> Self {
        Self {
            app: news_board_router_no_trace(),
            session_id: None,
            csrf_token: None,
        }
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    fn request(&self, method: Method, path: &str) -> http::request::Builder {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(session_id) = &self.session_id {
            builder = builder.header(
                header::COOKIE,
                format!("{}={}", SESSION_COOKIE_NAME.as_str(), session_id),
            );
        }
        builder
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        self.send(self.request(Method::GET, path).body(Body::empty()).unwrap())
            .await
    }

    /// POST a form; the session's CSRF token is added when logged in
    pub async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        let mut fields = fields.to_vec();
        if let Some(token) = &self.csrf_token {
            fields.push(("csrf_token", token.as_str()));
        }
        self.post_form_without_csrf(path, &fields).await
    }

    pub async fn post_form_without_csrf(&self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = fields
            .iter()
            .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        self.send(
            self.request(Method::POST, path)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
    }

    /// POST without a body, as a bare `<form method="post">` button would
    pub async fn post_empty(&self, path: &str) -> TestResponse {
        self.send(self.request(Method::POST, path).body(Body::empty()).unwrap())
            .await
    }

    /// Log in through the login page and pick up the session's CSRF token
    pub async fn login(&mut self, username: &str, password: &str) -> TestResponse {
        let response = self
            .post_form_without_csrf(
                "/users/login/",
                &[("username", username), ("password", password)],
            )
            .await;

        if let Some(session_id) = session_id_from(&response.headers) {
            self.session_id = Some(session_id);
            let page = self.get("/news/").await;
            self.csrf_token = csrf_token_from(&page.body);
        }

        response
    }
}

fn session_id_from(headers: &HeaderMap) -> Option<String> {
    let prefix = format!("{}=", SESSION_COOKIE_NAME.as_str());
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(|cookie| cookie.strip_prefix(&prefix))
        .and_then(|rest| rest.split(';').next())
        .map(str::to_string)
}

/// Value of the first hidden `csrf_token` input on a page
pub fn csrf_token_from(body: &str) -> Option<String> {
    let marker = r#"name="csrf_token" value=""#;
    let start = body.find(marker)? + marker.len();
    let end = body[start..].find('"')?;
    Some(body[start..start + end].to_string())
}
