// tests/support/helpers.rs
use super::mocks::*;
use axum::Router;
use axum::body::{self, Body};
use axum::http::{Method, Request, StatusCode, header};
use axum::response::Response;
use magazine_cms::application::{
    ports::{mailer::Mailer, rate_limit::RateLimiter, time::Clock},
    services::{ApplicationDependencies, ApplicationServices},
};
use magazine_cms::domain::user::{Email, NewUser, PasswordHash, Role, UserName, UserRepository};
use magazine_cms::infrastructure::rate_limit::FixedWindowRateLimiter;
use magazine_cms::presentation::http::{routes::build_router, state::HttpState};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tower::util::ServiceExt as _;

pub const ADMIN_PASSWORD: &str = "correct horse battery";

/// Router wired to in-memory adapters, plus handles to inspect them.
pub struct TestApp {
    pub router: Router,
    pub users: Arc<InMemoryUserRepo>,
    pub content: Arc<InMemoryContentRepo>,
    pub issues: Arc<InMemoryIssueRepo>,
    pub comments: Arc<InMemoryCommentRepo>,
    pub subscriptions: Arc<InMemorySubscriptionRepo>,
    pub settings: Arc<InMemorySettingsRepo>,
    pub mailer: Arc<CapturingMailer>,
}

impl TestApp {
    /// Seeds the admin (id 1), editor (id 2) and author (id 3) that the
    /// fixed tokens of [`DummyTokenManager`] refer to.
    pub async fn spawn() -> Self {
        let users = Arc::new(InMemoryUserRepo::default());
        seed_user(&users, "Admin", Some("admin@example.org"), Role::Admin).await;
        seed_user(&users, "Editor", Some("editor@example.org"), Role::Editor).await;
        seed_user(&users, "Author", None, Role::Author).await;

        let content = Arc::new(InMemoryContentRepo::default());
        let issues = Arc::new(InMemoryIssueRepo::default());
        let comments = Arc::new(InMemoryCommentRepo::default());
        let subscriptions = Arc::new(InMemorySubscriptionRepo::default());
        let settings = Arc::new(InMemorySettingsRepo::default());
        let mailer = Arc::new(CapturingMailer::default());
        let clock: Arc<dyn Clock> = Arc::new(DummyClock);

        let services = Arc::new(ApplicationServices::new(ApplicationDependencies {
            user_repo: users.clone(),
            content_write_repo: content.clone(),
            content_read_repo: content.clone(),
            issue_repo: issues.clone(),
            comment_repo: comments.clone(),
            subscription_repo: subscriptions.clone(),
            settings_repo: settings.clone(),
            contact_repo: Arc::new(InMemoryContactRepo::default()),
            submission_repo: Arc::new(InMemorySubmissionRepo::default()),
            password_hasher: Arc::new(DummyPasswordHasher),
            token_manager: Arc::new(DummyTokenManager),
            mailer: mailer.clone() as Arc<dyn Mailer>,
            clock: Arc::clone(&clock),
            slugger: Arc::new(DummySlug),
            site_url: "https://magazine.example".into(),
        }));
        let rate_limiter: Arc<dyn RateLimiter> = Arc::new(FixedWindowRateLimiter::new(
            clock,
            5,
            Duration::from_secs(900),
        ));

        let router = build_router(HttpState {
            services,
            rate_limiter,
        });

        Self {
            router,
            users,
            content,
            issues,
            comments,
            subscriptions,
            settings,
            mailer,
        }
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Sends the request and returns the status with the decoded body.
    pub async fn call(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let response = self.send(method, uri, token, body).await;
        let status = response.status();
        (status, read_json(response).await)
    }
}

async fn seed_user(users: &InMemoryUserRepo, name: &str, email: Option<&str>, role: Role) {
    users
        .insert(NewUser {
            name: UserName::new(name).unwrap(),
            email: email.map(|e| Email::new(e).unwrap()),
            role,
            bio: None,
            password_hash: email
                .map(|_| PasswordHash::new(format!("hashed:{ADMIN_PASSWORD}")).unwrap()),
            created_at: fixed_now(),
        })
        .await
        .unwrap();
}

pub async fn make_test_router() -> Router {
    TestApp::spawn().await.router
}

pub async fn read_json(response: Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes).unwrap()
}

/// Asserts the `{ success: false, error }` envelope.
pub async fn assert_error_response(response: Response, expected: StatusCode, message: &str) {
    assert_eq!(response.status(), expected);
    let json = read_json(response).await;
    assert_eq!(json["success"], Value::Bool(false), "body: {json}");
    assert_eq!(json["error"].as_str(), Some(message), "body: {json}");
}

/// Returns `data` from a `{ success: true, data }` envelope.
pub fn data(body: &Value) -> &Value {
    assert_eq!(body["success"], Value::Bool(true), "body: {body}");
    &body["data"]
}
