// src/presentation/http/routes.rs
use crate::domain::content::ContentKind;
use crate::presentation::http::{
    controllers::{
        auth, categories, comments, contact, content, hero, issues, newsletter, search, settings,
        submissions, users,
    },
    middleware::rate_limit::governor_layer,
    response::ApiResponse,
    state::HttpState,
};
use axum::{
    Extension, Router,
    http::{HeaderValue, Method},
    routing::{get, post, put},
};
use serde::Serialize;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

/// Outer-layer settings used by the server binary.
#[derive(Debug, Clone)]
pub struct RouterOptions {
    /// Empty means any origin.
    pub allowed_origins: Vec<String>,
    pub governor_per_second: u64,
    pub governor_burst: u32,
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600))
}

fn content_routes(kind: ContentKind) -> Router {
    Router::new()
        .route("/", get(content::list_content).post(content::create_content))
        .route(
            "/{id}",
            get(content::get_content)
                .put(content::update_content)
                .delete(content::delete_content),
        )
        .route("/{id}/publish", post(content::set_publish_state))
        .route("/{id}/featured", post(content::set_featured))
        .route("/{id}/view", post(content::record_view))
        .route("/{id}/like", post(content::record_like))
        .route("/{id}/share", post(content::record_share))
        .layer(Extension(kind))
}

fn api_routes() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/me", get(auth::profile))
        .nest("/api/articles", content_routes(ContentKind::Article))
        .nest("/api/poems", content_routes(ContentKind::Poem))
        .route(
            "/api/issues",
            get(issues::list_issues).post(issues::create_issue),
        )
        .route(
            "/api/issues/{id}",
            get(issues::get_issue)
                .put(issues::update_issue)
                .delete(issues::delete_issue),
        )
        .route("/api/users", get(users::list_users).post(users::create_user))
        .route("/api/users/resolve-author", post(users::resolve_author))
        .route(
            "/api/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route(
            "/api/comments",
            get(comments::list_comments).post(comments::post_comment),
        )
        .route(
            "/api/comments/{id}",
            put(comments::moderate_comment).delete(comments::delete_comment),
        )
        .route("/api/search", get(search::search))
        .route(
            "/api/newsletter",
            get(newsletter::list_subscribers)
                .post(newsletter::subscribe)
                .delete(newsletter::unsubscribe),
        )
        .route("/api/newsletter/digest", post(newsletter::send_digest))
        .route(
            "/api/contact",
            get(contact::list_messages).post(contact::send_message),
        )
        .route("/api/contact/{id}/read", post(contact::mark_read))
        .route(
            "/api/submissions",
            get(submissions::list_submissions).post(submissions::submit),
        )
        .route("/api/submissions/{id}", put(submissions::review_submission))
        .route("/api/hero/video", get(hero::get_video).put(hero::set_video))
        .route(
            "/api/hero/categories",
            get(hero::get_categories).put(hero::set_categories),
        )
        .route("/api/settings", get(settings::list_settings))
        .route(
            "/api/settings/{key}",
            get(settings::get_setting)
                .put(settings::set_setting)
                .delete(settings::delete_setting),
        )
        .route("/api/categories", get(categories::list_categories))
}

/// Router without the global IP limiter, with permissive CORS. Requests do
/// not need a socket address, which suits in-process tests.
pub fn build_router(state: HttpState) -> Router {
    api_routes()
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&[]))
        .layer(Extension(state))
}

/// Production router: configured CORS origins, response compression and the
/// global per-IP limiter. Serve it with `into_make_service_with_connect_info`.
pub fn build_router_with_rate_limiter(state: HttpState, options: &RouterOptions) -> Router {
    let router = api_routes()
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&options.allowed_origins))
        .layer(Extension(state));

    match governor_layer(options.governor_per_second, options.governor_burst) {
        Some(layer) => router.layer(layer),
        None => {
            warn!("invalid governor settings; global rate limit disabled");
            router
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

pub async fn health() -> ApiResponse<StatusResponse> {
    ApiResponse::ok(StatusResponse { status: "ok" })
}
