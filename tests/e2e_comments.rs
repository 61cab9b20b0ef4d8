use axum::http::{Method, StatusCode, header::RETRY_AFTER};
use serde_json::{Value, json};

mod support;
use support::*;

async fn app_with_published_article() -> TestApp {
    let app = TestApp::spawn().await;
    let (status, _) = app
        .call(Method::POST, "/api/articles", Some(ADMIN_TOKEN), Some(published(english_article("Open Doors"))))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    app
}

fn comment(body: &str) -> Value {
    json!({
        "contentType": "article",
        "contentId": 1,
        "authorName": "Reader",
        "authorEmail": "reader@example.org",
        "body": body,
    })
}

#[tokio::test]
async fn comments_wait_for_moderation() {
    let app = app_with_published_article().await;

    let (status, body) = app
        .call(Method::POST, "/api/comments", None, Some(comment("Amen!")))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(data(&body)["status"], "pending");
    assert_eq!(data(&body)["contentType"], "article");

    let (status, body) = app
        .call(Method::GET, "/api/comments?contentType=article&contentId=1", None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(data(&body), &json!([]));

    let (status, body) = app
        .call(Method::GET, "/api/comments?status=pending", Some(EDITOR_TOKEN), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(data(&body).as_array().unwrap().len(), 1);

    let (status, body) = app
        .call(Method::PUT, "/api/comments/1", Some(EDITOR_TOKEN), Some(json!({ "status": "approved" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(data(&body)["status"], "approved");

    let (_, body) = app
        .call(Method::GET, "/api/comments?contentType=article&contentId=1", None, None)
        .await;
    let thread = data(&body).as_array().unwrap();
    assert_eq!(thread.len(), 1);
    assert_eq!(thread[0]["body"], "Amen!");
    assert_eq!(thread[0]["replies"], json!([]));
}

#[tokio::test]
async fn replies_nest_under_their_parent() {
    let app = app_with_published_article().await;

    app.call(Method::POST, "/api/comments", None, Some(comment("First thought")))
        .await;
    let mut reply = comment("A reply");
    reply["parentId"] = json!(1);
    let (status, _) = app.call(Method::POST, "/api/comments", None, Some(reply)).await;
    assert_eq!(status, StatusCode::CREATED);

    for id in [1, 2] {
        app.call(
            Method::PUT,
            &format!("/api/comments/{id}"),
            Some(ADMIN_TOKEN),
            Some(json!({ "status": "approved" })),
        )
        .await;
    }

    let (_, body) = app
        .call(Method::GET, "/api/comments?contentType=article&contentId=1", None, None)
        .await;
    let thread = data(&body).as_array().unwrap();
    assert_eq!(thread.len(), 1);
    assert_eq!(thread[0]["replies"][0]["body"], "A reply");
    assert_eq!(thread[0]["replies"][0]["parentId"], 1);
}

#[tokio::test]
async fn comments_need_a_published_target_and_a_body() {
    let app = TestApp::spawn().await;
    app.call(Method::POST, "/api/articles", Some(ADMIN_TOKEN), Some(english_article("Draft")))
        .await;

    let response = app
        .send(Method::POST, "/api/comments", None, Some(comment("Too early")))
        .await;
    assert_error_response(response, StatusCode::NOT_FOUND, "article not found").await;

    let app = app_with_published_article().await;
    let response = app
        .send(Method::POST, "/api/comments", None, Some(comment("   ")))
        .await;
    assert_error_response(response, StatusCode::BAD_REQUEST, "comment cannot be empty").await;

    let mut orphan = comment("Reply to nothing");
    orphan["parentId"] = json!(77);
    let response = app.send(Method::POST, "/api/comments", None, Some(orphan)).await;
    assert_error_response(response, StatusCode::BAD_REQUEST, "parent comment does not exist").await;
}

#[tokio::test]
async fn moderation_requires_the_capability() {
    let app = app_with_published_article().await;
    app.call(Method::POST, "/api/comments", None, Some(comment("Hello")))
        .await;

    let response = app.send(Method::GET, "/api/comments", None, None).await;
    assert_error_response(
        response,
        StatusCode::UNAUTHORIZED,
        "contentType and contentId are required",
    )
    .await;

    let response = app
        .send(Method::GET, "/api/comments?status=pending", Some(AUTHOR_TOKEN), None)
        .await;
    assert_error_response(response, StatusCode::FORBIDDEN, "missing capability comments:moderate").await;

    let response = app
        .send(Method::DELETE, "/api/comments/1", Some(AUTHOR_TOKEN), None)
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let (status, body) = app
        .call(Method::DELETE, "/api/comments/1", Some(EDITOR_TOKEN), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(data(&body)["status"], "deleted");

    let response = app
        .send(Method::DELETE, "/api/comments/1", Some(EDITOR_TOKEN), None)
        .await;
    assert_error_response(response, StatusCode::NOT_FOUND, "comment not found").await;
}

#[tokio::test]
async fn sixth_comment_in_a_window_is_rate_limited() {
    let app = app_with_published_article().await;

    for n in 0..5 {
        let (status, _) = app
            .call(Method::POST, "/api/comments", None, Some(comment(&format!("Comment {n}"))))
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let response = app
        .send(Method::POST, "/api/comments", None, Some(comment("One too many")))
        .await;
    assert_eq!(response.headers()[RETRY_AFTER], "900");
    assert_error_response(
        response,
        StatusCode::TOO_MANY_REQUESTS,
        "too many requests, please try again later",
    )
    .await;

    // Other forms keep their own budget.
    let (status, _) = app
        .call(Method::POST, "/api/newsletter", None, Some(json!({ "email": "late@example.org" })))
        .await;
    assert_eq!(status, StatusCode::CREATED);
}
