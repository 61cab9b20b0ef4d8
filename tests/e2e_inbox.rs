use axum::http::{Method, StatusCode};
use serde_json::json;

mod support;
use support::*;

#[tokio::test]
async fn contact_messages_reach_the_inbox() {
    let app = TestApp::spawn().await;

    let (status, body) = app
        .call(
            Method::POST,
            "/api/contact",
            None,
            Some(json!({
                "name": "  Hana ",
                "email": "hana@example.org",
                "subject": "Subscription",
                "message": "How do I get the printed edition?",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(data(&body)["name"], "Hana");
    assert_eq!(data(&body)["read"], false);

    app.call(
        Method::POST,
        "/api/contact",
        None,
        Some(json!({ "name": "Dawit", "email": "dawit@example.org", "message": "Thank you!" })),
    )
    .await;

    let response = app.send(Method::GET, "/api/contact", Some(AUTHOR_TOKEN), None).await;
    assert_error_response(response, StatusCode::FORBIDDEN, "missing capability inbox:read").await;

    let (_, body) = app.call(Method::GET, "/api/contact", Some(EDITOR_TOKEN), None).await;
    let messages = data(&body).as_array().unwrap();
    assert_eq!(messages.len(), 2);

    let (status, body) = app
        .call(Method::POST, "/api/contact/1/read", Some(EDITOR_TOKEN), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(data(&body)["read"], true);

    let response = app
        .send(Method::POST, "/api/contact/99/read", Some(EDITOR_TOKEN), None)
        .await;
    assert_error_response(response, StatusCode::NOT_FOUND, "message not found").await;
}

#[tokio::test]
async fn contact_form_validates_its_fields() {
    let app = TestApp::spawn().await;

    let response = app
        .send(
            Method::POST,
            "/api/contact",
            None,
            Some(json!({ "name": "Hana", "email": "hana@example.org", "message": "  " })),
        )
        .await;
    assert_error_response(response, StatusCode::BAD_REQUEST, "message is required").await;

    let response = app
        .send(
            Method::POST,
            "/api/contact",
            None,
            Some(json!({ "name": "Hana", "email": "nowhere", "message": "Hello" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .send(Method::POST, "/api/contact", None, Some(json!({ "name": "Hana" })))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn submissions_are_reviewed_by_editors() {
    let app = TestApp::spawn().await;

    let (status, body) = app
        .call(
            Method::POST,
            "/api/submissions",
            None,
            Some(json!({
                "name": "Mekdes",
                "email": "mekdes@example.org",
                "type": "poem",
                "title": "ንጋት",
                "content": "ብርሃን ወጣ",
                "language": "am",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(data(&body)["type"], "poem");
    assert_eq!(data(&body)["language"], "am");
    assert_eq!(data(&body)["status"], "pending");

    let (_, body) = app
        .call(
            Method::POST,
            "/api/submissions",
            None,
            Some(json!({
                "name": "Yonas",
                "email": "yonas@example.org",
                "type": "article",
                "title": "Youth and Faith",
                "content": "An essay.",
            })),
        )
        .await;
    assert_eq!(data(&body)["language"], "en", "language defaults to English");

    let response = app
        .send(Method::PUT, "/api/submissions/1", Some(AUTHOR_TOKEN), Some(json!({ "status": "accepted" })))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let (status, body) = app
        .call(Method::PUT, "/api/submissions/1", Some(EDITOR_TOKEN), Some(json!({ "status": "accepted" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(data(&body)["status"], "accepted");

    let (_, body) = app
        .call(Method::GET, "/api/submissions?status=pending", Some(EDITOR_TOKEN), None)
        .await;
    let pending = data(&body).as_array().unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0]["title"], "Youth and Faith");

    let (_, body) = app.call(Method::GET, "/api/submissions", Some(ADMIN_TOKEN), None).await;
    assert_eq!(data(&body).as_array().unwrap().len(), 2);

    let response = app
        .send(Method::PUT, "/api/submissions/42", Some(EDITOR_TOKEN), Some(json!({ "status": "rejected" })))
        .await;
    assert_error_response(response, StatusCode::NOT_FOUND, "submission not found").await;
}

#[tokio::test]
async fn submissions_need_a_title_and_body() {
    let app = TestApp::spawn().await;
    let response = app
        .send(
            Method::POST,
            "/api/submissions",
            None,
            Some(json!({
                "name": "Yonas",
                "email": "yonas@example.org",
                "type": "article",
                "title": "",
                "content": "Body",
            })),
        )
        .await;
    assert_error_response(response, StatusCode::BAD_REQUEST, "title is required").await;
}
