use axum::http::{Method, StatusCode};
use serde_json::json;

mod support;
use support::*;

#[tokio::test]
async fn drafts_are_hidden_until_published() {
    let app = TestApp::spawn().await;

    let (status, body) = app
        .call(Method::POST, "/api/articles", Some(ADMIN_TOKEN), Some(english_article("Grace Abounds")))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let created = data(&body);
    assert_eq!(created["slug"], "grace-abounds");
    assert_eq!(created["type"], "article");
    assert_eq!(created["published"], false);
    assert_eq!(created["displayMode"], "englishOnly");
    assert_eq!(created["author"]["name"], "Admin");
    assert_eq!(created["tags"], json!(["hope", "prayer"]));

    let response = app
        .send(Method::GET, "/api/articles/grace-abounds", None, None)
        .await;
    assert_error_response(response, StatusCode::NOT_FOUND, "article not found").await;

    let (status, _) = app
        .call(Method::GET, "/api/articles/grace-abounds", Some(AUTHOR_TOKEN), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .call(Method::POST, "/api/articles/1/publish", Some(EDITOR_TOKEN), Some(json!({})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(data(&body)["published"], true);
    assert!(data(&body)["publishedAt"].is_string());

    let (status, body) = app.call(Method::GET, "/api/articles/1", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(data(&body)["title"], "Grace Abounds");
}

#[tokio::test]
async fn repeated_titles_get_numbered_slugs() {
    let app = TestApp::spawn().await;

    let mut slugs = Vec::new();
    for _ in 0..3 {
        let (status, body) = app
            .call(Method::POST, "/api/articles", Some(ADMIN_TOKEN), Some(english_article("Grace")))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        slugs.push(data(&body)["slug"].as_str().unwrap().to_string());
    }
    assert_eq!(slugs, ["grace", "grace-1", "grace-2"]);

    let (_, body) = app
        .call(Method::POST, "/api/poems", Some(ADMIN_TOKEN), Some(english_article("Grace")))
        .await;
    assert_eq!(data(&body)["slug"], "grace", "poems have their own slug namespace");
}

#[tokio::test]
async fn create_requires_authentication_and_capabilities() {
    let app = TestApp::spawn().await;

    let response = app
        .send(Method::POST, "/api/articles", None, Some(english_article("Anonymous")))
        .await;
    assert_error_response(response, StatusCode::UNAUTHORIZED, "missing Authorization header").await;

    let response = app
        .send(Method::POST, "/api/articles", Some("bogus"), Some(english_article("Bogus")))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .send(
            Method::POST,
            "/api/articles",
            Some(AUTHOR_TOKEN),
            Some(published(english_article("Too Soon"))),
        )
        .await;
    assert_error_response(response, StatusCode::FORBIDDEN, "missing capability content:publish").await;

    let (status, body) = app
        .call(Method::POST, "/api/articles", Some(AUTHOR_TOKEN), Some(english_article("My Draft")))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(data(&body)["authorId"], 3);
}

#[tokio::test]
async fn incomplete_drafts_are_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .send(
            Method::POST,
            "/api/articles",
            Some(ADMIN_TOKEN),
            Some(json!({ "languageMode": "bilingual", "title": "Half", "content": "Only English", "category": "faith" })),
        )
        .await;
    assert_error_response(
        response,
        StatusCode::BAD_REQUEST,
        "missing required fields: titleAm, contentAm",
    )
    .await;

    let response = app
        .send(
            Method::POST,
            "/api/articles",
            Some(ADMIN_TOKEN),
            Some(json!({ "title": "No category", "content": "Body" })),
        )
        .await;
    assert_error_response(response, StatusCode::BAD_REQUEST, "category is required").await;

    let response = app
        .send(Method::POST, "/api/articles", Some(ADMIN_TOKEN), Some(json!({ "title": 5 })))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn language_modes_shape_the_display() {
    let app = TestApp::spawn().await;

    let (status, body) = app
        .call(Method::POST, "/api/poems", Some(ADMIN_TOKEN), Some(amharic_poem("የተስፋ ቃል")))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let poem = data(&body);
    assert_eq!(poem["displayMode"], "amharicOnly");
    assert_eq!(poem["title"], serde_json::Value::Null);
    assert!(
        poem["slug"].as_str().unwrap().starts_with("poem-"),
        "a title without latin letters falls back to a generated slug"
    );

    let (_, body) = app
        .call(
            Method::POST,
            "/api/articles",
            Some(ADMIN_TOKEN),
            Some(bilingual_article("Family Table", "የቤተሰብ ማዕድ")),
        )
        .await;
    let article = data(&body);
    assert_eq!(article["displayMode"], "bilingual");
    assert_eq!(article["sections"].as_array().unwrap().len(), 2);
    assert_eq!(article["categoryColor"].as_str().map(str::is_empty), Some(false));
}

#[tokio::test]
async fn listing_filters_and_paginates() {
    let app = TestApp::spawn().await;
    for title in ["First", "Second", "Third"] {
        let (status, _) = app
            .call(Method::POST, "/api/articles", Some(ADMIN_TOKEN), Some(published(english_article(title))))
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }
    app.call(Method::POST, "/api/articles", Some(ADMIN_TOKEN), Some(english_article("Hidden Draft")))
        .await;

    let (status, body) = app.call(Method::GET, "/api/articles?limit=2", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let page = data(&body);
    assert_eq!(page["total"], 3);
    assert_eq!(page["limit"], 2);
    assert_eq!(page["skip"], 0);
    assert_eq!(page["items"].as_array().unwrap().len(), 2);
    assert_eq!(page["items"][0]["title"], "Third");

    let (_, body) = app
        .call(Method::GET, "/api/articles?limit=2&skip=2", None, None)
        .await;
    assert_eq!(data(&body)["items"].as_array().unwrap().len(), 1);

    let (_, body) = app.call(Method::GET, "/api/articles?q=second", None, None).await;
    assert_eq!(data(&body)["total"], 1);

    let (_, body) = app
        .call(Method::GET, "/api/articles?category=culture", None, None)
        .await;
    assert_eq!(data(&body)["total"], 0);

    let response = app.send(Method::GET, "/api/articles?status=all", None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let (status, body) = app
        .call(Method::GET, "/api/articles?status=draft", Some(AUTHOR_TOKEN), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(data(&body)["total"], 1);
    assert_eq!(data(&body)["items"][0]["title"], "Hidden Draft");

    let response = app
        .send(Method::GET, "/api/articles?category=unknown", None, None)
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn engagement_counters_only_count_published_items() {
    let app = TestApp::spawn().await;
    app.call(Method::POST, "/api/articles", Some(ADMIN_TOKEN), Some(published(english_article("Shared"))))
        .await;
    app.call(Method::POST, "/api/articles", Some(ADMIN_TOKEN), Some(english_article("Unseen")))
        .await;

    for expected in 1..=2 {
        let (status, body) = app.call(Method::POST, "/api/articles/1/view", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(data(&body)["count"], expected);
    }
    let (_, body) = app.call(Method::POST, "/api/articles/1/like", None, None).await;
    assert_eq!(data(&body)["count"], 1);
    let (_, body) = app.call(Method::POST, "/api/articles/1/share", None, None).await;
    assert_eq!(data(&body)["count"], 1);

    let response = app.send(Method::POST, "/api/articles/2/view", None, None).await;
    assert_error_response(response, StatusCode::NOT_FOUND, "article not found").await;

    let (_, body) = app.call(Method::GET, "/api/articles/1", None, None).await;
    assert_eq!(data(&body)["views"], 2);
    assert_eq!(data(&body)["likes"], 1);
}

#[tokio::test]
async fn updates_rename_the_slug_and_respect_roles() {
    let app = TestApp::spawn().await;
    app.call(Method::POST, "/api/articles", Some(ADMIN_TOKEN), Some(english_article("Old Title")))
        .await;

    let response = app
        .send(Method::PUT, "/api/articles/1", Some(AUTHOR_TOKEN), Some(json!({ "title": "Mine" })))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let (status, body) = app
        .call(
            Method::PUT,
            "/api/articles/1",
            Some(EDITOR_TOKEN),
            Some(json!({ "title": "New Title", "coverImage": "https://img.example/c.jpg", "tags": ["light"] })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let updated = data(&body);
    assert_eq!(updated["slug"], "new-title");
    assert_eq!(updated["content"], "The full text of Old Title.");
    assert_eq!(updated["coverImage"], "https://img.example/c.jpg");
    assert_eq!(updated["tags"], json!(["light"]));

    let (_, body) = app
        .call(Method::PUT, "/api/articles/1", Some(EDITOR_TOKEN), Some(json!({ "coverImage": null })))
        .await;
    assert_eq!(data(&body)["coverImage"], serde_json::Value::Null);

    let response = app
        .send(Method::PUT, "/api/articles/99", Some(EDITOR_TOKEN), Some(json!({ "title": "x" })))
        .await;
    assert_error_response(response, StatusCode::NOT_FOUND, "article not found").await;
}

#[tokio::test]
async fn author_can_be_named_or_referenced() {
    let app = TestApp::spawn().await;

    let mut draft = english_article("Guest Post");
    draft["authorName"] = json!("Guest  Writer");
    let (_, body) = app
        .call(Method::POST, "/api/articles", Some(ADMIN_TOKEN), Some(draft.clone()))
        .await;
    let first_author = data(&body)["authorId"].clone();
    assert_eq!(data(&body)["author"]["name"], "Guest Writer");

    draft["title"] = json!("Second Guest Post");
    let (_, body) = app
        .call(Method::POST, "/api/articles", Some(ADMIN_TOKEN), Some(draft))
        .await;
    assert_eq!(data(&body)["authorId"], first_author);

    let mut draft = english_article("Ghost");
    draft["authorId"] = json!(999);
    let response = app
        .send(Method::POST, "/api/articles", Some(ADMIN_TOKEN), Some(draft))
        .await;
    assert_error_response(response, StatusCode::BAD_REQUEST, "author 999 does not exist").await;

    let mut draft = english_article("Orphan");
    draft["issueId"] = json!(42);
    let response = app
        .send(Method::POST, "/api/articles", Some(ADMIN_TOKEN), Some(draft))
        .await;
    assert_error_response(response, StatusCode::BAD_REQUEST, "issue 42 does not exist").await;
}

#[tokio::test]
async fn delete_removes_content() {
    let app = TestApp::spawn().await;
    app.call(Method::POST, "/api/poems", Some(ADMIN_TOKEN), Some(published(english_article("Psalm"))))
        .await;

    let response = app.send(Method::DELETE, "/api/poems/1", Some(AUTHOR_TOKEN), None).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let (status, body) = app.call(Method::DELETE, "/api/poems/1", Some(ADMIN_TOKEN), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(data(&body)["status"], "deleted");

    let response = app.send(Method::GET, "/api/poems/1", None, None).await;
    assert_error_response(response, StatusCode::NOT_FOUND, "poem not found").await;
}

#[tokio::test]
async fn publishing_announces_to_subscribers() {
    let app = TestApp::spawn().await;
    let (status, _) = app
        .call(Method::POST, "/api/newsletter", None, Some(json!({ "email": "reader@example.org" })))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(app.mailer.sent().len(), 1, "welcome e-mail");

    app.call(Method::POST, "/api/poems", Some(ADMIN_TOKEN), Some(english_article("Morning Hymn")))
        .await;
    assert_eq!(app.mailer.sent().len(), 1, "drafts are not announced");

    app.call(Method::POST, "/api/poems/1/publish", Some(ADMIN_TOKEN), Some(json!({ "published": true })))
        .await;
    let sent = app.mailer.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[1].to, "reader@example.org");
    assert_eq!(sent[1].subject, "New poem: Morning Hymn");
    assert!(sent[1].text.contains("https://magazine.example"));

    app.call(Method::POST, "/api/poems/1/publish", Some(ADMIN_TOKEN), Some(json!({})))
        .await;
    assert_eq!(app.mailer.sent().len(), 2, "already published");
}

#[tokio::test]
async fn featured_flag_filters_the_list() {
    let app = TestApp::spawn().await;
    for title in ["Plain", "Spotlight"] {
        app.call(Method::POST, "/api/articles", Some(ADMIN_TOKEN), Some(published(english_article(title))))
            .await;
    }
    let (status, body) = app
        .call(Method::POST, "/api/articles/2/featured", Some(EDITOR_TOKEN), Some(json!({})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(data(&body)["featured"], true);

    let (_, body) = app
        .call(Method::GET, "/api/articles?featured=true", None, None)
        .await;
    assert_eq!(data(&body)["total"], 1);
    assert_eq!(data(&body)["items"][0]["title"], "Spotlight");
}

#[tokio::test]
async fn all_digit_slugs_resolve_by_slug() {
    let app = TestApp::spawn().await;
    let (status, body) = app
        .call(Method::POST, "/api/poems", Some(ADMIN_TOKEN), Some(published(english_article("1984"))))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(data(&body)["slug"], "1984");
    let id = data(&body)["id"].clone();

    let (status, body) = app.call(Method::GET, "/api/poems/1984", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(data(&body)["id"], id);
    assert_eq!(data(&body)["title"], "1984");

    let (status, body) = app.call(Method::GET, &format!("/api/poems/{id}"), None, None).await;
    assert_eq!(status, StatusCode::OK, "ids still resolve");
    assert_eq!(data(&body)["id"], id);

    let response = app.send(Method::GET, "/api/poems/2024", None, None).await;
    assert_error_response(response, StatusCode::NOT_FOUND, "poem not found").await;
}

#[tokio::test]
async fn unpublishing_allows_a_partial_language_pair() {
    let app = TestApp::spawn().await;
    app.call(
        Method::POST,
        "/api/articles",
        Some(EDITOR_TOKEN),
        Some(published(bilingual_article("Family Table", "የቤተሰብ ማዕድ"))),
    )
    .await;

    let response = app
        .send(
            Method::PUT,
            "/api/articles/1",
            Some(EDITOR_TOKEN),
            Some(json!({ "content": "", "titleAm": "" })),
        )
        .await;
    assert_error_response(
        response,
        StatusCode::BAD_REQUEST,
        "published content needs a title and body in at least one language",
    )
    .await;

    let (status, body) = app
        .call(
            Method::PUT,
            "/api/articles/1",
            Some(EDITOR_TOKEN),
            Some(json!({ "published": false, "content": "", "titleAm": "" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(data(&body)["published"], false);
    assert_eq!(data(&body)["title"], "Family Table");

    let response = app
        .send(Method::PUT, "/api/articles/1", Some(EDITOR_TOKEN), Some(json!({ "published": true })))
        .await;
    assert_error_response(
        response,
        StatusCode::BAD_REQUEST,
        "published content needs a title and body in at least one language",
    )
    .await;
}
