mod common;

use axum::http::StatusCode;
use refero::infrastructure::memory::MemoryDatabase;
use refero::state::AppState;
use serde_json::{Value, json};

// ─── POST /link ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_link_success() {
    let server = common::test_server();
    let rust = common::create_category(&server, "Rust", None).await;

    let body = common::create_link(&server, "https://www.rust-lang.org", &[&rust]).await;

    assert_eq!(body["url"], "https://www.rust-lang.org");
    assert_eq!(body["title"], "Useful link");
    assert_eq!(body["shortCode"].as_str().unwrap().len(), 8);
    assert_eq!(common::sorted_ids(&body["categoryIds"]), vec![rust]);
}

#[tokio::test]
async fn test_create_link_prepends_scheme() {
    let server = common::test_server();

    let body = common::create_link(&server, "docs.rs", &[]).await;

    assert_eq!(body["url"], "https://docs.rs");
    assert_eq!(body["categoryIds"], json!([]));
}

#[tokio::test]
async fn test_create_same_url_merges_categories() {
    let server = common::test_server();
    let a = common::create_category(&server, "Alpha", None).await;
    let b = common::create_category(&server, "Bravo", None).await;
    let c = common::create_category(&server, "Charlie", None).await;

    let first = common::create_link(&server, "https://example.com", &[&a, &b]).await;
    let second = common::create_link(&server, "https://example.com", &[&b, &c]).await;

    assert_eq!(first["id"], second["id"]);
    let mut expected = vec![a, b, c];
    expected.sort();
    assert_eq!(common::sorted_ids(&second["categoryIds"]), expected);

    let all = server.get("/api/v1/link").await.json::<Value>();
    assert_eq!(all.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_link_validation_errors() {
    let server = common::test_server();

    let short_title = server
        .post("/api/v1/link")
        .json(&json!({
            "url": "https://example.com",
            "title": "abc",
            "description": "Something worth reading later",
        }))
        .await;
    short_title.assert_status_bad_request();
    short_title.assert_json(&json!({ "error": "title must be at least 4 characters" }));

    let bad_url = server
        .post("/api/v1/link")
        .json(&common::link_body("ftp://example.com", &[]))
        .await;
    bad_url.assert_status_bad_request();
    bad_url.assert_json(&json!({ "error": "url must be a valid URL" }));

    let newline_in_host = server
        .post("/api/v1/link")
        .json(&common::link_body("https://exa\nmple.com/path", &[]))
        .await;
    newline_in_host.assert_status_bad_request();
    newline_in_host.assert_json(&json!({ "error": "url must be a valid URL" }));

    let bad_id = server
        .post("/api/v1/link")
        .json(&common::link_body("https://example.com", &["not-a-uuid"]))
        .await;
    bad_id.assert_status_bad_request();
    bad_id.assert_json(&json!({ "error": "categoryIds must be a valid ID" }));
}

#[tokio::test]
async fn test_create_link_malformed_json() {
    let server = common::test_server();

    let response = server
        .post("/api/v1/link")
        .text("{\"url\": ")
        .content_type("application/json")
        .await;

    response.assert_status_bad_request();
    assert!(response.json::<Value>()["error"].is_string());
}

#[tokio::test]
async fn test_create_link_unknown_category_writes_nothing() {
    let server = common::test_server();

    let response = server
        .post("/api/v1/link")
        .json(&common::link_body(
            "https://example.com",
            &["6f1c2a9e-4b8d-4c3a-9f7e-2d5b8a1c3e4f"],
        ))
        .await;

    response.assert_status_bad_request();
    assert_eq!(server.get("/api/v1/link").await.json::<Value>(), json!([]));
}

#[tokio::test]
async fn test_create_link_short_code_collision() {
    let state = AppState::with_code_generator(
        MemoryDatabase::new(),
        common::shared(common::FixedCode("samecode")),
    );
    let server = common::make_server(state);

    common::create_link(&server, "https://one.example.com", &[]).await;
    let response = server
        .post("/api/v1/link")
        .json(&common::link_body("https://two.example.com", &[]))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    response.assert_json(&json!({ "error": "Short code collision, link could not be created" }));
}

// ─── GET /link ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_links_pagination() {
    let server = common::test_server();
    for i in 0..5 {
        common::create_link(&server, &format!("https://example.com/{i}"), &[]).await;
    }

    let page = server
        .get("/api/v1/link")
        .add_query_param("limit", 2)
        .add_query_param("offset", 1)
        .await;
    page.assert_status_ok();
    assert_eq!(page.json::<Value>().as_array().unwrap().len(), 2);

    let everything = server.get("/api/v1/link").await.json::<Value>();
    assert_eq!(everything.as_array().unwrap().len(), 5);
    assert!(everything[0].get("categoryIds").is_none());
}

#[tokio::test]
async fn test_list_links_rejects_bad_limit() {
    let server = common::test_server();

    server
        .get("/api/v1/link")
        .add_query_param("limit", 0)
        .await
        .assert_status_bad_request();

    server
        .get("/api/v1/link")
        .add_query_param("limit", "many")
        .await
        .assert_status_bad_request();

    server
        .get("/api/v1/link")
        .add_query_param("offset", -1)
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn test_uncategorized_links() {
    let server = common::test_server();
    let rust = common::create_category(&server, "Rust", None).await;
    common::create_link(&server, "https://crates.io", &[&rust]).await;
    let loose = common::create_link(&server, "https://example.com", &[]).await;

    let body = server
        .get("/api/v1/link/uncategorized")
        .await
        .json::<Value>();

    let links = body.as_array().unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0]["id"], loose["id"]);
}

// ─── GET /link/{id} ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_link() {
    let server = common::test_server();
    let rust = common::create_category(&server, "Rust", None).await;
    let created = common::create_link(&server, "https://crates.io", &[&rust]).await;
    let id = created["id"].as_str().unwrap();

    let response = server.get(&format!("/api/v1/link/{id}")).await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["url"], "https://crates.io");
    assert_eq!(common::sorted_ids(&body["categoryIds"]), vec![rust]);

    server
        .get("/api/v1/link/00000000-0000-0000-0000-000000000000")
        .await
        .assert_status_not_found();

    let bad = server.get("/api/v1/link/42").await;
    bad.assert_status_bad_request();
    bad.assert_json(&json!({ "error": "id must be a valid ID" }));
}

#[tokio::test]
async fn test_link_categories() {
    let server = common::test_server();
    let web = common::create_category(&server, "Web Development", None).await;
    let rust = common::create_category(&server, "Rust", None).await;
    let created = common::create_link(&server, "https://axum.rs", &[&web, &rust]).await;
    let id = created["id"].as_str().unwrap();

    let body = server
        .get(&format!("/api/v1/link/{id}/categories"))
        .await
        .json::<Value>();

    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Rust", "Web Development"]);

    server
        .get("/api/v1/link/00000000-0000-0000-0000-000000000000/categories")
        .await
        .assert_status_not_found();
}

// ─── PUT /link/{id} ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_update_link_replaces_categories() {
    let server = common::test_server();
    let a = common::create_category(&server, "Alpha", None).await;
    let b = common::create_category(&server, "Bravo", None).await;
    let c = common::create_category(&server, "Charlie", None).await;
    let created = common::create_link(&server, "https://example.com", &[&a, &b]).await;
    let id = created["id"].as_str().unwrap();

    let response = server
        .put(&format!("/api/v1/link/{id}"))
        .json(&json!({ "title": "Renamed link", "categoryIds": [b, c] }))
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["title"], "Renamed link");
    assert_eq!(body["description"], "Something worth reading later");
    let mut expected = vec![b.clone(), c.clone()];
    expected.sort();
    assert_eq!(common::sorted_ids(&body["categoryIds"]), expected);

    let fetched = server
        .get(&format!("/api/v1/link/{id}"))
        .await
        .json::<Value>();
    assert_eq!(common::sorted_ids(&fetched["categoryIds"]), expected);
}

#[tokio::test]
async fn test_update_link_without_categories_clears_them() {
    let server = common::test_server();
    let a = common::create_category(&server, "Alpha", None).await;
    let created = common::create_link(&server, "https://example.com", &[&a]).await;
    let id = created["id"].as_str().unwrap();

    server
        .put(&format!("/api/v1/link/{id}"))
        .json(&json!({}))
        .await
        .assert_status_ok();

    let uncategorized = server
        .get("/api/v1/link/uncategorized")
        .await
        .json::<Value>();
    assert_eq!(uncategorized.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_link_errors() {
    let server = common::test_server();
    let created = common::create_link(&server, "https://example.com", &[]).await;
    let id = created["id"].as_str().unwrap();

    server
        .put("/api/v1/link/00000000-0000-0000-0000-000000000000")
        .json(&json!({ "title": "Renamed link" }))
        .await
        .assert_status_not_found();

    server
        .put(&format!("/api/v1/link/{id}"))
        .json(&json!({ "description": "short" }))
        .await
        .assert_status_bad_request();

    let unknown_category = server
        .put(&format!("/api/v1/link/{id}"))
        .json(&json!({
            "title": "Renamed link",
            "categoryIds": ["00000000-0000-0000-0000-000000000001"],
        }))
        .await;
    unknown_category.assert_status_bad_request();

    let unchanged = server
        .get(&format!("/api/v1/link/{id}"))
        .await
        .json::<Value>();
    assert_eq!(unchanged["title"], "Useful link");
}

// ─── DELETE /link/{id} ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_link() {
    let server = common::test_server();
    let created = common::create_link(&server, "https://example.com", &[]).await;
    let id = created["id"].as_str().unwrap();

    let response = server.delete(&format!("/api/v1/link/{id}")).await;
    response.assert_status_ok();
    response.assert_json(&json!({ "message": "Link deleted" }));

    server
        .delete(&format!("/api/v1/link/{id}"))
        .await
        .assert_status_not_found();
}
