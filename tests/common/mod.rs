#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use refero::infrastructure::memory::MemoryDatabase;
use refero::routes::router;
use refero::state::AppState;
use refero::utils::short_code::ShortCodeGenerator;
use serde_json::{Value, json};

/// Generator that hands every URL the same code.
pub struct FixedCode(pub &'static str);

impl ShortCodeGenerator for FixedCode {
    fn generate(&self, _url: &str) -> String {
        self.0.to_string()
    }
}

pub fn create_test_state() -> AppState<MemoryDatabase> {
    AppState::new(MemoryDatabase::new())
}

pub fn make_server(state: AppState<MemoryDatabase>) -> TestServer {
    TestServer::new(router(state, &["http://localhost:5173".to_string()])).unwrap()
}

pub fn test_server() -> TestServer {
    make_server(create_test_state())
}

pub fn link_body(url: &str, category_ids: &[&str]) -> Value {
    json!({
        "url": url,
        "title": "Useful link",
        "description": "Something worth reading later",
        "categoryIds": category_ids,
    })
}

/// Creates a category over HTTP and returns its id.
pub async fn create_category(server: &TestServer, name: &str, parent_id: Option<&str>) -> String {
    let response = server
        .post("/api/v1/category")
        .json(&json!({
            "name": name,
            "description": "Category used in tests",
            "parentId": parent_id,
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()["id"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Creates a link over HTTP and returns the response body.
pub async fn create_link(server: &TestServer, url: &str, category_ids: &[&str]) -> Value {
    let response = server
        .post("/api/v1/link")
        .json(&link_body(url, category_ids))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}

pub fn sorted_ids(value: &Value) -> Vec<String> {
    let mut ids: Vec<String> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();
    ids.sort();
    ids
}

pub fn shared<T: ShortCodeGenerator + 'static>(codes: T) -> Arc<dyn ShortCodeGenerator> {
    Arc::new(codes)
}
